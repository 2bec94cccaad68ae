//! Move legality for chess played on a graph of squares.
//!
//! The board is an adjacency graph of named squares; pieces validate their moves by
//! walking that graph. See `Board::validate_move`, `Board::legal_destinations` and
//! `Board::is_threatened` for the main entry points.

pub mod types;
pub mod error;
pub mod config;
pub mod catalog;
pub mod board;
pub mod path;
pub mod movegen;
pub mod threat;
