//! Rejection signals of the rules engine.
//!
//! Every variant is a request rejection, not a crash. A failed validation never
//! leaves the board partially mutated.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The named starting square does not exist on this board
    #[error("Invalid starting position: {0}")]
    InvalidStartingPosition(String),

    /// The named target square does not exist on this board
    #[error("Target square {0} is not a valid square")]
    InvalidTargetPosition(String),

    /// Setup data referenced a letter outside `KQBNRP` / `kqbnrp`
    #[error("Invalid piece name given: {0:?}")]
    InvalidPieceName(char),

    #[error("No piece in starting square {0}")]
    EmptySquare(String),

    #[error("Invalid move for indicated piece: {from} to {to}")]
    IllegalMove { from: String, to: String },

    #[error("Path from {from} to {to} is blocked at {blocker}")]
    PathBlocked {
        from: String,
        to: String,
        blocker: String,
    },

    #[error("Piece on {0} belongs to the opponent")]
    OpponentsPieceChosen(String),

    #[error("King cannot move into check on {0}")]
    MoveIntoCheck(String),

    /// The tracer walked off the board before reaching the target
    #[error("No straight path from {from} to {to}")]
    NoPath { from: String, to: String },

    #[error("Invalid board size {columns}x{rows} (each side must be 1 to 26)")]
    InvalidBoardSize { columns: u8, rows: u8 },

    /// Setup tried to place a second piece on a square
    #[error("Square {0} is already occupied")]
    SquareOccupied(String),

    /// Handle of a piece that has been captured or never existed
    #[error("No piece with id {0}")]
    UnknownPiece(usize),
}

/// Result type alias for rules engine operations
pub type ChessResult<T> = Result<T, ChessError>;
