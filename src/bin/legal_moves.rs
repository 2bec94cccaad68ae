//! Query and apply moves on a board from the command line
//!
//! Usage:
//!   cargo run --bin legal_moves -- --moves "e2e4 e7e5 g1f3" --square f1
//!   cargo run --bin legal_moves -- --layout empty --place K@e1 --place r@h2 --threats white
//!
//! Set `RUST_LOG=graph_chess=debug` to see every accepted and rejected move on stderr.

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use itertools::Itertools;
use tracing_subscriber::EnvFilter;

use graph_chess::board::{Board, STANDARD_LAYOUT};
use graph_chess::config::BoardConfig;
use graph_chess::types::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Layout {
    Standard,
    Empty,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "legal_moves")]
#[command(about = "Validate moves and list legal destinations on a square-graph chess board")]
struct Args {
    /// Number of columns (lettered a, b, c, ...)
    #[arg(long, default_value_t = 8)]
    columns: u8,

    /// Number of rows
    #[arg(long, default_value_t = 8)]
    rows: u8,

    /// Starting placement
    #[arg(long, value_enum, default_value_t = Layout::Standard)]
    layout: Layout,

    /// Extra piece placements as LETTER@SQUARE, e.g. `Q@d4` or `n@b8`
    #[arg(long)]
    place: Vec<String>,

    /// Space separated moves such as "e2e4 e7e5", played alternately starting with white
    #[arg(short, long, default_value = "")]
    moves: String,

    /// Print the legal destinations of the piece on this square
    #[arg(short, long)]
    square: Option<String>,

    /// Print the squares threatened for this side
    #[arg(long, value_enum)]
    threats: Option<Side>,
}

fn parse_placement(placement: &str) -> Result<(char, &str)> {
    let (letter, square) = placement
        .split_once('@')
        .ok_or_else(|| eyre!("placement {placement:?} must look like LETTER@SQUARE"))?;
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok((c, square)),
        _ => Err(eyre!("placement {placement:?} must name exactly one piece letter")),
    }
}

/// Split `e2e4` into `("e2", "e4")`: the target starts at the second letter.
fn split_move(mv: &str) -> Result<(&str, &str)> {
    let split = mv
        .char_indices()
        .skip(1)
        .find(|(_, c)| c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .ok_or_else(|| eyre!("move {mv:?} must look like e2e4"))?;
    Ok(mv.split_at(split))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = BoardConfig::new(args.columns, args.rows)?;
    let mut board = Board::new(config);
    if let Layout::Standard = args.layout {
        board
            .populate(STANDARD_LAYOUT)
            .wrap_err("standard layout does not fit this board")?;
    }
    let placements = args
        .place
        .iter()
        .map(|p| parse_placement(p))
        .collect::<Result<Vec<_>>>()?;
    board.populate(placements)?;

    let mut player = Color::White;
    for mv in args.moves.split_whitespace() {
        let (from, to) = split_move(mv)?;
        let record = board
            .make_move(from, to, player)
            .wrap_err_with(|| format!("{} cannot play {mv}", player.to_human()))?;
        println!("{}", record.to_human(&board));
        player = player.other_color();
    }

    if let Some(side) = args.threats {
        board.refresh_threats(side.into());
    }
    board.draw_to_terminal();

    if let Some(name) = args.square {
        let destinations = board.legal_destinations_from(&name)?;
        println!(
            "{name}: {}",
            destinations
                .iter()
                .map(|id| board.square(*id).name())
                .sorted()
                .join(" ")
        );
    }

    if args.threats.is_some() {
        println!(
            "threatened: {}",
            board
                .squares()
                .filter(|(_, square)| square.is_threatened())
                .map(|(_, square)| square.name())
                .join(" ")
        );
    }
    Ok(())
}
