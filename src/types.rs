use std::fmt;

use crate::catalog::offsets_for;
use crate::error::{ChessError, ChessResult};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Uppercase letters are white pieces, lowercase letters are black pieces.
    pub fn from_case(c: char) -> ChessResult<Color> {
        if c.is_ascii_uppercase() {
            Ok(Color::White)
        } else if c.is_ascii_lowercase() {
            Ok(Color::Black)
        } else {
            Err(ChessError::InvalidPieceName(c))
        }
    }

    pub fn other_color(&self) -> Color {
        if *self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Row delta of a forward step for this color's pawns.
    pub fn forward(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    pub fn from_char(c: char) -> ChessResult<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Ok(PieceType::Pawn),
            'r' => Ok(PieceType::Rook),
            'n' => Ok(PieceType::Knight),
            'b' => Ok(PieceType::Bishop),
            'q' => Ok(PieceType::Queen),
            'k' => Ok(PieceType::King),
            _ => Err(ChessError::InvalidPieceName(c)),
        }
    }

    /// Is the piece a sliding piece (one which can move multiple square in a given direction)
    pub fn is_sliding(&self) -> bool {
        matches!(*self, PieceType::Rook | PieceType::Bishop | PieceType::Queen)
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Rook => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

/// Relative move of a piece, in columns and rows.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Offset {
    pub dcol: i8,
    pub drow: i8,
}

impl Offset {
    pub const fn new(dcol: i8, drow: i8) -> Self {
        Self { dcol, drow }
    }

    pub const fn scaled(&self, n: i8) -> Self {
        Self {
            dcol: self.dcol * n,
            drow: self.drow * n,
        }
    }
}

/// Zero-based column/row pair. `a1` is `(0, 0)`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub col: u8,
    pub row: u8,
}

impl Coord {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Apply an offset. Only the lower bound is checked here, the board knows its own size.
    pub fn offset(&self, offset: Offset) -> Option<Coord> {
        let col = u8::try_from(self.col as i16 + offset.dcol as i16).ok()?;
        let row = u8::try_from(self.row as i16 + offset.drow as i16).ok()?;
        Some(Coord { col, row })
    }

    pub fn shade(&self) -> SquareShade {
        if (self.col + self.row) % 2 == 0 {
            SquareShade::Dark
        } else {
            SquareShade::Light
        }
    }

    /// Column letter followed by the one-based row number, e.g. `e4`.
    pub fn to_name(&self) -> String {
        format!("{}{}", (b'a' + self.col) as char, self.row as u16 + 1)
    }

    /// Parse a square name such as `e4` (case insensitive). Bounds are not checked.
    pub fn from_name(name: &str) -> Option<Coord> {
        let mut chars = name.chars();
        let letter = chars.next()?.to_ascii_lowercase();
        if !letter.is_ascii_lowercase() {
            return None;
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let number: u16 = digits.parse().ok()?;
        let row = u8::try_from(number.checked_sub(1)?).ok()?;
        Some(Coord {
            col: letter as u8 - b'a',
            row,
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_name())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SquareShade {
    Light,
    Dark,
}

/// Compass direction between two squares in a straight line. North is increasing row.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn delta(&self) -> Offset {
        match self {
            Self::North => Offset::new(0, 1),
            Self::NorthEast => Offset::new(1, 1),
            Self::East => Offset::new(1, 0),
            Self::SouthEast => Offset::new(1, -1),
            Self::South => Offset::new(0, -1),
            Self::SouthWest => Offset::new(-1, -1),
            Self::West => Offset::new(-1, 0),
            Self::NorthWest => Offset::new(-1, 1),
        }
    }

    pub fn opposite(&self) -> Direction {
        Direction::ALL[(self.index() + 4) % 8]
    }

    pub fn is_diagonal(&self) -> bool {
        let delta = self.delta();
        delta.dcol != 0 && delta.drow != 0
    }

    /// Direction from `from` towards `to`, derived from the signs of the coordinate differences.
    ///
    /// The two squares need not be on a common line; the tracer reports that case.
    /// Returns `None` when both coordinates are equal.
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        let dcol = to.col.cmp(&from.col) as i8;
        let drow = to.row.cmp(&from.row) as i8;
        Direction::ALL
            .into_iter()
            .find(|d| d.delta() == Offset::new(dcol, drow))
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::North => "n",
            Self::NorthEast => "ne",
            Self::East => "e",
            Self::SouthEast => "se",
            Self::South => "s",
            Self::SouthWest => "sw",
            Self::West => "w",
            Self::NorthWest => "nw",
        }
    }
}

/// Handle of a square in the board arena.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct SquareId(pub(crate) usize);

impl SquareId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Handle of a piece in the board arena. Stays dead once the piece is captured.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) usize);

impl PieceId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
    /// Square the piece currently stands on
    pub square: SquareId,
    pub has_moved: bool,
}

impl Piece {
    pub fn from_letter(letter: char, square: SquareId) -> ChessResult<Piece> {
        Ok(Piece {
            color: Color::from_case(letter)?,
            piece_type: PieceType::from_char(letter)?,
            square,
            has_moved: false,
        })
    }

    /// Movement offsets for the piece in its current state.
    pub fn offsets(&self) -> &'static [Offset] {
        offsets_for(self.piece_type, self.color, self.has_moved)
    }

    pub fn to_letter(&self) -> char {
        let c = self.piece_type.to_char();
        if self.color == Color::White {
            c
        } else {
            c.to_ascii_lowercase()
        }
    }

    pub fn to_human(&self) -> String {
        format!("{} {}", self.color.to_human(), self.piece_type.to_human())
    }
}
