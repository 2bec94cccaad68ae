use itertools::Itertools;
use tracing::{debug, info};

use crate::config::BoardConfig;
use crate::error::{ChessError, ChessResult};
use crate::types::*;

/// Standard starting placement as ordered (piece letter, square name) pairs.
/// Uppercase letters are white, lowercase letters are black.
pub const STANDARD_LAYOUT: [(char, &str); 32] = [
    ('R', "a1"),
    ('N', "b1"),
    ('B', "c1"),
    ('Q', "d1"),
    ('K', "e1"),
    ('B', "f1"),
    ('N', "g1"),
    ('R', "h1"),
    ('P', "a2"),
    ('P', "b2"),
    ('P', "c2"),
    ('P', "d2"),
    ('P', "e2"),
    ('P', "f2"),
    ('P', "g2"),
    ('P', "h2"),
    ('p', "a7"),
    ('p', "b7"),
    ('p', "c7"),
    ('p', "d7"),
    ('p', "e7"),
    ('p', "f7"),
    ('p', "g7"),
    ('p', "h7"),
    ('r', "a8"),
    ('n', "b8"),
    ('b', "c8"),
    ('q', "d8"),
    ('k', "e8"),
    ('b', "f8"),
    ('n', "g8"),
    ('r', "h8"),
];

/// A node of the board graph.
///
/// Name, coordinate, shade and neighbors are fixed once the board is built; only the
/// occupant and the threat annotations change during play.
#[derive(Debug, Clone)]
pub struct Square {
    name: String,
    coord: Coord,
    neighbors: [Option<SquareId>; 8],
    occupant: Option<PieceId>,
    shade: SquareShade,
    threatened: bool,
    threats: Vec<PieceId>,
}

impl Square {
    fn new(coord: Coord) -> Self {
        Self {
            name: coord.to_name(),
            coord,
            neighbors: [None; 8],
            occupant: None,
            shade: coord.shade(),
            threatened: false,
            threats: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Adjacent square in `direction`, `None` at the board edge.
    pub fn neighbor(&self, direction: Direction) -> Option<SquareId> {
        self.neighbors[direction.index()]
    }

    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn shade(&self) -> SquareShade {
        self.shade
    }

    /// Set by the last `refresh_threats`.
    pub fn is_threatened(&self) -> bool {
        self.threatened
    }

    pub fn threats(&self) -> &[PieceId] {
        &self.threats
    }
}

/// Board graph: an arena of squares and an arena of pieces addressed by handles.
///
/// A square stores the handle of its occupant and a piece stores the handle of its
/// square. Captured pieces leave a dead slot so outstanding handles never alias.
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    squares: Vec<Square>,
    pieces: Vec<Option<Piece>>,
    captured: Vec<Piece>,
}

impl Board {
    /// Build an empty board graph of the configured size.
    pub fn new(config: BoardConfig) -> Self {
        let squares = (0..config.columns())
            .cartesian_product(0..config.rows())
            .map(|(col, row)| Square::new(Coord::new(col, row)))
            .collect();
        let mut board = Board {
            config,
            squares,
            pieces: Vec::new(),
            captured: Vec::new(),
        };
        board.connect_neighbors();
        board
    }

    /// 8x8 board populated with the standard layout.
    pub fn standard() -> ChessResult<Self> {
        Board::from_layout(BoardConfig::default(), STANDARD_LAYOUT)
    }

    /// Build a board of the given size and populate it from a layout.
    pub fn from_layout<'a, I>(config: BoardConfig, layout: I) -> ChessResult<Self>
    where
        I: IntoIterator<Item = (char, &'a str)>,
    {
        let mut board = Board::new(config);
        board.populate(layout)?;
        Ok(board)
    }

    fn connect_neighbors(&mut self) {
        for index in 0..self.squares.len() {
            let coord = self.squares[index].coord;
            for direction in Direction::ALL {
                match coord
                    .offset(direction.delta())
                    .and_then(|c| self.square_id(c))
                {
                    Some(neighbor) => self.add_edge(SquareId(index), neighbor, direction),
                    None => self.squares[index].neighbors[direction.index()] = None,
                }
            }
        }
    }

    /// Undirected edge: `to` lies in `direction` from `from`, so `from` lies opposite from `to`.
    fn add_edge(&mut self, from: SquareId, to: SquareId, direction: Direction) {
        self.squares[from.0].neighbors[direction.index()] = Some(to);
        self.squares[to.0].neighbors[direction.opposite().index()] = Some(from);
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn square_count(&self) -> usize {
        self.squares.len()
    }

    pub fn on_board(&self, coord: Coord) -> bool {
        coord.col < self.config.columns() && coord.row < self.config.rows()
    }

    pub fn on_board_named(&self, name: &str) -> bool {
        self.square_id_named(name).is_some()
    }

    pub fn square_id(&self, coord: Coord) -> Option<SquareId> {
        if !self.on_board(coord) {
            return None;
        }
        Some(SquareId(
            coord.col as usize * self.config.rows() as usize + coord.row as usize,
        ))
    }

    /// Case insensitive; only canonical names (`e4`, not `e04`) match.
    pub fn square_id_named(&self, name: &str) -> Option<SquareId> {
        let coord = Coord::from_name(name)?;
        let id = self.square_id(coord)?;
        (self.squares[id.0].name == name.to_ascii_lowercase()).then_some(id)
    }

    pub fn square(&self, id: SquareId) -> &Square {
        &self.squares[id.0]
    }

    pub fn square_at(&self, coord: Coord) -> Option<&Square> {
        self.square_id(coord).map(|id| self.square(id))
    }

    pub fn square_named(&self, name: &str) -> Option<&Square> {
        self.square_id_named(name).map(|id| self.square(id))
    }

    pub fn squares(&self) -> impl Iterator<Item = (SquareId, &Square)> {
        self.squares
            .iter()
            .enumerate()
            .map(|(i, square)| (SquareId(i), square))
    }

    pub fn name_of(&self, coord: Coord) -> Option<&str> {
        self.square_at(coord).map(|square| square.name())
    }

    pub fn coord_of(&self, name: &str) -> Option<Coord> {
        self.square_named(name).map(|square| square.coord())
    }

    /// Squares of one row from west to east, found by walking east neighbors.
    pub fn row(&self, row: u8) -> Vec<SquareId> {
        let mut result = Vec::with_capacity(self.config.columns() as usize);
        let mut current = self.square_id(Coord::new(0, row));
        while let Some(id) = current {
            result.push(id);
            current = self.square(id).neighbor(Direction::East);
        }
        result
    }

    /// All rows, highest row first, the order a renderer draws them in.
    pub fn rows_top_down(&self) -> Vec<Vec<SquareId>> {
        (0..self.config.rows()).rev().map(|row| self.row(row)).collect()
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub(crate) fn piece_or_err(&self, id: PieceId) -> ChessResult<&Piece> {
        self.piece(id).ok_or(ChessError::UnknownPiece(id.0))
    }

    pub fn piece_at(&self, square: SquareId) -> Option<&Piece> {
        self.square(square).occupant.and_then(|id| self.piece(id))
    }

    pub fn piece_on(&self, name: &str) -> Option<&Piece> {
        self.square_id_named(name).and_then(|id| self.piece_at(id))
    }

    /// Live pieces on the board.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|piece| (PieceId(i), piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Pieces removed by captures, in capture order.
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    pub(crate) fn holds_color(&self, square: SquareId, color: Color) -> bool {
        self.piece_at(square).is_some_and(|piece| piece.color == color)
    }

    /// Place a piece on an empty named square.
    pub fn add_piece(&mut self, letter: char, name: &str) -> ChessResult<PieceId> {
        let square = self
            .square_id_named(name)
            .ok_or_else(|| ChessError::InvalidTargetPosition(name.to_string()))?;
        let piece = Piece::from_letter(letter, square)?;
        if self.square(square).is_occupied() {
            return Err(ChessError::SquareOccupied(self.square(square).name.clone()));
        }

        let id = PieceId(self.pieces.len());
        self.pieces.push(Some(piece));
        self.squares[square.0].occupant = Some(id);
        debug!(piece = %piece.to_letter(), square = %name, "placed piece");
        Ok(id)
    }

    /// Populate the board from ordered (piece letter, square name) pairs.
    ///
    /// Stops at the first bad pair; pieces placed before it stay on the board.
    pub fn populate<'a, I>(&mut self, layout: I) -> ChessResult<()>
    where
        I: IntoIterator<Item = (char, &'a str)>,
    {
        let before = self.pieces.len();
        for (letter, name) in layout {
            self.add_piece(letter, name)?;
        }
        info!(pieces = self.pieces.len() - before, "populated board");
        Ok(())
    }

    /// Move the occupant of `from` onto `to`, removing any piece already on `to`.
    ///
    /// The source is cleared, the destination takes the piece and the piece's square is
    /// updated together; nothing is touched if `from` is empty.
    pub fn swap_contents(&mut self, from: SquareId, to: SquareId) -> ChessResult<Option<Piece>> {
        let mover = self.squares[from.0]
            .occupant
            .ok_or_else(|| ChessError::EmptySquare(self.squares[from.0].name.clone()))?;
        if from == to {
            return Ok(None);
        }

        let captured = self.squares[to.0]
            .occupant
            .and_then(|victim| self.pieces[victim.0].take());
        if let Some(victim) = captured {
            self.captured.push(victim);
        }

        self.squares[from.0].occupant = None;
        self.squares[to.0].occupant = Some(mover);
        if let Some(piece) = self.pieces[mover.0].as_mut() {
            piece.square = to;
            piece.has_moved = true;
        }
        Ok(captured)
    }

    /// Clear the occupant slot of a square without touching the piece arena.
    /// Used on scratch copies to evaluate a position with a piece lifted off.
    pub(crate) fn lift(&mut self, square: SquareId) {
        self.squares[square.0].occupant = None;
    }

    pub(crate) fn set_threats(&mut self, square: SquareId, threats: Vec<PieceId>) {
        let square = &mut self.squares[square.0];
        square.threatened = !threats.is_empty();
        square.threats = threats;
    }

    pub fn clear_threats(&mut self) {
        for square in self.squares.iter_mut() {
            square.threatened = false;
            square.threats.clear();
        }
    }

    pub fn draw_board(&self) -> String {
        let mut result = String::new();
        for row in self.rows_top_down() {
            let Some(&first) = row.first() else { continue };
            result.push_str(&format!("{:>2} ", self.square(first).coord.row as u16 + 1));
            for id in row {
                let cell = match self.piece_at(id) {
                    Some(piece) => piece.to_letter(),
                    None if self.square(id).threatened => '*',
                    None => '.',
                };
                result.push(cell);
                result.push(' ');
            }
            result.push('\n');
        }
        result.push_str("   ");
        for col in 0..self.config.columns() {
            result.push((b'a' + col) as char);
            result.push(' ');
        }
        result
    }

    pub fn draw_to_terminal(&self) {
        println!("{}", self.draw_board());
    }
}
