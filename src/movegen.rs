use tracing::debug;

use crate::board::Board;
use crate::catalog::is_castle_offset;
use crate::error::{ChessError, ChessResult};
use crate::types::*;

/// What a move does besides relocating the moving piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFlag {
    Regular,
    /// King castles; the rook jumps from `rook_from` over the king onto `rook_to`
    Castle {
        rook_from: SquareId,
        rook_to: SquareId,
    },
}

impl MoveFlag {
    pub fn is_castle(&self) -> bool {
        matches!(self, MoveFlag::Castle { .. })
    }
}

/// A move that passed validation against the board it was checked on.
///
/// Only `Board::validate_move` builds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedMove {
    pub(crate) piece: PieceId,
    pub(crate) from: SquareId,
    pub(crate) to: SquareId,
    pub(crate) move_flag: MoveFlag,
}

impl ValidatedMove {
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    pub fn from(&self) -> SquareId {
        self.from
    }

    pub fn to(&self) -> SquareId {
        self.to
    }

    pub fn move_flag(&self) -> MoveFlag {
        self.move_flag
    }
}

/// Result of a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// The moved piece as it stands after the move
    pub piece: Piece,
    pub from: SquareId,
    pub to: SquareId,
    pub captured: Option<Piece>,
    pub move_flag: MoveFlag,
}

impl MoveRecord {
    pub fn to_human(&self, board: &Board) -> String {
        if self.move_flag.is_castle() {
            let side = if board.square(self.to).coord().col > board.square(self.from).coord().col {
                "east"
            } else {
                "west"
            };
            return format!("{} castles {}", self.piece.color.to_human(), side);
        }
        let maybe_capture_str = match self.captured {
            Some(p) => format!(" capturing {}", p.to_human()),
            None => "".to_string(),
        };
        format!(
            "{} moves {} from {} to {}{}",
            self.piece.color.to_human(),
            self.piece.piece_type.to_human(),
            board.square(self.from).name(),
            board.square(self.to).name(),
            maybe_capture_str,
        )
    }
}

/// Whether a rule check includes the king-safety test.
///
/// Threat scanning asks every opposing piece for its destinations; doing that with the
/// safety test would make two kings ask each other forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Legal,
    Threat,
}

impl Board {
    /// Squares reachable by offset alone: on the board and not held by a friendly piece.
    /// Obstruction and piece-specific rules are not applied.
    pub fn candidate_destinations(&self, piece: PieceId) -> ChessResult<Vec<SquareId>> {
        Ok(self.candidates_for(self.piece_or_err(piece)?))
    }

    /// Squares the piece may legally move to. A square is listed exactly when
    /// `validate_move` would accept the move.
    pub fn legal_destinations(&self, piece: PieceId) -> ChessResult<Vec<SquareId>> {
        Ok(self.destinations_for(self.piece_or_err(piece)?, Mode::Legal))
    }

    /// Legal destinations of whatever piece stands on the named square.
    pub fn legal_destinations_from(&self, name: &str) -> ChessResult<Vec<SquareId>> {
        let square = self
            .square_id_named(name)
            .ok_or_else(|| ChessError::InvalidStartingPosition(name.to_string()))?;
        let piece = self
            .square(square)
            .occupant()
            .ok_or_else(|| ChessError::EmptySquare(self.square(square).name().to_string()))?;
        self.legal_destinations(piece)
    }

    fn candidates_for(&self, piece: &Piece) -> Vec<SquareId> {
        let origin = self.square(piece.square).coord();
        piece
            .offsets()
            .iter()
            .filter_map(|offset| origin.offset(*offset))
            .filter_map(|coord| self.square_id(coord))
            .filter(|square| !self.holds_color(*square, piece.color))
            .collect()
    }

    pub(crate) fn destinations_for(&self, piece: &Piece, mode: Mode) -> Vec<SquareId> {
        self.candidates_for(piece)
            .into_iter()
            .filter(|to| self.check_rules(piece, *to, mode).is_ok())
            .collect()
    }

    /// Check a move request without changing the board.
    pub fn validate_move(&self, from: &str, to: &str, player: Color) -> ChessResult<ValidatedMove> {
        let result = self.validate_move_inner(from, to, player);
        match &result {
            Ok(mv) => debug!(
                from,
                to,
                player = player.to_human(),
                castle = mv.move_flag.is_castle(),
                "move accepted"
            ),
            Err(err) => debug!(from, to, player = player.to_human(), %err, "move rejected"),
        }
        result
    }

    fn validate_move_inner(
        &self,
        from: &str,
        to: &str,
        player: Color,
    ) -> ChessResult<ValidatedMove> {
        let from_square = self
            .square_id_named(from)
            .ok_or_else(|| ChessError::InvalidStartingPosition(from.to_string()))?;
        let to_square = self
            .square_id_named(to)
            .ok_or_else(|| ChessError::InvalidTargetPosition(to.to_string()))?;
        let piece_id = self
            .square(from_square)
            .occupant()
            .ok_or_else(|| ChessError::EmptySquare(self.square(from_square).name().to_string()))?;
        let piece = self.piece_or_err(piece_id)?;

        if piece.color != player {
            return Err(ChessError::OpponentsPieceChosen(
                self.square(from_square).name().to_string(),
            ));
        }
        if !self.candidates_for(piece).contains(&to_square) {
            return Err(self.illegal(from_square, to_square));
        }

        let move_flag = self.check_rules(piece, to_square, Mode::Legal)?;
        Ok(ValidatedMove {
            piece: piece_id,
            from: from_square,
            to: to_square,
            move_flag,
        })
    }

    /// Apply a validated move. The mover, any captured piece and a castling rook are all
    /// updated before this returns.
    ///
    /// A move validated against an earlier position is rejected when its pieces no longer
    /// stand where it expects; the board is then left unchanged.
    pub fn commit(&mut self, mv: ValidatedMove) -> ChessResult<MoveRecord> {
        self.check_still_valid(&mv)?;
        let captured = self.swap_contents(mv.from, mv.to)?;
        if let MoveFlag::Castle { rook_from, rook_to } = mv.move_flag {
            self.swap_contents(rook_from, rook_to)?;
        }
        let piece = *self.piece_or_err(mv.piece)?;
        Ok(MoveRecord {
            piece,
            from: mv.from,
            to: mv.to,
            captured,
            move_flag: mv.move_flag,
        })
    }

    fn check_still_valid(&self, mv: &ValidatedMove) -> ChessResult<()> {
        let from_name = || self.square(mv.from).name().to_string();
        let mover = self.piece_or_err(mv.piece)?;
        if self.square(mv.from).occupant() != Some(mv.piece) {
            return Err(ChessError::EmptySquare(from_name()));
        }
        if self.holds_color(mv.to, mover.color) {
            return Err(self.illegal(mv.from, mv.to));
        }

        if let MoveFlag::Castle { rook_from, rook_to } = mv.move_flag {
            let rook_in_place = self.piece_at(rook_from).is_some_and(|rook| {
                rook.piece_type == PieceType::Rook && rook.color == mover.color
            });
            if !rook_in_place {
                return Err(ChessError::EmptySquare(
                    self.square(rook_from).name().to_string(),
                ));
            }
            if let Some(&blocker) = [rook_to, mv.to]
                .iter()
                .find(|sq| self.square(**sq).is_occupied())
            {
                return Err(self.blocked(mv.from, mv.to, blocker));
            }
        }
        Ok(())
    }

    /// Validate and apply a move. A rejected move leaves the board untouched.
    pub fn make_move(&mut self, from: &str, to: &str, player: Color) -> ChessResult<MoveRecord> {
        if self
            .piece_on(from)
            .is_some_and(|p| p.piece_type == PieceType::King && p.color == player)
        {
            self.refresh_threats(player);
        }
        let mv = self.validate_move(from, to, player)?;
        let record = self.commit(mv)?;
        debug!(
            piece = %record.piece.to_letter(),
            from,
            to,
            captured = record.captured.is_some(),
            "move committed"
        );
        Ok(record)
    }

    fn check_rules(&self, piece: &Piece, to: SquareId, mode: Mode) -> ChessResult<MoveFlag> {
        if piece.piece_type == PieceType::Knight {
            return self.knight_rule(piece, to);
        }

        let direction = self
            .direction_between(piece.square, to)
            .ok_or_else(|| self.illegal(piece.square, to))?;
        let path = self.trace(piece.square, to, direction)?;

        match piece.piece_type {
            PieceType::Pawn => self.pawn_rule(piece, direction, &path),
            PieceType::King => self.king_rule(piece, direction, &path, mode),
            kind if kind.is_sliding() => self.slide_rule(piece, &path),
            _ => Err(self.illegal(piece.square, to)),
        }
    }

    /// Knights jump; only the destination matters.
    fn knight_rule(&self, piece: &Piece, to: SquareId) -> ChessResult<MoveFlag> {
        if self.holds_color(to, piece.color) {
            return Err(self.illegal(piece.square, to));
        }
        Ok(MoveFlag::Regular)
    }

    /// Every square before the destination must be empty; the destination may hold an enemy.
    fn slide_rule(&self, piece: &Piece, path: &[SquareId]) -> ChessResult<MoveFlag> {
        let Some((&target, between)) = path.split_last() else {
            return Err(self.illegal(piece.square, piece.square));
        };
        if let Some(&blocker) = between.iter().find(|sq| self.square(**sq).is_occupied()) {
            return Err(self.blocked(piece.square, target, blocker));
        }
        if self.holds_color(target, piece.color) {
            return Err(self.illegal(piece.square, target));
        }
        Ok(MoveFlag::Regular)
    }

    /// Pawns push straight ahead onto empty squares and capture one square diagonally ahead.
    fn pawn_rule(
        &self,
        piece: &Piece,
        direction: Direction,
        path: &[SquareId],
    ) -> ChessResult<MoveFlag> {
        let Some(&target) = path.last() else {
            return Err(self.illegal(piece.square, piece.square));
        };
        if direction.delta().drow != piece.color.forward() {
            return Err(self.illegal(piece.square, target));
        }

        if direction.is_diagonal() {
            if path.len() != 1 || !self.holds_color(target, piece.color.other_color()) {
                return Err(self.illegal(piece.square, target));
            }
        } else {
            let limit = if piece.has_moved { 1 } else { 2 };
            if path.len() > limit {
                return Err(self.illegal(piece.square, target));
            }
            if let Some(&blocker) = path.iter().find(|sq| self.square(**sq).is_occupied()) {
                return Err(self.blocked(piece.square, target, blocker));
            }
        }
        Ok(MoveFlag::Regular)
    }

    fn king_rule(
        &self,
        piece: &Piece,
        direction: Direction,
        path: &[SquareId],
        mode: Mode,
    ) -> ChessResult<MoveFlag> {
        if is_castle_offset(direction.delta().scaled(path.len() as i8)) {
            return self.castle_rule(piece, direction, path, mode);
        }
        let [target] = path else {
            let to = path.last().copied().unwrap_or(piece.square);
            return Err(self.illegal(piece.square, to));
        };
        if self.holds_color(*target, piece.color) {
            return Err(self.illegal(piece.square, *target));
        }
        if mode == Mode::Legal {
            if let Some(attacked) = self.first_threatened(piece, &[*target]) {
                return Err(ChessError::MoveIntoCheck(self.square(attacked).name().to_string()));
            }
        }
        Ok(MoveFlag::Regular)
    }

    /// The king moves two squares towards an unmoved rook standing at the edge of its row.
    /// Everything between them must be empty and the king may not start in, pass through
    /// or land in an attacked square.
    fn castle_rule(
        &self,
        piece: &Piece,
        direction: Direction,
        path: &[SquareId],
        mode: Mode,
    ) -> ChessResult<MoveFlag> {
        let (transit, target) = (path[0], path[1]);
        if mode == Mode::Threat || piece.has_moved {
            return Err(self.illegal(piece.square, target));
        }

        let ray = self.ray(piece.square, direction);
        let Some(rook_index) = ray.iter().position(|sq| self.square(*sq).is_occupied()) else {
            return Err(self.illegal(piece.square, target));
        };
        let rook_square = ray[rook_index];
        if rook_index < path.len() {
            return Err(self.blocked(piece.square, target, rook_square));
        }
        let castling_rook = self.piece_at(rook_square).is_some_and(|rook| {
            rook.piece_type == PieceType::Rook && rook.color == piece.color && !rook.has_moved
        });
        if !castling_rook || rook_index != ray.len() - 1 {
            return Err(self.illegal(piece.square, target));
        }

        if let Some(attacked) = self.first_threatened(piece, &[piece.square, transit, target]) {
            return Err(ChessError::MoveIntoCheck(self.square(attacked).name().to_string()));
        }
        Ok(MoveFlag::Castle {
            rook_from: rook_square,
            rook_to: transit,
        })
    }

    /// First of `squares` attacked by the king's opponents, judged with the king lifted off
    /// its square so it does not shield squares behind it.
    fn first_threatened(&self, king: &Piece, squares: &[SquareId]) -> Option<SquareId> {
        let mut lifted = self.clone();
        lifted.lift(king.square);
        squares
            .iter()
            .copied()
            .find(|square| lifted.is_threatened(*square, king.color))
    }

    fn illegal(&self, from: SquareId, to: SquareId) -> ChessError {
        ChessError::IllegalMove {
            from: self.square(from).name().to_string(),
            to: self.square(to).name().to_string(),
        }
    }

    fn blocked(&self, from: SquareId, to: SquareId, blocker: SquareId) -> ChessError {
        ChessError::PathBlocked {
            from: self.square(from).name().to_string(),
            to: self.square(to).name().to_string(),
            blocker: self.square(blocker).name().to_string(),
        }
    }
}
