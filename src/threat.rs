//! Threat detection.
//!
//! A square is threatened for a color when some opposing piece lists it among its
//! destinations. Opposing destinations are path-filtered, so a slider does not threaten
//! anything behind a blocker, and are collected without the opposing king's own safety
//! test. Opposing pieces are scanned in parallel; the board is only read.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::trace;

use crate::board::Board;
use crate::movegen::Mode;
use crate::types::{Color, Piece, PieceId, SquareId};

impl Board {
    /// Whether any opponent of `defender` can move onto `square`.
    pub fn is_threatened(&self, square: SquareId, defender: Color) -> bool {
        let opponents: Vec<&Piece> = self
            .pieces_of(defender.other_color())
            .map(|(_, piece)| piece)
            .collect();
        opponents
            .par_iter()
            .any(|piece| self.destinations_for(piece, Mode::Threat).contains(&square))
    }

    /// Opponents of `defender` that can move onto `square`.
    pub fn threats_to(&self, square: SquareId, defender: Color) -> Vec<PieceId> {
        let opponents: Vec<(PieceId, &Piece)> = self.pieces_of(defender.other_color()).collect();
        opponents
            .into_par_iter()
            .filter(|(_, piece)| self.destinations_for(piece, Mode::Threat).contains(&square))
            .map(|(id, _)| id)
            .collect()
    }

    /// Every square threatened for `defender`, with the opponents reaching it.
    ///
    /// Each opposing piece's destinations are computed once, so this is the cheap way to
    /// answer many threat queries against one position.
    pub fn attack_map(&self, defender: Color) -> HashMap<SquareId, Vec<PieceId>> {
        let opponents: Vec<(PieceId, &Piece)> = self.pieces_of(defender.other_color()).collect();
        let reach: Vec<(PieceId, Vec<SquareId>)> = opponents
            .into_par_iter()
            .map(|(id, piece)| (id, self.destinations_for(piece, Mode::Threat)))
            .collect();

        let mut map: HashMap<SquareId, Vec<PieceId>> = HashMap::new();
        for (id, squares) in reach {
            for square in squares {
                map.entry(square).or_default().push(id);
            }
        }
        map
    }

    /// Recompute every square's threatened flag and threat list for `defender`.
    pub fn refresh_threats(&mut self, defender: Color) {
        let mut map = self.attack_map(defender);
        trace!(defender = defender.to_human(), threatened = map.len(), "refreshed threats");
        let ids: Vec<SquareId> = self.squares().map(|(id, _)| id).collect();
        for id in ids {
            self.set_threats(id, map.remove(&id).unwrap_or_default());
        }
    }
}
