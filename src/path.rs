//! Path tracing over the adjacency graph.
//!
//! Paths are walked neighbor by neighbor in one compass direction rather than computed
//! from coordinates, so the graph is the single source of truth for what lies between two
//! squares.

use tracing::trace;

use crate::board::Board;
use crate::error::{ChessError, ChessResult};
use crate::types::{Direction, SquareId};

impl Board {
    /// Compass direction from one square towards another, `None` for the same square.
    pub fn direction_between(&self, from: SquareId, to: SquareId) -> Option<Direction> {
        Direction::between(self.square(from).coord(), self.square(to).coord())
    }

    /// Squares walked from `from` towards `to` in `direction`.
    ///
    /// Starts at the neighbor of `from` and ends with `to` itself. Fails with `NoPath` when
    /// the walk leaves the board, or exceeds the longest line on the board, before reaching
    /// `to`.
    pub fn trace(
        &self,
        from: SquareId,
        to: SquareId,
        direction: Direction,
    ) -> ChessResult<Vec<SquareId>> {
        let target = self.square(to).coord();
        let mut path = Vec::new();
        let mut current = from;

        for _ in 0..self.config().max_steps() {
            let Some(next) = self.square(current).neighbor(direction) else {
                break;
            };
            trace!(
                square = self.square(next).name(),
                direction = direction.to_human(),
                "path step"
            );
            path.push(next);
            if self.square(next).coord() == target {
                return Ok(path);
            }
            current = next;
        }

        Err(ChessError::NoPath {
            from: self.square(from).name().to_string(),
            to: self.square(to).name().to_string(),
        })
    }

    /// Every square from the neighbor of `from` to the board edge in `direction`.
    pub fn ray(&self, from: SquareId, direction: Direction) -> Vec<SquareId> {
        let mut result = Vec::new();
        let mut current = from;
        for _ in 0..self.config().max_steps() {
            match self.square(current).neighbor(direction) {
                Some(next) => {
                    result.push(next);
                    current = next;
                }
                None => break,
            }
        }
        result
    }
}
