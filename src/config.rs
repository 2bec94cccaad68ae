use crate::error::{ChessError, ChessResult};

/// Largest number of columns or rows. Columns are named by a single letter.
pub const MAX_DIMENSION: u8 = 26;

/// Size of the board grid.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct BoardConfig {
    columns: u8,
    rows: u8,
}

impl BoardConfig {
    pub fn new(columns: u8, rows: u8) -> ChessResult<Self> {
        if !(1..=MAX_DIMENSION).contains(&columns) || !(1..=MAX_DIMENSION).contains(&rows) {
            return Err(ChessError::InvalidBoardSize { columns, rows });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn square_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Longest straight line on the board, in steps. Bounds every path trace.
    pub fn max_steps(&self) -> usize {
        self.columns.max(self.rows) as usize
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { columns: 8, rows: 8 }
    }
}
