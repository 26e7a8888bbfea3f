//! Board module - manages the committed grid
//!
//! The board is a `width × height` grid (64×32 on the matrix) where each cell is
//! either empty or filled by a shape. Uses a flat row-major vector sized once at
//! construction; nothing on the hot path allocates.
//!
//! Coordinates: `(x, y)` where `x` runs along the gravity axis (0 = spawn edge)
//! and `y` along the perpendicular axis. A "row" is a fixed `y`.

use crate::piece::Placement;
use crate::types::{Cell, ShapeId, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board sized to the matrix
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create a new empty board with explicit dimensions
    pub fn with_size(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and filled
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Cell::Filled(_)))
    }

    pub fn is_out_of_bounds(&self, x: i16, y: i16) -> bool {
        x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16
    }

    /// Whether a piece cell may not go here: a wall or a filled cell.
    #[inline(always)]
    pub fn is_blocked(&self, x: i16, y: i16) -> bool {
        match self.get(x, y) {
            None => true,
            Some(cell) => cell.is_filled(),
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|cells| cells.iter().all(Cell::is_filled))
            .unwrap_or(false)
    }

    /// Cells of row `y`, or None past the bottom
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let start = y * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Remove every full row and backfill with empty rows at the top.
    ///
    /// Surviving rows keep their relative order and the row count stays
    /// `height`. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        // Scan from bottom to top, compacting survivors towards the bottom.
        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        self.cells[..write_y * width].fill(Cell::Empty);
        cleared
    }

    /// Write a checked placement into the grid.
    ///
    /// A [`Placement`] only exists for a piece that was collision-free against
    /// this board, so every write lands on an empty in-bounds cell.
    pub fn commit(&mut self, placement: Placement) {
        let piece = placement.into_piece();
        let cell = Cell::Filled(piece.shape_id());
        for (x, y) in piece.cells() {
            let written = self.set(x, y, cell);
            debug_assert!(written, "placement outside board at ({x}, {y})");
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Build a board from text rows (`.` empty, digit = shape id).
    ///
    /// Panics on ragged rows.
    ///
    /// ```
    /// use matrix_tetris_core::Board;
    /// use matrix_tetris_core::types::{Cell, ShapeId};
    ///
    /// let board = Board::from_rows(&["....", ".1..", "2222"]);
    /// assert_eq!(board.get(1, 1), Some(Cell::Filled(ShapeId(1))));
    /// assert!(board.is_row_full(2));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u8;
        let width = rows.first().map(|r| r.len()).unwrap_or(0) as u8;
        let mut board = Self::with_size(width, height);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width as usize, "ragged board row {y}");
            for (x, ch) in row.chars().enumerate() {
                if let Some(d) = ch.to_digit(10) {
                    board.set(x as i16, y as i16, Cell::Filled(ShapeId(d as u8)));
                }
            }
        }
        board
    }

    /// Render back to the `from_rows` notation.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height as usize)
            .map(|y| {
                self.row(y)
                    .unwrap_or(&[])
                    .iter()
                    .map(|c| match c {
                        Cell::Empty => '.',
                        Cell::Filled(id) => char::from_digit(id.0 as u32 % 10, 10).unwrap_or('#'),
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(63, 0), Some(63));
        assert_eq!(board.index(0, 1), Some(64));
        assert_eq!(board.index(63, 31), Some(2047));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(64, 0), None);
        assert_eq!(board.index(0, 32), None);
    }

    #[test]
    fn test_blocked_distinguishes_wall_from_filled() {
        let mut board = Board::with_size(4, 4);
        board.set(1, 1, Cell::Filled(ShapeId(0)));

        assert!(board.is_blocked(1, 1));
        assert!(board.is_occupied(1, 1));

        assert!(board.is_blocked(4, 0));
        assert!(!board.is_occupied(4, 0));
        assert!(board.is_out_of_bounds(4, 0));

        assert!(!board.is_blocked(0, 0));
    }

    #[test]
    fn test_clear_keeps_order_and_backfills_top() {
        let mut board = Board::from_rows(&[
            "1...", //
            "2222", //
            ".3..", //
            "4444", //
            "..5.",
        ]);
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(
            board.to_rows(),
            vec!["....", "....", "1...", ".3..", "..5."]
        );
    }

    #[test]
    fn test_clear_nothing_is_noop() {
        let mut board = Board::from_rows(&["1...", ".2..", "..3."]);
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_rows_roundtrip() {
        let rows = ["....", "12..", "..34"];
        assert_eq!(Board::from_rows(&rows).to_rows(), rows.to_vec());
    }
}
