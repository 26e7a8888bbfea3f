//! Shape catalog - piece footprints and their colors
//!
//! Footprints are small boolean grids (rows × cols, at most 6×6). Row index is
//! the board's `y` axis, column index the board's `x` (gravity) axis.
//!
//! The catalog is static and ordered. A piece's identity is its catalog index
//! ([`ShapeId`]), which is stored next to the (mutable) footprint rather than
//! recovered from it, so rotation never changes a piece's color.

use arrayvec::ArrayVec;

use crate::types::{Rgb, ShapeId, MAX_SHAPE_DIM};

/// Upper bound on set cells in any footprint.
pub const MAX_FOOTPRINT_CELLS: usize = MAX_SHAPE_DIM * MAX_SHAPE_DIM;

/// A rows × cols boolean footprint.
///
/// Storage is a fixed 6×6 grid; bits outside `rows × cols` are always clear so
/// two equal footprints are equal byte-for-byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Footprint {
    /// Build a footprint from text rows where `#` is a filled cell.
    ///
    /// ```
    /// use matrix_tetris_core::Footprint;
    ///
    /// let fp = Footprint::from_pattern(&["##.", ".##"]);
    /// assert_eq!((fp.rows(), fp.cols()), (2, 3));
    /// assert!(fp.is_set(0, 1));
    /// assert!(!fp.is_set(1, 0));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics (at compile time for constants) on ragged rows, an empty pattern,
    /// or more than 6 rows/cols.
    pub const fn from_pattern(pattern: &[&str]) -> Self {
        assert!(!pattern.is_empty(), "empty footprint");
        assert!(pattern.len() <= MAX_SHAPE_DIM, "too many rows");
        let cols = pattern[0].len();
        assert!(cols > 0 && cols <= MAX_SHAPE_DIM, "bad column count");

        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < pattern.len() {
            let row = pattern[r].as_bytes();
            assert!(row.len() == cols, "ragged footprint");
            let mut c = 0;
            while c < cols {
                bits[r][c] = row[c] == b'#';
                c += 1;
            }
            r += 1;
        }

        Self {
            rows: pattern.len() as u8,
            cols: cols as u8,
            bits,
        }
    }

    /// A fully filled `rows × cols` block
    pub const fn solid(rows: u8, cols: u8) -> Self {
        assert!(rows > 0 && rows as usize <= MAX_SHAPE_DIM);
        assert!(cols > 0 && cols as usize <= MAX_SHAPE_DIM);
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < rows as usize {
            let mut c = 0;
            while c < cols as usize {
                bits[r][c] = true;
                c += 1;
            }
            r += 1;
        }
        Self { rows, cols, bits }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the cell at `(row, col)` is filled; false outside the footprint.
    #[inline(always)]
    pub fn is_set(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.bits[row as usize][col as usize]
    }

    /// Filled cells as `(col, row)` offsets, i.e. `(dx, dy)` from the anchor.
    pub fn cells(&self) -> ArrayVec<(u8, u8), MAX_FOOTPRINT_CELLS> {
        let mut out = ArrayVec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.bits[row as usize][col as usize] {
                    out.push((col, row));
                }
            }
        }
        out
    }

    pub fn cell_count(&self) -> usize {
        self.cells().len()
    }

    /// The footprint turned 90°: transpose, then reverse row order.
    ///
    /// `rotated[r][c] = self[rows - 1 - c][r]`, dimensions become `cols × rows`.
    pub fn rotated(&self) -> Self {
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for r in 0..self.cols as usize {
            for c in 0..self.rows as usize {
                bits[r][c] = self.bits[self.rows as usize - 1 - c][r];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub name: &'static str,
    pub footprint: Footprint,
    pub color: Rgb,
}

/// The standard catalog: seven double-scale tetrominoes laid out to fall from the left.
pub static SHAPES: [Shape; 7] = [
    Shape {
        name: "I",
        footprint: Footprint::solid(3, 6),
        color: Rgb::from_hex(0x6825CF),
    },
    Shape {
        name: "O",
        footprint: Footprint::solid(4, 4),
        color: Rgb::from_hex(0xCF2577),
    },
    Shape {
        name: "T",
        footprint: Footprint::from_pattern(&[
            "######", //
            "######", //
            "..##..", //
            "..##..", //
            "..##..",
        ]),
        color: Rgb::from_hex(0x2528CF),
    },
    Shape {
        name: "L",
        footprint: Footprint::from_pattern(&[
            "######", //
            "######", //
            "....##", //
            "....##", //
            "....##",
        ]),
        color: Rgb::from_hex(0x2594CF),
    },
    Shape {
        name: "J",
        footprint: Footprint::from_pattern(&[
            "######", //
            "######", //
            "##....", //
            "##....", //
            "##....",
        ]),
        color: Rgb::from_hex(0x1DB82B),
    },
    Shape {
        name: "S",
        footprint: Footprint::from_pattern(&[
            "####..", //
            "####..", //
            "..####", //
            "..####",
        ]),
        color: Rgb::from_hex(0xFF8000),
    },
    Shape {
        name: "Z",
        footprint: Footprint::from_pattern(&[
            "..####", //
            "..####", //
            "####..", //
            "####..",
        ]),
        color: Rgb::from_hex(0xED0000),
    },
];

/// Look up a shape by id in `catalog`.
pub fn shape(catalog: &[Shape], id: ShapeId) -> Option<&Shape> {
    catalog.get(id.index())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_footprints_fit_max_dim() {
        for s in SHAPES.iter() {
            assert!(s.footprint.rows() as usize <= MAX_SHAPE_DIM, "{}", s.name);
            assert!(s.footprint.cols() as usize <= MAX_SHAPE_DIM, "{}", s.name);
            assert!(s.footprint.cell_count() > 0, "{}", s.name);
        }
    }

    #[test]
    fn shape_lookup_is_bounded_by_catalog() {
        assert_eq!(shape(&SHAPES, ShapeId(0)).map(|s| s.name), Some(SHAPES[0].name));
        assert!(shape(&SHAPES, ShapeId(SHAPES.len() as u8)).is_none());
    }

    #[test]
    fn catalog_colors_are_distinct() {
        for (i, a) in SHAPES.iter().enumerate() {
            for b in SHAPES.iter().skip(i + 1) {
                assert_ne!(a.color, b.color, "{} vs {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn rotation_swaps_dimensions() {
        let fp = SHAPES[0].footprint;
        let r = fp.rotated();
        assert_eq!((r.rows(), r.cols()), (6, 3));
        assert_eq!(r.cell_count(), fp.cell_count());
    }

    #[test]
    fn rotation_is_clockwise_transpose_of_reversed_rows() {
        let fp = Footprint::from_pattern(&["#..", "##."]);
        // reversed rows: "##." / "#.."; transpose -> "##", "#.", ".."
        let expected = Footprint::from_pattern(&["##", "#.", ".."]);
        assert_eq!(fp.rotated(), expected);
    }

    #[test]
    fn four_rotations_restore_footprint() {
        for s in SHAPES.iter() {
            let fp = s.footprint;
            assert_eq!(fp.rotated().rotated().rotated().rotated(), fp, "{}", s.name);
        }
    }

    #[test]
    fn cells_are_col_row_offsets() {
        let fp = Footprint::from_pattern(&[".#", "#."]);
        let cells: Vec<_> = fp.cells().into_iter().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1)]);
    }
}
