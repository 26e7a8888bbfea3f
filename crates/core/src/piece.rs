//! Active piece - the falling shape, its position, and collision queries
//!
//! Position is the footprint's top-left anchor in board coordinates. The only
//! position mutator is [`ActivePiece::try_move`]; gravity is expressed as
//! `try_move(board, 1, 0)`.

use crate::board::Board;
use crate::rng::SimpleRng;
use crate::shapes::{Footprint, Shape};
use crate::types::ShapeId;

/// The falling piece
///
/// `shape_id` is fixed at spawn; `footprint` changes on rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    shape_id: ShapeId,
    footprint: Footprint,
    x: i16,
    y: i16,
}

impl ActivePiece {
    /// Create a piece at an explicit anchor.
    pub fn new(shape_id: ShapeId, footprint: Footprint, x: i16, y: i16) -> Self {
        Self {
            shape_id,
            footprint,
            x,
            y,
        }
    }

    /// Pick a catalog shape uniformly at random and place it at the spawn edge.
    ///
    /// # Panics
    ///
    /// Panics on an empty catalog.
    pub fn spawn(catalog: &[Shape], rng: &mut SimpleRng, board: &Board) -> Self {
        assert!(!catalog.is_empty(), "cannot spawn from an empty catalog");
        let idx = rng.next_range(catalog.len() as u32) as u8;
        Self::spawn_shape(catalog, ShapeId(idx), board)
    }

    /// Place catalog entry `id` at `x = 0`, centred on the perpendicular axis.
    pub fn spawn_shape(catalog: &[Shape], id: ShapeId, board: &Board) -> Self {
        let footprint = catalog[id.index()].footprint;
        let y = board.height() as i16 / 2 - footprint.rows() as i16 / 2;
        Self::new(id, footprint, 0, y)
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    pub fn position(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    /// Board coordinates of every filled footprint cell
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.cells_at(&self.footprint, 0, 0)
    }

    fn cells_at<'a>(
        &self,
        footprint: &'a Footprint,
        offset_x: i16,
        offset_y: i16,
    ) -> impl Iterator<Item = (i16, i16)> + 'a {
        let (x, y) = (self.x + offset_x, self.y + offset_y);
        footprint
            .cells()
            .into_iter()
            .map(move |(dx, dy)| (x + dx as i16, y + dy as i16))
    }

    /// True if the footprint shifted by `(offset_x, offset_y)` would leave the
    /// board on any side or overlap a filled cell.
    pub fn check_collision(&self, board: &Board, offset_x: i16, offset_y: i16) -> bool {
        self.collides(board, &self.footprint, offset_x, offset_y)
    }

    fn collides(&self, board: &Board, footprint: &Footprint, offset_x: i16, offset_y: i16) -> bool {
        self.cells_at(footprint, offset_x, offset_y)
            .any(|(x, y)| board.is_blocked(x, y))
    }

    /// Translate by `(dx, dy)` if that does not collide.
    ///
    /// On failure the piece is left untouched.
    pub fn try_move(&mut self, board: &Board, dx: i16, dy: i16) -> bool {
        if self.check_collision(board, dx, dy) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Rotate 90° in place, or do nothing if the rotated footprint collides at
    /// the current anchor. No kicks are tried.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let rotated = self.footprint.rotated();
        if self.collides(board, &rotated, 0, 0) {
            return false;
        }
        self.footprint = rotated;
        true
    }

    /// Turn the piece into a placement that [`Board::commit`] accepts.
    ///
    /// Fails, handing the piece back, if it collides where it stands.
    pub fn place(self, board: &Board) -> Result<Placement, ActivePiece> {
        if self.check_collision(board, 0, 0) {
            return Err(self);
        }
        Ok(Placement { piece: self })
    }
}

/// A piece proven collision-free against the board it was checked on.
///
/// Only [`ActivePiece::place`] builds one, so unchecked commits cannot be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a placement does nothing until committed to the board"]
pub struct Placement {
    piece: ActivePiece,
}

impl Placement {
    pub fn piece(&self) -> &ActivePiece {
        &self.piece
    }

    pub(crate) fn into_piece(self) -> ActivePiece {
        self.piece
    }
}
