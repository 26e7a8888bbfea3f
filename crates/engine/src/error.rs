//! Session-level faults.

use thiserror::Error;

use crate::core::DisplayError;
use crate::types::ShapeId;

/// Anything that ends a session abnormally. The supervisor resets on these.
#[derive(Error, Debug)]
pub enum SessionFault {
    #[error("display failed: {0}")]
    Display(#[from] DisplayError),
    #[error("piece {shape:?} at ({x}, {y}) overlaps the board it is locking into")]
    Placement { shape: ShapeId, x: i16, y: i16 },
    #[error("no active piece while {0}")]
    NoActivePiece(&'static str),
    #[error("session panicked: {0}")]
    Panicked(String),
}
