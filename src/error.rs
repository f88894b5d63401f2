//! Error taxonomy for the board core.
//!
//! None of these are retriable: every query is total over well-formed inputs
//! and every mutation is validated by the caller via [`PosStatus`] before it
//! commits. `BoardError` generalizes a plain `Occupied`/`Ko`/`Suicide` move-error
//! enum to carry the richer [`PosStatus`] this crate's layered design exposes.

use thiserror::Error;

use crate::point::GridPoint;

/// Result of checking whether a placement would be legal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PosStatus {
    /// Play is legal.
    Ok,
    /// The point is occupied.
    NotEmpty,
    /// Playing here would leave the new group with zero liberties and capture
    /// nothing.
    Suicide,
    /// The point is the recorded simple-ko point and replaying it would
    /// recreate the previous position.
    Ko,
}

impl PosStatus {
    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(self, PosStatus::Ok)
    }
}

/// Errors a caller of the public API can observe.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("point {point:?} is out of bounds for a {width}x{height} board")]
    OutOfBounds {
        point: GridPoint,
        width: usize,
        height: usize,
    },

    #[error("illegal move at {point:?}: {status:?}")]
    IllegalMove { point: GridPoint, status: PosStatus },
}
