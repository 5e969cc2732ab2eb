//! Construction-time validation errors.

use thiserror::Error;

/// Errors from [`Grid::new`](crate::Grid::new).
///
/// Lookups are not errors: an out-of-range coordinate resolves to `None`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Width and height must both be at least 1.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
    /// The total cell count must stay addressable by `i32` flat indices.
    #[error("{width}x{height} grid exceeds the addressable cell limit")]
    TooLarge { width: i32, height: i32 },
}
