use thiserror::Error;

use crate::point::Point;

/// Errors reported by grid views, areas and the algorithms built on them.
///
/// Every failure is reported to the caller; nothing is retried internally.
/// An operation that fails before mutating a grid leaves no partial state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("position {position:?} is outside a {width}x{height} grid")]
    OutOfBounds {
        position: Point,
        width: i32,
        height: i32,
    },

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("invalid parameter: {what}")]
    InvalidParameter { what: String },

    #[error("area contains no positions")]
    EmptyArea,
}

pub type Result<T> = std::result::Result<T, GridError>;
