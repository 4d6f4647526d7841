//! Grid-based algorithms for 2D roguelike maps.
//!
//! The workspace splits into three layers, re-exported here:
//!
//! - [`grid`]: bounded 2D views, geometry, and the [`grid::Area`] point
//!   set every other algorithm consumes and produces.
//! - [`fov`]: symmetric recursive shadowcasting with boolean or scalar
//!   result storage, append semantics and delta sets.
//! - [`mapgen`]: connected-component discovery, room and door placement,
//!   tunnel carving between regions, and dead-end trimming.
//!
//! All randomized operations take a caller-provided `rand` RNG parameter;
//! seed one RNG and a whole generation pipeline becomes reproducible.

pub use fov;
pub use grid;
pub use mapgen;
