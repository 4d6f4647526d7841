//! Field-of-view computation over boolean transparency grids.
//!
//! The engine runs symmetric recursive shadowcasting across the eight
//! octants and offers two interchangeable result backings: a bit-packed
//! boolean grid (brightness recomputed on read) and a dense brightness
//! grid (visibility read as `value > 0`). Calculations accumulate until
//! reset, and the engine exposes the set differences produced by each
//! mutation.

mod calculation;
mod engine;
mod shadowcast;

pub use calculation::{Cone, FovCalculation};
pub use engine::{BooleanResult, Fov, ScalarResult};
