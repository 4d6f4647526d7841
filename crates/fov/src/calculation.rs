use serde::{Deserialize, Serialize};

use grid::{Distance, Point};

/// Arc restriction for a cone-shaped field of view.
///
/// Angles use the compass convention: 0 degrees points up and values grow
/// clockwise. The span is the full width of the arc, centered on the angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    pub angle_deg: f64,
    pub span_deg: f64,
}

impl Cone {
    pub fn new(angle_deg: f64, span_deg: f64) -> Self {
        Self {
            angle_deg,
            span_deg,
        }
    }
}

/// One recorded visibility calculation. The engine accumulates these
/// between resets so scalar brightness can be recomputed per record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FovCalculation {
    pub origin: Point,
    /// Clamped to at least 1 before recording.
    pub radius: f64,
    pub distance: Distance,
    pub cone: Option<Cone>,
}
