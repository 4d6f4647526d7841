use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::point::Point;

/// Distance metric between grid positions.
///
/// The metric also fixes the neighbor rule used by connectivity algorithms:
/// Manhattan admits only cardinal adjacency, the other two are eight-way.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Distance {
    Manhattan,
    #[default]
    Chebyshev,
    Euclidean,
}

impl Distance {
    pub fn calculate(self, a: Point, b: Point) -> f64 {
        let dx = (a.x - b.x).abs() as f64;
        let dy = (a.y - b.y).abs() as f64;
        match self {
            Distance::Manhattan => dx + dy,
            Distance::Chebyshev => dx.max(dy),
            Distance::Euclidean => (dx * dx + dy * dy).sqrt(),
        }
    }

    /// The directions considered adjacent under this metric.
    pub fn adjacency(self) -> &'static [Direction] {
        match self {
            Distance::Manhattan => &Direction::CARDINALS,
            Distance::Chebyshev | Distance::Euclidean => &Direction::ALL,
        }
    }
}
