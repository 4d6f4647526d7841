//! Choosing the pair of positions that links two areas.

use rand::Rng;
use serde::{Deserialize, Serialize};

use grid::{Area, Distance, GridError, Point, Result};

/// Strategy for picking one position from each of two areas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointSelector {
    /// Uniform random member of each area.
    Random,
    /// Exhaustive O(|A| * |B|) search for the closest pair under the given
    /// metric. Ties go to the earliest pair in area iteration order.
    Closest(Distance),
    /// Centers of the bounding rectangles. For a concave area the center
    /// may land outside it, so the carved corridor may not meet existing
    /// floor at that end.
    BoundsCenter,
}

impl PointSelector {
    pub fn select<R: Rng + ?Sized>(
        &self,
        a: &Area,
        b: &Area,
        rng: &mut R,
    ) -> Result<(Point, Point)> {
        if a.is_empty() || b.is_empty() {
            return Err(GridError::EmptyArea);
        }
        match self {
            PointSelector::Random => Ok((a.random_position(rng)?, b.random_position(rng)?)),
            PointSelector::Closest(metric) => {
                let mut best: Option<(Point, Point, f64)> = None;
                for pa in a.iter() {
                    for pb in b.iter() {
                        let d = metric.calculate(pa, pb);
                        if best.map_or(true, |(_, _, bd)| d < bd) {
                            best = Some((pa, pb, d));
                        }
                    }
                }
                // Both areas are non-empty, so a best pair exists.
                best.map(|(pa, pb, _)| (pa, pb)).ok_or(GridError::EmptyArea)
            }
            PointSelector::BoundsCenter => Ok((a.bounds().center(), b.bounds().center())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn area_of(points: &[(i32, i32)]) -> Area {
        points.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_random_picks_members() {
        let a = area_of(&[(0, 0), (1, 0), (2, 0)]);
        let b = area_of(&[(9, 9)]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let (pa, pb) = PointSelector::Random.select(&a, &b, &mut rng).unwrap();
            assert!(a.contains(pa));
            assert_eq!(pb, Point::new(9, 9));
        }
    }

    #[test]
    fn test_closest_finds_minimal_pair() {
        let a = area_of(&[(0, 0), (4, 0), (2, 3)]);
        let b = area_of(&[(9, 9), (5, 1)]);
        let mut rng = StdRng::seed_from_u64(0);
        let (pa, pb) = PointSelector::Closest(Distance::Euclidean)
            .select(&a, &b, &mut rng)
            .unwrap();
        assert_eq!(pa, Point::new(4, 0));
        assert_eq!(pb, Point::new(5, 1));
    }

    #[test]
    fn test_closest_tie_break_is_first_in_iteration_order() {
        // Both members of `a` are at distance 1 from b's single member;
        // the first added wins.
        let a = area_of(&[(1, 0), (0, 1)]);
        let b = area_of(&[(0, 0)]);
        let mut rng = StdRng::seed_from_u64(0);
        let (pa, _) = PointSelector::Closest(Distance::Chebyshev)
            .select(&a, &b, &mut rng)
            .unwrap();
        assert_eq!(pa, Point::new(1, 0));
    }

    #[test]
    fn test_bounds_center() {
        let a = area_of(&[(1, 1), (4, 4)]);
        let b = area_of(&[(10, 0)]);
        let mut rng = StdRng::seed_from_u64(0);
        let (pa, pb) = PointSelector::BoundsCenter.select(&a, &b, &mut rng).unwrap();
        assert_eq!(pa, Point::new(2, 2));
        assert_eq!(pb, Point::new(10, 0));
    }

    #[test]
    fn test_empty_area_is_an_error() {
        let a = Area::new();
        let b = area_of(&[(0, 0)]);
        let mut rng = StdRng::seed_from_u64(0);
        for selector in [
            PointSelector::Random,
            PointSelector::Closest(Distance::Manhattan),
            PointSelector::BoundsCenter,
        ] {
            assert!(matches!(
                selector.select(&a, &b, &mut rng),
                Err(GridError::EmptyArea)
            ));
        }
    }
}
