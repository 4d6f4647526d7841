//! Symmetric recursive shadowcasting over the eight octants.

use grid::{Direction, GridView, Point};

use crate::calculation::{Cone, FovCalculation};

/// Linear transform from octant-local `(col, row)` offsets to grid deltas.
/// The eight octants are the four diagonal directions crossed with the two
/// row/column orientations.
struct Octant {
    xx: i32,
    xy: i32,
    yx: i32,
    yy: i32,
}

/// Cone window in circle-percent units, precomputed once per sweep.
struct ConeWindow {
    angle: f64,
    span: f64,
}

impl ConeWindow {
    fn new(cone: Cone) -> Self {
        // Rotate by -90 degrees so that 0 points up, then scale the full
        // circle to [0, 1).
        Self {
            angle: (cone.angle_deg - 90.0).rem_euclid(360.0) / 360.0,
            span: cone.span_deg / 360.0,
        }
    }

    fn contains(&self, origin: Point, pos: Point) -> bool {
        let dx = (pos.x - origin.x) as f64;
        let dy = (pos.y - origin.y) as f64;
        let offset = (self.angle - scaled_atan2_approx(dy, dx)).abs();
        offset <= self.span * 0.5 || offset >= 1.0 - self.span * 0.5
    }
}

/// Fast atan2 approximation scaled so the full circle maps to [0, 1).
fn scaled_atan2_approx(y: f64, x: f64) -> f64 {
    if y == 0.0 && x == 0.0 {
        return 0.0;
    }
    let coeff1 = 0.125;
    let coeff2 = 3.0 * coeff1;
    let abs_y = y.abs();
    let angle = if x >= 0.0 {
        let r = (x - abs_y) / (x + abs_y);
        coeff1 - coeff1 * r
    } else {
        let r = (x + abs_y) / (abs_y - x);
        coeff2 - coeff1 * r
    };
    if y < 0.0 {
        1.0 - angle
    } else {
        angle
    }
}

/// Runs one calculation against `transparency`, reporting every visible
/// cell and its brightness through `mark`. Cells may be reported more than
/// once where octants share an edge; callers keep the maximum.
pub(crate) fn sweep<V, F>(transparency: &V, calc: &FovCalculation, mark: &mut F)
where
    V: GridView<Item = bool>,
    F: FnMut(Point, f64),
{
    let decay = 1.0 / (calc.radius + 1.0);
    let cone = calc.cone.map(ConeWindow::new);

    mark(calc.origin, 1.0);

    for diagonal in Direction::DIAGONALS {
        let (dx, dy) = diagonal.delta();
        for octant in [
            Octant {
                xx: dx,
                xy: 0,
                yx: 0,
                yy: dy,
            },
            Octant {
                xx: 0,
                xy: dx,
                yx: dy,
                yy: 0,
            },
        ] {
            cast_octant(transparency, calc, cone.as_ref(), &octant, 1, 1.0, 0.0, decay, mark);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cast_octant<V, F>(
    transparency: &V,
    calc: &FovCalculation,
    cone: Option<&ConeWindow>,
    octant: &Octant,
    start_row: i32,
    mut start_slope: f64,
    end_slope: f64,
    decay: f64,
    mark: &mut F,
) where
    V: GridView<Item = bool>,
    F: FnMut(Point, f64),
{
    if start_slope < end_slope {
        return;
    }

    let origin = calc.origin;
    let max_row = calc.radius.ceil() as i32;
    let mut next_start = start_slope;
    let mut blocked = false;

    let mut row = start_row;
    while row <= max_row && !blocked {
        let dy = -row;
        for dx in -row..=0 {
            let current = Point::new(
                origin.x + dx * octant.xx + dy * octant.xy,
                origin.y + dx * octant.yx + dy * octant.yy,
            );
            let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
            let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

            if start_slope < right_slope {
                continue;
            }
            if end_slope > left_slope {
                break;
            }

            let dist = calc.distance.calculate(origin, current);
            if transparency.in_bounds(current)
                && dist <= calc.radius
                && cone.map_or(true, |c| c.contains(origin, current))
            {
                mark(current, 1.0 - decay * dist);
            }

            // Out-of-grid cells block sight like walls.
            let transparent = transparency.get(current).unwrap_or(false);
            if blocked {
                if !transparent {
                    next_start = right_slope;
                    continue;
                }
                blocked = false;
                start_slope = next_start;
            } else if !transparent && row < max_row {
                blocked = true;
                cast_octant(
                    transparency,
                    calc,
                    cone,
                    octant,
                    row + 1,
                    start_slope,
                    left_slope,
                    decay,
                    mark,
                );
                next_start = right_slope;
            }
        }
        row += 1;
    }
}
