//! Carving walkable corridors between two positions.

use rand::Rng;
use serde::{Deserialize, Serialize};

use grid::lines::{bresenham_line, orthogonal_line};
use grid::{Distance, Point, Result, SettableGridView};

/// Strategy for turning a start/end pair into floor cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TunnelCarver {
    /// Single rasterized line: orthogonal steps under Manhattan adjacency,
    /// Bresenham otherwise. `widen_vertical` additionally floors the cell
    /// to the right of every vertical step, where the grid allows it.
    Direct {
        adjacency: Distance,
        widen_vertical: bool,
    },
    /// Two straight legs meeting at a corner; a coin flip decides whether
    /// the horizontal or the vertical leg comes first.
    LShaped,
}

impl TunnelCarver {
    /// Floors a path from `start` to `end` inclusive. After the call the
    /// two positions are connected by `true` cells.
    pub fn carve<G, R>(&self, grid: &mut G, start: Point, end: Point, rng: &mut R) -> Result<()>
    where
        G: SettableGridView<Item = bool>,
        R: Rng + ?Sized,
    {
        grid.bounds_check(start)?;
        grid.bounds_check(end)?;

        match *self {
            TunnelCarver::Direct {
                adjacency,
                widen_vertical,
            } => {
                let line = if adjacency == Distance::Manhattan {
                    orthogonal_line(start, end)
                } else {
                    bresenham_line(start, end)
                };
                carve_line(grid, &line, widen_vertical)
            }
            TunnelCarver::LShaped => {
                let corner = if rng.gen_bool(0.5) {
                    Point::new(end.x, start.y)
                } else {
                    Point::new(start.x, end.y)
                };
                carve_line(grid, &orthogonal_line(start, corner), false)?;
                carve_line(grid, &orthogonal_line(corner, end), false)
            }
        }
    }
}

fn carve_line<G: SettableGridView<Item = bool>>(
    grid: &mut G,
    line: &[Point],
    widen_vertical: bool,
) -> Result<()> {
    let mut previous: Option<Point> = None;
    for &pos in line {
        grid.set(pos, true)?;
        if widen_vertical {
            let stepped_vertically = previous.map_or(false, |prev| prev.y != pos.y);
            let right = Point::new(pos.x + 1, pos.y);
            if stepped_vertically && grid.in_bounds(right) {
                grid.set(right, true)?;
            }
        }
        previous = Some(pos);
    }
    Ok(())
}
