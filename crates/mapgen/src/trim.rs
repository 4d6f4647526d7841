//! Pruning dead-end corridor cells.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use grid::{Area, Direction, GridError, GridView, Point, Result, SettableGridView};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimConfig {
    /// Percent chance (0-100) to permanently keep a dead end instead of
    /// erasing it. Zero always prunes.
    pub save_chance: u8,
    /// Pruning passes per area; -1 runs until no dead end remains.
    pub max_iterations: i32,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            save_chance: 40,
            max_iterations: -1,
        }
    }
}

/// Iteratively erases dead-end cells from each area and the grid beneath
/// it. A cell counts as a dead end when exactly one cardinal neighbor is
/// floor and the five cells wrapping the opposite end are all walls.
pub fn trim_dead_ends<G, R>(
    grid: &mut G,
    areas: &mut [Area],
    config: &TrimConfig,
    rng: &mut R,
) -> Result<()>
where
    G: SettableGridView<Item = bool>,
    R: Rng + ?Sized,
{
    if config.save_chance > 100 {
        return Err(GridError::InvalidParameter {
            what: format!("save chance is a percentage, got {}", config.save_chance),
        });
    }

    for area in areas.iter_mut() {
        let mut saved: HashSet<Point> = HashSet::new();
        let mut removed = 0usize;
        let mut iterations = 0i32;
        loop {
            let candidates: Vec<Point> = area
                .iter()
                .filter(|&pos| is_dead_end(grid, pos) && !saved.contains(&pos))
                .collect();
            if candidates.is_empty() {
                break;
            }

            for pos in candidates {
                // An earlier removal in this pass may have opened or sealed
                // this cell; only prune what is a dead end right now.
                if !is_dead_end(grid, pos) {
                    continue;
                }
                if config.save_chance > 0
                    && rng.gen_ratio(u32::from(config.save_chance), 100)
                {
                    saved.insert(pos);
                } else {
                    area.remove(pos);
                    grid.set(pos, false)?;
                    removed += 1;
                }
            }

            iterations += 1;
            if config.max_iterations >= 0 && iterations >= config.max_iterations {
                break;
            }
        }
        debug!(removed, saved = saved.len(), iterations, "area trimmed");
    }
    Ok(())
}

/// Dead-end test: the cell's only cardinal floor neighbor is in direction
/// D, and the U of five cells around the opposite end (the opposite
/// direction, its two 45-degree rotations, and both perpendiculars of D)
/// are all walls. Out-of-bounds cells count as walls.
fn is_dead_end<G: GridView<Item = bool>>(grid: &G, pos: Point) -> bool {
    let mut floor_neighbor = None;
    for direction in Direction::CARDINALS {
        if grid.get(pos + direction).unwrap_or(false) {
            if floor_neighbor.is_some() {
                return false;
            }
            floor_neighbor = Some(direction);
        }
    }
    let Some(entry) = floor_neighbor else {
        return false;
    };

    let back = entry.opposite();
    let closed_end = [
        back,
        back.rotate_cw_45(),
        back.rotate_ccw_45(),
        entry.perpendiculars()[0],
        entry.perpendiculars()[1],
    ];
    closed_end
        .iter()
        .all(|&direction| !grid.get(pos + direction).unwrap_or(false))
}
