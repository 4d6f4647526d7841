//! Opening doorways in the walls around rectangular rooms.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use grid::{Direction, GridError, GridView, Point, Rect, Result, SettableGridView};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorPlacementConfig {
    /// Hard cap on sides that receive doors, per room.
    pub max_sides: usize,
    /// Sides kept unconditionally; extra sides may be cancelled.
    pub min_sides: usize,
    /// Percent chance to discard each side beyond `min_sides`.
    pub extra_side_cancel_chance: u8,
    /// Percent added to the stop probability after each placed door.
    pub stop_chance_step: u8,
}

impl Default for DoorPlacementConfig {
    fn default() -> Self {
        Self {
            max_sides: 4,
            min_sides: 2,
            extra_side_cancel_chance: 50,
            stop_chance_step: 50,
        }
    }
}

/// Doors placed on one side of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideDoors {
    pub side: Direction,
    pub doors: Vec<Point>,
}

/// Doors placed around one room, grouped by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDoors {
    pub room: Rect,
    pub sides: Vec<SideDoors>,
}

/// Opens doorways in the wall ring around each room.
///
/// A side qualifies when at least one of its outer wall cells has floor
/// two steps out from the room, i.e. there is something to connect to.
/// Qualifying sides are thinned to the configured budget, then each
/// remaining side receives doors at wall cells that still have two
/// orthogonal wall neighbors, which keeps openings from touching.
pub fn place_doors<G, R>(
    grid: &mut G,
    rooms: &[Rect],
    config: &DoorPlacementConfig,
    rng: &mut R,
) -> Result<Vec<RoomDoors>>
where
    G: SettableGridView<Item = bool>,
    R: Rng + ?Sized,
{
    if config.min_sides > config.max_sides || config.max_sides > 4 {
        return Err(GridError::InvalidParameter {
            what: format!(
                "side budget [{}, {}] is not usable",
                config.min_sides, config.max_sides
            ),
        });
    }
    if config.extra_side_cancel_chance > 100 || config.stop_chance_step > 100 {
        return Err(GridError::InvalidParameter {
            what: "door chances are percentages and must be at most 100".into(),
        });
    }

    let mut placed = Vec::with_capacity(rooms.len());
    for &room in rooms {
        placed.push(place_room_doors(grid, room, config, rng)?);
    }
    debug!(rooms = rooms.len(), "door placement complete");
    Ok(placed)
}

fn place_room_doors<G, R>(
    grid: &mut G,
    room: Rect,
    config: &DoorPlacementConfig,
    rng: &mut R,
) -> Result<RoomDoors>
where
    G: SettableGridView<Item = bool>,
    R: Rng + ?Sized,
{
    let mut sides: Vec<(Direction, Vec<Point>)> = Direction::CARDINALS
        .iter()
        .filter_map(|&side| {
            let candidates = side_candidates(grid, room, side);
            (!candidates.is_empty()).then_some((side, candidates))
        })
        .collect();

    if sides.len() > config.max_sides {
        sides.shuffle(rng);
        sides.truncate(config.max_sides);
    }
    sides.shuffle(rng);
    let mut kept: Vec<(Direction, Vec<Point>)> = Vec::with_capacity(sides.len());
    for side in sides {
        if kept.len() >= config.min_sides
            && rng.gen_ratio(u32::from(config.extra_side_cancel_chance), 100)
        {
            continue;
        }
        kept.push(side);
    }

    let mut result = RoomDoors {
        room,
        sides: Vec::new(),
    };
    for (side, mut candidates) in kept {
        candidates.shuffle(rng);
        let mut doors = Vec::new();
        let mut stop_chance = 0u32;
        for pos in candidates {
            if stop_chance > 0 && rng.gen_ratio(stop_chance.min(100), 100) {
                break;
            }
            let wall_neighbors = Direction::CARDINALS
                .iter()
                .filter(|d| !grid.get(pos + **d).unwrap_or(false))
                .count();
            if wall_neighbors < 2 {
                continue;
            }
            grid.set(pos, true)?;
            doors.push(pos);
            stop_chance += u32::from(config.stop_chance_step);
        }
        if !doors.is_empty() {
            result.sides.push(SideDoors { side, doors });
        }
    }
    Ok(result)
}

/// Wall cells on the outer perimeter of one room side that have floor two
/// steps outward from the room edge.
fn side_candidates<G: GridView<Item = bool>>(grid: &G, room: Rect, side: Direction) -> Vec<Point> {
    let Ok(edge) = room.side_positions(side) else {
        return Vec::new();
    };
    edge.into_iter()
        .filter_map(|cell| {
            let wall_cell = cell + side;
            let outside = wall_cell + side;
            if !grid.in_bounds(wall_cell) || !grid.in_bounds(outside) {
                return None;
            }
            let is_wall = !grid.get(wall_cell).unwrap_or(true);
            let opens_somewhere = grid.get(outside).unwrap_or(false);
            (is_wall && opens_somewhere).then_some(wall_cell)
        })
        .collect()
}
