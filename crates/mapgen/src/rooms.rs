//! Random rectangular room placement.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use grid::{GridError, Rect, Result, SettableGridView};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomPlacementConfig {
    /// Stop after this many rooms have been accepted.
    pub max_rooms: usize,
    /// Inclusive extent range for both room dimensions.
    pub min_size: i32,
    pub max_size: i32,
    /// Placement attempts per room before giving up on it.
    pub attempts_per_room: usize,
}

impl Default for RoomPlacementConfig {
    fn default() -> Self {
        Self {
            max_rooms: 8,
            min_size: 3,
            max_size: 7,
            attempts_per_room: 25,
        }
    }
}

/// Carves up to `max_rooms` non-touching rectangular rooms of floor into
/// `grid`, keeping a one-cell wall margin between rooms and around the
/// grid edge. Returns the accepted rectangles in placement order.
pub fn place_rooms<G, R>(
    grid: &mut G,
    config: &RoomPlacementConfig,
    rng: &mut R,
) -> Result<Vec<Rect>>
where
    G: SettableGridView<Item = bool>,
    R: Rng + ?Sized,
{
    if config.min_size < 1 || config.max_size < config.min_size {
        return Err(GridError::InvalidParameter {
            what: format!(
                "room size range [{}, {}] is not usable",
                config.min_size, config.max_size
            ),
        });
    }

    let mut rooms: Vec<Rect> = Vec::new();
    'rooms: for _ in 0..config.max_rooms {
        for _ in 0..config.attempts_per_room {
            let width = rng.gen_range(config.min_size..=config.max_size);
            let height = rng.gen_range(config.min_size..=config.max_size);
            // Interior placement only: a wall ring must remain.
            let max_x = grid.width() - width - 1;
            let max_y = grid.height() - height - 1;
            if max_x < 1 || max_y < 1 {
                continue;
            }
            let candidate = Rect {
                x: rng.gen_range(1..=max_x),
                y: rng.gen_range(1..=max_y),
                width,
                height,
            };

            if rooms
                .iter()
                .any(|room| room.expanded(1).intersects(&candidate))
            {
                continue;
            }

            for pos in candidate.positions() {
                grid.set(pos, true)?;
            }
            rooms.push(candidate);
            continue 'rooms;
        }
        // This room never found space; later ones will not fare better.
        break;
    }

    debug!(placed = rooms.len(), requested = config.max_rooms, "rooms placed");
    Ok(rooms)
}
