//! Map-generation connectivity kernel: region discovery, room and door
//! placement, tunnel carving between regions, and dead-end cleanup.
//!
//! Every routine works against the grid-view capabilities from the `grid`
//! crate and threads a caller-provided `rand` RNG; nothing reads hidden
//! global state, so seeded runs reproduce exactly.

pub mod components;
pub mod connect;
pub mod doors;
pub mod rooms;
pub mod selector;
pub mod trim;
pub mod tunnel;

pub use components::find_components;
pub use connect::{connect_areas_closest, connect_areas_ordered};
pub use doors::{place_doors, DoorPlacementConfig, RoomDoors, SideDoors};
pub use rooms::{place_rooms, RoomPlacementConfig};
pub use selector::PointSelector;
pub use trim::{trim_dead_ends, TrimConfig};
pub use tunnel::TunnelCarver;
