pub mod data;
pub mod graph;
pub mod layout;

pub use data::{SHOP_HUB, default_layout, default_world, world_with_layout};
pub use graph::{WorldBuilder, WorldGraph};
pub use layout::{WaypointPick, WorldLayout};
