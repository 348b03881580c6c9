pub mod character;
pub mod edge;
pub mod types;
pub mod waypoint;
