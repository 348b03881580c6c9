pub mod live_world;
pub mod registry;
pub mod route;
