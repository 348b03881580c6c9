pub mod config;
pub mod error;
pub mod models;
pub mod net;
pub mod services;
pub mod state;
pub mod world;

// Convenient re-exports (so call sites can do `xmap::Registry`, etc.)
pub use error::{NavError, NavResult};
pub use services::{AccessibilityFilter, NavFailure, Navigator, PathPlanner, TickOutcome};
pub use state::{
    live_world::LiveWorld,
    registry::{Registry, spawn_tick_loop},
};
pub use world::{WorldGraph, default_world};
