pub mod access;
pub mod capsule;
pub mod navigator;
pub mod planner;
pub mod recovery;
pub mod waypoint;

pub use access::{AccessibilityFilter, Gate};
pub use navigator::{NavFailure, NavStatus, Navigator, TickOutcome};
pub use planner::PathPlanner;
pub use recovery::RecoveryController;
