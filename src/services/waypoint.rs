use crate::models::types::{Direction, MapId};
use crate::models::waypoint::Waypoint;
use crate::world::graph::WorldGraph;
use crate::world::layout::WaypointPick;

/// Why a waypoint was chosen; ends up in the hop logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaypointChoice {
    Exception(WaypointPick),
    Direction(Direction),
    Fallback,
}

/// Picks the waypoint of `from` that leads to `to`: hard-coded exception first, then the
/// direction of `to`, then the first flagged waypoint.
pub fn select_waypoint<'a>(
    world: &WorldGraph,
    from: MapId,
    to: MapId,
    waypoints: &'a [Waypoint],
) -> Option<(&'a Waypoint, WaypointChoice)> {
    if let Some(pick) = world.waypoint_exception(from, to) {
        if let Some(wp) = pick.select(waypoints) {
            return Some((wp, WaypointChoice::Exception(pick)));
        }
        tracing::warn!(%from, %to, ?pick, "waypoint exception matched nothing");
    }

    if let Some(dir) = world.direction_between(from, to) {
        if let Some(wp) = WaypointPick::for_direction(dir).select(waypoints) {
            return Some((wp, WaypointChoice::Direction(dir)));
        }
    }

    waypoints
        .iter()
        .find(|w| w.is_flagged())
        .map(|w| (w, WaypointChoice::Fallback))
}
