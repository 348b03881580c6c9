use crate::models::character::CharacterSnapshot;
use crate::models::types::{MapId, NpcTemplateId, Position, ZoneId};
use crate::models::waypoint::Waypoint;

/// Read side of the decoded game state. The message dispatch layer keeps it current while
/// packets arrive; the navigator only ever polls it.
pub trait WorldObserver: Send + Sync {
    fn current_map(&self) -> MapId;
    fn position(&self) -> Position;
    fn zone(&self) -> ZoneId;
    /// Number of parallel zones of the current map
    fn zone_count(&self) -> u8;
    fn is_dead(&self) -> bool;
    /// Waypoints of the current map, in server order
    fn waypoints(&self) -> Vec<Waypoint>;
    fn snapshot(&self) -> CharacterSnapshot;
}

/// Live NPC positions of the current map, refreshed on every map entry.
pub trait NpcRegistry: Send + Sync {
    fn npc_position(&self, npc: NpcTemplateId) -> Option<Position>;
}
