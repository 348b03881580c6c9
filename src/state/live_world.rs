use crate::models::character::CharacterSnapshot;
use crate::models::types::{MapId, NpcTemplateId, Position, ZoneId};
use crate::models::waypoint::Waypoint;
use crate::net::observer::{NpcRegistry, WorldObserver};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct Inner {
    map: MapId,
    position: Position,
    zone: ZoneId,
    zone_count: u8,
    dead: bool,
    waypoints: Vec<Waypoint>,
    npcs: HashMap<NpcTemplateId, Position>,
    snapshot: CharacterSnapshot,
}

/// Decoded state of one character's connection. The message dispatch layer writes into it as
/// packets arrive; navigation reads it through [`WorldObserver`] and [`NpcRegistry`].
#[derive(Debug, Default)]
pub struct LiveWorld {
    inner: RwLock<Inner>,
}

impl LiveWorld {
    pub fn new(map: MapId, position: Position, snapshot: CharacterSnapshot) -> Self {
        Self {
            inner: RwLock::new(Inner {
                map,
                position,
                zone_count: 1,
                snapshot,
                ..Default::default()
            }),
        }
    }

    /// Map entry. NPCs of the previous map are forgotten; the server announces the new ones
    /// right after.
    pub fn enter_map(&self, map: MapId, position: Position, waypoints: Vec<Waypoint>) {
        let mut g = self.inner.write();
        g.map = map;
        g.position = position;
        g.waypoints = waypoints;
        g.npcs.clear();
    }

    pub fn set_position(&self, position: Position) {
        self.inner.write().position = position;
    }

    pub fn set_zone(&self, zone: ZoneId, zone_count: u8) {
        let mut g = self.inner.write();
        g.zone = zone;
        g.zone_count = zone_count;
    }

    pub fn set_dead(&self, dead: bool) {
        self.inner.write().dead = dead;
    }

    pub fn set_npc(&self, npc: NpcTemplateId, position: Position) {
        self.inner.write().npcs.insert(npc, position);
    }

    pub fn set_snapshot(&self, snapshot: CharacterSnapshot) {
        self.inner.write().snapshot = snapshot;
    }

    pub fn update_snapshot(&self, f: impl FnOnce(&mut CharacterSnapshot)) {
        f(&mut self.inner.write().snapshot);
    }
}

impl WorldObserver for LiveWorld {
    fn current_map(&self) -> MapId {
        self.inner.read().map
    }

    fn position(&self) -> Position {
        self.inner.read().position
    }

    fn zone(&self) -> ZoneId {
        self.inner.read().zone
    }

    fn zone_count(&self) -> u8 {
        self.inner.read().zone_count
    }

    fn is_dead(&self) -> bool {
        self.inner.read().dead
    }

    fn waypoints(&self) -> Vec<Waypoint> {
        self.inner.read().waypoints.clone()
    }

    fn snapshot(&self) -> CharacterSnapshot {
        self.inner.read().snapshot.clone()
    }
}

impl NpcRegistry for LiveWorld {
    fn npc_position(&self, npc: NpcTemplateId) -> Option<Position> {
        self.inner.read().npcs.get(&npc).copied()
    }
}
