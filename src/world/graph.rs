use crate::models::edge::{HopAction, MAX_MENU_CHOICES, MenuChoice, NextMap};
use crate::models::types::{Direction, ItemTemplateId, MapId, NpcTemplateId, Position};
use crate::world::layout::{WaypointPick, WorldLayout};
use std::collections::HashMap;

/// Static world map. Immutable once built, so it is shared as `Arc<WorldGraph>` between every
/// navigating character.
#[derive(Debug, Default)]
pub struct WorldGraph {
    edges: HashMap<MapId, Vec<NextMap>>,
    layout: WorldLayout,
}

impl WorldGraph {
    pub fn builder() -> WorldBuilder {
        WorldBuilder::default()
    }

    pub fn neighbors(&self, map: MapId) -> &[NextMap] {
        self.edges.get(&map).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn edge(&self, from: MapId, to: MapId) -> Option<&NextMap> {
        self.neighbors(from).iter().find(|e| e.to == to)
    }

    pub fn contains(&self, map: MapId) -> bool {
        self.edges.contains_key(&map)
    }

    /// Every known map, in no particular order.
    pub fn maps(&self) -> impl Iterator<Item = MapId> + '_ {
        self.edges.keys().copied()
    }

    pub fn map_count(&self) -> usize {
        self.edges.len()
    }

    pub fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    pub fn direction_between(&self, from: MapId, to: MapId) -> Option<Direction> {
        self.layout.direction_between(from, to)
    }

    pub fn waypoint_exception(&self, from: MapId, to: MapId) -> Option<WaypointPick> {
        self.layout.waypoint_exception(from, to)
    }
}

/// Collects edges before the graph is frozen. The first edge registered for an ordered pair
/// wins; later registrations for the same pair are ignored.
#[derive(Debug, Default)]
pub struct WorldBuilder {
    edges: HashMap<MapId, Vec<NextMap>>,
}

impl WorldBuilder {
    fn push(&mut self, from: MapId, edge: NextMap) {
        let to = edge.to;
        let list = self.edges.entry(from).or_default();
        if list.iter().any(|e| e.to == to) {
            tracing::trace!(%from, %to, "duplicate edge ignored");
            return;
        }
        list.push(edge);
        // every target is a node, even when it has no way out yet
        self.edges.entry(to).or_default();
    }

    /// `m0 <-> m1 <-> m2 ...`, waypoint edges in both directions.
    pub fn add_chain(&mut self, maps: &[u16]) -> &mut Self {
        for pair in maps.windows(2) {
            let (a, b) = (MapId(pair[0]), MapId(pair[1]));
            self.push(a, NextMap::waypoint(b));
            self.push(b, NextMap::waypoint(a));
        }
        self
    }

    /// One-way NPC transport. The way back usually uses a different NPC, so callers register it
    /// separately.
    pub fn add_npc_link(&mut self, from: u16, to: u16, npc: i32, menu: &[MenuChoice]) -> &mut Self {
        if menu.len() > MAX_MENU_CHOICES {
            tracing::warn!(from, to, npc, choices = menu.len(), "npc link menu truncated");
        }
        let menu = menu.iter().take(MAX_MENU_CHOICES).copied().collect();
        self.push(
            MapId(from),
            NextMap {
                to: MapId(to),
                action: HopAction::NpcDialogue {
                    npc: NpcTemplateId(npc),
                    menu,
                },
            },
        );
        self
    }

    pub fn add_walk_link(&mut self, from: u16, to: u16, x: i32, y: i32) -> &mut Self {
        self.push(
            MapId(from),
            NextMap {
                to: MapId(to),
                action: HopAction::CoordinateWalk {
                    target: Position::new(x, y),
                },
            },
        );
        self
    }

    pub fn add_item_link(&mut self, from: u16, to: u16, item: i32, menu_index: Option<u8>) -> &mut Self {
        self.push(
            MapId(from),
            NextMap {
                to: MapId(to),
                action: HopAction::ConsumableItem {
                    item: ItemTemplateId(item),
                    menu_index,
                },
            },
        );
        self
    }

    /// Hub NPC offering one menu entry per spoke (spaceship pilots and the like).
    pub fn add_portal_group(&mut self, hub: u16, spokes: &[u16], npc: i32, menu_indices: &[u8]) -> &mut Self {
        if spokes.len() != menu_indices.len() {
            tracing::warn!(hub, npc, "portal group spokes and menu indices differ in length");
        }
        for (spoke, index) in spokes.iter().zip(menu_indices) {
            self.add_npc_link(hub, *spoke, npc, &[MenuChoice::at(*index)]);
        }
        self
    }

    pub fn build(self, layout: WorldLayout) -> WorldGraph {
        WorldGraph {
            edges: self.edges,
            layout,
        }
    }
}
