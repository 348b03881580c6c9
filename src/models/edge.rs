use crate::models::types::{ItemTemplateId, MapId, NpcTemplateId, Position};
use std::fmt;

/// Most NPC transports need at most this many menu confirmations.
pub const MAX_MENU_CHOICES: usize = 3;

/// One selection in an NPC menu. Routing only ever uses `index`; the label is the text the menu
/// showed when the link was recorded and ends up in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuChoice {
    pub index: u8,
    pub label: Option<&'static str>,
}

impl MenuChoice {
    pub const fn at(index: u8) -> Self {
        Self { index, label: None }
    }

    pub const fn labeled(index: u8, label: &'static str) -> Self {
        Self {
            index,
            label: Some(label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Waypoint,
    NpcDialogue,
    CoordinateWalk,
    ConsumableItem,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Waypoint => f.write_str("waypoint"),
            EdgeKind::NpcDialogue => f.write_str("npc"),
            EdgeKind::CoordinateWalk => f.write_str("walk"),
            EdgeKind::ConsumableItem => f.write_str("item"),
        }
    }
}

/// What the character has to do in the current map to end up in the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HopAction {
    /// Walk into one of the map's waypoints
    Waypoint,
    /// Talk to an NPC and pick the menu entries in order
    NpcDialogue {
        npc: NpcTemplateId,
        menu: Vec<MenuChoice>,
    },
    /// Walk to a literal coordinate (hidden map-edge triggers)
    CoordinateWalk { target: Position },
    /// Use an item; capsule-style items then need a destination menu index
    ConsumableItem {
        item: ItemTemplateId,
        menu_index: Option<u8>,
    },
}

/// Directed edge of the world graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextMap {
    pub to: MapId,
    pub action: HopAction,
}

impl NextMap {
    pub fn waypoint(to: MapId) -> Self {
        Self {
            to,
            action: HopAction::Waypoint,
        }
    }

    pub fn kind(&self) -> EdgeKind {
        match self.action {
            HopAction::Waypoint => EdgeKind::Waypoint,
            HopAction::NpcDialogue { .. } => EdgeKind::NpcDialogue,
            HopAction::CoordinateWalk { .. } => EdgeKind::CoordinateWalk,
            HopAction::ConsumableItem { .. } => EdgeKind::ConsumableItem,
        }
    }
}
