use crate::error::{ConfigErrorKind, InfraError};
use crate::models::types::{Direction, MapId};
use crate::models::waypoint::Waypoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One row of the world, maps ordered left to right.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapGroup {
    pub name: String,
    pub maps: Vec<MapId>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DirectionOverride {
    pub from: MapId,
    pub to: MapId,
    pub direction: Direction,
}

/// Which waypoint of a map to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointPick {
    Leftmost,
    Rightmost,
    Topmost,
    Bottommost,
    /// Position in the list the server sent on map entry
    Nth(usize),
}

impl WaypointPick {
    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Left => WaypointPick::Leftmost,
            Direction::Right => WaypointPick::Rightmost,
            Direction::Up => WaypointPick::Topmost,
            Direction::Down => WaypointPick::Bottommost,
        }
    }

    pub fn select<'a>(&self, waypoints: &'a [Waypoint]) -> Option<&'a Waypoint> {
        match self {
            WaypointPick::Leftmost => waypoints.iter().min_by_key(|w| w.center().x),
            WaypointPick::Rightmost => waypoints.iter().max_by_key(|w| w.center().x),
            WaypointPick::Topmost => waypoints.iter().min_by_key(|w| w.center().y),
            WaypointPick::Bottommost => waypoints.iter().max_by_key(|w| w.center().y),
            WaypointPick::Nth(n) => waypoints.get(*n),
        }
    }
}

/// Maps with several exits where the direction heuristic picks the wrong one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaypointException {
    pub from: MapId,
    pub to: MapId,
    pub pick: WaypointPick,
}

/// Direction knowledge of the world. Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    pub groups: Vec<MapGroup>,
    pub direction_overrides: Vec<DirectionOverride>,
    pub waypoint_exceptions: Vec<WaypointException>,

    #[serde(skip)]
    index: LayoutIndex,
}

#[derive(Debug, Clone, Default)]
struct LayoutIndex {
    /// map -> (group, position in group)
    slots: HashMap<MapId, Vec<(usize, usize)>>,
    overrides: HashMap<(MapId, MapId), Direction>,
    exceptions: HashMap<(MapId, MapId), WaypointPick>,
}

impl WorldLayout {
    pub fn new(
        groups: Vec<MapGroup>,
        direction_overrides: Vec<DirectionOverride>,
        waypoint_exceptions: Vec<WaypointException>,
    ) -> Self {
        let mut layout = Self {
            groups,
            direction_overrides,
            waypoint_exceptions,
            index: LayoutIndex::default(),
        };
        layout.reindex();
        layout
    }

    pub fn from_yaml(src: &str) -> Result<Self, serde_yaml::Error> {
        let mut layout: WorldLayout = serde_yaml::from_str(src)?;
        layout.reindex();
        Ok(layout)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InfraError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| InfraError::config(path, ConfigErrorKind::Read(e)))?;
        Self::from_yaml(&data).map_err(|e| InfraError::config(path, ConfigErrorKind::Yaml(e)))
    }

    fn reindex(&mut self) {
        let mut index = LayoutIndex::default();
        for (g, group) in self.groups.iter().enumerate() {
            for (pos, map) in group.maps.iter().enumerate() {
                index.slots.entry(*map).or_default().push((g, pos));
            }
        }
        for o in &self.direction_overrides {
            index.overrides.insert((o.from, o.to), o.direction);
        }
        for e in &self.waypoint_exceptions {
            index.exceptions.insert((e.from, e.to), e.pick);
        }
        self.index = index;
    }

    /// Screen direction of `to` seen from `from`: an explicit override first, otherwise the
    /// order of both maps inside a shared group.
    pub fn direction_between(&self, from: MapId, to: MapId) -> Option<Direction> {
        if let Some(d) = self.index.overrides.get(&(from, to)) {
            return Some(*d);
        }

        let from_slots = self.index.slots.get(&from)?;
        let to_slots = self.index.slots.get(&to)?;
        from_slots.iter().find_map(|(g, from_pos)| {
            to_slots
                .iter()
                .find(|(tg, _)| tg == g)
                .map(|(_, to_pos)| if to_pos > from_pos { Direction::Right } else { Direction::Left })
        })
    }

    pub fn waypoint_exception(&self, from: MapId, to: MapId) -> Option<WaypointPick> {
        self.index.exceptions.get(&(from, to)).copied()
    }
}
