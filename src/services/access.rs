use crate::error::{ConfigErrorKind, InfraError};
use crate::models::character::CharacterSnapshot;
use crate::models::types::{ItemTemplateId, MapId};
use crate::world::data::{ARENA, ARENA_TICKET};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Inclusive range of map ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRange {
    pub first: MapId,
    pub last: MapId,
}

impl MapRange {
    pub const fn new(first: u16, last: u16) -> Self {
        Self {
            first: MapId(first),
            last: MapId(last),
        }
    }

    #[inline]
    pub fn contains(&self, map: MapId) -> bool {
        self.first <= map && map <= self.last
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerGate {
    pub min_power: u64,
    pub maps: Vec<MapRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestGate {
    pub min_quest: u32,
    pub maps: Vec<MapRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemGate {
    pub map: MapId,
    pub item: ItemTemplateId,
}

/// Entry requirements per target map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessRules {
    pub power: Vec<PowerGate>,
    pub quest: Vec<QuestGate>,
    pub clan_only: Vec<MapRange>,
    pub items: Vec<ItemGate>,
}

impl AccessRules {
    pub fn from_yaml(src: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(src)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InfraError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| InfraError::config(path, ConfigErrorKind::Read(e)))?;
        Self::from_yaml(&data).map_err(|e| InfraError::config(path, ConfigErrorKind::Yaml(e)))
    }
}

/// Built-in gates of the live server.
pub fn default_rules() -> AccessRules {
    AccessRules {
        power: vec![
            PowerGate {
                min_power: 40_000_000_000,
                maps: vec![MapRange::new(105, 110)],
            },
            PowerGate {
                min_power: 60_000_000_000,
                maps: vec![MapRange::new(155, 159)],
            },
        ],
        quest: vec![
            QuestGate {
                min_quest: 20,
                maps: vec![MapRange::new(63, 72)],
            },
            QuestGate {
                min_quest: 27,
                maps: vec![MapRange::new(92, 102)],
            },
        ],
        clan_only: vec![MapRange::new(53, 62)],
        items: vec![ItemGate {
            map: ARENA,
            item: ItemTemplateId(ARENA_TICKET),
        }],
    }
}

/// The requirement that keeps a character out of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Power { required: u64 },
    Quest { required: u32 },
    Clan,
    Item(ItemTemplateId),
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Power { required } => write!(f, "needs {required} power"),
            Gate::Quest { required } => write!(f, "needs main quest {required}"),
            Gate::Clan => f.write_str("clan members only"),
            Gate::Item(item) => write!(f, "needs item {item}"),
        }
    }
}

/// Pure entry check, called for every candidate edge of every planning pass. Maps without a rule
/// are always open.
#[derive(Debug, Clone)]
pub struct AccessibilityFilter {
    rules: AccessRules,
}

impl Default for AccessibilityFilter {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl AccessibilityFilter {
    pub fn new(rules: AccessRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &AccessRules {
        &self.rules
    }

    #[inline]
    pub fn can_enter(&self, map: MapId, snapshot: &CharacterSnapshot) -> bool {
        self.denial(map, snapshot).is_none()
    }

    /// First gate that blocks `map` for this character, if any.
    pub fn denial(&self, map: MapId, snapshot: &CharacterSnapshot) -> Option<Gate> {
        let covers = |ranges: &[MapRange]| ranges.iter().any(|r| r.contains(map));

        if let Some(g) = self
            .rules
            .power
            .iter()
            .find(|g| covers(&g.maps) && snapshot.power < g.min_power)
        {
            return Some(Gate::Power { required: g.min_power });
        }

        if let Some(g) = self
            .rules
            .quest
            .iter()
            .find(|g| covers(&g.maps) && snapshot.quest_index < g.min_quest)
        {
            return Some(Gate::Quest { required: g.min_quest });
        }

        if covers(&self.rules.clan_only) && !snapshot.in_clan() {
            return Some(Gate::Clan);
        }

        self.rules
            .items
            .iter()
            .find(|g| g.map == map && !snapshot.has_item(g.item))
            .map(|g| Gate::Item(g.item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::character::BagItem;

    fn filter() -> AccessibilityFilter {
        AccessibilityFilter::default()
    }

    #[test]
    fn unlisted_maps_are_open() {
        let f = filter();
        let nobody = CharacterSnapshot::default();
        for map in [0u16, 5, 21, 24, 84, 111, 154, 160, 999] {
            assert!(f.can_enter(MapId(map), &nobody), "map {map}");
        }
    }

    #[test]
    fn power_tiers() {
        let f = filter();
        let mut snap = CharacterSnapshot {
            power: 39_999_999_999,
            ..Default::default()
        };
        assert_eq!(f.denial(MapId(107), &snap), Some(Gate::Power { required: 40_000_000_000 }));

        snap.power = 40_000_000_000;
        assert!(f.can_enter(MapId(107), &snap));
        assert!(!f.can_enter(MapId(159), &snap));

        snap.power = 60_000_000_000;
        assert!(f.can_enter(MapId(159), &snap));
    }

    #[test]
    fn quest_and_clan_gates() {
        let f = filter();
        let mut snap = CharacterSnapshot {
            quest_index: 19,
            ..Default::default()
        };
        assert_eq!(f.denial(MapId(68), &snap), Some(Gate::Quest { required: 20 }));
        snap.quest_index = 20;
        assert!(f.can_enter(MapId(68), &snap));
        assert!(!f.can_enter(MapId(102), &snap));

        assert_eq!(f.denial(MapId(55), &snap), Some(Gate::Clan));
        snap.clan_id = Some(12);
        assert!(f.can_enter(MapId(55), &snap));
    }

    #[test]
    fn item_gate() {
        let f = filter();
        let mut snap = CharacterSnapshot::default();
        assert_eq!(f.denial(ARENA, &snap), Some(Gate::Item(ItemTemplateId(ARENA_TICKET))));

        snap.bag.push(BagItem {
            index: 0,
            template: ItemTemplateId(ARENA_TICKET),
            quantity: 1,
        });
        assert!(f.can_enter(ARENA, &snap));
    }

    #[test]
    fn rules_from_yaml() {
        let rules = AccessRules::from_yaml(
            r#"
power:
  - min_power: 1000
    maps: [{ first: 10, last: 12 }]
clan_only: [{ first: 40, last: 40 }]
"#,
        )
        .unwrap();
        let f = AccessibilityFilter::new(rules);
        let snap = CharacterSnapshot::default();

        assert!(!f.can_enter(MapId(11), &snap));
        assert!(!f.can_enter(MapId(40), &snap));
        assert!(f.can_enter(MapId(107), &snap));
    }
}
