use crate::models::character::CharacterSnapshot;
use crate::models::types::{ItemTemplateId, MapId, Planet};
use crate::world::data::SHOP_HUB;

/// Single-use capsule.
pub const CAPSULE_NORMAL: ItemTemplateId = ItemTemplateId(193);
/// Unlimited capsule; preferred when both are in the bag.
pub const CAPSULE_SPECIAL: ItemTemplateId = ItemTemplateId(194);

/// Capsule template the character can use right now, if any.
pub fn capsule_in_bag(snapshot: &CharacterSnapshot) -> Option<ItemTemplateId> {
    [CAPSULE_SPECIAL, CAPSULE_NORMAL]
        .into_iter()
        .find(|t| snapshot.has_item(*t))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapsuleEntry {
    /// Injected by the client when standing on the last capsule destination
    ReturnToPrevious,
    Map(MapId),
}

/// Destination menu that opens after using a capsule.
///
/// The client lists a fixed set of maps, leaving out the map the character stands on. When the
/// character still stands on the map the previous capsule use brought it to, the client puts a
/// "go back" entry in front, shifting every destination down by one. This was reverse engineered
/// from observed menus and may not hold for every capsule variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapsuleMenu {
    destinations: Vec<MapId>,
}

impl CapsuleMenu {
    pub fn new(destinations: Vec<MapId>) -> Self {
        Self { destinations }
    }

    pub fn for_planet(planet: Planet) -> Self {
        let mut destinations = vec![planet.home_map(), SHOP_HUB];
        destinations.extend([0, 7, 14, 5, 13, 20, 27].map(MapId));
        Self::new(destinations)
    }

    pub fn destinations(&self) -> &[MapId] {
        &self.destinations
    }

    /// Destinations offered when standing on `current`.
    pub fn reachable(&self, current: MapId) -> impl Iterator<Item = MapId> + '_ {
        self.destinations.iter().copied().filter(move |m| *m != current)
    }

    pub fn entries(&self, current: MapId, last_destination: Option<MapId>) -> Vec<CapsuleEntry> {
        let mut entries = Vec::with_capacity(self.destinations.len() + 1);
        if last_destination == Some(current) {
            entries.push(CapsuleEntry::ReturnToPrevious);
        }
        entries.extend(self.reachable(current).map(CapsuleEntry::Map));
        entries
    }

    /// Menu index to select for `to`, standing on `current`.
    pub fn menu_index(&self, current: MapId, to: MapId, last_destination: Option<MapId>) -> Option<u8> {
        self.entries(current, last_destination)
            .iter()
            .position(|e| *e == CapsuleEntry::Map(to))
            .and_then(|i| u8::try_from(i).ok())
    }
}
