use crate::models::types::{ItemTemplateId, Planet};
use serde::{Deserialize, Serialize};

/// One occupied bag slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagItem {
    /// Slot index as the "use item" packet expects it
    pub index: u8,
    pub template: ItemTemplateId,
    pub quantity: u32,
}

/// Everything the accessibility rules and the planner need to know about a character. Taken as a
/// copy from the world observer at the start of every planning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub planet: Planet,
    pub power: u64,
    /// Monotonic main quest progress
    pub quest_index: u32,
    pub clan_id: Option<i32>,
    pub bag: Vec<BagItem>,
}

impl CharacterSnapshot {
    pub fn has_item(&self, template: ItemTemplateId) -> bool {
        self.bag.iter().any(|i| i.template == template && i.quantity > 0)
    }

    pub fn bag_index_of(&self, template: ItemTemplateId) -> Option<u8> {
        self.bag
            .iter()
            .find(|i| i.template == template && i.quantity > 0)
            .map(|i| i.index)
    }

    #[inline]
    pub fn in_clan(&self) -> bool {
        self.clan_id.is_some()
    }
}
