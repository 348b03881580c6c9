use crate::error::NavResult;
use crate::models::types::{ItemTemplateId, NpcTemplateId, Position, ZoneId};
use async_trait::async_trait;

/// Outbound game actions, implemented by the movement/service layer on top of the protocol
/// connection. Every call only queues a packet; the server never acknowledges them, which is why
/// the navigator watches the world state instead of waiting on replies.
#[async_trait]
pub trait ActionSink: Send + Sync {
    /// Sets the local coordinates and sends a move packet
    async fn move_to(&self, pos: Position) -> NavResult<()>;
    async fn open_npc_menu(&self, npc: NpcTemplateId) -> NavResult<()>;
    async fn confirm_menu(&self, npc: NpcTemplateId, index: u8) -> NavResult<()>;
    async fn use_item(&self, bag_index: u8) -> NavResult<()>;
    /// Picks an entry of an item-opened menu (capsule destinations)
    async fn select_menu_option(&self, index: u8) -> NavResult<()>;
    async fn request_zone_change(&self, zone: ZoneId) -> NavResult<()>;
    /// Plain "enter waypoint" map change
    async fn request_map_change(&self) -> NavResult<()>;
    /// Map change for waypoints flagged offline
    async fn request_offline_map_change(&self) -> NavResult<()>;
    /// Revive in the home village after dying
    async fn return_to_town(&self) -> NavResult<()>;
}

