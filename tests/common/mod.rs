#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use xmap::config::NavTimings;
use xmap::error::{NavError, NavResult};
use xmap::models::character::{BagItem, CharacterSnapshot};
use xmap::models::types::{CharacterId, ItemTemplateId, MapId, NpcTemplateId, Position, ZoneId};
use xmap::models::waypoint::Waypoint;
use xmap::net::sink::ActionSink;
use xmap::services::access::AccessibilityFilter;
use xmap::services::planner::PathPlanner;
use xmap::services::Navigator;
use xmap::world::default_world;
use xmap::LiveWorld;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Move(Position),
    OpenMenu(NpcTemplateId),
    Confirm(NpcTemplateId, u8),
    UseItem(u8),
    SelectOption(u8),
    ZoneChange(ZoneId),
    MapChange,
    OfflineMapChange,
    ReturnToTown,
}

/// Sink that only remembers what it was asked to send.
#[derive(Default)]
pub struct RecordingSink {
    actions: Mutex<Vec<Action>>,
    fail: Mutex<Option<String>>,
}

impl RecordingSink {
    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().clone()
    }

    pub fn take(&self) -> Vec<Action> {
        std::mem::take(&mut *self.actions.lock())
    }

    pub fn fail_with(&self, reason: &str) {
        *self.fail.lock() = Some(reason.to_string());
    }

    fn record(&self, action: Action) -> NavResult<()> {
        if let Some(reason) = self.fail.lock().clone() {
            return Err(NavError::Sink(reason));
        }
        self.actions.lock().push(action);
        Ok(())
    }
}

#[async_trait]
impl ActionSink for RecordingSink {
    async fn move_to(&self, pos: Position) -> NavResult<()> {
        self.record(Action::Move(pos))
    }
    async fn open_npc_menu(&self, npc: NpcTemplateId) -> NavResult<()> {
        self.record(Action::OpenMenu(npc))
    }
    async fn confirm_menu(&self, npc: NpcTemplateId, index: u8) -> NavResult<()> {
        self.record(Action::Confirm(npc, index))
    }
    async fn use_item(&self, bag_index: u8) -> NavResult<()> {
        self.record(Action::UseItem(bag_index))
    }
    async fn select_menu_option(&self, index: u8) -> NavResult<()> {
        self.record(Action::SelectOption(index))
    }
    async fn request_zone_change(&self, zone: ZoneId) -> NavResult<()> {
        self.record(Action::ZoneChange(zone))
    }
    async fn request_map_change(&self) -> NavResult<()> {
        self.record(Action::MapChange)
    }
    async fn request_offline_map_change(&self) -> NavResult<()> {
        self.record(Action::OfflineMapChange)
    }
    async fn return_to_town(&self) -> NavResult<()> {
        self.record(Action::ReturnToTown)
    }
}

pub fn waypoint(x: i32, y: i32, is_offline: bool, name: &str) -> Waypoint {
    Waypoint {
        min_x: x - 20,
        min_y: y - 20,
        max_x: x + 20,
        max_y: y + 20,
        is_enter: !is_offline,
        is_offline,
        name: name.to_string(),
    }
}

/// Left exit (offline flagged) and right exit of an ordinary map.
pub fn side_exits() -> Vec<Waypoint> {
    vec![waypoint(20, 330, true, "left"), waypoint(900, 330, false, "right")]
}

pub fn capsule_bag(quantity: u32) -> Vec<BagItem> {
    vec![BagItem {
        index: 4,
        template: ItemTemplateId(193),
        quantity,
    }]
}

pub fn planner() -> Arc<PathPlanner> {
    Arc::new(PathPlanner::new(
        Arc::new(default_world()),
        Arc::new(AccessibilityFilter::default()),
    ))
}

pub struct Harness {
    pub world: Arc<LiveWorld>,
    pub sink: Arc<RecordingSink>,
    pub nav: Navigator,
}

impl Harness {
    pub fn new(map: u16, snapshot: CharacterSnapshot) -> Self {
        let world = Arc::new(LiveWorld::new(MapId(map), Position::new(450, 330), snapshot));
        world.enter_map(MapId(map), Position::new(450, 330), side_exits());
        let sink = Arc::new(RecordingSink::default());
        let nav = Navigator::new(
            CharacterId::new(),
            planner(),
            world.clone(),
            world.clone(),
            sink.clone(),
            // keeps the random zone pick from ever landing on the current zone in tests
            NavTimings {
                zone_pick_attempts: 64,
                ..Default::default()
            },
        );
        Self { world, sink, nav }
    }

    /// Puts the character on `map` the way a completed map change would.
    pub fn arrive(&self, map: MapId) {
        self.world.enter_map(map, Position::new(450, 330), side_exits());
    }
}
