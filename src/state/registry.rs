use crate::config::Config;
use crate::error::InfraError;
use crate::models::types::CharacterId;
use crate::net::observer::{NpcRegistry, WorldObserver};
use crate::net::sink::ActionSink;
use crate::services::access::{AccessRules, AccessibilityFilter, default_rules};
use crate::services::navigator::Navigator;
use crate::services::planner::PathPlanner;
use crate::world::data::{default_layout, world_with_layout};
use crate::world::graph::WorldGraph;
use crate::world::layout::WorldLayout;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub type SharedNavigator = Arc<Mutex<Navigator>>;

/// Shared world data plus one navigator per attached character.
pub struct Registry {
    pub config: Arc<Config>,
    pub world: Arc<WorldGraph>,
    pub access: Arc<AccessibilityFilter>,
    pub planner: Arc<PathPlanner>,
    navigators: DashMap<CharacterId, SharedNavigator>,
}

impl Registry {
    /// Builds the world graph and access rules, from the configured override files when set.
    pub fn new(config: Arc<Config>) -> Result<Self, InfraError> {
        let layout = match &config.layout_file {
            Some(path) => WorldLayout::load(path)?,
            None => default_layout(),
        };
        let rules = match &config.access_file {
            Some(path) => AccessRules::load(path)?,
            None => default_rules(),
        };

        let world = Arc::new(world_with_layout(layout));
        let access = Arc::new(AccessibilityFilter::new(rules));
        let planner = Arc::new(PathPlanner::new(world.clone(), access.clone()));
        tracing::info!(maps = world.map_count(), "world graph loaded");

        Ok(Self {
            config,
            world,
            access,
            planner,
            navigators: DashMap::new(),
        })
    }

    /// Creates the navigator of a freshly connected character. An existing one is replaced.
    pub fn attach(
        &self,
        character: CharacterId,
        observer: Arc<dyn WorldObserver>,
        npcs: Arc<dyn NpcRegistry>,
        sink: Arc<dyn ActionSink>,
    ) -> SharedNavigator {
        let nav = Arc::new(Mutex::new(Navigator::new(
            character,
            self.planner.clone(),
            observer,
            npcs,
            sink,
            self.config.timings,
        )));
        if self.navigators.insert(character, nav.clone()).is_some() {
            tracing::warn!(%character, "navigator replaced");
        }
        nav
    }

    pub fn detach(&self, character: CharacterId) -> Option<SharedNavigator> {
        self.navigators.remove(&character).map(|(_, nav)| nav)
    }

    pub fn navigator(&self, character: CharacterId) -> Option<SharedNavigator> {
        self.navigators.get(&character).map(|n| n.value().clone())
    }

    pub fn attached(&self) -> usize {
        self.navigators.len()
    }
}

/// Ticks the navigator of `character` at the configured interval until the character is
/// detached. A failing sink ends the running session but not the loop.
pub fn spawn_tick_loop(registry: Arc<Registry>, character: CharacterId) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(registry.config.timings.tick_interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let Some(nav) = registry.navigator(character) else {
                tracing::debug!(%character, "character detached, tick loop stopped");
                break;
            };

            let mut nav = nav.lock().await;
            match nav.tick().await {
                Ok(outcome) if outcome.is_terminal() => {
                    tracing::debug!(%character, ?outcome, "session finished");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(%character, error = %e, "navigation tick failed");
                    nav.cancel();
                }
            }
        }
    })
}
