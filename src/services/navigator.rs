use crate::config::NavTimings;
use crate::error::{NavError, NavResult};
use crate::models::character::CharacterSnapshot;
use crate::models::edge::{EdgeKind, HopAction, MenuChoice, NextMap};
use crate::models::types::{CharacterId, ItemTemplateId, MapId, NpcTemplateId, Position, ZoneId};
use crate::net::observer::{NpcRegistry, WorldObserver};
use crate::net::sink::ActionSink;
use crate::services::planner::PathPlanner;
use crate::services::recovery::{RecoveryController, RecoveryStep};
use crate::services::waypoint::select_waypoint;
use crate::state::route::RouteState;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::{Instant, sleep};

/// A replan that finds no route is retried once on the next tick before the session is given up.
const MAX_PLANNING_FAILURES: u8 = 2;

/// Terminal failures of a navigation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavFailure {
    #[error("no accessible route from map {from} to map {target}")]
    PlanningFailure { from: MapId, target: MapId },

    #[error("character did not revive after dying on map {map}")]
    ResurrectionTimeout { map: MapId },
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No navigation session
    Idle,
    /// A hop is in flight and has not timed out
    Waiting { map: MapId },
    Dispatched { from: MapId, to: MapId, kind: EdgeKind },
    Arrived { target: MapId },
    Replanned { path: Vec<MapId> },
    /// A replan found nothing; it is tried once more on the next tick
    PlanningRetry { from: MapId },
    /// Entered a map that killed the character before; `zone` is the requested zone, if any
    ZoneHopped { map: MapId, zone: Option<ZoneId> },
    Recovering,
    Failed(NavFailure),
}

impl TickOutcome {
    /// Whether the session ended with this tick
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Arrived { .. } | TickOutcome::Failed(_))
    }
}

/// Read-only view of a running session.
#[derive(Debug, Clone, Serialize)]
pub struct NavStatus {
    pub target: MapId,
    pub path: Vec<MapId>,
    pub visited: Vec<MapId>,
    pub waiting_on: Option<MapId>,
    pub hazardous_maps: Vec<MapId>,
}

/// Drives one character along a planned route, one tick at a time.
///
/// Nothing is sent without first looking at the observed world state, and nothing is assumed
/// to have happened because it was sent. Arrival is only ever confirmed by a later tick seeing
/// the character on the expected map.
pub struct Navigator {
    character: CharacterId,
    planner: Arc<PathPlanner>,
    observer: Arc<dyn WorldObserver>,
    npcs: Arc<dyn NpcRegistry>,
    sink: Arc<dyn ActionSink>,
    timings: NavTimings,

    route: Option<RouteState>,
    /// Maps the character died on; they outlive single sessions
    hazardous_maps: HashSet<MapId>,
    /// Last map the character was seen arriving at through a capsule, needed for the menu offset
    last_capsule_destination: Option<MapId>,
    recovery: RecoveryController,
}

impl Navigator {
    pub fn new(
        character: CharacterId,
        planner: Arc<PathPlanner>,
        observer: Arc<dyn WorldObserver>,
        npcs: Arc<dyn NpcRegistry>,
        sink: Arc<dyn ActionSink>,
        timings: NavTimings,
    ) -> Self {
        Self {
            character,
            planner,
            observer,
            npcs,
            sink,
            timings,
            route: None,
            hazardous_maps: HashSet::new(),
            last_capsule_destination: None,
            recovery: RecoveryController::new(timings.revive_timeout()),
        }
    }

    pub fn character(&self) -> CharacterId {
        self.character
    }

    /// Plans from the observed map to `target` and starts a new session, replacing any running
    /// one. Returns the planned path.
    pub fn navigate_to(&mut self, target: MapId) -> Result<Vec<MapId>, NavFailure> {
        let from = self.observer.current_map();
        let snapshot = self.observer.snapshot();

        let Some(path) = self.planner.plan_route(from, target, &snapshot) else {
            if let Some(gate) = self.planner.access().denial(target, &snapshot) {
                tracing::warn!(character = %self.character, %from, %target, %gate, "target map is gated");
            } else {
                tracing::warn!(character = %self.character, %from, %target, "no route");
            }
            return Err(NavFailure::PlanningFailure { from, target });
        };

        tracing::info!(character = %self.character, %from, %target, hops = path.len() - 1, "navigation started");
        self.route = Some(RouteState::new(target, path.clone()));
        self.recovery.reset();
        Ok(path)
    }

    pub fn cancel(&mut self) {
        if let Some(route) = self.route.take() {
            tracing::info!(character = %self.character, target = %route.target, "navigation cancelled");
        }
        self.recovery.reset();
    }

    #[inline]
    pub fn is_navigating(&self) -> bool {
        self.route.is_some()
    }

    pub fn route(&self) -> Option<&RouteState> {
        self.route.as_ref()
    }

    pub fn status(&self) -> Option<NavStatus> {
        let route = self.route.as_ref()?;
        let mut hazardous_maps: Vec<MapId> = self.hazardous_maps.iter().copied().collect();
        hazardous_maps.sort();
        Some(NavStatus {
            target: route.target,
            path: route.path.clone(),
            visited: route.visited(),
            waiting_on: route.pending.map(|p| p.map),
            hazardous_maps,
        })
    }

    pub fn hazardous_maps(&self) -> &HashSet<MapId> {
        &self.hazardous_maps
    }

    pub fn mark_hazardous(&mut self, map: MapId) {
        self.hazardous_maps.insert(map);
    }

    pub fn clear_hazards(&mut self) {
        self.hazardous_maps.clear();
    }

    pub fn last_capsule_destination(&self) -> Option<MapId> {
        self.last_capsule_destination
    }

    /// One step of the state machine. At most one hop is dispatched per call. Errors are sink
    /// failures only; everything the navigator can work around ends up in the outcome.
    pub async fn tick(&mut self) -> NavResult<TickOutcome> {
        let Some(mut route) = self.route.take() else {
            return Ok(TickOutcome::Idle);
        };

        let result = self.step(&mut route).await;
        let finished = matches!(&result, Ok(outcome) if outcome.is_terminal());
        if !finished {
            self.route = Some(route);
        }
        result
    }

    async fn step(&mut self, route: &mut RouteState) -> NavResult<TickOutcome> {
        let current = self.observer.current_map();
        let dead = self.observer.is_dead();

        if dead || self.recovery.in_progress() {
            return self.recover(route, dead, current).await;
        }

        route.observe(current);
        if let Some(map) = route.capsule_arrival(current) {
            self.last_capsule_destination = Some(map);
        }

        if self.hazardous_maps.contains(&current) && !route.zone_changed_since_entry {
            route.zone_changed_since_entry = true;
            let zone = self.change_zone(current).await?;
            return Ok(TickOutcome::ZoneHopped { map: current, zone });
        }

        if current == route.target {
            tracing::info!(
                character = %self.character,
                target = %route.target,
                visited = route.history.len(),
                "navigation complete"
            );
            return Ok(TickOutcome::Arrived { target: route.target });
        }

        if let Some(pending) = route.pending {
            if pending.map == current {
                route.pending = None;
                route.trim_to(current);
            } else if pending.since.elapsed() >= self.timings.hop_timeout() {
                tracing::warn!(character = %self.character, map = %current, waiting_on = %pending.map, "hop timed out");
                route.pending = None;
                return Ok(self.replan(route, current));
            } else {
                return Ok(TickOutcome::Waiting { map: pending.map });
            }
        }

        if route.head() != Some(current) {
            if route.trim_to(current) {
                tracing::info!(character = %self.character, map = %current, "ahead of plan, path trimmed");
            } else {
                tracing::warn!(character = %self.character, map = %current, expected = ?route.head(), "off the planned path");
                return Ok(self.replan(route, current));
            }
        }

        let Some(next) = route.next_hop() else {
            return Ok(self.replan(route, current));
        };

        let snapshot = self.observer.snapshot();
        let hop = match self
            .planner
            .resolve_hop(current, next, &snapshot, self.last_capsule_destination)
        {
            Ok(hop) => hop,
            Err(e) => {
                tracing::warn!(character = %self.character, error = %e, "cannot resolve hop");
                return Ok(self.replan(route, current));
            }
        };

        match self.dispatch(current, &hop, &snapshot).await {
            Ok(()) => {}
            Err(e @ NavError::Sink(_)) => return Err(e),
            Err(e) => {
                tracing::warn!(character = %self.character, from = %current, to = %next, error = %e, "hop failed");
                return Ok(self.replan(route, current));
            }
        }

        let via_capsule = matches!(hop.action, HopAction::ConsumableItem { menu_index: Some(_), .. });
        route.await_arrival(next, Instant::now(), via_capsule);
        Ok(TickOutcome::Dispatched {
            from: current,
            to: next,
            kind: hop.kind(),
        })
    }

    fn replan(&self, route: &mut RouteState, from: MapId) -> TickOutcome {
        let snapshot = self.observer.snapshot();
        match self.planner.plan_route(from, route.target, &snapshot) {
            Some(path) => {
                tracing::info!(character = %self.character, %from, target = %route.target, ?path, "route replanned");
                route.replace_path(path.clone());
                TickOutcome::Replanned { path }
            }
            None => {
                route.planning_failures += 1;
                route.pending = None;
                // forces another replan on the next tick
                route.path.clear();
                if route.planning_failures >= MAX_PLANNING_FAILURES {
                    tracing::error!(character = %self.character, %from, target = %route.target, "no route, giving up");
                    TickOutcome::Failed(NavFailure::PlanningFailure {
                        from,
                        target: route.target,
                    })
                } else {
                    tracing::warn!(character = %self.character, %from, target = %route.target, "no route, retrying");
                    TickOutcome::PlanningRetry { from }
                }
            }
        }
    }

    async fn recover(&mut self, route: &mut RouteState, dead: bool, current: MapId) -> NavResult<TickOutcome> {
        let step = self
            .recovery
            .step(dead, current, &mut self.hazardous_maps, self.sink.as_ref())
            .await?;

        match step {
            RecoveryStep::Revived { died_on } => {
                tracing::debug!(character = %self.character, %died_on, map = %current, "resuming after death");
                route.pending = None;
                route.observe(current);
                Ok(self.replan(route, current))
            }
            RecoveryStep::TimedOut { died_on } => Ok(TickOutcome::Failed(NavFailure::ResurrectionTimeout { map: died_on })),
            RecoveryStep::Started { .. } | RecoveryStep::Waiting | RecoveryStep::RetriedReturn => {
                Ok(TickOutcome::Recovering)
            }
        }
    }

    async fn change_zone(&self, map: MapId) -> NavResult<Option<ZoneId>> {
        let current = self.observer.zone();
        let count = self.observer.zone_count();

        let Some(zone) = pick_other_zone(current, count, self.timings.zone_pick_attempts) else {
            tracing::debug!(character = %self.character, %map, zones = count, "hazardous map, no other zone to go to");
            return Ok(None);
        };

        tracing::info!(character = %self.character, %map, from = %current, to = %zone, "hazardous map, changing zone");
        self.sink.request_zone_change(zone).await?;
        Ok(Some(zone))
    }

    async fn dispatch(&self, from: MapId, hop: &NextMap, snapshot: &CharacterSnapshot) -> NavResult<()> {
        tracing::debug!(character = %self.character, %from, to = %hop.to, kind = %hop.kind(), "dispatching hop");
        match &hop.action {
            HopAction::NpcDialogue { npc, menu } => self.talk_to(*npc, menu).await,
            HopAction::CoordinateWalk { target } => self.walk_to(*target).await,
            HopAction::Waypoint => self.take_waypoint(from, hop.to).await,
            HopAction::ConsumableItem { item, menu_index } => self.use_consumable(*item, *menu_index, snapshot).await,
        }
    }

    async fn talk_to(&self, npc: NpcTemplateId, menu: &[MenuChoice]) -> NavResult<()> {
        match self.npcs.npc_position(npc) {
            Some(pos) => {
                let here = self.observer.position();
                if here.distance(&pos) > f64::from(self.timings.npc_reach_distance) {
                    tracing::debug!(%npc, from = %here, to = %pos, "moving next to npc");
                    self.sink.move_to(pos).await?;
                    sleep(self.timings.move_settle()).await;
                }
            }
            // the server still accepts the menu when the npc is just not announced yet
            None => tracing::debug!(%npc, "npc position unknown"),
        }

        self.sink.open_npc_menu(npc).await?;
        for choice in menu {
            sleep(self.timings.menu_step()).await;
            tracing::debug!(%npc, index = choice.index, label = choice.label.unwrap_or("-"), "menu choice");
            self.sink.confirm_menu(npc, choice.index).await?;
        }
        Ok(())
    }

    async fn walk_to(&self, target: Position) -> NavResult<()> {
        self.sink.move_to(target).await?;
        sleep(self.timings.move_settle()).await;
        self.sink.request_map_change().await
    }

    async fn take_waypoint(&self, from: MapId, to: MapId) -> NavResult<()> {
        let waypoints = self.observer.waypoints();
        let (wp, choice) =
            select_waypoint(self.planner.world(), from, to, &waypoints).ok_or(NavError::NoWaypoint { map: from, to })?;

        tracing::debug!(%from, %to, waypoint = %wp.name, ?choice, "waypoint picked");
        self.sink.move_to(wp.center()).await?;
        sleep(self.timings.move_settle()).await;
        if wp.is_offline {
            self.sink.request_offline_map_change().await
        } else {
            self.sink.request_map_change().await
        }
    }

    async fn use_consumable(
        &self,
        item: ItemTemplateId,
        menu_index: Option<u8>,
        snapshot: &CharacterSnapshot,
    ) -> NavResult<()> {
        let bag_index = snapshot.bag_index_of(item).ok_or(NavError::ItemNotInBag(item))?;
        self.sink.use_item(bag_index).await?;

        if let Some(index) = menu_index {
            sleep(self.timings.capsule_settle()).await;
            self.sink.select_menu_option(index).await?;
        }
        Ok(())
    }
}

/// Random zone other than `current`, giving up after `attempts` draws.
fn pick_other_zone(current: ZoneId, count: u8, attempts: u32) -> Option<ZoneId> {
    if count <= 1 {
        return None;
    }
    let mut rng = rand::rng();
    (0..attempts.max(1))
        .map(|_| ZoneId(rng.random_range(0..count)))
        .find(|z| *z != current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_zone_maps_have_no_alternative() {
        assert_eq!(pick_other_zone(ZoneId(0), 1, 10), None);
        assert_eq!(pick_other_zone(ZoneId(0), 0, 10), None);
    }

    #[test]
    fn picked_zone_differs_and_is_in_range() {
        for _ in 0..50 {
            if let Some(z) = pick_other_zone(ZoneId(2), 4, 5) {
                assert_ne!(z, ZoneId(2));
                assert!(z.0 < 4);
            }
        }
        // with two zones and enough draws the other one is practically always found
        assert_eq!(pick_other_zone(ZoneId(0), 2, 64), Some(ZoneId(1)));
    }
}
