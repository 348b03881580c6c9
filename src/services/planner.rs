use crate::error::{NavError, NavResult};
use crate::models::character::CharacterSnapshot;
use crate::models::edge::{HopAction, NextMap};
use crate::models::types::MapId;
use crate::services::access::AccessibilityFilter;
use crate::services::capsule::{CapsuleMenu, capsule_in_bag};
use crate::world::data::SHOP_HUB;
use crate::world::graph::WorldGraph;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

/// Cost of one hop along a world graph edge.
pub const STRUCTURAL_COST: u32 = 1;
/// Cost of a capsule teleport. Walking up to four maps stays cheaper than teleporting.
pub const CAPSULE_COST: u32 = 5;

/// Shortest accessible route between two maps. Holds only shared read-only data, so one planner
/// serves every character.
pub struct PathPlanner {
    world: Arc<WorldGraph>,
    access: Arc<AccessibilityFilter>,
}

impl PathPlanner {
    pub fn new(world: Arc<WorldGraph>, access: Arc<AccessibilityFilter>) -> Self {
        Self { world, access }
    }

    pub fn world(&self) -> &Arc<WorldGraph> {
        &self.world
    }

    pub fn access(&self) -> &Arc<AccessibilityFilter> {
        &self.access
    }

    /// Dijkstra from `start` to `end`. `None` means the target cannot be reached with the
    /// character's current power, quest progress, clan and bag; that is an expected answer.
    pub fn find_path(&self, start: MapId, end: MapId, snapshot: &CharacterSnapshot) -> Option<Vec<MapId>> {
        if start == end {
            return Some(vec![start]);
        }
        if !self.access.can_enter(end, snapshot) {
            return None;
        }

        // virtual teleport edges depend on the live bag, so they are rebuilt for every call
        let capsule = capsule_in_bag(snapshot).map(|_| CapsuleMenu::for_planet(snapshot.planet));
        let hub_exit = snapshot.planet.spaceport();

        let mut dist: HashMap<MapId, u32> = HashMap::new();
        let mut prev: HashMap<MapId, MapId> = HashMap::new();
        let mut heap = BinaryHeap::new();
        let mut seq: u64 = 0;

        dist.insert(start, 0);
        heap.push(Reverse((0u32, seq, start)));

        while let Some(Reverse((cost, _, map))) = heap.pop() {
            if map == end {
                break;
            }
            if dist.get(&map).is_some_and(|d| cost > *d) {
                continue;
            }

            let structural = self
                .world
                .neighbors(map)
                .iter()
                .map(|e| (e.to, STRUCTURAL_COST));
            let teleports = capsule
                .iter()
                .flat_map(|menu| menu.reachable(map))
                .map(|to| (to, CAPSULE_COST));

            for (to, weight) in structural.chain(teleports) {
                // the shop only ever sends the character to its own spaceport
                if map == SHOP_HUB && to != hub_exit {
                    continue;
                }
                if !self.access.can_enter(to, snapshot) {
                    continue;
                }
                let next = cost + weight;
                if dist.get(&to).is_none_or(|d| next < *d) {
                    dist.insert(to, next);
                    prev.insert(to, map);
                    seq += 1;
                    heap.push(Reverse((next, seq, to)));
                }
            }
        }

        if !prev.contains_key(&end) {
            return None;
        }

        let mut path = vec![end];
        let mut cur = end;
        while let Some(p) = prev.get(&cur) {
            path.push(*p);
            cur = *p;
        }
        path.reverse();
        Some(path)
    }

    /// Route for a navigation session. The shop hub rule is part of the search itself, so a route
    /// through or out of the hub always continues at the character's own spaceport.
    pub fn plan_route(&self, start: MapId, end: MapId, snapshot: &CharacterSnapshot) -> Option<Vec<MapId>> {
        self.find_path(start, end, snapshot)
    }

    /// Concrete edge for one hop of a planned path. World edges win; otherwise the hop must be a
    /// capsule teleport and gets the menu index the client will show from `from`.
    pub fn resolve_hop(
        &self,
        from: MapId,
        to: MapId,
        snapshot: &CharacterSnapshot,
        last_capsule: Option<MapId>,
    ) -> NavResult<NextMap> {
        if from == SHOP_HUB && to != snapshot.planet.spaceport() {
            return Err(NavError::MissingEdge { from, to });
        }
        if let Some(edge) = self.world.edge(from, to) {
            return Ok(edge.clone());
        }

        let item = capsule_in_bag(snapshot).ok_or(NavError::MissingEdge { from, to })?;
        let menu = CapsuleMenu::for_planet(snapshot.planet);
        if !menu.destinations().contains(&to) {
            return Err(NavError::MissingEdge { from, to });
        }
        let index = menu
            .menu_index(from, to, last_capsule)
            .ok_or(NavError::CapsuleDestination(to))?;

        Ok(NextMap {
            to,
            action: HopAction::ConsumableItem {
                item,
                menu_index: Some(index),
            },
        })
    }

    /// Cost of a path under the planner's weights, `None` if a hop is not possible.
    pub fn path_cost(&self, path: &[MapId], snapshot: &CharacterSnapshot) -> Option<u32> {
        path.windows(2).try_fold(0u32, |acc, hop| {
            self.resolve_hop(hop[0], hop[1], snapshot, None).ok()?;
            let weight = if self.world.edge(hop[0], hop[1]).is_some() {
                STRUCTURAL_COST
            } else {
                CAPSULE_COST
            };
            Some(acc + weight)
        })
    }
}
