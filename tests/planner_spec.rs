mod common;

use common::{capsule_bag, planner};
use std::collections::HashMap;
use xmap::models::character::CharacterSnapshot;
use xmap::models::types::{MapId, Planet};
use xmap::services::access::AccessibilityFilter;
use xmap::services::capsule::{CapsuleMenu, capsule_in_bag};
use xmap::services::planner::{CAPSULE_COST, PathPlanner, STRUCTURAL_COST};
use xmap::world::{SHOP_HUB, WorldGraph, WorldLayout};

fn ids(path: &[u16]) -> Vec<MapId> {
    path.iter().copied().map(MapId).collect()
}

/// Plain Bellman-Ford over the same edge set, as an independent reference for path costs.
fn reference_costs(p: &PathPlanner, start: MapId, snapshot: &CharacterSnapshot) -> HashMap<MapId, u32> {
    let world = p.world();
    let capsule = capsule_in_bag(snapshot).map(|_| CapsuleMenu::for_planet(snapshot.planet));

    let mut edges = Vec::new();
    for from in world.maps() {
        if from == SHOP_HUB {
            edges.push((from, snapshot.planet.spaceport(), STRUCTURAL_COST));
            continue;
        }
        for e in world.neighbors(from) {
            edges.push((from, e.to, STRUCTURAL_COST));
        }
        if let Some(menu) = &capsule {
            for to in menu.reachable(from) {
                // a world edge between the same pair is always the cheaper one
                if world.edge(from, to).is_none() {
                    edges.push((from, to, CAPSULE_COST));
                }
            }
        }
    }

    let mut dist = HashMap::from([(start, 0u32)]);
    for _ in 0..world.map_count() {
        let mut changed = false;
        for (from, to, w) in &edges {
            if !p.access().can_enter(*to, snapshot) {
                continue;
            }
            let Some(d) = dist.get(from).copied() else { continue };
            if dist.get(to).is_none_or(|cur| d + w < *cur) {
                dist.insert(*to, d + w);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

fn assert_optimal(p: &PathPlanner, snapshot: &CharacterSnapshot) {
    let mut starts: Vec<MapId> = p.world().maps().collect();
    starts.sort();
    for start in starts.iter().copied().step_by(7) {
        let reference = reference_costs(p, start, snapshot);
        for end in starts.iter().copied() {
            let found = p.find_path(start, end, snapshot);
            match (found, reference.get(&end)) {
                (Some(path), Some(cost)) => {
                    assert_eq!(path.first(), Some(&start));
                    assert_eq!(path.last(), Some(&end));
                    assert_eq!(p.path_cost(&path, snapshot), Some(*cost), "{start} -> {end}: {path:?}");
                }
                (None, None) => {}
                (found, cost) => panic!("{start} -> {end}: planner {found:?}, reference {cost:?}"),
            }
        }
    }
}

#[test]
fn paths_are_minimal_on_foot() {
    let p = planner();
    assert_optimal(&p, &CharacterSnapshot::default());
}

#[test]
fn paths_are_minimal_with_capsule_and_full_access() {
    let p = planner();
    let snapshot = CharacterSnapshot {
        planet: Planet::Namek,
        power: 100_000_000_000,
        quest_index: 40,
        clan_id: Some(3),
        bag: capsule_bag(1),
    };
    assert_optimal(&p, &snapshot);
}

#[test]
fn every_map_on_a_path_is_enterable() {
    let p = planner();
    let snapshot = CharacterSnapshot {
        power: 45_000_000_000,
        quest_index: 21,
        ..Default::default()
    };
    for (start, end) in [(21, 107), (0, 70), (24, 68), (38, 109), (6, 45)] {
        let path = p.find_path(MapId(start), MapId(end), &snapshot).unwrap();
        for map in &path[1..] {
            assert!(p.access().can_enter(*map, &snapshot), "{map} on {path:?}");
        }
    }
}

#[test]
fn planning_is_deterministic() {
    let p = planner();
    let snapshot = CharacterSnapshot {
        bag: capsule_bag(1),
        ..Default::default()
    };
    let first = p.plan_route(MapId(36), MapId(11), &snapshot);
    assert!(first.is_some());
    for _ in 0..10 {
        assert_eq!(p.plan_route(MapId(36), MapId(11), &snapshot), first);
    }
}

#[test]
fn ice_fields_open_at_sixty_billion() {
    let p = planner();
    let mut snapshot = CharacterSnapshot {
        power: 59_999_999_999,
        ..Default::default()
    };
    assert_eq!(p.find_path(MapId(0), MapId(159), &snapshot), None);

    snapshot.power = 60_000_000_000;
    let path = p.find_path(MapId(0), MapId(159), &snapshot).unwrap();
    assert!(path.ends_with(&ids(&[27, 155, 156, 157, 158, 159])));
}

#[test]
fn clan_grounds_need_a_clan() {
    let p = planner();
    let mut snapshot = CharacterSnapshot::default();
    assert_eq!(p.find_path(MapId(0), MapId(57), &snapshot), None);

    snapshot.clan_id = Some(9);
    assert_eq!(p.find_path(MapId(0), MapId(57), &snapshot).unwrap()[..2], ids(&[0, 53]));
}

#[test]
fn unlisted_maps_are_open_to_everyone() {
    let filter = AccessibilityFilter::default();
    let nobody = CharacterSnapshot::default();
    let gated = |m: u16| m == 52 || (53..=72).contains(&m) || (92..=110).contains(&m) || (155..=159).contains(&m);
    for map in (0u16..200).filter(|m| !gated(*m)) {
        assert!(filter.can_enter(MapId(map), &nobody), "map {map}");
    }
}

#[test]
fn shop_hub_always_leaves_through_home() {
    let p = planner();
    for (planet, port) in [(Planet::Earth, 24), (Planet::Namek, 25), (Planet::Saiyan, 26)] {
        let snapshot = CharacterSnapshot {
            planet,
            ..Default::default()
        };
        for target in [2u16, 8, 15, 21, 22, 23] {
            let route = p.plan_route(SHOP_HUB, MapId(target), &snapshot).unwrap();
            assert_eq!(route[..2], ids(&[84, port]), "{planet:?} -> {target}");
            assert_eq!(route.last(), Some(&MapId(target)));
        }
    }
}

#[test]
fn custom_worlds_plan_the_same_way() {
    let mut b = WorldGraph::builder();
    b.add_chain(&[1, 2, 3, 4]).add_chain(&[4, 5]).add_chain(&[1, 5]);
    let world = b.build(WorldLayout::default());

    let targets: Vec<u16> = world.neighbors(MapId(1)).iter().map(|e| e.to.0).collect();
    assert_eq!(targets, vec![2, 5]);

    let p = PathPlanner::new(
        std::sync::Arc::new(world),
        std::sync::Arc::new(AccessibilityFilter::default()),
    );
    let snapshot = CharacterSnapshot::default();
    assert_eq!(p.find_path(MapId(1), MapId(4), &snapshot), Some(ids(&[1, 5, 4])));
    assert_eq!(p.find_path(MapId(4), MapId(9), &snapshot), None);
}

#[test]
fn shop_hub_is_never_left_through_a_foreign_spaceport() {
    let p = planner();
    let snapshot = CharacterSnapshot {
        quest_index: 20,
        bag: capsule_bag(1),
        ..Default::default()
    };

    let route = p.plan_route(MapId(38), MapId(68), &snapshot).unwrap();
    assert!(!route.windows(2).any(|w| w == ids(&[84, 26]).as_slice()), "{route:?}");
    assert_eq!(p.path_cost(&route, &snapshot), Some(CAPSULE_COST + 3 * STRUCTURAL_COST));

    for start in [24u16, 25, 26, 68, 0] {
        for target in [25u16, 26, 68] {
            let route = p.plan_route(MapId(start), MapId(target), &snapshot).unwrap();
            for hop in route.windows(2).filter(|w| w[0] == SHOP_HUB) {
                assert_eq!(hop[1], MapId(24), "{start} -> {target}: {route:?}");
            }
        }
    }
}
