//! Hand-curated map of the game world.
//!
//! Links are hard-coded on purpose: NPC menus, capsule lists and multi-exit maps change with
//! server patches and are re-recorded by hand, not derived from client data.

use crate::models::edge::MenuChoice;
use crate::models::types::{Direction, MapId};
use crate::world::graph::WorldGraph;
use crate::world::layout::{DirectionOverride, MapGroup, WaypointException, WaypointPick, WorldLayout};

/// Shop hub; only reachable from the three spaceports and left towards the own planet's one.
pub const SHOP_HUB: MapId = MapId(84);

/// Ticket that gives access to the tournament arena.
pub const ARENA_TICKET: i32 = 1021;
pub const ARENA: MapId = MapId(52);

const NPC_BULMA: i32 = 10;
const NPC_DENDE: i32 = 11;
const NPC_APPULE: i32 = 12;
const NPC_KARIN: i32 = 18;
const NPC_POPO: i32 = 19;
const NPC_KING_KAI: i32 = 20;
const NPC_CLAN_GUARD: i32 = 25;
const NPC_CLAN_EXIT: i32 = 27;
const NPC_ANNOUNCER: i32 = 26;
const NPC_FUTURE_BULMA: i32 = 37;
const NPC_TIME_MACHINE: i32 = 38;
const NPC_SANTA: i32 = 39;
const NPC_NAPPA_PILOT: i32 = 44;
const NPC_COLD_PILOT: i32 = 54;
const NPC_COLD_RETURN: i32 = 55;
const NPC_ICE_GUIDE: i32 = 56;
const NPC_ICE_RETURN: i32 = 57;

const EARTH: &[u16] = &[21, 0, 1, 2, 3, 4, 5, 6, 27, 28, 29, 30];
const NAMEK: &[u16] = &[22, 7, 8, 9, 10, 11, 12, 13, 31, 32, 33, 34];
const SAIYAN: &[u16] = &[23, 14, 15, 16, 17, 18, 19, 20, 35, 36, 37, 38];
const NAPPA: &[u16] = &[68, 69, 70, 71, 72, 64, 65, 63, 66, 67];
const FUTURE: &[u16] = &[102, 92, 93, 94, 96, 97, 98, 99, 100];
const COLD: &[u16] = &[109, 108, 107, 106, 105, 110];
const ICE: &[u16] = &[155, 156, 157, 158, 159];
const CLAN: &[u16] = &[53, 54, 55, 56, 57, 58, 59, 60, 61, 62];

/// The built-in world with its built-in layout.
pub fn default_world() -> WorldGraph {
    world_with_layout(default_layout())
}

pub fn world_with_layout(layout: WorldLayout) -> WorldGraph {
    let mut b = WorldGraph::builder();

    // planet rows
    b.add_chain(EARTH).add_chain(NAMEK).add_chain(SAIYAN);
    // spaceports hang above the second forest of every planet
    b.add_chain(&[2, 24]).add_chain(&[8, 25]).add_chain(&[15, 26]);

    // spaceship pilots; entry 2 is the shop, Appule also flies to the Nappa outpost
    b.add_portal_group(24, &[25, 26, 84], NPC_BULMA, &[0, 1, 2]);
    b.add_portal_group(25, &[24, 26, 84], NPC_DENDE, &[0, 1, 2]);
    b.add_portal_group(26, &[24, 25, 84, 68], NPC_APPULE, &[0, 1, 2, 3]);
    // the shop always sends you home, whatever spaceport is asked for
    b.add_portal_group(84, &[24, 25, 26], NPC_SANTA, &[0, 0, 0]);

    // Karin tower: climb by walking, come down by asking Karin
    b.add_chain(&[6, 47]);
    b.add_walk_link(47, 46, 280, 72);
    b.add_npc_link(46, 47, NPC_KARIN, &[MenuChoice::labeled(0, "Go down")]);
    b.add_walk_link(46, 45, 410, 48);
    b.add_npc_link(45, 46, NPC_POPO, &[MenuChoice::at(1)]);
    b.add_npc_link(45, 48, NPC_POPO, &[MenuChoice::labeled(0, "King Kai")]);
    b.add_npc_link(48, 45, NPC_KING_KAI, &[MenuChoice::at(0)]);

    // tournament arena, entered with a ticket
    b.add_item_link(0, ARENA.0, ARENA_TICKET, None);
    b.add_npc_link(ARENA.0, 0, NPC_ANNOUNCER, &[MenuChoice::labeled(0, "Leave")]);

    // Nappa outpost
    b.add_chain(NAPPA);
    b.add_npc_link(68, 26, NPC_NAPPA_PILOT, &[MenuChoice::at(0)]);

    // future, through the time machine on Kame island
    b.add_npc_link(
        5,
        102,
        NPC_FUTURE_BULMA,
        &[MenuChoice::labeled(0, "Time machine"), MenuChoice::labeled(0, "Go")],
    );
    b.add_npc_link(102, 5, NPC_TIME_MACHINE, &[MenuChoice::at(0)]);
    b.add_chain(FUTURE);

    // Cold planet
    b.add_npc_link(20, 109, NPC_COLD_PILOT, &[MenuChoice::at(0)]);
    b.add_npc_link(109, 20, NPC_COLD_RETURN, &[MenuChoice::at(0)]);
    b.add_chain(COLD);

    // ice fields behind the bamboo forest
    b.add_npc_link(27, 155, NPC_ICE_GUIDE, &[MenuChoice::at(0), MenuChoice::at(1)]);
    b.add_npc_link(155, 27, NPC_ICE_RETURN, &[MenuChoice::at(0)]);
    b.add_chain(ICE);

    // clan grounds
    b.add_npc_link(0, 53, NPC_CLAN_GUARD, &[MenuChoice::at(0), MenuChoice::labeled(1, "Enter")]);
    b.add_npc_link(53, 0, NPC_CLAN_EXIT, &[MenuChoice::at(0)]);
    b.add_chain(CLAN);

    b.build(layout)
}

pub fn default_layout() -> WorldLayout {
    let group = |name: &str, maps: &[u16]| MapGroup {
        name: name.to_string(),
        maps: maps.iter().copied().map(MapId).collect(),
    };
    let vertical = |lower: u16, upper: u16| {
        [
            DirectionOverride {
                from: MapId(lower),
                to: MapId(upper),
                direction: Direction::Up,
            },
            DirectionOverride {
                from: MapId(upper),
                to: MapId(lower),
                direction: Direction::Down,
            },
        ]
    };

    let groups = vec![
        group("earth", EARTH),
        group("namek", NAMEK),
        group("saiyan", SAIYAN),
        group("nappa", NAPPA),
        group("future", FUTURE),
        group("cold", COLD),
        group("ice", ICE),
        group("clan", CLAN),
    ];

    let overrides = [vertical(2, 24), vertical(8, 25), vertical(15, 26), vertical(6, 47)]
        .into_iter()
        .flatten()
        .collect();

    // Both exits of these maps sit on the same side of the screen
    let exceptions = vec![
        WaypointException {
            from: MapId(6),
            to: MapId(27),
            pick: WaypointPick::Bottommost,
        },
        WaypointException {
            from: MapId(20),
            to: MapId(35),
            pick: WaypointPick::Nth(1),
        },
        WaypointException {
            from: MapId(72),
            to: MapId(64),
            pick: WaypointPick::Bottommost,
        },
    ];

    WorldLayout::new(groups, overrides, exceptions)
}
