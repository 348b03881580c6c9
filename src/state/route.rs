use crate::models::types::MapId;
use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// Hop that has been dispatched and whose arrival is not observed yet.
#[derive(Debug, Clone, Copy)]
pub struct PendingHop {
    pub map: MapId,
    pub since: Instant,
    /// Dispatched through a capsule menu
    pub via_capsule: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Visit {
    pub map: MapId,
    pub at: DateTime<Utc>,
}

/// Progress of one navigation session of one character.
#[derive(Debug, Clone)]
pub struct RouteState {
    pub target: MapId,
    /// Remaining maps, the head is the map the character was last seen on
    pub path: Vec<MapId>,
    /// Maps actually visited, for diagnostics
    pub history: Vec<Visit>,
    pub pending: Option<PendingHop>,
    /// Map the zone flag belongs to
    pub entered_map: MapId,
    pub zone_changed_since_entry: bool,
    /// Consecutive replans that found no route
    pub planning_failures: u8,
}

impl RouteState {
    pub fn new(target: MapId, path: Vec<MapId>) -> Self {
        let start = path.first().copied().unwrap_or(target);
        Self {
            target,
            path,
            history: vec![Visit {
                map: start,
                at: Utc::now(),
            }],
            pending: None,
            entered_map: start,
            zone_changed_since_entry: false,
            planning_failures: 0,
        }
    }

    #[inline]
    pub fn head(&self) -> Option<MapId> {
        self.path.first().copied()
    }

    #[inline]
    pub fn next_hop(&self) -> Option<MapId> {
        self.path.get(1).copied()
    }

    pub fn await_arrival(&mut self, map: MapId, now: Instant, via_capsule: bool) {
        self.pending = Some(PendingHop {
            map,
            since: now,
            via_capsule,
        });
    }

    /// Capsule destination the character has just been seen arriving at.
    pub fn capsule_arrival(&self, current: MapId) -> Option<MapId> {
        self.pending
            .filter(|p| p.via_capsule && p.map == current)
            .map(|p| p.map)
    }

    /// Drops everything before `map` if it shows up later in the path.
    pub fn trim_to(&mut self, map: MapId) -> bool {
        match self.path.iter().skip(1).position(|m| *m == map) {
            Some(pos) => {
                self.path.drain(..=pos);
                true
            }
            None => false,
        }
    }

    pub fn replace_path(&mut self, path: Vec<MapId>) {
        self.path = path;
        self.pending = None;
        self.planning_failures = 0;
    }

    /// Notes that the character is seen on `map`. Entering a new map resets the zone flag.
    pub fn observe(&mut self, map: MapId) {
        if self.entered_map == map {
            return;
        }
        self.entered_map = map;
        self.zone_changed_since_entry = false;
        self.history.push(Visit { map, at: Utc::now() });
    }

    pub fn visited(&self) -> Vec<MapId> {
        self.history.iter().map(|v| v.map).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &[u16]) -> RouteState {
        RouteState::new(MapId(*path.last().unwrap()), path.iter().copied().map(MapId).collect())
    }

    #[test]
    fn trim_skips_ahead() {
        let mut r = route(&[0, 1, 2, 3]);
        assert!(r.trim_to(MapId(2)));
        assert_eq!(r.path, vec![MapId(2), MapId(3)]);
        assert!(!r.trim_to(MapId(9)));
        assert!(!r.trim_to(MapId(2)));
        assert_eq!(r.head(), Some(MapId(2)));
    }

    #[test]
    fn observing_a_new_map_resets_zone_flag() {
        let mut r = route(&[0, 1]);
        r.zone_changed_since_entry = true;
        r.observe(MapId(0));
        assert!(r.zone_changed_since_entry);

        r.observe(MapId(1));
        assert!(!r.zone_changed_since_entry);
        assert_eq!(r.visited(), vec![MapId(0), MapId(1)]);
    }

    #[test]
    fn capsule_arrival_needs_the_expected_map() {
        let mut r = route(&[38, 0]);
        let now = Instant::now();

        r.await_arrival(MapId(0), now, true);
        assert_eq!(r.capsule_arrival(MapId(38)), None);
        assert_eq!(r.capsule_arrival(MapId(21)), None);
        assert_eq!(r.capsule_arrival(MapId(0)), Some(MapId(0)));

        r.await_arrival(MapId(0), now, false);
        assert_eq!(r.capsule_arrival(MapId(0)), None);
    }
}
