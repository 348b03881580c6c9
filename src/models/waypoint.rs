use crate::models::types::Position;
use serde::{Deserialize, Serialize};

/// Map-change trigger rectangle as the server describes it on map entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
    /// Needs the explicit "enter" packet
    pub is_enter: bool,
    /// Needs the "offline" map-change packet
    pub is_offline: bool,
    /// Destination name shown by the client; diagnostics only
    pub name: String,
}

impl Waypoint {
    pub fn center(&self) -> Position {
        // the midpoint of two i32 always fits back into an i32
        let mid = |a: i32, b: i32| ((i64::from(a) + i64::from(b)) / 2) as i32;
        Position::new(mid(self.min_x, self.max_x), mid(self.min_y, self.max_y))
    }

    #[inline]
    pub fn is_flagged(&self) -> bool {
        self.is_enter || self.is_offline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_a_huge_rectangle() {
        let wp = Waypoint {
            min_x: i32::MAX - 10,
            min_y: i32::MIN,
            max_x: i32::MAX,
            max_y: i32::MIN + 4,
            is_enter: true,
            is_offline: false,
            name: "edge".to_string(),
        };
        assert_eq!(wp.center(), Position::new(i32::MAX - 5, i32::MIN + 2));
    }
}
