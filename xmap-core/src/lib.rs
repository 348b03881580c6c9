use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid direction: {0}")]
    Direction(String),
    #[error("invalid planet: {0}")]
    Planet(String),
}

/// Defines a plain integer game id. The wire protocol carries these as bare integers, so the
/// newtypes are transparent for serde and print as the inner number.
#[macro_export]
macro_rules! define_game_id {
    ($name:ident, $inner:ty) => {
        #[derive(
            Copy,
            Clone,
            Debug,
            PartialEq,
            Eq,
            Hash,
            Default,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[repr(transparent)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            #[inline]
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(v: $inner) -> Self {
                Self(v)
            }
        }

        impl core::str::FromStr for $name {
            type Err = core::num::ParseIntError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<$inner>().map(Self)
            }
        }
    };
}

define_game_id!(MapId, u16);
define_game_id!(NpcTemplateId, i32);
define_game_id!(ItemTemplateId, i32);
define_game_id!(ZoneId, u8);

/// Screen direction of a waypoint relative to the map the character stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    #[inline]
    pub fn canonical(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl core::str::FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Direction::Left),
            "r" | "right" => Ok(Direction::Right),
            "u" | "up" => Ok(Direction::Up),
            "d" | "down" => Ok(Direction::Down),
            _ => Err(ParseError::Direction(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// Home planet of a character. Decides the home map, the spaceport the shop hub exits to, and the
/// first entry of the capsule menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    #[default]
    Earth,
    Namek,
    Saiyan,
}

impl Planet {
    pub fn home_map(&self) -> MapId {
        match self {
            Planet::Earth => MapId(21),
            Planet::Namek => MapId(22),
            Planet::Saiyan => MapId(23),
        }
    }

    pub fn spaceport(&self) -> MapId {
        match self {
            Planet::Earth => MapId(24),
            Planet::Namek => MapId(25),
            Planet::Saiyan => MapId(26),
        }
    }

    /// Town the character respawns in after "return to town".
    pub fn village(&self) -> MapId {
        match self {
            Planet::Earth => MapId(0),
            Planet::Namek => MapId(7),
            Planet::Saiyan => MapId(14),
        }
    }
}

impl core::str::FromStr for Planet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "earth" | "td" => Ok(Planet::Earth),
            "namek" | "nm" => Ok(Planet::Namek),
            "saiyan" | "xd" => Ok(Planet::Saiyan),
            _ => Err(ParseError::Planet(s.to_string())),
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Planet::Earth => f.write_str("earth"),
            Planet::Namek => f.write_str("namek"),
            Planet::Saiyan => f.write_str("saiyan"),
        }
    }
}
