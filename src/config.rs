use crate::error::{ConfigErrorKind, InfraError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub timings: NavTimings,
    /// YAML file replacing the built-in map groups / direction overrides
    pub layout_file: Option<PathBuf>,
    /// YAML file replacing the built-in accessibility rules
    pub access_file: Option<PathBuf>,
}

/// Pacing and timeouts of the navigation tick loop. The game server silently drops packets that
/// arrive faster than its own tick, so the delays are not optional.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct NavTimings {
    pub tick_interval_ms: u64,
    pub hop_timeout_ms: u64,
    /// NPCs farther away than this need a teleport-walk before the menu opens
    pub npc_reach_distance: i32,
    pub move_settle_ms: u64,
    pub menu_step_ms: u64,
    pub capsule_settle_ms: u64,
    pub revive_timeout_ms: u64,
    pub zone_pick_attempts: u32,
}

impl Default for NavTimings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            hop_timeout_ms: 5_000,
            npc_reach_distance: 60,
            move_settle_ms: 200,
            menu_step_ms: 500,
            capsule_settle_ms: 700,
            revive_timeout_ms: 10_000,
            zone_pick_attempts: 5,
        }
    }
}

impl NavTimings {
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
    #[inline]
    pub fn hop_timeout(&self) -> Duration {
        Duration::from_millis(self.hop_timeout_ms)
    }
    #[inline]
    pub fn move_settle(&self) -> Duration {
        Duration::from_millis(self.move_settle_ms)
    }
    #[inline]
    pub fn menu_step(&self) -> Duration {
        Duration::from_millis(self.menu_step_ms)
    }
    #[inline]
    pub fn capsule_settle(&self) -> Duration {
        Duration::from_millis(self.capsule_settle_ms)
    }
    #[inline]
    pub fn revive_timeout(&self) -> Duration {
        Duration::from_millis(self.revive_timeout_ms)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InfraError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| InfraError::config(path, ConfigErrorKind::Read(e)))?;
        let cfg: Self =
            toml::from_str(&data).map_err(|e| InfraError::config(path, ConfigErrorKind::Parse(e)))?;
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self, InfraError> {
        let _ = dotenvy::from_filename(".env");
        let d = NavTimings::default();

        let cfg = Self {
            timings: NavTimings {
                tick_interval_ms: env_or("XMAP_TICK_INTERVAL_MS", d.tick_interval_ms)?,
                hop_timeout_ms: env_or("XMAP_HOP_TIMEOUT_MS", d.hop_timeout_ms)?,
                npc_reach_distance: env_or("XMAP_NPC_REACH_DISTANCE", d.npc_reach_distance)?,
                move_settle_ms: env_or("XMAP_MOVE_SETTLE_MS", d.move_settle_ms)?,
                menu_step_ms: env_or("XMAP_MENU_STEP_MS", d.menu_step_ms)?,
                capsule_settle_ms: env_or("XMAP_CAPSULE_SETTLE_MS", d.capsule_settle_ms)?,
                revive_timeout_ms: env_or("XMAP_REVIVE_TIMEOUT_MS", d.revive_timeout_ms)?,
                zone_pick_attempts: env_or("XMAP_ZONE_PICK_ATTEMPTS", d.zone_pick_attempts)?,
            },
            layout_file: std::env::var("XMAP_LAYOUT_FILE").ok().map(PathBuf::from),
            access_file: std::env::var("XMAP_ACCESS_FILE").ok().map(PathBuf::from),
        };

        Ok(cfg)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, InfraError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| InfraError::Env(ConfigErrorKind::InvalidEnv(key.to_string(), raw))),
        Err(_) => Ok(default),
    }
}
