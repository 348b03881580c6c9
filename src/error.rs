use thiserror::Error;
use xmap_core::{ItemTemplateId, MapId};

pub type NavResult<T> = Result<T, NavError>;

#[derive(Debug, Error)]
pub enum NavError {
    /// The world graph has no edge for a hop the path asks for
    #[error("no edge from map {from} to map {to}")]
    MissingEdge { from: MapId, to: MapId },

    /// Item needed for a hop is not in the bag
    #[error("item {0} not found in inventory")]
    ItemNotInBag(ItemTemplateId),

    /// No waypoint of the current map could be picked for the hop
    #[error("no usable waypoint in map {map} towards {to}")]
    NoWaypoint { map: MapId, to: MapId },

    /// The capsule menu would not list the destination from where we stand
    #[error("capsule menu has no entry for map {0}")]
    CapsuleDestination(MapId),

    /// Action sink could not queue a packet (usually a dropped connection)
    #[error("action sink: {0}")]
    Sink(String),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

#[derive(Debug, Error)]
pub enum ConfigErrorKind {
    #[error("failed to read file: {0}")]
    Read(std::io::Error),

    #[error("failed to parse file: {0}")]
    Parse(toml::de::Error),

    #[error("failed to parse yaml: {0}")]
    Yaml(serde_yaml::Error),

    #[error("invalid environment variable {0}: {1}")]
    InvalidEnv(String, String),
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: std::path::PathBuf,
        #[source]
        source: ConfigErrorKind,
    },

    #[error("invalid environment: {0}")]
    Env(#[source] ConfigErrorKind),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl InfraError {
    pub fn config(path: impl Into<std::path::PathBuf>, source: ConfigErrorKind) -> Self {
        InfraError::Config {
            path: path.into(),
            source,
        }
    }
}
