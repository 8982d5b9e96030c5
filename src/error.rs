//! Error types for the chart engine and its configuration.

use crate::data::group::GroupId;

/// Result alias used by engine operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Errors surfaced by the engine.
///
/// Recoverable conditions (groups without a `Pad`, unknown record kinds,
/// malformed field updates) are absorbed and logged instead of showing up here.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// An event or update referenced a group id that was never registered.
    ///
    /// Producers must register a group before emitting records for it.
    #[error("group {0} was referenced before it was registered")]
    UnregisteredGroup(GroupId),
}

/// Errors raised while loading [`ChartSettings`](crate::config::ChartSettings).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported settings file extension: {0:?}")]
    UnsupportedFormat(Option<String>),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
