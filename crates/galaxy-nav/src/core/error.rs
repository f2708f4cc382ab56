use thiserror::Error;

use crate::api::types::EntityId;

/// Failure while loading or validating the entity registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("malformed registry manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("entity at index {0} has an empty id")]
    EmptyId(usize),
    #[error("duplicate entity id '{0}'")]
    DuplicateId(EntityId),
    #[error("entity '{id}' has a negative orbit radius ({radius})")]
    NegativeOrbit { id: EntityId, radius: f32 },
    #[error("entity '{id}' has a non-finite {field}")]
    NonFinite { id: EntityId, field: &'static str },
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
    #[error("invalid scene config: {0}")]
    Config(#[from] ConfigError),
}

/// Scene configuration value the runtime cannot work with.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be finite and greater than 0 (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be in [0, 1) (got {value})")]
    Smoothing { field: &'static str, value: f32 },
    #[error("{field} must satisfy 0 <= min <= max (got [{min}, {max}])")]
    ZoomRange { field: &'static str, min: f32, max: f32 },
    #[error("far plane ({far}) must lie beyond near plane ({near})")]
    ClipPlanes { near: f32, far: f32 },
    #[error("{field} out of range (got {value})")]
    OutOfRange { field: &'static str, value: f32 },
    #[error("{0} must be finite")]
    NonFinite(&'static str),
}

/// Failure reported by an external collaborator (visit logger, chat backend).
/// Always swallowed at the boundary; never reaches the render loop.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("visit log rejected '{id}': {reason}")]
    VisitLog { id: EntityId, reason: String },
    #[error("chat backend unavailable: {0}")]
    ChatUnavailable(String),
    #[error("empty chat message")]
    EmptyMessage,
}
