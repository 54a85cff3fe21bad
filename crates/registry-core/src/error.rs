//! Error types for registry operations

use thiserror::Error;

/// Errors produced by the session registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid game data")]
    InvalidDescriptor,

    #[error("Invalid host name")]
    InvalidHostName,

    #[error("Invalid max players")]
    InvalidMaxPlayers,

    #[error("Game not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
