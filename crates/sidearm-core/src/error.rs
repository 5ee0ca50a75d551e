//! Error types shared between the controller and its hosts.

use thiserror::Error;

/// Failure to read an attack configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for `AttackConfig`.
    #[error("invalid attack config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure reported by an external fire dispatch.
///
/// The controller never propagates these; a missed shot is covered by the
/// next cooldown expiry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The weapon in the requested hand has nothing to fire.
    #[error("no ammunition in the requested hand")]
    NoAmmo,
    /// The shooter is not known to the dispatch.
    #[error("unknown shooter entity {0}")]
    UnknownEntity(u64),
    /// Dispatch refused the request for a host-specific reason.
    #[error("fire request rejected: {0}")]
    Rejected(String),
}
