//! Error types shared by the host glue and the configuration layer.
//!
//! Nothing in this crate is fatal to the host page: host errors only ever
//! cause a scene to be skipped, and configuration errors fall back to defaults
//! at the entry point.

use thiserror::Error;

/// Why a scene could not be mounted on the host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host lacks something the scene needs to draw (e.g. no WebGL context).
    #[error("missing host capability: {0}")]
    MissingHostCapability(String),

    /// A referenced page element does not exist.
    #[error("no element matches `{0}`")]
    MissingElement(String),
}

impl HostError {
    /// Missing elements are expected on pages that don't embed every scene.
    pub fn is_silent(&self) -> bool {
        matches!(self, HostError::MissingElement(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
