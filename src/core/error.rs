//! Error types for the configurator

use thiserror::Error;

use crate::assets::AssetKind;

/// Main error type for the configurator
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Bridge error: {0}")]
    Bridge(#[from] atelier_bridge::BridgeError),
}

/// Failure of an asset load.
///
/// Cloneable so a single settlement can be handed to every waiter on the
/// same key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("failed to load {kind} '{path}': {reason}")]
    Load {
        kind: AssetKind,
        path: String,
        reason: String,
    },

    #[error("load of {kind} '{path}' ended before it settled")]
    Abandoned { kind: AssetKind, path: String },

    #[error("preload batch failed: {0}")]
    Batch(Box<AssetError>),
}

impl AssetError {
    /// Build a load failure from any displayable cause.
    pub fn load(kind: AssetKind, path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Load {
            kind,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Path of the asset that failed. For a batch, the failing member's path.
    pub fn path(&self) -> &str {
        match self {
            Self::Load { path, .. } | Self::Abandoned { path, .. } => path,
            Self::Batch(inner) => inner.path(),
        }
    }
}

/// Rejected configuration input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid {axis} dimension: {value}")]
    InvalidDimension {
        axis: crate::configuration::Axis,
        value: f32,
    },

    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    #[error("unknown material '{0}'")]
    UnknownMaterial(String),
}
