//! Configurator configuration file

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ModelId};

/// Top-level configuration, loaded from a JSON file.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfiguratorConfig {
    /// Directory that catalog asset paths are resolved against
    pub asset_root: PathBuf,
    /// Model selected when the session starts
    pub initial_model: ModelId,
    /// Load every catalog model into the cache at startup
    pub preload_models: bool,
    /// Load every catalog texture into the cache at startup
    pub preload_textures: bool,
    /// Optional JSON catalog replacing the built-in tables
    pub catalog: Option<PathBuf>,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            initial_model: ModelId::Sofa,
            preload_models: true,
            preload_textures: false,
            catalog: None,
        }
    }
}

impl ConfiguratorConfig {
    /// Load from a JSON file
    pub fn load_sync(path: &Path) -> Result<Self, io::Error> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Resolve the catalog: the configured file if any, else the built-in table.
    ///
    /// A relative catalog path is taken relative to `base_dir`.
    pub fn resolve_catalog(&self, base_dir: &Path) -> Result<Catalog, io::Error> {
        match &self.catalog {
            Some(path) if path.is_relative() => Catalog::load_sync(&base_dir.join(path)),
            Some(path) => Catalog::load_sync(path),
            None => Ok(Catalog::standard()),
        }
    }
}
