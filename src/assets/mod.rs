//! Asset loading: the source seam, file-backed decoders and the shared cache

pub mod cache;
pub mod file_source;
pub mod gltf;
pub mod source;
pub mod texture;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use cache::{AssetCache, EntryState};
pub use file_source::FileAssetSource;
pub use gltf::{GlbError, GltfModel};
pub use source::AssetSource;
pub use texture::Texture;

/// The two asset kinds. Each has its own key space in the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Model,
    Texture,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetKind::Model => "model",
            AssetKind::Texture => "texture",
        })
    }
}
