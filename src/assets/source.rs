//! Where assets come from

use std::future::Future;

use crate::core::AssetError;

/// Loads and decodes assets by path.
///
/// Implementations do the I/O; deduplication and memoization are the
/// cache's job, so a source may be hit once per path at most while the
/// cache is in front of it.
pub trait AssetSource: Send + Sync + 'static {
    /// Decoded 3D model
    type Model: Send + Sync + 'static;
    /// Decoded texture image
    type Texture: Send + Sync + 'static;

    fn load_model(&self, path: &str) -> impl Future<Output = Result<Self::Model, AssetError>> + Send;

    fn load_texture(&self, path: &str) -> impl Future<Output = Result<Self::Texture, AssetError>> + Send;
}
