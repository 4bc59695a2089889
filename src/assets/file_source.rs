//! Asset source reading from a directory

use std::path::{Component, Path, PathBuf};

use super::source::AssetSource;
use super::{AssetKind, GltfModel, Texture};
use crate::core::AssetError;

/// Resolves catalog paths (e.g. `/models/milano_sofa.glb`) under a root
/// directory and decodes what it reads
#[derive(Clone, Debug)]
pub struct FileAssetSource {
    root: PathBuf,
}

impl FileAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of an asset path. Paths may not leave the root.
    pub fn resolve(&self, kind: AssetKind, path: &str) -> Result<PathBuf, AssetError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return Err(AssetError::load(kind, path, "path is outside the asset root"));
        }
        Ok(self.root.join(relative))
    }

    async fn read(&self, kind: AssetKind, path: &str) -> Result<Vec<u8>, AssetError> {
        let location = self.resolve(kind, path)?;
        log::debug!("Loading {} {} from {}", kind, path, location.display());
        tokio::fs::read(&location)
            .await
            .map_err(|e| AssetError::load(kind, path, e))
    }
}

impl AssetSource for FileAssetSource {
    type Model = GltfModel;
    type Texture = Texture;

    async fn load_model(&self, path: &str) -> Result<GltfModel, AssetError> {
        let bytes = self.read(AssetKind::Model, path).await?;
        let model = tokio::task::spawn_blocking(move || GltfModel::from_bytes(&bytes))
            .await
            .map_err(|e| AssetError::load(AssetKind::Model, path, e))?
            .map_err(|e| AssetError::load(AssetKind::Model, path, e))?;
        log::debug!("Decoded model {} ({} meshes)", path, model.mesh_count());
        Ok(model)
    }

    async fn load_texture(&self, path: &str) -> Result<Texture, AssetError> {
        let bytes = self.read(AssetKind::Texture, path).await?;
        let texture = tokio::task::spawn_blocking(move || Texture::decode(&bytes))
            .await
            .map_err(|e| AssetError::load(AssetKind::Texture, path, e))?
            .map_err(|e| AssetError::load(AssetKind::Texture, path, e))?;
        log::debug!("Decoded texture {} ({}x{})", path, texture.width, texture.height);
        Ok(texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::gltf::encode_glb;
    use crate::assets::texture::png_bytes;
    use crate::assets::AssetCache;

    fn write(root: &Path, relative: &str, bytes: &[u8]) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_resolve_strips_leading_slash() {
        let source = FileAssetSource::new("/srv/assets");
        let path = source.resolve(AssetKind::Model, "/models/milano_sofa.glb").unwrap();
        assert_eq!(path, PathBuf::from("/srv/assets/models/milano_sofa.glb"));
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let source = FileAssetSource::new("/srv/assets");
        for bad in ["/../etc/passwd", "models/../../x", "", "/"] {
            assert!(source.resolve(AssetKind::Texture, bad).is_err(), "{bad:?}");
        }
    }

    #[tokio::test]
    async fn test_load_model_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let doc = serde_json::json!({ "asset": { "version": "2.0" }, "meshes": [{}] });
        write(dir.path(), "models/milano_sofa.glb", &encode_glb(&doc, None).unwrap());

        let source = FileAssetSource::new(dir.path());
        let model = source.load_model("/models/milano_sofa.glb").await.unwrap();
        assert_eq!(model.mesh_count(), 1);
    }

    #[tokio::test]
    async fn test_load_texture_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "textures/oak.png", &png_bytes(4, 4, [200, 150, 100, 255]));

        let source = FileAssetSource::new(dir.path());
        let tex = source.load_texture("/textures/oak.png").await.unwrap();
        assert_eq!((tex.width, tex.height), (4, 4));
    }

    #[tokio::test]
    async fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileAssetSource::new(dir.path());
        let err = source.load_model("/models/nope.glb").await.unwrap_err();
        assert!(matches!(err, AssetError::Load { kind: AssetKind::Model, .. }));
        assert_eq!(err.path(), "/models/nope.glb");
    }

    #[tokio::test]
    async fn test_undecodable_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "textures/broken.jpg", b"\xff\xd8 truncated");
        let source = FileAssetSource::new(dir.path());
        assert!(source.load_texture("/textures/broken.jpg").await.is_err());
    }

    #[tokio::test]
    async fn test_cache_retries_after_file_appears() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AssetCache::new(FileAssetSource::new(dir.path()));
        assert!(cache.load_texture("/textures/late.png").await.is_err());

        write(dir.path(), "textures/late.png", &png_bytes(1, 1, [0, 0, 0, 255]));
        let tex = cache.load_texture("/textures/late.png").await.unwrap();
        assert_eq!(tex.width, 1);
    }
}
