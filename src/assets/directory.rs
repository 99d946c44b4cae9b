//! PNG sprites read from a directory.

use super::{AssetError, AssetSource, SpriteImage};
use std::path::{Path, PathBuf};

/// Loads `<root>/<name>` with the `image` crate.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectoryAssets {
    fn load(&self, name: &str) -> Result<SpriteImage, AssetError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(AssetError::Missing {
                name: name.to_string(),
                path,
            });
        }

        log::debug!("Loading sprite from {:?}", path);
        let decoded = image::open(&path).map_err(|source| AssetError::Decode {
            name: name.to_string(),
            source,
        })?;

        Ok(SpriteImage::new(name, decoded.to_rgba8()))
    }
}
