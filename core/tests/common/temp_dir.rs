// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scratch directories for integration tests, removed on drop.

use std::error::Error;
use std::path::PathBuf;

use tempfile::TempDir;
use tokio::fs;

#[derive(Debug)]
pub struct TempDirs {
    /// Holds the database of the hub under test.
    pub state_dir: PathBuf,

    /// Holds the image files picked in the wizard.
    pub images_dir: PathBuf,

    base: TempDir,
}

impl TempDirs {
    pub async fn new() -> Result<Self, Box<dyn Error>> {
        let base = tempfile::tempdir()?;
        let state_dir = base.path().join("state");
        let images_dir = base.path().join("images");
        for dir in [&state_dir, &images_dir] {
            fs::create_dir_all(dir).await?;
        }

        Ok(Self {
            state_dir,
            images_dir,
            base,
        })
    }

    pub fn base(&self) -> PathBuf {
        self.base.path().to_owned()
    }

    /// Writes an image file into the images directory and returns its path.
    #[allow(dead_code)]
    pub async fn create_image_file(&self, name: &str, content: &[u8]) -> Result<PathBuf, Box<dyn Error>> {
        let path = self.images_dir.join(name);
        fs::write(&path, content).await?;
        tracing::debug!(path = %path.display(), "created test image");
        Ok(path)
    }
}

pub async fn setup_temp_dirs() -> Result<TempDirs, Box<dyn Error>> {
    TempDirs::new().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn temp_dirs_share_one_base() {
        let dirs = TempDirs::new().await.unwrap();
        assert!(dirs.state_dir.is_dir());
        assert!(dirs.images_dir.is_dir());
        assert_eq!(dirs.state_dir.parent(), Some(dirs.base().as_path()));
    }

    #[tokio::test]
    async fn temp_dirs_are_removed_on_drop() {
        let dirs = TempDirs::new().await.unwrap();
        let base = dirs.base();
        drop(dirs);
        assert!(!base.exists());
    }
}
