//! Debug snapshots of intermediate buffers as 16-bit grayscale PNGs.

use crate::convert::Gray16Image;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("failed to create snapshot directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write snapshot {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Writes `<dir>/<prefix><name>.png`.
#[derive(Clone, Debug)]
pub struct SnapshotWriter {
    dir: PathBuf,
    prefix: String,
}

impl SnapshotWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Copy of this writer whose prefix is extended by `prefix`.
    pub fn scoped(&self, prefix: &str) -> Self {
        Self {
            dir: self.dir.clone(),
            prefix: format!("{}{prefix}", self.prefix),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}{}.png", self.prefix, name))
    }

    pub fn write(&self, name: &str, img: &Gray16Image) -> Result<PathBuf, SnapshotError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| SnapshotError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(name);
        img.save(&path).map_err(|source| SnapshotError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
