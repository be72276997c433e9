use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "db2model.toml";

/// A db2model.toml file with both raw content and parsed manifest.
pub struct ConfigFile {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl ConfigFile {
    /// Open and parse a db2model.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory relative paths in the manifest are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }

    /// Resolve a manifest path against the config file's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }
}
