use std::path::{Path, PathBuf};

use eyre::Result;

/// Marker line placed at the top of every generated file.
///
/// Language crates wrap it in their own comment syntax.
pub const GENERATED_HEADER: &str = "Code generated by db2model. DO NOT EDIT.";

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Materialize the file as a path/content pair rooted at `base`
    fn to_file(&self, base: &Path) -> File {
        File::new(self.path(base), self.render())
    }
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// A file to be generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content, keeping the path
    pub fn with_content(self, content: impl Into<String>) -> Self {
        Self {
            path: self.path,
            content: content.into(),
        }
    }

    /// Write the file to disk
    pub fn write(&self) -> Result<()> {
        write_file(&self.path, &self.content)
    }
}
