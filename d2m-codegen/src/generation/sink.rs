//! Output targets for a generation run.
//!
//! The orchestrator never touches the filesystem directly; it goes through an
//! [`OutputSink`]. [`FsSink`] writes to disk, [`PreviewSink`] only records
//! what would happen so a dry run can be shown to the user.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use db2model_core::File;
use indexmap::IndexMap;
use serde::Serialize;

use crate::{Error, Result};

/// Directory and file operations the orchestrator needs.
pub trait OutputSink {
    /// Remove `dir` with all its contents if present, then create it empty.
    fn reset_dir(&mut self, dir: &Path) -> Result<()>;

    /// Create `dir` and any missing parents.
    fn create_dir(&mut self, dir: &Path) -> Result<()>;

    /// Write a file, replacing existing content.
    fn write_file(&mut self, file: &File) -> Result<()>;

    /// Remove `dir` with all its contents.
    fn remove_dir(&mut self, dir: &Path) -> Result<()>;
}

/// Writes to the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl OutputSink for FsSink {
    fn reset_dir(&mut self, dir: &Path) -> Result<()> {
        if dir.exists() {
            tracing::debug!(path = %dir.display(), "clearing directory");
            std::fs::remove_dir_all(dir).map_err(|e| Error::io("clear", dir, e))?;
        }
        self.create_dir(dir)
    }

    fn create_dir(&mut self, dir: &Path) -> Result<()> {
        tracing::debug!(path = %dir.display(), "creating directory");
        std::fs::create_dir_all(dir).map_err(|e| Error::io("create", dir, e))
    }

    fn write_file(&mut self, file: &File) -> Result<()> {
        tracing::debug!(path = %file.path().display(), "writing file");
        file.write().map_err(|e| {
            let source = match e.downcast::<std::io::Error>() {
                Ok(io) => io,
                Err(other) => std::io::Error::other(format!("{:#}", other)),
            };
            Error::io("write", file.path(), source)
        })
    }

    fn remove_dir(&mut self, dir: &Path) -> Result<()> {
        tracing::debug!(path = %dir.display(), "removing directory");
        std::fs::remove_dir_all(dir).map_err(|e| Error::io("remove", dir, e))
    }
}

/// One planned filesystem operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "path", rename_all = "snake_case")]
pub enum PlannedOp {
    ResetDir(PathBuf),
    CreateDir(PathBuf),
    WriteFile(PathBuf),
    RemoveDir(PathBuf),
}

/// Records operations in memory and tracks the resulting tree.
///
/// After a run, [`PreviewSink::files`] holds exactly the files a real run
/// would leave behind, in write order.
#[derive(Debug, Clone, Default)]
pub struct PreviewSink {
    operations: Vec<PlannedOp>,
    files: IndexMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl PreviewSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation in the order it was requested.
    pub fn operations(&self) -> &[PlannedOp] {
        &self.operations
    }

    /// Files that would exist after the run.
    pub fn files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files.iter().map(|(p, c)| (p.as_path(), c.as_str()))
    }

    /// Content of a planned file.
    pub fn file(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Directories that would exist after the run.
    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn has_dir(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }

    fn forget_tree(&mut self, dir: &Path) {
        self.files.retain(|path, _| !path.starts_with(dir));
        self.dirs.retain(|path| !path.starts_with(dir));
    }

    fn add_dir(&mut self, dir: &Path) {
        self.dirs.insert(dir.to_path_buf());
    }
}

impl OutputSink for PreviewSink {
    fn reset_dir(&mut self, dir: &Path) -> Result<()> {
        self.operations.push(PlannedOp::ResetDir(dir.to_path_buf()));
        self.forget_tree(dir);
        self.add_dir(dir);
        Ok(())
    }

    fn create_dir(&mut self, dir: &Path) -> Result<()> {
        self.operations.push(PlannedOp::CreateDir(dir.to_path_buf()));
        self.add_dir(dir);
        Ok(())
    }

    fn write_file(&mut self, file: &File) -> Result<()> {
        let path = file.path().to_path_buf();
        self.operations.push(PlannedOp::WriteFile(path.clone()));
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path, file.content().to_string());
        Ok(())
    }

    fn remove_dir(&mut self, dir: &Path) -> Result<()> {
        self.operations.push(PlannedOp::RemoveDir(dir.to_path_buf()));
        self.forget_tree(dir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_fs_sink_reset_clears_contents() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("models");
        std::fs::create_dir_all(dir.join("stale")).unwrap();
        std::fs::write(dir.join("stale").join("old.py"), "x").unwrap();

        let mut sink = FsSink;
        sink.reset_dir(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_fs_sink_write_and_remove() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("shop");
        let mut sink = FsSink;

        sink.write_file(&File::new(dir.join("public").join("users.py"), "class User: ..."))
            .unwrap();
        assert!(dir.join("public").join("users.py").exists());

        sink.remove_dir(&dir.join("public")).unwrap();
        assert!(!dir.join("public").exists());
        assert!(dir.exists());
    }

    #[test]
    fn test_fs_sink_remove_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let err = FsSink.remove_dir(&temp.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Io);
    }

    #[test]
    fn test_preview_sink_tracks_tree() {
        let root = Path::new("/out");
        let mut sink = PreviewSink::new();

        sink.reset_dir(root).unwrap();
        sink.create_dir(&root.join("shop")).unwrap();
        sink.write_file(&File::new(root.join("shop").join("__init__.py"), ""))
            .unwrap();
        sink.write_file(&File::new(root.join("base.py"), "base")).unwrap();
        sink.remove_dir(&root.join("shop")).unwrap();

        let files: Vec<&Path> = sink.files().map(|(p, _)| p).collect();
        assert_eq!(files, [root.join("base.py")]);
        assert_eq!(sink.file(&root.join("base.py")), Some("base"));
        assert!(sink.has_dir(root));
        assert!(!sink.has_dir(&root.join("shop")));
        assert_eq!(sink.operations().len(), 5);
        assert_eq!(
            sink.operations()[4],
            PlannedOp::RemoveDir(root.join("shop"))
        );
    }

    #[test]
    fn test_preview_sink_never_touches_disk() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("models");
        let mut sink = PreviewSink::new();

        sink.reset_dir(&dir).unwrap();
        sink.write_file(&File::new(dir.join("base.py"), "")).unwrap();

        assert!(!dir.exists());
    }
}
