use std::path::{Path, PathBuf};

use db2model_codegen::Export;
use db2model_core::GeneratedFile;

use super::{all_line, header};

/// Package marker and export manifest file name.
pub const INIT_FILE: &str = "__init__.py";

/// `__init__.py` re-exporting the model classes of a schema directory.
pub struct ModuleManifest<'a> {
    exports: &'a [Export],
}

impl<'a> ModuleManifest<'a> {
    pub fn new(exports: &'a [Export]) -> Self {
        Self { exports }
    }
}

impl GeneratedFile for ModuleManifest<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(INIT_FILE)
    }

    fn render(&self) -> String {
        let symbols: Vec<&str> = self.exports.iter().map(|e| e.symbol.as_str()).collect();
        header()
            .each(self.exports, |b, e| {
                b.line(&format!("from .{} import {}", e.module, e.symbol))
            })
            .when(!self.exports.is_empty(), |b| b.blank())
            .line(&all_line(&symbols))
            .build()
    }
}

/// `__init__.py` importing the sub-packages of a directory.
pub struct PackageManifest<'a> {
    packages: &'a [String],
}

impl<'a> PackageManifest<'a> {
    pub fn new(packages: &'a [String]) -> Self {
        Self { packages }
    }
}

impl GeneratedFile for PackageManifest<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(INIT_FILE)
    }

    fn render(&self) -> String {
        header()
            .each(self.packages, |b, p| b.line(&format!("from . import {}", p)))
            .when(!self.packages.is_empty(), |b| b.blank())
            .line(&all_line(self.packages))
            .build()
    }
}
