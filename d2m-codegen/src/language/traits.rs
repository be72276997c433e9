//! Language-agnostic code generation traits.

use std::path::Path;

use db2model_core::File;
use db2model_ir::{Dialect, Language, NativeType};

use super::NamingConvention;
use crate::model::Table;

/// Trait for language-specific code generators.
///
/// Implement this trait to add support for generating models in a new
/// language. The orchestrator decides which directory each artifact lands in;
/// implementations decide the file names and the content.
pub trait LanguageCodegen {
    /// Target language
    fn language(&self) -> Language;

    /// File extension for generated model modules (e.g., "py")
    fn file_extension(&self) -> &'static str;

    /// Type mapper used to resolve column types
    fn type_mapper(&self) -> &dyn TypeMapper;

    /// Identifier rules for classes, modules and fields
    fn naming(&self) -> &NamingConvention;

    /// The shared base artifact placed at the output root.
    fn base_file(&self, root: &Path) -> File;

    /// One model module for a table, placed in `dir`.
    fn table_file(&self, dir: &Path, table: &Table, ctx: &RenderContext) -> File;

    /// Export manifest for a directory of model modules.
    fn module_manifest(&self, dir: &Path, exports: &[Export]) -> File;

    /// Export manifest for a directory of sub-packages.
    fn package_manifest(&self, dir: &Path, packages: &[String]) -> File;
}

/// Context a model module is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Package levels between the output root and the module's directory
    pub depth: usize,
}

/// One entry of a module export manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// Module file name without extension
    pub module: String,
    /// Exported class name
    pub symbol: String,
}

impl Export {
    pub fn new(module: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbol: symbol.into(),
        }
    }
}

/// One row of a type mapping table.
#[derive(Debug, Clone, Copy)]
pub struct TypeRule {
    /// Native types this rule covers
    pub matches: fn(&NativeType) -> bool,
    /// Target-language type name
    pub target: &'static str,
}

/// Trait for mapping native column types to language-specific type strings.
///
/// Mapping walks an ordered rule table and takes the first match; types
/// that match no rule resolve to [`TypeMapper::fallback`], never an error.
pub trait TypeMapper {
    /// The target language
    fn language(&self) -> Language;

    /// Ordered rules for a dialect
    fn rules(&self, dialect: Dialect) -> &[TypeRule];

    /// Sentinel type for unmapped native types
    fn fallback(&self) -> &'static str;

    /// Map a native type to a language-specific type string
    fn map_type(&self, native: &NativeType) -> &'static str {
        self.rules(native.dialect())
            .iter()
            .find(|rule| (rule.matches)(native))
            .map_or(self.fallback(), |rule| rule.target)
    }

    /// Map a type to its optional form (e.g., `str | None` in Python)
    fn map_optional(&self, base: &str) -> String;
}
