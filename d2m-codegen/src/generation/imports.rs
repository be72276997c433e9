//! Import collection utilities.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Tracks imports and deduplicates them.
///
/// Modules keep insertion order; symbols within a module are sorted.
///
/// # Example
///
/// ```
/// use db2model_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add_module("uuid");
/// imports.add("sqlalchemy.orm", "mapped_column");
/// imports.add("sqlalchemy.orm", "Mapped");
///
/// let lines: Vec<String> = imports
///     .iter()
///     .map(|(module, symbols)| {
///         if symbols.is_empty() {
///             format!("import {}", module)
///         } else {
///             let symbols: Vec<&str> = symbols.iter().map(String::as_str).collect();
///             format!("from {} import {}", module, symbols.join(", "))
///         }
///     })
///     .collect();
/// assert_eq!(lines, ["import uuid", "from sqlalchemy.orm import Mapped, mapped_column"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    /// Module path -> set of symbols (sorted for deterministic output)
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Add a whole-module import (e.g., `import uuid`).
    pub fn add_module(&mut self, module: &str) {
        self.imports.entry(module.to_string()).or_default();
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Number of distinct modules.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_and_sort() {
        let mut imports = ImportCollector::new();
        imports.add("sqlalchemy.dialects.postgresql", "VARCHAR");
        imports.add("sqlalchemy.dialects.postgresql", "INTEGER");
        imports.add("sqlalchemy.dialects.postgresql", "VARCHAR");

        assert_eq!(imports.len(), 1);
        let (_, symbols) = imports.iter().next().unwrap();
        let symbols: Vec<&str> = symbols.iter().map(String::as_str).collect();
        assert_eq!(symbols, ["INTEGER", "VARCHAR"]);
    }

    #[test]
    fn test_modules_keep_insertion_order() {
        let mut imports = ImportCollector::new();
        assert!(imports.is_empty());

        imports.add_module("datetime");
        imports.add("typing", "Any");
        imports.add_module("uuid");
        imports.add_module("datetime");

        let modules: Vec<&str> = imports.iter().map(|(m, _)| m).collect();
        assert_eq!(modules, ["datetime", "typing", "uuid"]);
        assert!(imports.iter().next().unwrap().1.is_empty());
    }
}
