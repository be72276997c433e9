//! Test doubles for the generation pipeline.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{cell::RefCell, collections::BTreeSet, path::Path};

use db2model_core::{File, to_capitalized_camel, to_snake_case};
use db2model_ir::{
    Dialect, Language, NativeType, PgType, ReflectedDatabase, ReflectedTable,
};
use eyre::{Result, eyre};
use indexmap::IndexMap;

use crate::{
    collaborators::{Formatter, Reflector},
    language::{Export, LanguageCodegen, NamingConvention, RenderContext, TypeMapper, TypeRule},
    model::Table,
};

fn is_string(native: &NativeType) -> bool {
    matches!(
        native,
        NativeType::Postgres(PgType::Varchar { .. } | PgType::Text)
    )
}

fn is_int(native: &NativeType) -> bool {
    matches!(native, NativeType::Postgres(PgType::Integer))
}

const STUB_RULES: &[TypeRule] = &[
    TypeRule {
        matches: is_string,
        target: "string",
    },
    TypeRule {
        matches: is_int,
        target: "int",
    },
];

/// Maps text types to `string`, integers to `int` and everything else to `unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubTypeMapper;

impl TypeMapper for StubTypeMapper {
    fn language(&self) -> Language {
        Language::Python
    }

    fn rules(&self, dialect: Dialect) -> &[TypeRule] {
        match dialect {
            Dialect::Postgresql => STUB_RULES,
        }
    }

    fn fallback(&self) -> &'static str {
        "unknown"
    }

    fn map_optional(&self, base: &str) -> String {
        format!("{}?", base)
    }
}

fn escape(name: &str) -> String {
    format!("{}_", name)
}

/// Camel-case classes, snake-case files, untouched fields.
pub const STUB_NAMING: NamingConvention = NamingConvention {
    table_to_type: to_capitalized_camel,
    table_to_file: to_snake_case,
    column_to_field: str::to_string,
    reserved_words: &["class"],
    escape_reserved: escape,
};

/// Codegen that renders a compact plain-text description of each artifact.
///
/// Files use the `stub` extension; manifests are `index.stub`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubCodegen;

impl LanguageCodegen for StubCodegen {
    fn language(&self) -> Language {
        Language::Python
    }

    fn file_extension(&self) -> &'static str {
        "stub"
    }

    fn type_mapper(&self) -> &dyn TypeMapper {
        &StubTypeMapper
    }

    fn naming(&self) -> &NamingConvention {
        &STUB_NAMING
    }

    fn base_file(&self, root: &Path) -> File {
        File::new(root.join("base.stub"), "base\n")
    }

    fn table_file(&self, dir: &Path, table: &Table, ctx: &RenderContext) -> File {
        let mut content = format!(
            "class {} table={} schema={} depth={}\n",
            table.generated_name(),
            table.table_name(),
            table.schema_name(),
            ctx.depth
        );
        for column in table.columns() {
            content.push_str(&format!("  {}: {}\n", column.name(), column.resolved_type()));
        }
        File::new(
            dir.join(format!("{}.{}", table.file_base_name(), self.file_extension())),
            content,
        )
    }

    fn module_manifest(&self, dir: &Path, exports: &[Export]) -> File {
        let content: String = exports
            .iter()
            .map(|e| format!("export {}:{}\n", e.module, e.symbol))
            .collect();
        File::new(dir.join("index.stub"), content)
    }

    fn package_manifest(&self, dir: &Path, packages: &[String]) -> File {
        let content: String = packages
            .iter()
            .map(|p| format!("package {}\n", p))
            .collect();
        File::new(dir.join("index.stub"), content)
    }
}

/// In-memory reflector that records which schemas had their tables listed.
#[derive(Debug, Default)]
pub struct FakeReflector {
    databases: IndexMap<String, ReflectedDatabase>,
    failing: BTreeSet<String>,
    listed: RefCell<Vec<(String, String)>>,
}

impl FakeReflector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, name: impl Into<String>, database: ReflectedDatabase) -> Self {
        self.databases.insert(name.into(), database);
        self
    }

    /// Make every call for `database` fail.
    pub fn failing(mut self, database: impl Into<String>) -> Self {
        self.failing.insert(database.into());
        self
    }

    /// `(database, schema)` pairs passed to `list_tables`, in call order.
    pub fn listed_tables(&self) -> Vec<(String, String)> {
        self.listed.borrow().clone()
    }

    fn database(&self, name: &str) -> Result<&ReflectedDatabase> {
        if self.failing.contains(name) {
            return Err(eyre!("connection refused"));
        }
        self.databases
            .get(name)
            .ok_or_else(|| eyre!("unknown database '{}'", name))
    }
}

impl Reflector for FakeReflector {
    fn list_schemas(&self, database: &str) -> Result<Vec<String>> {
        Ok(self.database(database)?.schema_names())
    }

    fn list_tables(&self, database: &str, schema: &str) -> Result<Vec<ReflectedTable>> {
        self.listed
            .borrow_mut()
            .push((database.to_string(), schema.to_string()));
        let db = self.database(database)?;
        Ok(db
            .schema(schema)
            .map(|s| s.tables.clone())
            .unwrap_or_default())
    }
}

/// Formatter that rejects every input.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingFormatter;

impl Formatter for FailingFormatter {
    fn format(&self, _source: &str) -> Result<String> {
        Err(eyre!("syntax error on line 1"))
    }
}
