//! The generation run.
//!
//! A run walks databases, then schemas, then tables, and writes one model
//! module per surviving table:
//!
//! ```text
//! <root>/base.py
//! <root>/__init__.py
//! <root>/<database>/__init__.py
//! <root>/<database>/<schema>/__init__.py
//! <root>/<database>/<schema>/<table>.py
//! ```
//!
//! Schema directories are named by the language's file naming rules, so a
//! schema such as `sales-eu` becomes the importable package `sales_eu`.
//!
//! The root and every database directory are cleared before they are filled,
//! so stale modules never survive a run. Any error aborts the run; files
//! already written stay where they are.

use std::path::{Path, PathBuf};

use db2model_core::File;
use db2model_ir::Dialect;

use super::{DatabaseReport, Exclusion, OutputSink, RunReport, SchemaReport};
use crate::{
    Error, Result,
    collaborators::{Formatter, Reflector},
    filter::IgnoreFilter,
    language::{Export, LanguageCodegen, RenderContext},
    model::TableBuilder,
};

/// Package levels between the output root and a schema directory.
const SCHEMA_DEPTH: usize = 2;

/// Run-level settings, passed by value so several runs can coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub dialect: Dialect,
    pub output_dir: PathBuf,
    /// Databases in processing order
    pub databases: Vec<String>,
    /// Remove schema and database directories that end up without models
    pub prune_empty_dirs: bool,
    /// Strip one trailing character from table names before deriving class names
    pub singularize: bool,
}

impl GeneratorConfig {
    pub fn new(dialect: Dialect, output_dir: impl Into<PathBuf>, databases: Vec<String>) -> Self {
        Self {
            dialect,
            output_dir: output_dir.into(),
            databases,
            prune_empty_dirs: true,
            singularize: true,
        }
    }

    pub fn prune_empty_dirs(mut self, prune: bool) -> Self {
        self.prune_empty_dirs = prune;
        self
    }

    pub fn singularize(mut self, singularize: bool) -> Self {
        self.singularize = singularize;
        self
    }

    /// Keep only the named databases, in configured order.
    ///
    /// An empty selection keeps everything. Naming a database that is not
    /// configured is an error.
    pub fn restrict_to(mut self, names: &[String]) -> Result<Self> {
        if names.is_empty() {
            return Ok(self);
        }
        if let Some(unknown) = names.iter().find(|n| !self.databases.contains(n)) {
            return Err(Error::UnknownDatabase {
                database: unknown.clone(),
            });
        }
        self.databases.retain(|db| names.contains(db));
        Ok(self)
    }
}

/// Drives one generation run.
pub struct Generator<'a> {
    config: GeneratorConfig,
    codegen: &'a dyn LanguageCodegen,
    reflector: &'a dyn Reflector,
    formatter: &'a dyn Formatter,
    filter: IgnoreFilter,
}

impl<'a> Generator<'a> {
    pub fn new(
        config: GeneratorConfig,
        codegen: &'a dyn LanguageCodegen,
        reflector: &'a dyn Reflector,
        formatter: &'a dyn Formatter,
        filter: IgnoreFilter,
    ) -> Self {
        Self {
            config,
            codegen,
            reflector,
            formatter,
            filter,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate every configured database into `sink`.
    pub fn run(&self, sink: &mut dyn OutputSink) -> Result<RunReport> {
        let root = self.config.output_dir.as_path();
        let mut report = RunReport {
            output_dir: root.to_path_buf(),
            ..Default::default()
        };

        tracing::info!(
            output = %root.display(),
            language = %self.codegen.language(),
            dialect = %self.config.dialect,
            "starting generation"
        );
        sink.reset_dir(root)?;
        self.write(sink, &self.codegen.base_file(root), &mut report)?;
        self.write(sink, &self.codegen.package_manifest(root, &[]), &mut report)?;

        for database in &self.config.databases {
            let db_report = self.generate_database(sink, root, database, &mut report)?;
            report.databases.push(db_report);
        }

        tracing::info!(
            tables = report.table_count(),
            files = report.files_written,
            "generation finished"
        );
        Ok(report)
    }

    fn generate_database(
        &self,
        sink: &mut dyn OutputSink,
        root: &Path,
        database: &str,
        report: &mut RunReport,
    ) -> Result<DatabaseReport> {
        let mut db_report = DatabaseReport::new(database);
        let db_dir = root.join(database);
        tracing::info!(database, "generating database");
        sink.reset_dir(&db_dir)?;

        let mut schemas = self
            .reflector
            .list_schemas(database)
            .map_err(|e| Error::reflection(format!("database '{}'", database), &e))?;
        schemas.sort();
        let mut packages = Vec::new();

        for schema in &schemas {
            if schema.is_empty() && self.config.dialect.requires_schema() {
                return Err(Error::MissingSchema {
                    database: database.to_string(),
                    dialect: self.config.dialect,
                });
            }
            if self.filter.is_schema_excluded(database, schema) {
                db_report.ignored_schemas.push(schema.clone());
                continue;
            }
            let package = self.codegen.naming().file_name(schema);
            let schema_dir = db_dir.join(&package);
            let schema_report =
                self.generate_schema(sink, &schema_dir, database, schema, report)?;
            if !schema_report.pruned {
                packages.push(package);
            }
            db_report.table_count += schema_report.classes.len();
            db_report.schemas.push(schema_report);
        }

        if db_report.table_count == 0 && self.config.prune_empty_dirs {
            tracing::info!(database, "no models generated, removing directory");
            sink.remove_dir(&db_dir)?;
            db_report.pruned = true;
        } else {
            self.write(
                sink,
                &self.codegen.package_manifest(&db_dir, &packages),
                report,
            )?;
        }

        Ok(db_report)
    }

    fn generate_schema(
        &self,
        sink: &mut dyn OutputSink,
        schema_dir: &Path,
        database: &str,
        schema: &str,
        report: &mut RunReport,
    ) -> Result<SchemaReport> {
        let mut schema_report = SchemaReport::new(schema);
        sink.create_dir(schema_dir)?;

        let mut tables = self
            .reflector
            .list_tables(database, schema)
            .map_err(|e| Error::reflection(format!("schema '{}.{}'", database, schema), &e))?;
        tables.sort_by(|a, b| a.name.cmp(&b.name));

        let builder = TableBuilder::new(
            database,
            schema,
            self.config.dialect,
            self.codegen.type_mapper(),
            self.codegen.naming(),
        )
        .singularize(self.config.singularize);
        let ctx = RenderContext {
            depth: SCHEMA_DEPTH,
        };
        let mut exports = Vec::new();

        for reflected in &tables {
            if let Some(reason) = self.filter.evaluate(database, schema, &reflected.name)? {
                tracing::info!(database, schema, table = %reflected.name, %reason, "ignored table");
                schema_report.exclusions.push(Exclusion {
                    table: reflected.name.clone(),
                    reason,
                });
                continue;
            }

            let mut table = builder.build(reflected)?;
            if table.is_empty() {
                tracing::info!(
                    database,
                    schema,
                    table = %reflected.name,
                    "skipping table without columns"
                );
                schema_report.empty_tables.push(reflected.name.clone());
                continue;
            }
            table.order_columns();

            let file = self.codegen.table_file(schema_dir, &table, &ctx);
            let formatted = self.formatter.format(file.content()).map_err(|e| Error::Format {
                database: database.to_string(),
                schema: schema.to_string(),
                table: reflected.name.clone(),
                reason: format!("{:#}", e),
            })?;
            self.write(sink, &file.with_content(formatted), report)?;

            tracing::info!(database, schema, class = table.generated_name(), "generated model");
            exports.push(Export::new(table.file_base_name(), table.generated_name()));
            schema_report.classes.push(table.generated_name().to_string());
        }

        if exports.is_empty() && self.config.prune_empty_dirs {
            tracing::info!(database, schema, "no models generated, removing directory");
            sink.remove_dir(schema_dir)?;
            schema_report.pruned = true;
        } else {
            self.write(
                sink,
                &self.codegen.module_manifest(schema_dir, &exports),
                report,
            )?;
        }

        Ok(schema_report)
    }

    fn write(&self, sink: &mut dyn OutputSink, file: &File, report: &mut RunReport) -> Result<()> {
        sink.write_file(file)?;
        report.files_written += 1;
        Ok(())
    }
}
