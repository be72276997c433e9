//! Hierarchical ignore rules.
//!
//! Tables are checked against, in order: the global list, the database list,
//! the (database, schema) list, and finally qualified-name rules for
//! `prefix.table` names surfaced by the reflector. Schemas have their own
//! block list, checked before any of their tables are looked at.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use db2model_ir::QUALIFIER_SEPARATOR;
use db2model_manifest::IgnoreConfig;
use serde::Serialize;

use crate::{Error, Result};

/// Why a table was excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum ExcludeReason {
    /// Listed in the global table list
    Global,
    /// Listed for the enclosing database
    Database,
    /// Listed for the enclosing (database, schema)
    Schema,
    /// Qualified with a prefix that is neither the database nor the schema
    ForeignQualifier { prefix: String },
    /// Qualified with the database name and its base name is listed for the database
    QualifiedDatabase,
    /// Qualified with the schema name and its base name is listed for the schema
    QualifiedSchema,
}

impl fmt::Display for ExcludeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExcludeReason::Global => write!(f, "globally ignored"),
            ExcludeReason::Database => write!(f, "ignored for database"),
            ExcludeReason::Schema => write!(f, "ignored for schema"),
            ExcludeReason::ForeignQualifier { prefix } => {
                write!(f, "qualified by '{}' outside this scope", prefix)
            }
            ExcludeReason::QualifiedDatabase => write!(f, "ignored for database (qualified)"),
            ExcludeReason::QualifiedSchema => write!(f, "ignored for schema (qualified)"),
        }
    }
}

/// Exclusion policy over databases, schemas and tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreFilter {
    schemas: BTreeSet<String>,
    tables: BTreeSet<String>,
    database_tables: BTreeMap<String, BTreeSet<String>>,
    schema_tables: BTreeMap<(String, String), BTreeSet<String>>,
}

impl IgnoreFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip a schema in every database.
    pub fn ignore_schema(mut self, schema: impl Into<String>) -> Self {
        self.schemas.insert(schema.into());
        self
    }

    /// Skip a table everywhere.
    pub fn ignore_table(mut self, table: impl Into<String>) -> Self {
        self.tables.insert(table.into());
        self
    }

    /// Skip a table in one database.
    pub fn ignore_database_table(
        mut self,
        database: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        self.database_tables
            .entry(database.into())
            .or_default()
            .insert(table.into());
        self
    }

    /// Skip a table in one schema of one database.
    pub fn ignore_schema_table(
        mut self,
        database: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        self.schema_tables
            .entry((database.into(), schema.into()))
            .or_default()
            .insert(table.into());
        self
    }

    /// Whether a schema is skipped. Logs the decision when it is.
    pub fn is_schema_excluded(&self, database: &str, schema: &str) -> bool {
        let excluded = self.schemas.contains(schema);
        if excluded {
            tracing::info!(database, schema, "ignored schema");
        }
        excluded
    }

    /// Decide whether a table is excluded, without logging.
    ///
    /// Returns an error for names with more than one qualifier, unless an
    /// exact-match list already excludes them.
    pub fn evaluate(
        &self,
        database: &str,
        schema: &str,
        table: &str,
    ) -> Result<Option<ExcludeReason>> {
        if self.tables.contains(table) {
            return Ok(Some(ExcludeReason::Global));
        }
        if self.database_list(database).contains(table) {
            return Ok(Some(ExcludeReason::Database));
        }
        if self.schema_list(database, schema).contains(table) {
            return Ok(Some(ExcludeReason::Schema));
        }

        let Some((prefix, base)) = table.split_once(QUALIFIER_SEPARATOR) else {
            return Ok(None);
        };
        if base.contains(QUALIFIER_SEPARATOR) {
            return Err(Error::AmbiguousQualifiedName {
                database: database.to_string(),
                schema: schema.to_string(),
                table: table.to_string(),
            });
        }

        if prefix != database && prefix != schema {
            return Ok(Some(ExcludeReason::ForeignQualifier {
                prefix: prefix.to_string(),
            }));
        }
        if prefix == database && self.database_list(database).contains(base) {
            return Ok(Some(ExcludeReason::QualifiedDatabase));
        }
        if prefix == schema && self.schema_list(database, schema).contains(base) {
            return Ok(Some(ExcludeReason::QualifiedSchema));
        }
        Ok(None)
    }

    /// Decide whether a table is excluded, logging every exclusion.
    pub fn should_exclude(&self, database: &str, schema: &str, table: &str) -> Result<bool> {
        let reason = self.evaluate(database, schema, table)?;
        if let Some(reason) = &reason {
            tracing::info!(database, schema, table, %reason, "ignored table");
        }
        Ok(reason.is_some())
    }

    fn database_list(&self, database: &str) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.database_tables.get(database).unwrap_or(&EMPTY)
    }

    fn schema_list(&self, database: &str, schema: &str) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.schema_tables
            .get(&(database.to_string(), schema.to_string()))
            .unwrap_or(&EMPTY)
    }
}

impl From<&IgnoreConfig> for IgnoreFilter {
    fn from(config: &IgnoreConfig) -> Self {
        let mut filter = IgnoreFilter::new();
        for schema in &config.schemas {
            filter = filter.ignore_schema(schema);
        }
        for table in &config.tables {
            filter = filter.ignore_table(table);
        }
        for (database, db_ignore) in &config.databases {
            for table in &db_ignore.tables {
                filter = filter.ignore_database_table(database, table);
            }
            for (schema, schema_ignore) in &db_ignore.schemas {
                for table in &schema_ignore.tables {
                    filter = filter.ignore_schema_table(database, schema, table);
                }
            }
        }
        filter
    }
}
