//! Metadata shapes returned by a schema reflector.
//!
//! These mirror the snapshot JSON document one-to-one, so a snapshot file
//! deserializes straight into a [`ReflectedDatabase`].

use serde::{Deserialize, Serialize};

use crate::TypeDescriptor;

/// Separator between a qualifier and a table name (`other.widgets`).
pub const QUALIFIER_SEPARATOR: char = '.';

/// One reflected database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectedDatabase {
    #[serde(default)]
    pub schemas: Vec<ReflectedSchema>,
}

impl ReflectedDatabase {
    /// Look up a schema by name.
    pub fn schema(&self, name: &str) -> Option<&ReflectedSchema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// Schema names in reflection order.
    pub fn schema_names(&self) -> Vec<String> {
        self.schemas.iter().map(|s| s.name.clone()).collect()
    }
}

/// One reflected schema and its tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectedSchema {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<ReflectedTable>,
}

impl ReflectedSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    pub fn table(mut self, table: ReflectedTable) -> Self {
        self.tables.push(table);
        self
    }
}

/// One reflected table.
///
/// `name` is normally bare, but reflectors surface tables reached through a
/// cross-schema foreign key with their qualifier (`other.widgets`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectedTable {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ReflectedColumn>,
}

impl ReflectedTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, column: ReflectedColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// The qualifier before the first separator, if any.
    pub fn qualifier(&self) -> Option<&str> {
        self.name
            .split_once(QUALIFIER_SEPARATOR)
            .map(|(prefix, _)| prefix)
    }

    /// The name after the first separator, or the whole name.
    pub fn unqualified_name(&self) -> &str {
        self.name
            .split_once(QUALIFIER_SEPARATOR)
            .map_or(self.name.as_str(), |(_, base)| base)
    }
}

/// One reflected column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectedColumn {
    pub name: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
    /// `schema.table.column` or `table.column`.
    #[serde(default)]
    pub foreign_key: Option<String>,
    #[serde(rename = "type")]
    pub data_type: TypeDescriptor,
}

fn default_nullable() -> bool {
    true
}

impl ReflectedColumn {
    /// A nullable, unkeyed column.
    pub fn new(name: impl Into<String>, data_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            nullable: true,
            primary_key: false,
            foreign_key: None,
            data_type,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn references(mut self, target: impl Into<String>) -> Self {
        self.foreign_key = Some(target.into());
        self
    }
}
