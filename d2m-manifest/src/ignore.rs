//! `[ignore]`: the three-level table block lists and the schema block list.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgnoreConfig {
    /// Schemas skipped in every database
    #[serde(default)]
    pub schemas: Vec<String>,
    /// Tables skipped everywhere
    #[serde(default)]
    pub tables: Vec<String>,
    /// `[ignore.databases.<name>]`
    #[serde(default)]
    pub databases: BTreeMap<String, DatabaseIgnore>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseIgnore {
    #[serde(default)]
    pub tables: Vec<String>,
    /// `[ignore.databases.<name>.schemas.<schema>]`
    #[serde(default)]
    pub schemas: BTreeMap<String, SchemaIgnore>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaIgnore {
    #[serde(default)]
    pub tables: Vec<String>,
}

impl IgnoreConfig {
    /// Table block list scoped to one database.
    pub fn database_tables(&self, database: &str) -> &[String] {
        self.databases
            .get(database)
            .map(|db| db.tables.as_slice())
            .unwrap_or_default()
    }

    /// Table block list scoped to one schema of one database.
    pub fn schema_tables(&self, database: &str, schema: &str) -> &[String] {
        self.databases
            .get(database)
            .and_then(|db| db.schemas.get(schema))
            .map(|s| s.tables.as_slice())
            .unwrap_or_default()
    }
}
