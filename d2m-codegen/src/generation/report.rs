//! Summary of a generation run.

use std::path::PathBuf;

use serde::Serialize;

use crate::ExcludeReason;

/// What a generation run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub output_dir: PathBuf,
    pub databases: Vec<DatabaseReport>,
    /// Files written, including manifests and the base artifact
    pub files_written: usize,
}

impl RunReport {
    /// Total number of model classes emitted.
    pub fn table_count(&self) -> usize {
        self.databases.iter().map(|db| db.table_count).sum()
    }

    pub fn database(&self, name: &str) -> Option<&DatabaseReport> {
        self.databases.iter().find(|db| db.name == name)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseReport {
    pub name: String,
    pub schemas: Vec<SchemaReport>,
    /// Schemas skipped by the schema block list
    pub ignored_schemas: Vec<String>,
    /// Model classes emitted across all schemas
    pub table_count: usize,
    /// Directory removed because no model survived
    pub pruned: bool,
}

impl DatabaseReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn schema(&self, name: &str) -> Option<&SchemaReport> {
        self.schemas.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaReport {
    pub name: String,
    /// Class names in emission order
    pub classes: Vec<String>,
    pub exclusions: Vec<Exclusion>,
    /// Tables skipped because they have no columns
    pub empty_tables: Vec<String>,
    /// Directory removed because no model survived
    pub pruned: bool,
}

impl SchemaReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A table left out by the ignore filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    pub table: String,
    pub reason: ExcludeReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_count_and_lookup() {
        let mut shop = DatabaseReport::new("shop");
        shop.table_count = 2;
        shop.schemas.push(SchemaReport::new("public"));
        let mut billing = DatabaseReport::new("billing");
        billing.table_count = 3;

        let report = RunReport {
            databases: vec![shop, billing],
            ..Default::default()
        };

        assert_eq!(report.table_count(), 5);
        assert!(report.database("shop").unwrap().schema("public").is_some());
        assert!(report.database("crm").is_none());
    }

    #[test]
    fn test_serialize_exclusion() {
        let exclusion = Exclusion {
            table: "other.widgets".into(),
            reason: ExcludeReason::ForeignQualifier {
                prefix: "other".into(),
            },
        };
        let json = serde_json::to_value(&exclusion).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "table": "other.widgets",
                "reason": { "rule": "foreign_qualifier", "prefix": "other" }
            })
        );
    }
}
