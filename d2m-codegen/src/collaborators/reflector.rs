//! Schema reflectors.

use std::{
    path::Path,
    process::{Command, Stdio},
};

use db2model_ir::{ReflectedDatabase, ReflectedTable};
use db2model_manifest::ConnectionConfig;
use eyre::{Result, WrapErr, eyre};
use indexmap::IndexMap;

/// Source of schema metadata.
pub trait Reflector {
    /// Schema names of a database.
    fn list_schemas(&self, database: &str) -> Result<Vec<String>>;

    /// Tables of one schema, with their columns.
    fn list_tables(&self, database: &str, schema: &str) -> Result<Vec<ReflectedTable>>;
}

/// Reflector backed by snapshot documents loaded up front.
///
/// Snapshots come from `<dir>/<database>.json` files or from the stdout of a
/// dump program; either way every database is loaded before generation
/// starts, so a broken snapshot fails the run before the output is touched.
#[derive(Debug, Clone, Default)]
pub struct SnapshotReflector {
    databases: IndexMap<String, ReflectedDatabase>,
}

impl SnapshotReflector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the snapshot for one database.
    pub fn with_database(mut self, name: impl Into<String>, database: ReflectedDatabase) -> Self {
        self.databases.insert(name.into(), database);
        self
    }

    /// Load `<dir>/<database>.json` for every database.
    pub fn from_dir(dir: &Path, databases: &[String]) -> Result<Self> {
        let mut reflector = Self::new();
        for name in databases {
            let path = dir.join(format!("{}.json", name));
            let content = std::fs::read_to_string(&path)
                .wrap_err_with(|| format!("failed to read snapshot '{}'", path.display()))?;
            let database: ReflectedDatabase = serde_json::from_str(&content)
                .wrap_err_with(|| format!("invalid snapshot '{}'", path.display()))?;
            tracing::debug!(database = %name, path = %path.display(), "loaded snapshot");
            reflector.databases.insert(name.clone(), database);
        }
        Ok(reflector)
    }

    /// Run a dump program once per database and parse its stdout as a snapshot.
    pub fn from_command(
        command: &DumpCommand,
        connection: &ConnectionConfig,
        databases: &[String],
    ) -> Result<Self> {
        let mut reflector = Self::new();
        for name in databases {
            let url = connection.url(name, None).map_err(|e| eyre!("{}", e))?;
            let args = command.expand_args(&[
                ("url", url.as_str()),
                ("database", name.as_str()),
                ("host", connection.host.as_str()),
                ("port", &connection.port.to_string()),
                ("user", connection.user.as_str()),
            ]);

            tracing::debug!(database = %name, program = %command.program, "running dump program");
            let output = Command::new(&command.program)
                .args(&args)
                .stdin(Stdio::null())
                .output()
                .wrap_err_with(|| format!("failed to run '{}'", command.program))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(eyre!(
                    "'{}' exited with {} for database '{}': {}",
                    command.program,
                    output.status,
                    name,
                    stderr.trim()
                ));
            }

            let database: ReflectedDatabase = serde_json::from_slice(&output.stdout)
                .wrap_err_with(|| {
                    format!("'{}' printed an invalid snapshot for '{}'", command.program, name)
                })?;
            reflector.databases.insert(name.clone(), database);
        }
        Ok(reflector)
    }

    fn database(&self, name: &str) -> Result<&ReflectedDatabase> {
        self.databases
            .get(name)
            .ok_or_else(|| eyre!("no snapshot loaded for database '{}'", name))
    }
}

impl Reflector for SnapshotReflector {
    fn list_schemas(&self, database: &str) -> Result<Vec<String>> {
        Ok(self.database(database)?.schema_names())
    }

    fn list_tables(&self, database: &str, schema: &str) -> Result<Vec<ReflectedTable>> {
        let db = self.database(database)?;
        let schema = db
            .schema(schema)
            .ok_or_else(|| eyre!("schema '{}' not found in database '{}'", schema, database))?;
        Ok(schema.tables.clone())
    }
}

/// External program plus argument templates.
///
/// Arguments may contain `{name}` placeholders filled in per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl DumpCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Substitute `{key}` placeholders in every argument.
    pub fn expand_args(&self, vars: &[(&str, &str)]) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                vars.iter().fold(arg.clone(), |acc, (key, value)| {
                    acc.replace(&format!("{{{}}}", key), value)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use db2model_ir::{ReflectedColumn, ReflectedSchema, TypeDescriptor};
    use tempfile::TempDir;

    use super::*;

    fn shop() -> ReflectedDatabase {
        ReflectedDatabase {
            schemas: vec![
                ReflectedSchema::new("public").table(
                    ReflectedTable::new("users").column(
                        ReflectedColumn::new("id", TypeDescriptor::named("integer")).primary_key(),
                    ),
                ),
                ReflectedSchema::new("sales"),
            ],
        }
    }

    #[test]
    fn test_in_memory_snapshot() {
        let reflector = SnapshotReflector::new().with_database("shop", shop());

        assert_eq!(reflector.list_schemas("shop").unwrap(), ["public", "sales"]);
        let tables = reflector.list_tables("shop", "public").unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "users");
        assert!(reflector.list_tables("shop", "sales").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_database_and_schema() {
        let reflector = SnapshotReflector::new().with_database("shop", shop());

        let err = reflector.list_schemas("billing").unwrap_err();
        assert!(err.to_string().contains("billing"));
        let err = reflector.list_tables("shop", "missing").unwrap_err();
        assert!(err.to_string().contains("schema 'missing'"));
    }

    #[test]
    fn test_from_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("shop.json"),
            serde_json::to_string(&shop()).unwrap(),
        )
        .unwrap();

        let reflector = SnapshotReflector::from_dir(temp.path(), &["shop".into()]).unwrap();
        assert_eq!(reflector.list_schemas("shop").unwrap(), ["public", "sales"]);

        let err = SnapshotReflector::from_dir(temp.path(), &["billing".into()]).unwrap_err();
        assert!(err.to_string().contains("billing.json"));
    }

    #[test]
    fn test_from_dir_invalid_json() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("shop.json"), "{ not json").unwrap();

        let err = SnapshotReflector::from_dir(temp.path(), &["shop".into()]).unwrap_err();
        assert!(err.to_string().starts_with("invalid snapshot"));
    }

    #[test]
    fn test_expand_args() {
        let command = DumpCommand::new(
            "pg-dump-schema",
            vec!["--url={url}".into(), "{database}".into(), "--plain".into()],
        );
        let args = command.expand_args(&[("url", "postgresql://u@h:1/shop"), ("database", "shop")]);
        assert_eq!(args, ["--url=postgresql://u@h:1/shop", "shop", "--plain"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_from_command() {
        let snapshot = serde_json::to_string(&shop()).unwrap();
        let command = DumpCommand::new(
            "sh",
            vec!["-c".into(), format!("printf '%s' '{}'", snapshot)],
        );

        let reflector = SnapshotReflector::from_command(
            &command,
            &ConnectionConfig::default(),
            &["shop".into()],
        )
        .unwrap();
        assert_eq!(reflector.list_schemas("shop").unwrap(), ["public", "sales"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_from_command_failure() {
        let command = DumpCommand::new("sh", vec!["-c".into(), "echo boom >&2; exit 3".into()]);
        let err = SnapshotReflector::from_command(
            &command,
            &ConnectionConfig::default(),
            &["shop".into()],
        )
        .unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
