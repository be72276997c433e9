//! Manifest types and parsing for db2model.toml files.

mod file;
mod parse;
mod validate;

use std::path::PathBuf;

use db2model_ir::{Dialect, Language};
pub use file::{CONFIG_FILE_NAME, ConfigFile};
pub use parse::parse_manifest;
use serde::Deserialize;
pub use validate::ParseContext;

use crate::{ConnectionConfig, IgnoreConfig};

/// Root manifest for db2model.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Databases to generate models for
    pub source: SourceConfig,

    #[serde(default)]
    pub connection: ConnectionConfig,

    #[serde(default)]
    pub reflector: ReflectorConfig,

    #[serde(default)]
    pub formatter: FormatterConfig,

    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// `[target]`: which dialect is read and which language is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    #[serde(default = "default_dialect")]
    pub dialect: Dialect,
    #[serde(default = "default_language")]
    pub language: Language,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            dialect: default_dialect(),
            language: default_language(),
        }
    }
}

fn default_dialect() -> Dialect {
    Dialect::Postgresql
}

fn default_language() -> Language {
    Language::Python
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Root directory of the generated package
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// Remove schema/database directories that end up without models
    #[serde(default = "default_true")]
    pub prune_empty_dirs: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            prune_empty_dirs: true,
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("models")
}

fn default_true() -> bool {
    true
}

/// `[source]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub databases: Vec<String>,
}

/// `[reflector]`: where schema metadata comes from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReflectorConfig {
    /// Read `<dir>/<database>.json` snapshots.
    Snapshot {
        #[serde(default = "default_snapshot_dir")]
        dir: PathBuf,
    },
    /// Run a dump program and read a snapshot from its stdout.
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl Default for ReflectorConfig {
    fn default() -> Self {
        ReflectorConfig::Snapshot {
            dir: default_snapshot_dir(),
        }
    }
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("schema")
}

/// `[formatter]`: how rendered modules are cleaned up before writing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FormatterConfig {
    /// Built-in whitespace normalization
    #[default]
    Normalize,
    /// Pipe each module through an external formatter
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

/// `[naming]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamingConfig {
    /// Strip one trailing character from table names before deriving class names
    #[serde(default = "default_true")]
    pub singularize: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self { singularize: true }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_minimal_manifest_defaults() {
        let manifest = Manifest::from_str(
            r#"
            [source]
            databases = ["shop"]
            "#,
        )
        .unwrap();

        assert_eq!(manifest.target, TargetConfig::default());
        assert_eq!(manifest.output.path, PathBuf::from("models"));
        assert!(manifest.output.prune_empty_dirs);
        assert_eq!(manifest.source.databases, vec!["shop"]);
        assert_eq!(manifest.reflector, ReflectorConfig::default());
        assert_eq!(manifest.formatter, FormatterConfig::Normalize);
        assert!(manifest.naming.singularize);
        assert!(manifest.ignore.tables.is_empty());
    }

    #[test]
    fn test_full_manifest() {
        let manifest = Manifest::from_str(
            r#"
            [target]
            dialect = "postgres"
            language = "python"

            [output]
            path = "out/models"
            prune_empty_dirs = false

            [source]
            databases = ["shop", "billing"]

            [connection]
            host = "db.internal"
            port = 6543
            user = "reader"
            password = "secret"

            [reflector]
            kind = "command"
            program = "pg-dump-schema"
            args = ["--url", "{url}"]

            [formatter]
            kind = "command"
            program = "ruff"
            args = ["format", "-"]

            [naming]
            singularize = false

            [ignore]
            schemas = ["pg_catalog"]
            tables = ["audit_log"]

            [ignore.databases.shop]
            tables = ["migrations"]

            [ignore.databases.shop.schemas.public]
            tables = ["sessions"]
            "#,
        )
        .unwrap();

        assert_eq!(manifest.target.dialect, Dialect::Postgresql);
        assert_eq!(manifest.output.path, PathBuf::from("out/models"));
        assert!(!manifest.output.prune_empty_dirs);
        assert_eq!(manifest.connection.port, 6543);
        assert_eq!(
            manifest.reflector,
            ReflectorConfig::Command {
                program: "pg-dump-schema".into(),
                args: vec!["--url".into(), "{url}".into()],
            }
        );
        assert!(matches!(
            manifest.formatter,
            FormatterConfig::Command { ref program, .. } if program == "ruff"
        ));
        assert!(!manifest.naming.singularize);
        assert_eq!(manifest.ignore.schemas, vec!["pg_catalog"]);
        assert_eq!(manifest.ignore.databases["shop"].tables, vec!["migrations"]);
        assert_eq!(
            manifest.ignore.databases["shop"].schemas["public"].tables,
            vec!["sessions"]
        );
    }

    #[test]
    fn test_snapshot_reflector_default_dir() {
        let manifest = Manifest::from_str(
            r#"
            [source]
            databases = ["shop"]

            [reflector]
            kind = "snapshot"
            "#,
        )
        .unwrap();

        assert_eq!(
            manifest.reflector,
            ReflectorConfig::Snapshot {
                dir: PathBuf::from("schema")
            }
        );
    }

    #[test]
    fn test_unsupported_dialect_is_parse_error() {
        let err = Manifest::from_str(
            r#"
            [target]
            dialect = "mysql"

            [source]
            databases = ["shop"]
            "#,
        )
        .unwrap_err();

        assert!(matches!(*err, crate::Error::Parse { .. }));
    }

    #[test]
    fn test_unsupported_language_is_parse_error() {
        let err = Manifest::from_str(
            r#"
            [target]
            language = "rust"

            [source]
            databases = ["shop"]
            "#,
        )
        .unwrap_err();

        assert!(matches!(*err, crate::Error::Parse { .. }));
    }
}
