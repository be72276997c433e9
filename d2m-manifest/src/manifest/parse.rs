//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{FormatterConfig, Manifest, ReflectorConfig, validate::ParseContext};
use crate::{
    Error, Result,
    error::SourceContext,
    manifest::validate::{find_key_span, find_value_span},
};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "db2model.toml")
    }
}

impl Manifest {
    /// Parse a db2model.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a db2model.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    let databases = &manifest.source.databases;
    if databases.is_empty() {
        return Err(ctx.validation_error(
            "at least one database must be listed",
            find_key_span(src, "databases"),
        ));
    }
    if let Some(name) = databases.iter().find(|name| name.trim().is_empty()) {
        return Err(ctx.validation_error(
            "database names cannot be empty",
            find_value_span(src, name),
        ));
    }
    ctx.validate_unique_databases(databases)?;

    if manifest.connection.port == 0 {
        return Err(ctx.validation_error("port must be greater than 0", find_key_span(src, "port")));
    }

    let programs = [
        ("[reflector]", reflector_program(&manifest.reflector)),
        ("[formatter]", formatter_program(&manifest.formatter)),
    ];
    for (section, program) in programs {
        if program.is_some_and(|p| p.trim().is_empty()) {
            return Err(ctx.validation_error(
                format!("{} program cannot be empty", section),
                find_key_span(src, "program"),
            ));
        }
    }

    let ignore = &manifest.ignore;
    let ignore_ctx = ctx.push("ignore");
    ignore_ctx.validate_ignore_entries(&ignore.tables)?;
    for (database, db_ignore) in &ignore.databases {
        let db_ctx = ignore_ctx.push("databases").push(database);
        db_ctx.validate_ignore_entries(&db_ignore.tables)?;
        for (schema, schema_ignore) in &db_ignore.schemas {
            db_ctx
                .push("schemas")
                .push(schema)
                .validate_ignore_entries(&schema_ignore.tables)?;
        }
    }

    Ok(())
}

fn reflector_program(config: &ReflectorConfig) -> Option<&str> {
    match config {
        ReflectorConfig::Command { program, .. } => Some(program),
        ReflectorConfig::Snapshot { .. } => None,
    }
}

fn formatter_program(config: &FormatterConfig) -> Option<&str> {
    match config {
        FormatterConfig::Command { program, .. } => Some(program),
        FormatterConfig::Normalize => None,
    }
}
