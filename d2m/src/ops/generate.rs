//! Generate operation - one generation run from a config file.

use std::path::PathBuf;

use db2model_codegen::{
    CommandFormatter, DumpCommand, Formatter, FsSink, Generator, GeneratorConfig, IgnoreFilter,
    NormalizeFormatter, PreviewSink, SnapshotReflector,
};
use db2model_ir::{Dialect, Language};
use db2model_manifest::{ConfigFile, FormatterConfig, ReflectorConfig};
use eyre::{Context, Result};

use crate::{
    language::LanguageSupport,
    reports::{GenerateReport, GenerationResult, PreviewFile},
};

/// Command-line overrides on top of the manifest.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub output: Option<PathBuf>,
    /// Generate only these databases
    pub databases: Vec<String>,
    pub no_prune: bool,
    pub dry_run: bool,
    pub dialect: Option<Dialect>,
    pub language: Option<Language>,
}

/// Execute the generate operation.
///
/// All schema metadata is loaded before the output directory is touched.
pub fn generate(config: &ConfigFile, options: &GenerateOptions) -> Result<GenerateReport> {
    let manifest = config.manifest();
    let dialect = options.dialect.unwrap_or(manifest.target.dialect);
    let language = options.language.unwrap_or(manifest.target.language);
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| config.resolve(&manifest.output.path));

    let generator_config = GeneratorConfig::new(dialect, output, manifest.source.databases.clone())
        .prune_empty_dirs(manifest.output.prune_empty_dirs && !options.no_prune)
        .singularize(manifest.naming.singularize)
        .restrict_to(&options.databases)?;

    let reflector = load_reflector(config, &generator_config.databases)
        .wrap_err("Failed to load schema metadata")?;
    let formatter = formatter(&manifest.formatter);
    let support = LanguageSupport::get(language);
    let codegen = support.codegen();

    let generator = Generator::new(
        generator_config,
        codegen.as_ref(),
        &reflector,
        formatter.as_ref(),
        IgnoreFilter::from(&manifest.ignore),
    );

    let result = if options.dry_run {
        let mut sink = PreviewSink::new();
        let run = generator.run(&mut sink).wrap_err("Generation failed")?;
        let files = sink
            .files()
            .map(|(path, content)| PreviewFile {
                path: path.display().to_string(),
                content: content.to_string(),
            })
            .collect();
        GenerationResult::Preview { run, files }
    } else {
        let run = generator.run(&mut FsSink).wrap_err("Generation failed")?;
        GenerationResult::Written(run)
    };

    Ok(GenerateReport {
        language,
        extension: support.extension,
        result,
    })
}

fn load_reflector(config: &ConfigFile, databases: &[String]) -> Result<SnapshotReflector> {
    let manifest = config.manifest();
    match &manifest.reflector {
        ReflectorConfig::Snapshot { dir } => {
            SnapshotReflector::from_dir(&config.resolve(dir), databases)
        }
        ReflectorConfig::Command { program, args } => SnapshotReflector::from_command(
            &DumpCommand::new(program.clone(), args.clone()),
            &manifest.connection,
            databases,
        ),
    }
}

fn formatter(config: &FormatterConfig) -> Box<dyn Formatter> {
    match config {
        FormatterConfig::Normalize => Box::new(NormalizeFormatter),
        FormatterConfig::Command { program, args } => {
            Box::new(CommandFormatter::new(program.clone(), args.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const SNAPSHOT: &str = r#"{
        "schemas": [{"name": "public", "tables": [
            {"name": "users", "columns": [
                {"name": "id", "nullable": false, "primary_key": true, "type": {"name": "integer"}},
                {"name": "email", "nullable": false, "type": {"name": "varchar", "length": 255}}
            ]},
            {"name": "audit_log", "columns": [
                {"name": "id", "nullable": false, "primary_key": true, "type": {"name": "integer"}}
            ]}
        ]}]
    }"#;

    fn project(manifest: &str) -> (TempDir, ConfigFile) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("schema")).unwrap();
        fs::write(temp.path().join("schema/shop.json"), SNAPSHOT).unwrap();
        let path = temp.path().join("db2model.toml");
        fs::write(&path, manifest).unwrap();
        let config = ConfigFile::open(&path).unwrap();
        (temp, config)
    }

    const MANIFEST: &str = r#"
        [source]
        databases = ["shop"]

        [ignore]
        tables = ["audit_log"]
    "#;

    #[test]
    fn test_generate_relative_to_config() {
        let (temp, config) = project(MANIFEST);

        let report = generate(&config, &GenerateOptions::default()).unwrap();

        let GenerationResult::Written(run) = &report.result else {
            panic!("expected a written result");
        };
        assert_eq!(run.table_count(), 1);
        assert!(temp.path().join("models/shop/public/users.py").exists());
        assert!(!temp.path().join("models/shop/public/audit_log.py").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (temp, config) = project(MANIFEST);
        let options = GenerateOptions {
            dry_run: true,
            ..Default::default()
        };

        let report = generate(&config, &options).unwrap();

        let GenerationResult::Preview { files, .. } = &report.result else {
            panic!("expected a preview");
        };
        assert!(files.iter().any(|f| f.path.ends_with("users.py")));
        assert!(!temp.path().join("models").exists());
    }

    #[test]
    fn test_unknown_database_fails_before_writing() {
        let (temp, config) = project(MANIFEST);
        let options = GenerateOptions {
            databases: vec!["billing".into()],
            ..Default::default()
        };

        let err = generate(&config, &options).unwrap_err();
        assert!(err.to_string().contains("'billing' is not configured"));
        assert!(!temp.path().join("models").exists());
    }

    #[test]
    fn test_missing_snapshot_fails_before_writing() {
        let (temp, config) = project(
            r#"
            [source]
            databases = ["shop", "billing"]
            "#,
        );

        let err = generate(&config, &GenerateOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to load schema metadata");
        assert!(!temp.path().join("models").exists());
    }

    #[test]
    fn test_output_override() {
        let (temp, config) = project(MANIFEST);
        let options = GenerateOptions {
            output: Some(temp.path().join("out")),
            ..Default::default()
        };

        generate(&config, &options).unwrap();
        assert!(temp.path().join("out/base.py").exists());
        assert!(!temp.path().join("models").exists());
    }
}
