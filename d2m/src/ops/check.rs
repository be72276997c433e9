//! Check operation - config and schema source validation.

use db2model_codegen::SnapshotReflector;
use db2model_manifest::{ConfigFile, FormatterConfig, ReflectorConfig};

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Verifies that every configured database has readable metadata without
/// running a generation.
pub fn check(config: &ConfigFile) -> CheckReport {
    let manifest = config.manifest();
    let databases = &manifest.source.databases;
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let reflector = match &manifest.reflector {
        ReflectorConfig::Snapshot { dir } => {
            let dir = config.resolve(dir);
            for database in databases {
                let path = dir.join(format!("{}.json", database));
                if !path.is_file() {
                    errors.push(format!(
                        "snapshot for '{}' not found at {}",
                        database,
                        path.display()
                    ));
                } else if let Err(e) =
                    SnapshotReflector::from_dir(&dir, std::slice::from_ref(database))
                {
                    errors.push(format!("{:#}", e));
                }
            }
            format!("snapshot ({})", dir.display())
        }
        ReflectorConfig::Command { program, .. } => {
            if let Err(e) = manifest.connection.password() {
                errors.push(e.to_string());
            }
            format!("command ({})", program)
        }
    };

    for database in manifest.ignore.databases.keys() {
        if !databases.contains(database) {
            warnings.push(format!(
                "ignore rules for '{}' have no effect, it is not in [source].databases",
                database
            ));
        }
    }

    let formatter = match &manifest.formatter {
        FormatterConfig::Normalize => "normalize".to_string(),
        FormatterConfig::Command { program, .. } => format!("command ({})", program),
    };

    let settings = vec![
        ("databases".to_string(), databases.join(", ")),
        (
            "target".to_string(),
            format!("{} -> {}", manifest.target.dialect, manifest.target.language),
        ),
        (
            "output".to_string(),
            config.resolve(&manifest.output.path).display().to_string(),
        ),
        ("reflector".to_string(), reflector),
        ("formatter".to_string(), formatter),
    ];

    CheckReport {
        config_path: config.path().to_path_buf(),
        errors,
        warnings,
        settings,
    }
}
