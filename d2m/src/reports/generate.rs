//! Generate command report data structures.

use db2model_codegen::{DatabaseReport, RunReport};
use db2model_ir::Language;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub language: Language,
    /// Extension of generated model files, with dot.
    pub extension: &'static str,
    pub result: GenerationResult,
}

/// Result of a generation run.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(RunReport),
    /// Dry-run preview.
    Preview {
        run: RunReport,
        files: Vec<PreviewFile>,
    },
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(run) => {
                out.preformatted(&format!(
                    "Generated {} models in {}",
                    self.language,
                    run.output_dir.display()
                ));
                out.newline();
                self.render_databases(out, run);
                out.key_value(
                    "Summary",
                    &format!(
                        "{} (*{}), {} files written",
                        plural(run.table_count(), "model"),
                        self.extension,
                        run.files_written
                    ),
                );
            }
            GenerationResult::Preview { run, files } => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }

                out.divider("Summary");
                self.render_databases(out, run);
                out.preformatted(&format!(
                    "{} files would be generated ({})",
                    files.len(),
                    plural(run.table_count(), "model")
                ));
            }
        }
    }
}

impl GenerateReport {
    fn render_databases(&self, out: &mut dyn Output, run: &RunReport) {
        for db in &run.databases {
            render_database(out, db);
            out.newline();
        }
    }
}

fn render_database(out: &mut dyn Output, db: &DatabaseReport) {
    if db.pruned {
        out.section(&format!("{} (pruned)", db.name));
    } else {
        out.section(&db.name);
    }

    for schema in &db.ignored_schemas {
        out.removed_item(&format!("{} (ignored schema)", schema));
    }

    for schema in &db.schemas {
        if !schema.classes.is_empty() {
            out.added_item(&format!("{}: {}", schema.name, schema.classes.join(", ")));
        }
        for exclusion in &schema.exclusions {
            out.removed_item(&format!(
                "{}.{} ({})",
                schema.name, exclusion.table, exclusion.reason
            ));
        }
        for table in &schema.empty_tables {
            out.removed_item(&format!("{}.{} (no columns)", schema.name, table));
        }
        if schema.pruned {
            out.removed_item(&format!("{}/ (pruned)", schema.name));
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
