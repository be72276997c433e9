//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from config validation.
#[derive(Debug)]
pub struct CheckReport {
    pub config_path: PathBuf,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Resolved settings, shown as key-value pairs.
    pub settings: Vec<(String, String)>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
            out.newline();
            for (key, value) in &self.settings {
                out.key_value_indented(key, value);
            }
        }
    }
}
