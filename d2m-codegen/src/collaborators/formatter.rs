//! Source formatters applied to every generated model module.

use std::{
    io::Write,
    process::{Command, Stdio},
};

use eyre::{Result, WrapErr, eyre};

/// Rewrites rendered source before it is written.
pub trait Formatter {
    fn format(&self, source: &str) -> Result<String>;
}

/// Built-in whitespace normalizer.
///
/// Strips trailing whitespace, collapses runs of blank lines to at most two
/// and ends the text with exactly one newline. Applying it twice gives the
/// same result as applying it once.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeFormatter;

const MAX_BLANK_LINES: usize = 2;

impl Formatter for NormalizeFormatter {
    fn format(&self, source: &str) -> Result<String> {
        let mut out = String::with_capacity(source.len());
        let mut blanks = 0;
        for line in source.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                blanks += 1;
                continue;
            }
            // leading blank lines are dropped
            if !out.is_empty() {
                for _ in 0..blanks.min(MAX_BLANK_LINES) {
                    out.push('\n');
                }
            }
            blanks = 0;
            out.push_str(line);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Pipes source through an external program (e.g. `ruff format -`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, source: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .wrap_err_with(|| format!("failed to run '{}'", self.program))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| eyre!("'{}' has no stdin", self.program))?;
        let input = source.to_string();
        // Write from a separate thread so a large file cannot deadlock on a full stdout pipe.
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .wrap_err_with(|| format!("failed to wait for '{}'", self.program))?;
        writer
            .join()
            .map_err(|_| eyre!("stdin writer for '{}' panicked", self.program))?
            .wrap_err_with(|| format!("failed to write to '{}'", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(eyre!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            ));
        }

        String::from_utf8(output.stdout)
            .wrap_err_with(|| format!("'{}' printed invalid UTF-8", self.program))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_normalize() {
        let source = "\n\nimport uuid   \n\n\n\n\nclass User(Base):\t\n    pass";
        let formatted = NormalizeFormatter.format(source).unwrap();
        assert_eq!(formatted, "import uuid\n\n\nclass User(Base):\n    pass\n");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(NormalizeFormatter.format("").unwrap(), "");
        assert_eq!(NormalizeFormatter.format("\n \n").unwrap(), "");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(source in "[a-z \t\n]{0,80}") {
            let once = NormalizeFormatter.format(&source).unwrap();
            let twice = NormalizeFormatter.format(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalize_has_no_trailing_whitespace(source in "[a-z \t\n]{0,80}") {
            let formatted = NormalizeFormatter.format(&source).unwrap();
            for line in formatted.lines() {
                prop_assert_eq!(line, line.trim_end());
            }
            prop_assert!(formatted.is_empty() || formatted.ends_with('\n'));
            prop_assert!(!formatted.ends_with("\n\n"));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_command_formatter() {
        let formatter = CommandFormatter::new("tr", vec!["a-z".into(), "A-Z".into()]);
        assert_eq!(formatter.format("pass\n").unwrap(), "PASS\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_formatter_failure() {
        let formatter = CommandFormatter::new(
            "sh",
            vec!["-c".into(), "cat >/dev/null; echo 'bad syntax' >&2; exit 1".into()],
        );
        let err = formatter.format("class (:\n").unwrap_err();
        assert!(err.to_string().contains("bad syntax"));
    }

    #[test]
    fn test_command_formatter_missing_program() {
        let formatter = CommandFormatter::new("db2model-no-such-formatter", vec![]);
        let err = formatter.format("pass\n").unwrap_err();
        assert!(err.to_string().contains("failed to run"));
    }
}
