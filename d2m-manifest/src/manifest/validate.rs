//! Post-parse validation of db2model.toml.

use miette::SourceSpan;

use crate::{Error, Result, error::SourceContext};

/// Validation context that carries source information.
///
/// Tracks the current position in the manifest hierarchy (e.g.
/// `ignore.databases.shop`) so errors can say where an entry lives.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    src: &'a str,
    filename: &'a str,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self {
            src,
            filename,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            src: self.src,
            filename: self.filename,
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Describe the current position for error messages, e.g. `[ignore.databases.shop]`.
    pub fn section(&self) -> String {
        format!("[{}]", self.path_string())
    }

    fn source(&self) -> SourceContext {
        SourceContext::new(self.src, self.filename)
    }

    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        self.source().validation_error(message, span)
    }

    /// Reject ignore entries qualified with more than one prefix.
    pub fn validate_ignore_entries(&self, entries: &[String]) -> Result<()> {
        for entry in entries {
            if entry.matches('.').count() > 1 {
                return Err(Box::new(Error::AmbiguousIgnoreEntry {
                    src: self.source().named_source(),
                    span: find_value_span(self.src, entry),
                    name: entry.clone(),
                    context: self.section(),
                }));
            }
            if entry.is_empty() || entry.split('.').any(str::is_empty) {
                return Err(self.validation_error(
                    format!("empty table name in {} ignore list", self.section()),
                    find_value_span(self.src, entry),
                ));
            }
        }
        Ok(())
    }

    /// Reject database names listed twice.
    pub fn validate_unique_databases(&self, databases: &[String]) -> Result<()> {
        for (i, name) in databases.iter().enumerate() {
            if databases[..i].contains(name) {
                let occurrences = find_all_value_spans(self.src, name);
                return Err(Box::new(Error::DuplicateDatabase {
                    src: self.source().named_source(),
                    first_span: occurrences.first().copied(),
                    second_span: occurrences.get(1).copied(),
                    name: name.clone(),
                }));
            }
        }
        Ok(())
    }
}

/// Find a quoted string value in the TOML source, spanning the text between the quotes.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    find_all_value_spans(src, value).into_iter().next()
}

fn find_all_value_spans(src: &str, value: &str) -> Vec<SourceSpan> {
    let quoted = format!("\"{}\"", value);
    src.match_indices(&quoted)
        .map(|(pos, _)| SourceSpan::from((pos + 1, value.len())))
        .collect()
}

/// Find a `key =` assignment in the TOML source, spanning the key.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    src.match_indices(key).find_map(|(pos, _)| {
        let line_start = src[..pos].rfind('\n').map_or(0, |i| i + 1);
        let before = src[line_start..pos].trim();
        let after = src[pos + key.len()..].trim_start();
        (before.is_empty() && after.starts_with('=')).then(|| SourceSpan::from((pos, key.len())))
    })
}
