use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the raw TOML and its filename so error factories don't need both
/// passed at every call site.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, labelled when a span is known.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(db2model::io_error),
        help("create a db2model.toml or pass its location with --config")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse db2model.toml")]
    #[diagnostic(code(db2model::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(db2model::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("database '{name}' is listed more than once")]
    #[diagnostic(
        code(db2model::duplicate_database),
        help("remove the second '{name}' entry from [source].databases")
    )]
    DuplicateDatabase {
        #[source_code]
        src: NamedSource<String>,
        #[label("first listed here")]
        first_span: Option<SourceSpan>,
        #[label("listed again here")]
        second_span: Option<SourceSpan>,
        name: String,
    },

    #[error("ambiguous ignore entry '{name}' in {context}")]
    #[diagnostic(
        code(db2model::ambiguous_qualified_name),
        help("qualify a table with at most one prefix, e.g. 'schema.table'")
    )]
    AmbiguousIgnoreEntry {
        #[source_code]
        src: NamedSource<String>,
        #[label("more than one '.' separator")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("environment variable '{var}' is not set")]
    #[diagnostic(
        code(db2model::missing_password),
        help("export {var} or set [connection].password")
    )]
    MissingPassword { var: String },
}
