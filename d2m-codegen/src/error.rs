use std::path::PathBuf;

use db2model_ir::Dialect;
use thiserror::Error;

/// Result type for generation runs.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad class of a generation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The configuration asks for something the run cannot honour.
    Configuration,
    /// Reflected metadata violates an invariant the generator relies on.
    Integrity,
    /// The reflector or formatter failed.
    Collaborator,
    /// Reading or writing the output tree failed.
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Integrity => write!(f, "integrity"),
            ErrorKind::Collaborator => write!(f, "collaborator"),
            ErrorKind::Io => write!(f, "io"),
        }
    }
}

/// A fatal generation error. Every variant names the scope it happened in.
#[derive(Debug, Error)]
pub enum Error {
    #[error("table name '{table}' in {database}.{schema} has more than one qualifier")]
    AmbiguousQualifiedName {
        database: String,
        schema: String,
        table: String,
    },

    #[error("column '{column}' appears more than once in {database}.{schema}.{table}")]
    DuplicateColumn {
        database: String,
        schema: String,
        table: String,
        column: String,
    },

    #[error("{what} derived from {database}.{schema}.{table} is empty")]
    EmptyIdentifier {
        database: String,
        schema: String,
        table: String,
        what: &'static str,
    },

    #[error("{dialect} requires a schema name, but database '{database}' reported an empty one")]
    MissingSchema { database: String, dialect: Dialect },

    #[error("database '{database}' is not configured")]
    UnknownDatabase { database: String },

    #[error("failed to reflect {scope}: {reason}")]
    Reflection { scope: String, reason: String },

    #[error("failed to format {database}.{schema}.{table}: {reason}")]
    Format {
        database: String,
        schema: String,
        table: String,
        reason: String,
    },

    #[error("failed to {action} '{path}'")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AmbiguousQualifiedName { .. }
            | Error::DuplicateColumn { .. }
            | Error::UnknownDatabase { .. } => ErrorKind::Configuration,
            Error::EmptyIdentifier { .. } | Error::MissingSchema { .. } => ErrorKind::Integrity,
            Error::Reflection { .. } | Error::Format { .. } => ErrorKind::Collaborator,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Wrap a reflector failure, keeping its whole cause chain in the message.
    pub(crate) fn reflection(scope: impl Into<String>, source: &eyre::Report) -> Self {
        Error::Reflection {
            scope: scope.into(),
            reason: format!("{:#}", source),
        }
    }
}
