//! Schema-to-model generation engine for db2model.
//!
//! This crate turns reflected database metadata into model source files. It is
//! language-agnostic: target languages plug in through [`LanguageCodegen`].
//!
//! # Module Organization
//!
//! - [`model`] - Column and table entities, plus the column ordering policy
//! - [`filter`] - Hierarchical ignore rules over databases, schemas and tables
//! - [`language`] - Language abstractions (LanguageCodegen, TypeMapper, NamingConvention)
//! - [`builder`] - Indented code building
//! - [`collaborators`] - Schema reflectors and source formatters
//! - [`generation`] - The generation run: orchestrator, output sinks, imports, reports
//! - [`testing`] - In-memory fakes (feature-gated)

mod error;

pub mod builder;
pub mod collaborators;
pub mod filter;
pub mod generation;
pub mod language;
pub mod model;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use builder::{CodeBuilder, Indent};
pub use collaborators::{
    CommandFormatter, DumpCommand, Formatter, NormalizeFormatter, Reflector, SnapshotReflector,
};
pub use error::{Error, ErrorKind, Result};
pub use filter::{ExcludeReason, IgnoreFilter};
pub use generation::{
    DatabaseReport, Exclusion, FsSink, Generator, GeneratorConfig, ImportCollector, OutputSink,
    PlannedOp, PreviewSink, RunReport, SchemaReport,
};
pub use language::{Export, LanguageCodegen, NamingConvention, RenderContext, TypeMapper, TypeRule};
pub use model::{Column, Table, TableBuilder, order_columns};
