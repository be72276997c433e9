//! The generation run and its supporting types.
//!
//! - [`Generator`] - walks databases, schemas and tables and emits files
//! - [`OutputSink`] - where files go ([`FsSink`] or [`PreviewSink`])
//! - [`ImportCollector`] - deduplicated import tracking for emitters
//! - [`RunReport`] - what a run produced

mod imports;
mod orchestrator;
mod report;
mod sink;

pub use imports::ImportCollector;
pub use orchestrator::{Generator, GeneratorConfig};
pub use report::{DatabaseReport, Exclusion, RunReport, SchemaReport};
pub use sink::{FsSink, OutputSink, PlannedOp, PreviewSink};
