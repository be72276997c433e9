//! Configuration for the db2model generator.
//!
//! Parses and validates `db2model.toml`, reporting problems as
//! [`miette`] diagnostics pointing into the source file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod connection;
mod error;
mod ignore;
mod manifest;

pub use connection::ConnectionConfig;
pub use error::{Error, Result, SourceContext};
pub use ignore::{DatabaseIgnore, IgnoreConfig, SchemaIgnore};
pub use manifest::{
    CONFIG_FILE_NAME, ConfigFile, FormatterConfig, Manifest, NamingConfig, OutputConfig,
    ParseContext, ReflectorConfig, SourceConfig, TargetConfig, parse_manifest,
};
