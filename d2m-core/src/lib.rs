//! Core utilities and types for the db2model generator.
//!
//! This crate provides the identifier transforms and file primitives shared
//! by the manifest, codegen and language crates.

mod file;
mod utils;

// File operations
pub use file::{File, GENERATED_HEADER, GeneratedFile, write_file};
// String utilities
pub use utils::{singularize, to_capitalized_camel, to_snake_case};
