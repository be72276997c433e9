//! Intermediate representation types for the db2model generator.
//!
//! This crate provides the language-agnostic vocabulary shared across the
//! generation pipeline: the supported targets, native column types, and the
//! metadata shape a schema reflector hands to the generator.
//!
//! # Architecture
//!
//! ```text
//! reflector (snapshot / dump tool) → db2model-ir (reflected metadata) → codegen → files
//! ```

mod native;
mod reflect;
mod target;

pub use native::{NativeType, PgType, TypeDescriptor};
pub use reflect::{
    QUALIFIER_SEPARATOR, ReflectedColumn, ReflectedDatabase, ReflectedSchema, ReflectedTable,
};
pub use target::{Dialect, Language};
