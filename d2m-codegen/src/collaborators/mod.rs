//! External collaborators of a generation run.
//!
//! - [`Reflector`] - supplies schema metadata
//! - [`Formatter`] - rewrites rendered source before it is written

mod formatter;
mod reflector;

pub use formatter::{CommandFormatter, Formatter, NormalizeFormatter};
pub use reflector::{DumpCommand, Reflector, SnapshotReflector};
