//! Generated Python artifacts.

use db2model_codegen::CodeBuilder;
pub use db2model_core::GENERATED_HEADER;

mod base;
mod manifest;
mod table;

pub use base::{BASE_CLASS, BASE_MODULE, BaseModule};
pub use manifest::{INIT_FILE, ModuleManifest, PackageManifest};
pub use table::TableModule;

/// Start a file with the generated header and a blank line.
fn header() -> CodeBuilder {
    CodeBuilder::python().comment(GENERATED_HEADER).blank()
}

/// `__all__ = ["A", "B"]`
fn all_line<S: AsRef<str>>(names: &[S]) -> String {
    let quoted: Vec<String> = names
        .iter()
        .map(|n| crate::py_str(n.as_ref()))
        .collect();
    format!("__all__ = [{}]", quoted.join(", "))
}
