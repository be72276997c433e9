//! Python / SQLAlchemy emitter for db2model.
//!
//! Generates declarative dataclass models (`Mapped[...]` + `mapped_column`)
//! on top of a shared `Base`, plus `__init__.py` export manifests.

mod codegen;
mod naming;
mod sqlalchemy;
mod type_mapper;

pub mod files;

pub use codegen::PythonCodegen;
pub use naming::PYTHON_NAMING;
pub use sqlalchemy::{TypeConstructor, py_str, type_constructor};
pub use type_mapper::{POSTGRES_RULES, PythonTypeMapper};
