use std::path::{Path, PathBuf};

use db2model_core::GeneratedFile;

use super::header;

/// Module name of the shared base, relative to the output root.
pub const BASE_MODULE: &str = "base";

/// Declarative base every model inherits from.
pub const BASE_CLASS: &str = "Base";

/// The `base.py` file at the output root.
pub struct BaseModule;

impl GeneratedFile for BaseModule {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(format!("{}.py", BASE_MODULE))
    }

    fn render(&self) -> String {
        header()
            .line("from sqlalchemy.orm import DeclarativeBase, MappedAsDataclass")
            .blank()
            .blank()
            .block(
                &format!("class {}(MappedAsDataclass, DeclarativeBase):", BASE_CLASS),
                |b| b.line("pass"),
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_module() {
        assert_eq!(BaseModule.path(Path::new("models")), Path::new("models/base.py"));
        insta::assert_snapshot!(BaseModule.render(), @r"
        # Code generated by db2model. DO NOT EDIT.

        from sqlalchemy.orm import DeclarativeBase, MappedAsDataclass


        class Base(MappedAsDataclass, DeclarativeBase):
            pass
        ");
    }
}
