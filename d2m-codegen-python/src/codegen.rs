use std::path::Path;

use db2model_codegen::{
    Export, LanguageCodegen, NamingConvention, RenderContext, Table, TypeMapper,
};
use db2model_core::{File, GeneratedFile};
use db2model_ir::Language;

use crate::{
    PYTHON_NAMING, PythonTypeMapper,
    files::{BaseModule, ModuleManifest, PackageManifest, TableModule},
};

/// SQLAlchemy declarative model generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonCodegen;

impl PythonCodegen {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageCodegen for PythonCodegen {
    fn language(&self) -> Language {
        Language::Python
    }

    fn file_extension(&self) -> &'static str {
        "py"
    }

    fn type_mapper(&self) -> &dyn TypeMapper {
        &PythonTypeMapper
    }

    fn naming(&self) -> &NamingConvention {
        &PYTHON_NAMING
    }

    fn base_file(&self, root: &Path) -> File {
        BaseModule.to_file(root)
    }

    fn table_file(&self, dir: &Path, table: &Table, ctx: &RenderContext) -> File {
        TableModule::new(table, *ctx).to_file(dir)
    }

    fn module_manifest(&self, dir: &Path, exports: &[Export]) -> File {
        ModuleManifest::new(exports).to_file(dir)
    }

    fn package_manifest(&self, dir: &Path, packages: &[String]) -> File {
        PackageManifest::new(packages).to_file(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths() {
        let codegen = PythonCodegen::new();
        let root = Path::new("models");

        assert_eq!(codegen.base_file(root).path(), Path::new("models/base.py"));
        assert_eq!(
            codegen.package_manifest(root, &[]).path(),
            Path::new("models/__init__.py")
        );
        assert_eq!(
            codegen.package_manifest(root, &[]).content().lines().last(),
            Some("__all__ = []")
        );
        assert_eq!(codegen.file_extension(), "py");
        assert_eq!(codegen.type_mapper().fallback(), "Any");
        assert!(codegen.naming().is_reserved("class"));
    }
}
