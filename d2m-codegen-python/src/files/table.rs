use std::path::{Path, PathBuf};

use db2model_codegen::{Column, ImportCollector, RenderContext, Table};
use db2model_core::GeneratedFile;

use super::{BASE_CLASS, BASE_MODULE, header};
use crate::{
    PYTHON_NAMING, py_str,
    sqlalchemy::{POSTGRES_TYPES_MODULE, TypeConstructor, type_constructor},
};

/// One model module: a declarative class for a single table.
pub struct TableModule<'a> {
    table: &'a Table,
    ctx: RenderContext,
}

impl<'a> TableModule<'a> {
    pub fn new(table: &'a Table, ctx: RenderContext) -> Self {
        Self { table, ctx }
    }

    fn constructors(&self) -> Vec<TypeConstructor> {
        self.table
            .columns()
            .iter()
            .map(|c| type_constructor(c.native_type()))
            .collect()
    }

    fn stdlib_imports(&self) -> ImportCollector {
        let mut imports = ImportCollector::new();
        let uses = |prefix: &str| {
            self.table
                .columns()
                .iter()
                .any(|c| c.base_type().starts_with(prefix))
        };
        if uses("datetime.") {
            imports.add_module("datetime");
        }
        if uses("uuid.") {
            imports.add_module("uuid");
        }
        if uses("Any") {
            imports.add("typing", "Any");
        }
        imports
    }

    fn sqlalchemy_imports(&self, constructors: &[TypeConstructor]) -> ImportCollector {
        let mut imports = ImportCollector::new();
        if self.table.columns().iter().any(|c| c.foreign_key().is_some()) {
            imports.add("sqlalchemy", "ForeignKey");
        }
        for ctor in constructors.iter().filter(|c| c.module == POSTGRES_TYPES_MODULE) {
            imports.add(ctor.module, &ctor.name);
        }
        imports.add("sqlalchemy.orm", "Mapped");
        imports.add("sqlalchemy.orm", "mapped_column");
        for ctor in constructors.iter().filter(|c| c.module != POSTGRES_TYPES_MODULE) {
            imports.add(ctor.module, &ctor.name);
        }
        imports
    }

    /// `from ...base import Base`, with one dot per level up to the output root.
    fn base_import(&self) -> String {
        format!(
            "from {}{} import {}",
            ".".repeat(self.ctx.depth + 1),
            BASE_MODULE,
            BASE_CLASS
        )
    }

    fn column_line(column: &Column, ctor: &TypeConstructor) -> String {
        let field = PYTHON_NAMING.field_name(column.name());
        let mut args = Vec::new();
        if field != column.name() {
            args.push(py_str(column.name()));
        }
        args.push(ctor.render());
        if let Some(target) = column.foreign_key() {
            args.push(format!("ForeignKey({})", py_str(target)));
        }
        if column.is_primary_key() {
            args.push("primary_key=True".to_string());
        }
        if column.is_nullable() {
            args.push("nullable=True, default=None".to_string());
        } else {
            args.push("nullable=False".to_string());
        }
        if column.requires_explicit_init() {
            args.push("init=False".to_string());
        }
        format!(
            "{}: Mapped[{}] = mapped_column({})",
            field,
            column.resolved_type(),
            args.join(", ")
        )
    }
}

fn import_lines(imports: &ImportCollector) -> Vec<String> {
    imports
        .iter()
        .map(|(module, symbols)| {
            if symbols.is_empty() {
                format!("import {}", module)
            } else {
                let symbols: Vec<&str> = symbols.iter().map(String::as_str).collect();
                format!("from {} import {}", module, symbols.join(", "))
            }
        })
        .collect()
}

impl GeneratedFile for TableModule<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(format!("{}.py", self.table.file_base_name()))
    }

    fn render(&self) -> String {
        let constructors = self.constructors();
        let stdlib = self.stdlib_imports();
        let sqlalchemy = self.sqlalchemy_imports(&constructors);

        let lines: Vec<String> = self
            .table
            .columns()
            .iter()
            .zip(&constructors)
            .map(|(column, ctor)| Self::column_line(column, ctor))
            .collect();

        header()
            .line("from __future__ import annotations")
            .blank()
            .when(!stdlib.is_empty(), |b| {
                b.each(import_lines(&stdlib), |b, line| b.line(&line)).blank()
            })
            .each(import_lines(&sqlalchemy), |b, line| b.line(&line))
            .blank()
            .line(&self.base_import())
            .blank()
            .blank()
            .block(&format!("class {}({}):", self.table.generated_name(), BASE_CLASS), |b| {
                b.line(&format!("__tablename__ = {}", py_str(self.table.table_name())))
                    .line(&format!(
                        "__table_args__ = {{\"schema\": {}}}",
                        py_str(self.table.schema_name())
                    ))
                    .blank()
                    .each(&lines, |b, line| b.line(line))
            })
            .build()
    }
}
