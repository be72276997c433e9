use std::collections::HashSet;

use db2model_ir::{Dialect, ReflectedTable};

use super::{Column, order_columns};
use crate::{
    Error, Result,
    language::{NamingConvention, TypeMapper},
};

/// One generated model unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    sql_name: String,
    generated_name: String,
    file_base_name: String,
    schema_name: String,
    columns: Vec<Column>,
}

impl Table {
    /// Name as reflected, possibly qualified (`other.widgets`).
    pub fn sql_name(&self) -> &str {
        &self.sql_name
    }

    /// Class identifier.
    pub fn generated_name(&self) -> &str {
        &self.generated_name
    }

    /// Module file name, without extension.
    pub fn file_base_name(&self) -> &str {
        &self.file_base_name
    }

    /// Schema the class is bound to: a schema qualifier when present, else the
    /// enclosing schema.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// The unqualified table name as stored in the database.
    pub fn table_name(&self) -> &str {
        self.sql_name
            .split_once(db2model_ir::QUALIFIER_SEPARATOR)
            .map_or(self.sql_name.as_str(), |(_, base)| base)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Reorder columns into emission order.
    pub fn order_columns(&mut self) {
        order_columns(&mut self.columns);
    }
}

/// Builds [`Table`] entities for one (database, schema) scope.
///
/// Columns keep their reflected order; ordering is an emission step.
pub struct TableBuilder<'a> {
    database: &'a str,
    schema: &'a str,
    dialect: Dialect,
    mapper: &'a dyn TypeMapper,
    naming: &'a NamingConvention,
    singularize: bool,
}

impl<'a> TableBuilder<'a> {
    pub fn new(
        database: &'a str,
        schema: &'a str,
        dialect: Dialect,
        mapper: &'a dyn TypeMapper,
        naming: &'a NamingConvention,
    ) -> Self {
        Self {
            database,
            schema,
            dialect,
            mapper,
            naming,
            singularize: true,
        }
    }

    pub fn singularize(mut self, singularize: bool) -> Self {
        self.singularize = singularize;
        self
    }

    /// Schema the model is bound to. A database qualifier names no schema,
    /// so such tables stay in the enclosing one.
    fn bound_schema<'t>(&'t self, reflected: &'t ReflectedTable) -> &'t str {
        reflected
            .qualifier()
            .filter(|qualifier| *qualifier != self.database)
            .unwrap_or(self.schema)
    }

    pub fn build(&self, reflected: &ReflectedTable) -> Result<Table> {
        let unqualified = reflected.unqualified_name();
        let generated_name = self.naming.type_name(unqualified, self.singularize);
        let file_base_name = self.naming.file_name(unqualified);
        for (what, value) in [("class name", &generated_name), ("file name", &file_base_name)] {
            if value.is_empty() {
                return Err(Error::EmptyIdentifier {
                    database: self.database.to_string(),
                    schema: self.schema.to_string(),
                    table: reflected.name.clone(),
                    what,
                });
            }
        }

        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(reflected.columns.len());
        for column in &reflected.columns {
            let field = self.naming.field_name(&column.name);
            if field.is_empty() {
                return Err(Error::EmptyIdentifier {
                    database: self.database.to_string(),
                    schema: self.schema.to_string(),
                    table: reflected.name.clone(),
                    what: "attribute name",
                });
            }
            if !seen.insert(field) {
                return Err(Error::DuplicateColumn {
                    database: self.database.to_string(),
                    schema: self.schema.to_string(),
                    table: reflected.name.clone(),
                    column: column.name.clone(),
                });
            }
            columns.push(Column::new(column, self.dialect, self.mapper));
        }

        Ok(Table {
            sql_name: reflected.name.clone(),
            generated_name,
            file_base_name,
            schema_name: self.bound_schema(reflected).to_string(),
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use db2model_ir::{ReflectedColumn, TypeDescriptor};

    use super::*;
    use crate::testing::{STUB_NAMING, StubTypeMapper};

    fn builder() -> TableBuilder<'static> {
        TableBuilder::new(
            "shop",
            "public",
            Dialect::Postgresql,
            &StubTypeMapper,
            &STUB_NAMING,
        )
    }

    fn int(name: &str) -> ReflectedColumn {
        ReflectedColumn::new(name, TypeDescriptor::named("integer")).not_null()
    }

    #[test]
    fn test_build_keeps_reflected_order() {
        let reflected = ReflectedTable::new("order_items")
            .column(int("id").primary_key())
            .column(int("quantity"))
            .column(int("order_id").references("orders.id"));

        let table = builder().build(&reflected).unwrap();
        assert_eq!(table.sql_name(), "order_items");
        assert_eq!(table.generated_name(), "OrderItem");
        assert_eq!(table.file_base_name(), "order_items");
        assert_eq!(table.schema_name(), "public");
        let names: Vec<_> = table.columns().iter().map(Column::name).collect();
        assert_eq!(names, ["id", "quantity", "order_id"]);
    }

    #[test]
    fn test_order_columns_in_place() {
        let reflected = ReflectedTable::new("users")
            .column(int("id").primary_key())
            .column(ReflectedColumn::new("bio", TypeDescriptor::named("text")))
            .column(int("age"));

        let mut table = builder().build(&reflected).unwrap();
        table.order_columns();
        let names: Vec<_> = table.columns().iter().map(Column::name).collect();
        assert_eq!(names, ["age", "bio", "id"]);
    }

    #[test]
    fn test_qualified_table_binds_to_qualifier() {
        let reflected = ReflectedTable::new("other.widgets").column(int("id"));
        let table = builder().build(&reflected).unwrap();
        assert_eq!(table.sql_name(), "other.widgets");
        assert_eq!(table.table_name(), "widgets");
        assert_eq!(table.generated_name(), "Widget");
        assert_eq!(table.file_base_name(), "widgets");
        assert_eq!(table.schema_name(), "other");
    }

    #[test]
    fn test_database_qualified_table_stays_in_schema() {
        let reflected = ReflectedTable::new("shop.widgets").column(int("id"));
        let table = builder().build(&reflected).unwrap();
        assert_eq!(table.sql_name(), "shop.widgets");
        assert_eq!(table.table_name(), "widgets");
        assert_eq!(table.schema_name(), "public");
    }

    #[test]
    fn test_schema_qualified_table_stays_in_schema() {
        let reflected = ReflectedTable::new("public.widgets").column(int("id"));
        let table = builder().build(&reflected).unwrap();
        assert_eq!(table.schema_name(), "public");
    }

    #[test]
    fn test_without_singularize() {
        let reflected = ReflectedTable::new("news").column(int("id"));
        let table = builder().singularize(false).build(&reflected).unwrap();
        assert_eq!(table.generated_name(), "News");
    }

    #[test]
    fn test_duplicate_id_columns_rejected() {
        let reflected = ReflectedTable::new("users")
            .column(int("id"))
            .column(int("email"))
            .column(int("id"));

        let err = builder().build(&reflected).unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn { ref column, .. } if column == "id"));
    }

    #[test]
    fn test_empty_class_name_rejected() {
        let reflected = ReflectedTable::new("x").column(int("id"));
        let err = builder().build(&reflected).unwrap_err();
        assert!(matches!(err, Error::EmptyIdentifier { what: "class name", .. }));
    }

    #[test]
    fn test_zero_columns_builds_empty_table() {
        let table = builder().build(&ReflectedTable::new("users")).unwrap();
        assert!(table.is_empty());
    }
}
