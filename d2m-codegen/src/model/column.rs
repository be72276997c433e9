use db2model_ir::{Dialect, NativeType, ReflectedColumn};

use crate::language::TypeMapper;

/// One column of a generated model.
///
/// Types are resolved once through the [`TypeMapper`] at construction; the
/// entity is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    nullable: bool,
    primary_key: bool,
    foreign_key: Option<String>,
    native_type: NativeType,
    base_type: &'static str,
    resolved_type: String,
}

impl Column {
    pub fn new(reflected: &ReflectedColumn, dialect: Dialect, mapper: &dyn TypeMapper) -> Self {
        let native_type = NativeType::parse(dialect, &reflected.data_type);
        let base_type = mapper.map_type(&native_type);
        let resolved_type = if reflected.nullable {
            mapper.map_optional(base_type)
        } else {
            base_type.to_string()
        };

        Self {
            name: reflected.name.clone(),
            nullable: reflected.nullable,
            primary_key: reflected.primary_key,
            foreign_key: reflected.foreign_key.clone(),
            native_type,
            base_type,
            resolved_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Referenced column, `schema.table.column` or `table.column`.
    pub fn foreign_key(&self) -> Option<&str> {
        self.foreign_key.as_deref()
    }

    pub fn native_type(&self) -> &NativeType {
        &self.native_type
    }

    /// Mapped type without nullability.
    pub fn base_type(&self) -> &'static str {
        self.base_type
    }

    /// Mapped type, in its optional form when the column is nullable.
    pub fn resolved_type(&self) -> &str {
        &self.resolved_type
    }

    /// Primary-key and foreign-key columns are left out of the default constructor.
    pub fn requires_explicit_init(&self) -> bool {
        self.primary_key || self.foreign_key.is_some()
    }
}
