//! Naming conventions for different programming languages.

use db2model_core::singularize;

/// Language-specific naming conventions.
///
/// Defines how to transform table and column names and how to handle
/// reserved words.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform table name to class name (e.g., "order_item" -> "OrderItem")
    pub table_to_type: fn(&str) -> String,
    /// Transform table name to module file name (e.g., "OrderItems" -> "order_items")
    pub table_to_file: fn(&str) -> String,
    /// Transform column name to attribute name
    pub column_to_field: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "class" -> "class_" in Python)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Class name for a table, optionally singularized first.
    pub fn type_name(&self, table: &str, singularize_first: bool) -> String {
        let base = if singularize_first {
            singularize(table)
        } else {
            table
        };
        self.safe_name(&(self.table_to_type)(base))
    }

    /// Module file name for a table.
    pub fn file_name(&self, table: &str) -> String {
        self.safe_name(&(self.table_to_file)(table))
    }

    /// Attribute name for a column.
    pub fn field_name(&self, column: &str) -> String {
        self.safe_name(&(self.column_to_field)(column))
    }
}
