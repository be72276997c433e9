//! Python-specific naming conventions.

use db2model_codegen::NamingConvention;
use db2model_core::{to_capitalized_camel, to_snake_case};

fn escape_python_reserved(name: &str) -> String {
    format!("{}_", name)
}

/// Replace characters that cannot appear in a Python identifier.
fn to_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

fn table_to_file(name: &str) -> String {
    to_identifier(&to_snake_case(name))
}

/// Python naming conventions.
pub const PYTHON_NAMING: NamingConvention = NamingConvention {
    table_to_type: to_capitalized_camel,
    table_to_file,
    column_to_field: to_identifier,
    reserved_words: &[
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
        "try", "while", "with", "yield",
        // declarative attributes
        "metadata", "registry",
    ],
    escape_reserved: escape_python_reserved,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_naming_type() {
        assert_eq!(PYTHON_NAMING.type_name("users", true), "User");
        assert_eq!(PYTHON_NAMING.type_name("order_items", true), "OrderItem");
        assert_eq!(PYTHON_NAMING.type_name("HTTP_logs", true), "HttpLog");
        assert_eq!(PYTHON_NAMING.type_name("news", false), "News");
    }

    #[test]
    fn test_python_naming_file() {
        assert_eq!(PYTHON_NAMING.file_name("order_items"), "order_items");
        assert_eq!(PYTHON_NAMING.file_name("OrderItems"), "order_items");
        assert_eq!(PYTHON_NAMING.file_name("user-events"), "user_events");
        assert_eq!(PYTHON_NAMING.file_name("2fa_codes"), "_2fa_codes");
    }

    #[test]
    fn test_python_naming_field() {
        assert_eq!(PYTHON_NAMING.field_name("created_at"), "created_at");
        assert_eq!(PYTHON_NAMING.field_name("createdAt"), "createdAt");
        assert_eq!(PYTHON_NAMING.field_name("unit price"), "unit_price");
        assert_eq!(PYTHON_NAMING.field_name("1st"), "_1st");
    }

    #[test]
    fn test_python_reserved_words() {
        assert!(PYTHON_NAMING.is_reserved("from"));
        assert!(PYTHON_NAMING.is_reserved("None"));
        assert!(PYTHON_NAMING.is_reserved("metadata"));
        assert!(!PYTHON_NAMING.is_reserved("user"));

        assert_eq!(PYTHON_NAMING.field_name("from"), "from_");
        assert_eq!(PYTHON_NAMING.type_name("nones", true), "None_");
        assert_eq!(PYTHON_NAMING.file_name("import"), "import_");
    }
}
