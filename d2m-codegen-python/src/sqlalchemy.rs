//! SQLAlchemy column type constructors.

use db2model_ir::{NativeType, PgType};

/// Module exporting the PostgreSQL dialect types.
pub const POSTGRES_TYPES_MODULE: &str = "sqlalchemy.dialects.postgresql";

/// Module exporting the type used for columns with no usable constructor.
pub const GENERIC_TYPES_MODULE: &str = "sqlalchemy.types";

/// Argument-free classes `sqlalchemy.dialects.postgresql` exports under the
/// upper-cased type name.
const POSTGRES_DIALECT_CLASSES: &[&str] = &[
    "bit",
    "bytea",
    "cidr",
    "daterange",
    "hstore",
    "int4range",
    "int8range",
    "interval",
    "jsonpath",
    "macaddr",
    "macaddr8",
    "money",
    "numrange",
    "oid",
    "regclass",
    "regconfig",
    "tsquery",
    "tsrange",
    "tstzrange",
    "tsvector",
];

/// A type constructor call, e.g. `VARCHAR(length=255)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConstructor {
    /// Module to import `name` from
    pub module: &'static str,
    pub name: String,
    /// Rendered keyword arguments, without parentheses
    pub args: String,
}

impl TypeConstructor {
    fn postgres(name: impl Into<String>) -> Self {
        Self {
            module: POSTGRES_TYPES_MODULE,
            name: name.into(),
            args: String::new(),
        }
    }

    fn with_args(mut self, args: impl Into<String>) -> Self {
        self.args = args.into();
        self
    }

    fn with_length(self, length: Option<u32>) -> Self {
        match length {
            Some(n) => self.with_args(format!("length={}", n)),
            None => self,
        }
    }

    fn with_timezone(self, timezone: bool) -> Self {
        self.with_args(format!("timezone={}", py_bool(timezone)))
    }

    /// The call expression.
    pub fn render(&self) -> String {
        format!("{}({})", self.name, self.args)
    }
}

/// Constructor for a native column type.
///
/// Types without a dedicated variant use their upper-cased name when the
/// PostgreSQL dialect exports such a class, and `NullType` otherwise
/// (user-defined enums, extension types, arrays).
pub fn type_constructor(native: &NativeType) -> TypeConstructor {
    let NativeType::Postgres(ty) = native;
    match ty {
        PgType::BigInt => TypeConstructor::postgres("BIGINT"),
        PgType::Boolean => TypeConstructor::postgres("BOOLEAN"),
        PgType::Char { length } => TypeConstructor::postgres("CHAR").with_length(*length),
        PgType::Date => TypeConstructor::postgres("DATE"),
        PgType::DoublePrecision => TypeConstructor::postgres("DOUBLE_PRECISION"),
        PgType::Float => TypeConstructor::postgres("FLOAT"),
        PgType::Inet => TypeConstructor::postgres("INET"),
        PgType::Integer => TypeConstructor::postgres("INTEGER"),
        PgType::Json => TypeConstructor::postgres("JSON"),
        PgType::Jsonb => TypeConstructor::postgres("JSONB"),
        PgType::Numeric => TypeConstructor::postgres("NUMERIC"),
        PgType::Real => TypeConstructor::postgres("REAL"),
        PgType::SmallInt => TypeConstructor::postgres("SMALLINT"),
        PgType::Text => TypeConstructor::postgres("TEXT"),
        PgType::Time { timezone } => TypeConstructor::postgres("TIME").with_timezone(*timezone),
        PgType::Timestamp { timezone } => {
            TypeConstructor::postgres("TIMESTAMP").with_timezone(*timezone)
        }
        PgType::Uuid => TypeConstructor::postgres("UUID").with_args("as_uuid=True"),
        PgType::Varchar { length } => TypeConstructor::postgres("VARCHAR").with_length(*length),
        PgType::Other(name) if POSTGRES_DIALECT_CLASSES.contains(&name.as_str()) => {
            TypeConstructor::postgres(name.to_uppercase())
        }
        PgType::Other(_) => TypeConstructor {
            module: GENERIC_TYPES_MODULE,
            name: "NullType".to_string(),
            args: String::new(),
        },
    }
}

fn py_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// A double-quoted Python string literal.
pub fn py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use db2model_ir::{Dialect, TypeDescriptor};

    use super::*;

    fn render(descriptor: TypeDescriptor) -> String {
        type_constructor(&NativeType::parse(Dialect::Postgresql, &descriptor)).render()
    }

    #[test]
    fn test_parametrised_constructors() {
        assert_eq!(render(TypeDescriptor::named("uuid")), "UUID(as_uuid=True)");
        assert_eq!(
            render(TypeDescriptor::named("timestamptz")),
            "TIMESTAMP(timezone=True)"
        );
        assert_eq!(
            render(TypeDescriptor::named("timestamp")),
            "TIMESTAMP(timezone=False)"
        );
        assert_eq!(
            render(TypeDescriptor::named("varchar").with_length(255)),
            "VARCHAR(length=255)"
        );
        assert_eq!(render(TypeDescriptor::named("varchar")), "VARCHAR()");
        assert_eq!(render(TypeDescriptor::named("bpchar(2)")), "CHAR(length=2)");
        assert_eq!(render(TypeDescriptor::named("char")), "CHAR()");
    }

    #[test]
    fn test_plain_constructors() {
        assert_eq!(render(TypeDescriptor::named("int4")), "INTEGER()");
        assert_eq!(render(TypeDescriptor::named("float8")), "DOUBLE_PRECISION()");
        assert_eq!(render(TypeDescriptor::named("jsonb")), "JSONB()");
    }

    #[test]
    fn test_other_types() {
        let bytea = type_constructor(&NativeType::parse(
            Dialect::Postgresql,
            &TypeDescriptor::named("bytea"),
        ));
        assert_eq!(bytea.module, POSTGRES_TYPES_MODULE);
        assert_eq!(bytea.render(), "BYTEA()");

        let array = type_constructor(&NativeType::parse(
            Dialect::Postgresql,
            &TypeDescriptor::named("integer[]"),
        ));
        assert_eq!(array.module, GENERIC_TYPES_MODULE);
        assert_eq!(array.render(), "NullType()");
        assert_eq!(render(TypeDescriptor::named("bit varying")), "NullType()");
        assert_eq!(render(TypeDescriptor::named("TSVECTOR")), "TSVECTOR()");
        assert_eq!(render(TypeDescriptor::named("interval")), "INTERVAL()");
    }

    #[test]
    fn test_types_outside_the_dialect_fall_back() {
        for name in ["order_status", "xml", "citext", "geometry", "ltree"] {
            let ctor = type_constructor(&NativeType::parse(
                Dialect::Postgresql,
                &TypeDescriptor::named(name),
            ));
            assert_eq!(ctor.module, GENERIC_TYPES_MODULE, "{}", name);
            assert_eq!(ctor.render(), "NullType()", "{}", name);
        }
    }

    #[test]
    fn test_py_str() {
        assert_eq!(py_str("users"), "\"users\"");
        assert_eq!(py_str(r#"we"ird\name"#), r#""we\"ird\\name""#);
    }
}
