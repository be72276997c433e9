//! Python type mapper implementation.

use db2model_codegen::{TypeMapper, TypeRule};
use db2model_ir::{Dialect, Language, NativeType, PgType};

/// Python annotation for types without a rule.
pub const ANY: &str = "Any";

fn pg(native: &NativeType) -> &PgType {
    match native {
        NativeType::Postgres(ty) => ty,
    }
}

fn is_bigint(native: &NativeType) -> bool {
    matches!(pg(native), PgType::BigInt)
}

fn is_boolean(native: &NativeType) -> bool {
    matches!(pg(native), PgType::Boolean)
}

fn is_char(native: &NativeType) -> bool {
    matches!(pg(native), PgType::Char { .. })
}

fn is_date(native: &NativeType) -> bool {
    matches!(pg(native), PgType::Date)
}

fn is_float_family(native: &NativeType) -> bool {
    matches!(
        pg(native),
        PgType::Float | PgType::Real | PgType::DoublePrecision
    )
}

fn is_inet(native: &NativeType) -> bool {
    matches!(pg(native), PgType::Inet)
}

fn is_integer(native: &NativeType) -> bool {
    matches!(pg(native), PgType::Integer)
}

fn is_jsonb(native: &NativeType) -> bool {
    matches!(pg(native), PgType::Jsonb)
}

fn is_smallint(native: &NativeType) -> bool {
    matches!(pg(native), PgType::SmallInt)
}

fn is_text(native: &NativeType) -> bool {
    matches!(pg(native), PgType::Text)
}

fn is_timestamp(native: &NativeType) -> bool {
    matches!(pg(native), PgType::Timestamp { .. })
}

fn is_uuid(native: &NativeType) -> bool {
    matches!(pg(native), PgType::Uuid)
}

fn is_varchar(native: &NativeType) -> bool {
    matches!(pg(native), PgType::Varchar { .. })
}

/// PostgreSQL to Python rules, first match wins.
pub const POSTGRES_RULES: &[TypeRule] = &[
    TypeRule { matches: is_bigint, target: "int" },
    TypeRule { matches: is_boolean, target: "bool" },
    TypeRule { matches: is_char, target: "str" },
    TypeRule { matches: is_date, target: "datetime.datetime" },
    TypeRule { matches: is_float_family, target: "float" },
    TypeRule { matches: is_inet, target: "str" },
    TypeRule { matches: is_integer, target: "int" },
    TypeRule { matches: is_jsonb, target: "dict" },
    TypeRule { matches: is_smallint, target: "int" },
    TypeRule { matches: is_text, target: "str" },
    TypeRule { matches: is_timestamp, target: "datetime.datetime" },
    TypeRule { matches: is_uuid, target: "uuid.UUID" },
    TypeRule { matches: is_varchar, target: "str" },
];

/// Python type mapper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonTypeMapper;

impl TypeMapper for PythonTypeMapper {
    fn language(&self) -> Language {
        Language::Python
    }

    fn rules(&self, dialect: Dialect) -> &[TypeRule] {
        match dialect {
            Dialect::Postgresql => POSTGRES_RULES,
        }
    }

    fn fallback(&self) -> &'static str {
        ANY
    }

    fn map_optional(&self, base: &str) -> String {
        format!("{} | None", base)
    }
}
