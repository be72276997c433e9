//! Native column types.
//!
//! Reflectors hand over a loose [`TypeDescriptor`]; the generator parses it
//! once into a dialect-tagged [`NativeType`] so emitters can match on it
//! exhaustively.

use serde::{Deserialize, Serialize};

use crate::Dialect;

/// Raw column type as reported by a reflector.
///
/// `name` is the database's type name, optionally with a parenthesized
/// modifier (`varchar(255)`). Parameters reported separately take precedence
/// over the ones parsed out of the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<bool>,
}

impl TypeDescriptor {
    /// A descriptor with only a type name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: None,
            timezone: None,
        }
    }

    /// Set the length parameter.
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the time-zone flag.
    pub fn with_timezone(mut self, timezone: bool) -> Self {
        self.timezone = Some(timezone);
        self
    }
}

/// A column type tagged with the dialect it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeType {
    Postgres(PgType),
}

impl NativeType {
    /// Parse a reflector descriptor for the given dialect.
    pub fn parse(dialect: Dialect, descriptor: &TypeDescriptor) -> Self {
        match dialect {
            Dialect::Postgresql => NativeType::Postgres(PgType::parse(descriptor)),
        }
    }

    /// The dialect this type belongs to.
    pub fn dialect(&self) -> Dialect {
        match self {
            NativeType::Postgres(_) => Dialect::Postgresql,
        }
    }
}

/// PostgreSQL column types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PgType {
    BigInt,
    Boolean,
    Char { length: Option<u32> },
    Date,
    DoublePrecision,
    Float,
    Inet,
    Integer,
    Json,
    Jsonb,
    Numeric,
    Real,
    SmallInt,
    Text,
    Time { timezone: bool },
    Timestamp { timezone: bool },
    Uuid,
    Varchar { length: Option<u32> },
    /// Any type without a dedicated variant, keyed by its lower-cased name.
    Other(String),
}

impl PgType {
    /// Parse a descriptor, accepting the usual PostgreSQL aliases.
    pub fn parse(descriptor: &TypeDescriptor) -> Self {
        let (base, modifier) = split_modifier(&descriptor.name);
        let length = descriptor.length.or(modifier);
        let timezone = descriptor.timezone;

        match base.as_str() {
            "bigint" | "int8" | "bigserial" | "serial8" => PgType::BigInt,
            "boolean" | "bool" => PgType::Boolean,
            "char" | "character" | "bpchar" => PgType::Char { length },
            "date" => PgType::Date,
            "double precision" | "float8" => PgType::DoublePrecision,
            "float" => PgType::Float,
            "inet" => PgType::Inet,
            "integer" | "int" | "int4" | "serial" | "serial4" => PgType::Integer,
            "json" => PgType::Json,
            "jsonb" => PgType::Jsonb,
            "numeric" | "decimal" => PgType::Numeric,
            "real" | "float4" => PgType::Real,
            "smallint" | "int2" | "smallserial" | "serial2" => PgType::SmallInt,
            "text" => PgType::Text,
            "time" | "time without time zone" => PgType::Time {
                timezone: timezone.unwrap_or(false),
            },
            "timetz" | "time with time zone" => PgType::Time { timezone: true },
            "timestamp" | "timestamp without time zone" => PgType::Timestamp {
                timezone: timezone.unwrap_or(false),
            },
            "timestamptz" | "timestamp with time zone" => PgType::Timestamp { timezone: true },
            "uuid" => PgType::Uuid,
            "varchar" | "character varying" => PgType::Varchar { length },
            _ => PgType::Other(base),
        }
    }
}

/// Split `character varying(255)` into (`character varying`, `Some(255)`).
///
/// Modifiers may sit in the middle of the name
/// (`timestamp(6) with time zone`); they are removed and the first numeric
/// argument is returned. Whitespace is normalized to single spaces.
fn split_modifier(raw: &str) -> (String, Option<u32>) {
    let lowered = raw.trim().to_lowercase();
    let (name, modifier) = match (lowered.find('('), lowered.find(')')) {
        (Some(open), Some(close)) if open < close => {
            let args = &lowered[open + 1..close];
            let first = args.split(',').next().map(str::trim);
            let modifier = first.and_then(|arg| arg.parse::<u32>().ok());
            (
                format!("{}{}", &lowered[..open], &lowered[close + 1..]),
                modifier,
            )
        }
        _ => (lowered, None),
    };
    let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
    (name, modifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> PgType {
        PgType::parse(&TypeDescriptor::named(name))
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(parse("int4"), PgType::Integer);
        assert_eq!(parse("INTEGER"), PgType::Integer);
        assert_eq!(parse("int8"), PgType::BigInt);
        assert_eq!(parse("bool"), PgType::Boolean);
        assert_eq!(parse("float8"), PgType::DoublePrecision);
        assert_eq!(parse("double  precision"), PgType::DoublePrecision);
        assert_eq!(parse("float4"), PgType::Real);
        assert_eq!(parse("jsonb"), PgType::Jsonb);
        assert_eq!(parse("uuid"), PgType::Uuid);
    }

    #[test]
    fn test_parse_length_from_name() {
        assert_eq!(
            parse("character varying(255)"),
            PgType::Varchar { length: Some(255) }
        );
        assert_eq!(parse("bpchar(2)"), PgType::Char { length: Some(2) });
        assert_eq!(parse("varchar"), PgType::Varchar { length: None });
    }

    #[test]
    fn test_explicit_length_wins() {
        let descriptor = TypeDescriptor::named("varchar(10)").with_length(40);
        assert_eq!(
            PgType::parse(&descriptor),
            PgType::Varchar { length: Some(40) }
        );
    }

    #[test]
    fn test_parse_timestamps() {
        assert_eq!(parse("timestamp"), PgType::Timestamp { timezone: false });
        assert_eq!(parse("timestamptz"), PgType::Timestamp { timezone: true });
        assert_eq!(
            parse("timestamp(6) with time zone"),
            PgType::Timestamp { timezone: true }
        );
        let descriptor = TypeDescriptor::named("timestamp").with_timezone(true);
        assert_eq!(
            PgType::parse(&descriptor),
            PgType::Timestamp { timezone: true }
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("bytea"), PgType::Other("bytea".to_string()));
        assert_eq!(parse("integer[]"), PgType::Other("integer[]".to_string()));
        assert_eq!(parse("numeric(10, 2)"), PgType::Numeric);
    }

    #[test]
    fn test_native_type_dialect() {
        let native = NativeType::parse(Dialect::Postgresql, &TypeDescriptor::named("text"));
        assert_eq!(native, NativeType::Postgres(PgType::Text));
        assert_eq!(native.dialect(), Dialect::Postgresql);
    }

    #[test]
    fn test_descriptor_deserialize() {
        let descriptor: TypeDescriptor =
            serde_json::from_str(r#"{"name": "varchar", "length": 32}"#).unwrap();
        assert_eq!(descriptor, TypeDescriptor::named("varchar").with_length(32));
    }
}
