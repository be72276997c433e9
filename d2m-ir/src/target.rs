//! Generation targets: the SQL dialect read from and the language written to.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL
    #[serde(alias = "postgres")]
    Postgresql,
}

impl Dialect {
    /// Returns the dialect identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Postgresql => "postgresql",
        }
    }

    /// Whether tables live inside named schemas.
    ///
    /// Dialects without schemas are iterated through a single implicit scope.
    pub fn requires_schema(&self) -> bool {
        match self {
            Dialect::Postgresql => true,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(Dialect::Postgresql),
            _ => Err(format!(
                "unsupported dialect '{}', expected 'postgresql'",
                s
            )),
        }
    }
}

/// Supported target languages for code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Python (SQLAlchemy declarative dataclasses)
    Python,
}

impl Language {
    /// Returns the language identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            _ => Err(format!("unsupported language '{}', expected 'python'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_str() {
        assert_eq!(Dialect::from_str("postgresql").unwrap(), Dialect::Postgresql);
        assert_eq!(Dialect::from_str("Postgres").unwrap(), Dialect::Postgresql);
        assert_eq!(Dialect::from_str("pg").unwrap(), Dialect::Postgresql);
        assert!(Dialect::from_str("mysql").is_err());
        assert!(Dialect::from_str("").is_err());
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!(Language::from_str("python").unwrap(), Language::Python);
        assert_eq!(Language::from_str("PY").unwrap(), Language::Python);
        assert!(Language::from_str("rust").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Dialect::Postgresql.to_string(), "postgresql");
        assert_eq!(Language::Python.to_string(), "python");
    }

    #[test]
    fn test_deserialize() {
        let dialect: Dialect = serde_json::from_str(r#""postgres""#).unwrap();
        assert_eq!(dialect, Dialect::Postgresql);

        let language: Language = serde_json::from_str(r#""python""#).unwrap();
        assert_eq!(language, Language::Python);

        assert!(serde_json::from_str::<Dialect>(r#""sqlite""#).is_err());
    }

    #[test]
    fn test_postgres_requires_schema() {
        assert!(Dialect::Postgresql.requires_schema());
    }
}
