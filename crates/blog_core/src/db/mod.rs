//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Resolve a database connection URL into a concrete SQLite target.
//! - Open and configure one connection per handler call.
//! - Apply schema migrations before any data access.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Callers own the returned connection; dropping it closes it.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_database, open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    InvalidUrl(String),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::InvalidUrl(url) => write!(f, "unsupported database url `{url}`"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::InvalidUrl(_) | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Parsed database location.
///
/// Accepted forms: `sqlite://<path>`, `sqlite:<path>`, a bare filesystem
/// path, and `:memory:` (also `sqlite::memory:`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    File(PathBuf),
    Memory,
}

impl DatabaseUrl {
    pub fn parse(raw: &str) -> DbResult<Self> {
        let trimmed = raw.trim();
        let location = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);

        if location.is_empty() || location.contains("://") {
            return Err(DbError::InvalidUrl(trimmed.to_string()));
        }
        if location == ":memory:" {
            return Ok(Self::Memory);
        }
        Ok(Self::File(PathBuf::from(location)))
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "sqlite://{}", path.display()),
            Self::Memory => write!(f, "sqlite::memory:"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DatabaseUrl, DbError};
    use std::path::PathBuf;

    #[test]
    fn parse_accepts_scheme_and_bare_paths() {
        assert_eq!(
            DatabaseUrl::parse("sqlite:///var/lib/blog.db").unwrap(),
            DatabaseUrl::File(PathBuf::from("/var/lib/blog.db"))
        );
        assert_eq!(
            DatabaseUrl::parse("sqlite:data/blog.db").unwrap(),
            DatabaseUrl::File(PathBuf::from("data/blog.db"))
        );
        assert_eq!(
            DatabaseUrl::parse(" blog.db ").unwrap(),
            DatabaseUrl::File(PathBuf::from("blog.db"))
        );
    }

    #[test]
    fn parse_recognizes_memory_target() {
        assert_eq!(DatabaseUrl::parse(":memory:").unwrap(), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse("sqlite::memory:").unwrap(),
            DatabaseUrl::Memory
        );
    }

    #[test]
    fn parse_rejects_foreign_schemes_and_empty_values() {
        for raw in ["", "sqlite://", "postgres://user@host/db"] {
            let err = DatabaseUrl::parse(raw).unwrap_err();
            assert!(matches!(err, DbError::InvalidUrl(_)), "{raw}");
        }
    }
}
