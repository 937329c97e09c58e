use crate::catalog::ToolKind;
use serde::{Deserialize, Serialize};

/// SQL backend named by a `DATABASE_URL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Postgres,
    MySql,
}

impl DatabaseBackend {
    /// Detect the backend from the URL scheme.
    ///
    /// Only the scheme is inspected, so a host or database name that happens
    /// to contain "mysql" does not change the answer.
    pub fn from_url(url: &str) -> Option<Self> {
        let (scheme, _) = url.trim().split_once("://")?;
        // Driver suffixes such as `postgresql+psycopg2` are stripped.
        let scheme = scheme.split('+').next().unwrap_or(scheme);
        match scheme.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Some(DatabaseBackend::Postgres),
            "mysql" | "mariadb" => Some(DatabaseBackend::MySql),
            _ => None,
        }
    }

    pub fn tool(self) -> ToolKind {
        match self {
            DatabaseBackend::Postgres => ToolKind::PgSearch,
            DatabaseBackend::MySql => ToolKind::MySqlSearch,
        }
    }
}
