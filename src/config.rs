//! Server configuration from environment variables (optionally via `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

/// Which [`crate::store::CountryStore`] backs the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Schema holding the `countries` table. Plain identifier only.
    pub schema: String,
    pub store: StoreKind,
}

impl ServerConfig {
    /// Read `DATABASE_URL`, `BIND_ADDR`, `DB_MAX_CONNECTIONS`, `WORLDER_SCHEMA` and `WORLDER_STORE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = get("DATABASE_URL", "postgres://localhost/worlder");

        let raw = get("BIND_ADDR", "0.0.0.0:8080");
        let bind_addr = raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid { key: "BIND_ADDR", value: raw.clone() })?;

        let raw = get("DB_MAX_CONNECTIONS", "5");
        let max_connections = raw
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", value: raw.clone() })?;

        let schema = get("WORLDER_SCHEMA", "public");
        if !is_identifier(&schema) {
            return Err(ConfigError::Invalid { key: "WORLDER_SCHEMA", value: schema });
        }

        let raw = get("WORLDER_STORE", "postgres");
        let store = raw
            .parse::<StoreKind>()
            .map_err(|_| ConfigError::Invalid { key: "WORLDER_STORE", value: raw.clone() })?;

        Ok(ServerConfig {
            database_url,
            bind_addr,
            max_connections,
            schema,
            store,
        })
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
