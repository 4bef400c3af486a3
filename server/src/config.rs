use anyhow::Context;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Postgres connection string. Without one the server keeps recipes in memory.
    pub database_url: Option<String>,
}

impl Config {
    /// Environment variables:
    /// - `BIND_ADDR`: listen address (default `0.0.0.0:5000`)
    /// - `DATABASE_URL`: Postgres connection string
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {}", raw_addr))?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if database_url.is_none() {
            tracing::warn!("DATABASE_URL not set, recipes will be kept in memory only");
        }

        Ok(Self {
            bind_addr,
            database_url,
        })
    }
}
