use anyhow::{bail, Context, Result};

/// Where course data lives.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Postgres { database_url: String },
    /// Process-local tables, for local development without a database.
    Memory,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "postgres".to_string());

        Ok(Config {
            storage: parse_backend(&backend, std::env::var("DATABASE_URL").ok())?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_backend(name: &str, database_url: Option<String>) -> Result<StorageBackend> {
    match name {
        "postgres" => {
            let database_url = database_url.with_context(|| {
                "Required environment variable 'DATABASE_URL' is not set".to_string()
            })?;
            Ok(StorageBackend::Postgres { database_url })
        }
        "memory" => Ok(StorageBackend::Memory),
        other => bail!("STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'"),
    }
}
