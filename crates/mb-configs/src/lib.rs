//! # mb-configs
//!
//! Layered application configuration: built-in defaults, an optional
//! `moodboard.toml` file, then `MOODBOARD__*` environment variables
//! (with `.env` loaded first). The JWT secret stays wrapped in
//! `SecretString` so it never lands in debug output or logs.

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Exact origin allowed by CORS (the frontend's base URL). Unset means
    /// any origin, for local development.
    #[serde(default)]
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: SecretString,
    pub token_ttl_secs: i64,
}

#[derive(Clone, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

/// Loads configuration. Example environment overrides:
/// `MOODBOARD__HTTP__PORT=8080`, `MOODBOARD__AUTH__JWT_SECRET=...`.
pub fn load() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .set_default("http.host", "127.0.0.1")?
        .set_default("http.port", 3000)?
        .set_default("database.url", "sqlite:moodboard.db")?
        .set_default("auth.jwt_secret", "dev-secret")?
        .set_default("auth.token_ttl_secs", 86_400)?
        .add_source(config::File::with_name("moodboard").required(false))
        .add_source(config::Environment::with_prefix("MOODBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_enough_to_boot() {
        let cfg = load().expect("defaults should load");
        assert_eq!(cfg.http.host, "127.0.0.1");
        assert_eq!(cfg.http.port, 3000);
        assert!(cfg.http.cors_origin.is_none());
        assert_eq!(cfg.database.url, "sqlite:moodboard.db");
        assert_eq!(cfg.auth.token_ttl_secs, 86_400);
    }
}
