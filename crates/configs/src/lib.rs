//! Layered application configuration: optional TOML files under `config/`
//! overridden by `VESTNIK__`-prefixed environment variables. Secrets stay
//! wrapped in `SecretString` so they never end up in logs.

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: SecretString,
    pub session_ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Filesystem root the uploads land under.
    pub root: String,
    /// Public URL prefix the router serves that root from.
    pub url_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub media: MediaConfig,
}

impl AppConfig {
    /// Loads `config/default.toml` (optional), then `config/local.toml`
    /// (optional), then the environment. `VESTNIK__SERVER__PORT=8080`
    /// overrides `server.port`.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080i64)?
            .set_default("database.max_connections", 10i64)?
            .set_default("auth.session_ttl_hours", 24i64 * 30)?
            .set_default("media.root", "./data/uploads")?
            .set_default("media.url_prefix", "/media")?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("VESTNIK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: AppConfig = settings.try_deserialize()?;
        tracing::debug!(host = %cfg.server.host, port = cfg.server.port, "configuration loaded");
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn env_overrides_defaults() {
        // Env vars are process-wide; keep this the only test that sets them.
        std::env::set_var("VESTNIK__DATABASE__URL", "postgres://localhost/vestnik");
        std::env::set_var("VESTNIK__AUTH__JWT_SECRET", "test-secret");
        std::env::set_var("VESTNIK__SERVER__PORT", "9090");

        let cfg = AppConfig::load().unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.database.url.expose_secret(), "postgres://localhost/vestnik");
        assert_eq!(cfg.auth.session_ttl_hours, 24 * 30);
        assert_eq!(cfg.media.url_prefix, "/media");

        std::env::remove_var("VESTNIK__DATABASE__URL");
        std::env::remove_var("VESTNIK__AUTH__JWT_SECRET");
        std::env::remove_var("VESTNIK__SERVER__PORT");
    }
}
