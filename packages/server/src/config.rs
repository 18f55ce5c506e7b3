use common::media::MediaConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed browser origins. Empty allows any origin.
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
    /// Largest accepted JSON request body in bytes.
    pub json_body_limit: usize,
    /// Key the login throttle on `X-Forwarded-For` (set behind a reverse proxy).
    pub trust_proxy: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoginRateLimitConfig {
    pub window_secs: u64,
    pub max_attempts: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// The single admin identity.
    pub admin_email: String,
    /// Argon2 or bcrypt hash of the admin password. Takes precedence over
    /// `admin_password`.
    pub admin_password_hash: Option<String>,
    pub admin_password: Option<String>,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub login_rate_limit: LoginRateLimitConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub media: Option<MediaConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("server.json_body_limit", 2 * 1024 * 1024)?
            .set_default("server.trust_proxy", false)?
            .set_default("database.url", "postgres://localhost/lantern")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 1)?
            .set_default("auth.admin_email", "")?
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.token_ttl_days", 7)?
            .set_default("auth.login_rate_limit.window_secs", 600)?
            .set_default("auth.login_rate_limit.max_attempts", 20)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., LANTERN__AUTH__JWT_SECRET)
            .add_source(
                Environment::with_prefix("LANTERN")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    /// Reject configurations the server cannot run safely with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Message(
                "database.min_connections must not exceed database.max_connections".into(),
            ));
        }
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt_secret must be set (LANTERN__AUTH__JWT_SECRET)".into(),
            ));
        }
        if self.auth.token_ttl_days <= 0 {
            return Err(ConfigError::Message(
                "auth.token_ttl_days must be positive".into(),
            ));
        }
        if self.auth.login_rate_limit.window_secs == 0 {
            return Err(ConfigError::Message(
                "auth.login_rate_limit.window_secs must be at least 1".into(),
            ));
        }
        if self.auth.login_rate_limit.max_attempts == 0 {
            return Err(ConfigError::Message(
                "auth.login_rate_limit.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Upload limit for the media relay, whether or not a host is configured.
    pub fn max_upload_bytes(&self) -> usize {
        self.media
            .as_ref()
            .map(|m| m.max_upload_bytes)
            .unwrap_or_else(common::media::default_max_upload_bytes)
    }
}
