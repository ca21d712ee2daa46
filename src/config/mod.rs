use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Static token accepted for admin API access (machine clients)
    #[serde(default = "default_bootstrap_token")]
    pub bootstrap_token: String,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    /// Session lifetime in days
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bootstrap_token: default_bootstrap_token(),
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            session_ttl_days: default_session_ttl_days(),
        }
    }
}

fn default_bootstrap_token() -> String {
    // Generate a random token if not provided
    uuid::Uuid::new_v4().to_string()
}

fn default_admin_email() -> String {
    "admin@carelink.local".to_string()
}

fn default_admin_password() -> String {
    // Random password per run unless configured; logged nowhere
    uuid::Uuid::new_v4().to_string()
}

fn default_session_ttl_days() -> i64 {
    7
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| "Failed to parse configuration file")?;
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
