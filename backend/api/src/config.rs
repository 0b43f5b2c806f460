//! Application configuration loaded from environment variables.

use crate::errors::{ApiError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the REST API server
    pub port: u16,
    /// Deployment environment label, shown in startup logs
    pub app_env: String,
    /// True only when APP_ENV is explicitly `development`; controls
    /// whether 500 responses carry internal error detail
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let app_env = env_var("APP_ENV").ok();
        Ok(Config {
            port: env_var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ApiError::Config("Invalid PORT".to_string()))?,
            dev_mode: app_env.as_deref() == Some("development"),
            app_env: app_env.unwrap_or_else(|| "development".to_string()),
        })
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| ApiError::Config(format!("Missing env var: {key}")))
}
