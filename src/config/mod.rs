use anyhow::Result;
use dotenvy::dotenv;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub pirpos: PirposConfig,
    pub service_name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PirposConfig {
    pub api_base_url: String,
    pub username: String,
    pub password: Secret<String>,
}

impl PirposConfig {
    /// Whether credentials are present. When they are not, the service
    /// falls back to the null connector instead of failing startup.
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.expose_secret().is_empty()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let host = env::var("POS_SYNC_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("POS_SYNC_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        let api_base_url = env::var("PIRPOS_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.pirpos.com".to_string());
        let username = env::var("PIRPOS_USER_NAME").unwrap_or_default();
        let password = env::var("PIRPOS_PASSWORD").unwrap_or_default();

        Ok(Self {
            server: ServerConfig { host, port },
            pirpos: PirposConfig {
                api_base_url,
                username,
                password: Secret::new(password),
            },
            service_name: "pos-sync-service".to_string(),
        })
    }
}
