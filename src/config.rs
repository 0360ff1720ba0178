use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runtime configuration, environment-driven.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("APP_PORT must be a valid u16")?;

        let data_file: PathBuf = env::var("DATA_FILE")
            .unwrap_or_else(|_| "articles.snapshot".to_string())
            .into();

        Ok(Self {
            host,
            port,
            data_file,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
