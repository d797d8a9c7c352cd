// Configuration - read from the environment once at startup

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_SKU_CSV: &str = "sku.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `PORT`
    pub port: u16,
    /// `HOST`
    pub host: String,
    /// `SKU_CSV`
    pub sku_csv: PathBuf,
    /// `SCRAPER_USER_AGENT`
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            sku_csv: PathBuf::from(DEFAULT_SKU_CSV),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("sku-compare/{}", crate::VERSION)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unset or empty values fall back to defaults
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {:?}", port))?;
        }
        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(path) = get("SKU_CSV") {
            config.sku_csv = PathBuf::from(path);
        }
        if let Some(ua) = get("SCRAPER_USER_AGENT") {
            config.user_agent = ua;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
