use anyhow::Context;

/// Fallback shared secret when API_KEY is not set.
const DEFAULT_API_KEY: &str = "your-api-key-here";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            api_key: std::env::var("API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string()),
        })
    }
}
