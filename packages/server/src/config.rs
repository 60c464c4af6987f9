use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Credits granted to a freshly provisioned user when `STARTING_CREDITS` is unset
pub const DEFAULT_STARTING_CREDITS: i32 = 10;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Signing secret for identity provider webhooks (`whsec_...`)
    pub identity_webhook_secret: Option<String>,
    pub allowed_origins: Vec<String>,
    pub starting_credits: i32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let starting_credits = env::var("STARTING_CREDITS")
            .unwrap_or_else(|_| DEFAULT_STARTING_CREDITS.to_string())
            .parse::<i32>()
            .context("STARTING_CREDITS must be a valid number")?;
        if starting_credits < 0 {
            anyhow::bail!("STARTING_CREDITS must not be negative");
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "skillswap".to_string()),
            identity_webhook_secret: env::var("IDENTITY_WEBHOOK_SECRET")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            allowed_origins: parse_list(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            starting_credits,
        })
    }
}

/// Split a comma-separated env value, dropping empty entries
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_skips_blanks() {
        let origins = parse_list("http://localhost:3000, ,https://skillswap.dev,");
        assert_eq!(
            origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://skillswap.dev".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(parse_list("").is_empty());
    }
}
