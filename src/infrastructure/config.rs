use std::env;

use crate::modules::import::DEFAULT_AFFILIATE_TAG;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub profile: String,
    pub affiliate_tag: String,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let profile = env::var("PROFILE").unwrap_or_else(|_| "default".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            if profile == "default" {
                "sqlite://tankwiki.db?mode=rwc".to_string()
            } else {
                format!("sqlite://tankwiki_{}.db?mode=rwc", profile)
            }
        });

        Self {
            database_url,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(Vec::new),
            affiliate_tag: env::var("AFFILIATE_TAG")
                .ok()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AFFILIATE_TAG.to_string()),
            seed_demo: env::var("SEED_DEMO").is_ok(),
            profile,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            port: 8000,
            cors_allowed_origins: Vec::new(),
            profile: "default".to_string(),
            affiliate_tag: DEFAULT_AFFILIATE_TAG.to_string(),
            seed_demo: false,
        }
    }
}
