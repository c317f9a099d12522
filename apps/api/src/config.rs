use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if the upstream API credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Tunables for the interaction flow.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    /// Lines shorter than this are not treated as substantive résumé bullets.
    pub min_bullet_chars: usize,
    pub default_num_projects: u8,
    pub max_num_projects: u8,
    /// Match estimates below this percentage add a learning-resources notice.
    pub low_match_threshold: f32,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            min_bullet_chars: 30,
            default_num_projects: 3,
            max_num_projects: 5,
            low_match_threshold: 30.0,
        }
    }
}
