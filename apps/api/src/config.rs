use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::analysis::AnalysisConfig;

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub max_text_bytes: usize,
    /// Enables the remote suggestion provider when set.
    pub anthropic_api_key: Option<String>,
    pub suggestion_timeout: Duration,
    pub analysis: AnalysisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            max_text_bytes: 256 * 1024,
            anthropic_api_key: None,
            suggestion_timeout: Duration::from_secs(8),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            max_text_bytes: parse_or(&lookup, "MAX_TEXT_BYTES", defaults.max_text_bytes)?,
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            suggestion_timeout: Duration::from_secs(parse_or(
                &lookup,
                "SUGGESTION_TIMEOUT_SECS",
                defaults.suggestion_timeout.as_secs(),
            )?),
            analysis: AnalysisConfig {
                quantifier_window: parse_or(
                    &lookup,
                    "QUANTIFIER_WINDOW",
                    defaults.analysis.quantifier_window,
                )?,
                accept_bare_percentages: parse_or(
                    &lookup,
                    "ACCEPT_BARE_PERCENTAGES",
                    defaults.analysis.accept_bare_percentages,
                )?,
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.suggestion_timeout, Duration::from_secs(8));
        assert_eq!(config.analysis, AnalysisConfig::default());
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("QUANTIFIER_WINDOW", "3"),
            ("ACCEPT_BARE_PERCENTAGES", "true"),
            ("ANTHROPIC_API_KEY", "sk-test"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.analysis.quantifier_window, 3);
        assert!(config.analysis.accept_bare_percentages);
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_blank_api_key_disables_provider() {
        let config = config_from(&[("ANTHROPIC_API_KEY", "  ")]).unwrap();
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn test_invalid_port_is_reported() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
