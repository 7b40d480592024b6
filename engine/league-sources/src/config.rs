//! Configuration for league sources

use crate::error::{Result, SourceError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// ESPN private-league credentials (browser cookies)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnCredentials {
    pub espn_s2: String,
    pub swid: String,
}

/// League source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub sleeper_api_base_url: String,
    pub espn_api_base_url: String,

    /// Required only for private ESPN leagues
    pub espn_credentials: Option<EspnCredentials>,

    pub request_timeout_secs: u64,

    /// How long the Sleeper player catalog (~5MB) stays cached
    pub player_cache_ttl_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            sleeper_api_base_url: "https://api.sleeper.app/v1".to_string(),
            espn_api_base_url: "https://lm-api-reads.fantasy.espn.com/apis/v3/games/ffl"
                .to_string(),
            espn_credentials: None,
            request_timeout_secs: 30,
            player_cache_ttl_secs: 24 * 60 * 60,
        }
    }
}

impl SourceConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SLEEPER_API_BASE_URL") {
            config.sleeper_api_base_url = url;
        }
        if let Ok(url) = std::env::var("ESPN_API_BASE_URL") {
            config.espn_api_base_url = url;
        }

        match (std::env::var("ESPN_S2"), std::env::var("ESPN_SWID")) {
            (Ok(espn_s2), Ok(swid)) => {
                config.espn_credentials = Some(EspnCredentials { espn_s2, swid });
            }
            (Ok(_), Err(_)) | (Err(_), Ok(_)) => {
                return Err(SourceError::InvalidConfig {
                    message: "ESPN_S2 and ESPN_SWID must be set together".to_string(),
                });
            }
            _ => {}
        }

        if let Ok(timeout) = std::env::var("SOURCE_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = parse_env("SOURCE_REQUEST_TIMEOUT_SECS", &timeout)?;
        }
        if let Ok(ttl) = std::env::var("PLAYER_CACHE_TTL_SECS") {
            config.player_cache_ttl_secs = parse_env("PLAYER_CACHE_TTL_SECS", &ttl)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(SourceError::InvalidConfig {
                message: "request timeout must be greater than 0".to_string(),
            });
        }
        for url in [&self.sleeper_api_base_url, &self.espn_api_base_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SourceError::InvalidConfig {
                    message: format!("API base URL must be http(s): {url}"),
                });
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn player_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.player_cache_ttl_secs)
    }
}

fn parse_env(name: &str, value: &str) -> Result<u64> {
    value.parse().map_err(|_| SourceError::InvalidConfig {
        message: format!("{name} must be a whole number of seconds, got '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SourceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.espn_credentials.is_none());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = SourceConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = SourceConfig::default();
        config.sleeper_api_base_url = "api.sleeper.app".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_env() {
        assert_eq!(parse_env("X", "15").unwrap(), 15);
        assert!(parse_env("X", "fifteen").is_err());
    }
}
