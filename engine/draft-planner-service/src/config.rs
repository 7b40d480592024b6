//! Planner configuration management

use anyhow::{Context, Result};
use draft_board::SessionConfig;
use league_sources::{Platform, SourceConfig};
use persistence::PersistenceConfig;
use price_engine::FitterConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for overrides such as `DRAFT_PLANNER_LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "DRAFT_PLANNER";

/// Main planner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// League selection and history window
    pub league: LeagueSettings,

    /// Regression fitter configuration
    pub fitter: FitterConfig,

    /// Saved draft storage
    pub persistence: PersistenceConfig,

    /// ESPN and Sleeper API access
    pub sources: SourceConfig,

    /// Draft session autosave
    pub session: SessionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// League selection defaults; command line flags take precedence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSettings {
    pub platform: Option<Platform>,
    pub league_id: Option<String>,

    /// Saved draft opened when none is named
    pub draft_name: String,

    /// Number of earlier seasons used to fit price curves
    pub history_seasons: usize,

    /// JSON list of ADP rows offered as an extra ranking source
    pub adp_file: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,

    /// Log file path (if None, logs to stderr)
    pub file: Option<PathBuf>,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            platform: None,
            league_id: None,
            draft_name: "default".to_string(),
            history_seasons: 3,
            adp_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: "compact".to_string(), file: None }
    }
}

impl PlannerConfig {
    /// Defaults with each component's own environment variables applied
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            fitter: FitterConfig::from_env().context("Invalid price engine configuration")?,
            sources: SourceConfig::from_env().context("Invalid league source configuration")?,
            session: SessionConfig::from_env().context("Invalid draft session configuration")?,
            ..Self::default()
        })
    }
}

/// Load configuration: component defaults, then the TOML file (if any), then
/// `DRAFT_PLANNER_*` environment variables
pub fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    let defaults = PlannerConfig::from_env()?;

    let mut builder = config::Config::builder().add_source(
        config::Config::try_from(&defaults).context("Failed to encode default configuration")?,
    );

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let config: PlannerConfig = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &PlannerConfig) -> Result<()> {
    config.fitter.validate().context("Invalid fitter configuration")?;
    config.persistence.validate().map_err(anyhow::Error::msg)?;
    config.sources.validate().context("Invalid league source configuration")?;

    if config.league.history_seasons == 0 {
        return Err(anyhow::anyhow!("history_seasons must be at least 1"));
    }

    if config.league.draft_name.trim().is_empty() {
        return Err(anyhow::anyhow!("draft_name must not be empty"));
    }

    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    match config.logging.format.as_str() {
        "json" | "pretty" | "compact" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = PlannerConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.league.draft_name, "default");
        assert_eq!(config.session.save_debounce_ms, 500);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("planner.toml");
        std::fs::write(
            &path,
            r#"
[league]
platform = "sleeper"
league_id = "1048306823960780800"
history_seasons = 2

[session]
save_debounce_ms = 250

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.league.platform, Some(Platform::Sleeper));
        assert_eq!(config.league.league_id.as_deref(), Some("1048306823960780800"));
        assert_eq!(config.league.history_seasons, 2);
        assert_eq!(config.league.draft_name, "default");
        assert_eq!(config.session.save_debounce_ms, 250);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "compact");
        assert_eq!(config.fitter, FitterConfig::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_config(Some(&temp_dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = PlannerConfig::default();
        config.logging.format = "xml".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = PlannerConfig::default();
        config.league.history_seasons = 0;
        assert!(validate_config(&config).is_err());

        let mut config = PlannerConfig::default();
        config.fitter.stride = 0;
        assert!(validate_config(&config).is_err());
    }
}
