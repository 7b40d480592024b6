use crate::error::{PriceEngineError, Result};
use crate::models::DraftHistory;
use serde::{Deserialize, Serialize};

/// Default step between truncated fit windows
pub const DEFAULT_FIT_STRIDE: usize = 10;

/// Default size of the expensive tier scored separately
pub const DEFAULT_TOP_N: usize = 50;

/// Configuration for the regression fitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitterConfig {
    /// Step between truncated prefix windows (`points[0..stride]`, `points[0..2*stride]`, ...)
    pub stride: usize,

    /// Number of most expensive points in the top-tier error score
    pub top_n: usize,
}

impl Default for FitterConfig {
    fn default() -> Self {
        Self { stride: DEFAULT_FIT_STRIDE, top_n: DEFAULT_TOP_N }
    }
}

impl FitterConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(stride) = std::env::var("PRICE_ENGINE_FIT_STRIDE") {
            config.stride = stride
                .parse()
                .map_err(|_| PriceEngineError::config("Invalid PRICE_ENGINE_FIT_STRIDE"))?;
        }

        if let Ok(top_n) = std::env::var("PRICE_ENGINE_TOP_N") {
            config.top_n =
                top_n.parse().map_err(|_| PriceEngineError::config("Invalid PRICE_ENGINE_TOP_N"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(PriceEngineError::config("Fit stride must be greater than 0"));
        }

        if self.top_n == 0 {
            return Err(PriceEngineError::config("Top-N must be greater than 0"));
        }

        Ok(())
    }
}

/// User-controlled estimation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationSettings {
    /// Historical seasons to average over, in display order
    pub years: Vec<i32>,

    /// Percentage weight (0-100) given to the positional prediction over the overall one
    pub weight: u8,
}

impl Default for EstimationSettings {
    fn default() -> Self {
        Self { years: Vec::new(), weight: 50 }
    }
}

impl EstimationSettings {
    pub const MAX_WEIGHT: u8 = 100;

    /// Settings covering every analysed season, newest first
    pub fn for_history(history: &DraftHistory, weight: u8) -> Self {
        Self { years: history.keys().rev().copied().collect(), weight }
    }

    pub fn position_weight(&self) -> f64 {
        f64::from(self.weight) / 100.0
    }

    pub fn overall_weight(&self) -> f64 {
        1.0 - self.position_weight()
    }

    /// Check `weight` is in range and, when history is known, that every year was analysed
    pub fn validate(&self, history: Option<&DraftHistory>) -> Result<()> {
        if self.weight > Self::MAX_WEIGHT {
            return Err(PriceEngineError::invalid_settings(format!(
                "weight {} is outside 0-{}",
                self.weight,
                Self::MAX_WEIGHT
            )));
        }

        if let Some(history) = history {
            if let Some(missing) = self.years.iter().find(|year| !history.contains_key(year)) {
                return Err(PriceEngineError::invalid_settings(format!(
                    "season {missing} has no draft analysis"
                )));
            }
        }

        Ok(())
    }

    /// Drop seasons that have no analysis; used when restoring saved settings
    pub fn retain_known_years(&mut self, history: &DraftHistory) -> usize {
        let before = self.years.len();
        self.years.retain(|year| history.contains_key(year));
        before - self.years.len()
    }
}
