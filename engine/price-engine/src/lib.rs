//! Price Engine - auction price curves from historical drafts
//!
//! Fits exponential price curves to past auction results
//! ([`RegressionFitter`], [`DraftAnalyzer`]) and predicts what a ranked player
//! will cost in the coming draft ([`CostPredictor`]).
//!
//! ## Usage
//!
//! ```rust
//! use price_engine::{CostPredictor, DraftAnalyzer, EstimationSettings, HistoricalPick};
//! use std::sync::Arc;
//!
//! let picks: Vec<HistoricalPick> = (0..30)
//!     .map(|n| HistoricalPick {
//!         player_id: format!("{n}").as_str().into(),
//!         position: if n % 2 == 0 { "RB".to_string() } else { "WR".to_string() },
//!         price: 60u32.saturating_sub(2 * n).max(1),
//!         overall_pick_number: n + 1,
//!     })
//!     .collect();
//!
//! let analysis = DraftAnalyzer::default().analyze(&picks).unwrap();
//! let history = Arc::new([(2024, analysis)].into_iter().collect());
//! let predictor =
//!     CostPredictor::new(EstimationSettings { years: vec![2024], weight: 50 }, history).unwrap();
//! # let _ = predictor;
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod models;
pub mod predictor;
pub mod regression;

pub use analyzer::DraftAnalyzer;
pub use config::{EstimationSettings, FitterConfig};
pub use error::{PriceEngineError, Result};
pub use models::{DraftAnalysis, DraftHistory, ExponentialCoefficients, FitReport, HistoricalPick};
pub use predictor::{CostPredictor, FLOOR_PRICE};
pub use regression::{exponential_regression, mean_squared_error, CurvePoint, RegressionFitter};
