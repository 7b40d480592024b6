use player_registry::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One pick from a completed historical auction draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPick {
    pub player_id: PlayerId,
    pub position: String,
    pub price: u32,
    pub overall_pick_number: u32,
}

/// Coefficients of `price(rank) = a * e^(b * rank)`; `b` is expected to be <= 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialCoefficients {
    pub a: f64,
    pub b: f64,
}

impl ExponentialCoefficients {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Raw curve value at `rank`
    pub fn value(&self, rank: f64) -> f64 {
        self.a * (self.b * rank).exp()
    }

    /// Whole-dollar price at `rank`, floored at 1
    pub fn price(&self, rank: u32) -> u32 {
        let rounded = self.value(rank as f64).round();
        // NaN.max(1.0) is 1.0
        rounded.max(1.0) as u32
    }
}

/// Overall and per-position price curves for one historical season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftAnalysis {
    pub overall: ExponentialCoefficients,

    /// Positions with no picks that season are absent, not zero
    pub positions: BTreeMap<String, ExponentialCoefficients>,
}

/// season -> analysis of that season's auction draft
pub type DraftHistory = BTreeMap<i32, DraftAnalysis>;

/// Outcome of a fit: the chosen coefficients plus the errors that chose them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub coefficients: ExponentialCoefficients,

    /// Length of the prefix the chosen fit was computed over
    pub window: usize,

    /// Mean squared error of the chosen fit over every point
    pub mse: f64,

    /// Mean squared error of the chosen fit over the top-N most expensive points
    pub top_mse: f64,

    /// Mean squared error of the plain full-set fit over every point
    pub full_mse: f64,
}
