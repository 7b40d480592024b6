//! Exponential price-curve fitting
//!
//! Prices are fit as `a * e^(b * rank)` by least squares on `ln(price)`,
//! weighting each point by its price so the expensive tier is not drowned out
//! by the long tail of $1 players. Zero-price points carry no weight.
//!
//! [`RegressionFitter`] fits the full point set and a family of truncated
//! prefixes and keeps whichever curve has the lowest error over the full set.

use crate::config::FitterConfig;
use crate::error::{PriceEngineError, Result};
use crate::models::{ExponentialCoefficients, FitReport};
use tracing::debug;

/// A `(rank, price)` sample
pub type CurvePoint = (f64, f64);

/// Fit `price = a * e^(b * rank)` to `points`.
///
/// Fewer than two distinct ranks leaves the slope undetermined; the result is
/// then flat (`b = 0`) at the weighted geometric mean price.
pub fn exponential_regression(points: &[CurvePoint]) -> ExponentialCoefficients {
    let (mut sum_y, mut sum_xy, mut sum_xxy) = (0.0, 0.0, 0.0);
    let (mut sum_ylny, mut sum_xylny) = (0.0, 0.0);

    for &(x, y) in points {
        if y <= 0.0 || !y.is_finite() {
            continue;
        }
        let ln_y = y.ln();
        sum_y += y;
        sum_xxy += x * x * y;
        sum_ylny += y * ln_y;
        sum_xylny += x * y * ln_y;
        sum_xy += x * y;
    }

    if sum_y == 0.0 {
        return ExponentialCoefficients::new(0.0, 0.0);
    }

    let denominator = sum_y * sum_xxy - sum_xy * sum_xy;
    if denominator.abs() <= 1e-9 * (sum_y * sum_xxy).abs().max(1.0) {
        return ExponentialCoefficients::new((sum_ylny / sum_y).exp(), 0.0);
    }

    let a = ((sum_xxy * sum_ylny - sum_xy * sum_xylny) / denominator).exp();
    let b = (sum_y * sum_xylny - sum_xy * sum_ylny) / denominator;
    ExponentialCoefficients::new(a, b)
}

/// Mean squared error of `curve` over `points`
pub fn mean_squared_error(curve: &ExponentialCoefficients, points: &[CurvePoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let total: f64 = points
        .iter()
        .map(|&(rank, price)| {
            let error = curve.value(rank) - price;
            error * error
        })
        .sum();
    total / points.len() as f64
}

/// Fits price curves and picks the best truncation window
#[derive(Debug, Clone, Default)]
pub struct RegressionFitter {
    config: FitterConfig,
}

impl RegressionFitter {
    pub fn new(config: FitterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FitterConfig {
        &self.config
    }

    /// Fit `points`, which must be sorted by price, most expensive first.
    ///
    /// Candidates are the full-set fit and fits over `points[0..i]` for `i`
    /// stepping by the configured stride. The candidate with the lowest
    /// full-set MSE wins; ties keep the full-set fit. The top-N MSE is
    /// reported but never used for selection.
    pub fn fit(&self, points: &[CurvePoint]) -> Result<FitReport> {
        if points.is_empty() {
            return Err(PriceEngineError::EmptyInput("point set"));
        }

        let top = &points[..points.len().min(self.config.top_n)];
        let evaluate = |coefficients: ExponentialCoefficients, window: usize| FitReport {
            coefficients,
            window,
            mse: mean_squared_error(&coefficients, points),
            top_mse: mean_squared_error(&coefficients, top),
            full_mse: 0.0,
        };

        let full = evaluate(exponential_regression(points), points.len());
        let mut best = full;

        let stride = self.config.stride.max(1);
        let mut window = stride;
        while window < points.len() {
            if window >= 2 {
                let candidate = evaluate(exponential_regression(&points[..window]), window);
                if candidate.mse < best.mse {
                    best = candidate;
                }
            }
            window += stride;
        }

        best.full_mse = full.mse;
        debug!(
            "Fit {} points: window={} a={:.3} b={:.5} mse={:.3} top_mse={:.3} full_mse={:.3}",
            points.len(),
            best.window,
            best.coefficients.a,
            best.coefficients.b,
            best.mse,
            best.top_mse,
            best.full_mse
        );
        Ok(best)
    }
}
