use crate::error::{PriceEngineError, Result};
use crate::models::{DraftAnalysis, DraftHistory, HistoricalPick};
use crate::regression::{CurvePoint, RegressionFitter};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

/// Turns a completed historical auction draft into overall and per-position price curves
#[derive(Debug, Clone, Default)]
pub struct DraftAnalyzer {
    fitter: RegressionFitter,
}

impl DraftAnalyzer {
    pub fn new(fitter: RegressionFitter) -> Self {
        Self { fitter }
    }

    /// Analyse one season's picks.
    ///
    /// Picks are ordered by price, most expensive first (ties by pick number).
    /// The overall curve uses the index in that order as rank; each position's
    /// curve re-indexes its own picks from 0.
    pub fn analyze(&self, picks: &[HistoricalPick]) -> Result<DraftAnalysis> {
        if picks.is_empty() {
            return Err(PriceEngineError::EmptyInput("draft"));
        }

        let mut sorted: Vec<&HistoricalPick> = picks.iter().collect();
        sorted.sort_by(|a, b| {
            b.price.cmp(&a.price).then(a.overall_pick_number.cmp(&b.overall_pick_number))
        });

        let overall_points: Vec<CurvePoint> = sorted
            .iter()
            .enumerate()
            .map(|(rank, pick)| (rank as f64, f64::from(pick.price)))
            .collect();
        let overall = self.fitter.fit(&overall_points)?;

        let mut by_position: BTreeMap<&str, Vec<CurvePoint>> = BTreeMap::new();
        for pick in &sorted {
            let points = by_position.entry(pick.position.as_str()).or_default();
            points.push((points.len() as f64, f64::from(pick.price)));
        }

        let mut positions = BTreeMap::new();
        for (position, points) in by_position {
            let report = self.fitter.fit(&points)?;
            positions.insert(position.to_string(), report.coefficients);
        }

        Ok(DraftAnalysis { overall: overall.coefficients, positions })
    }

    /// Analyse several seasons. Seasons without picks are skipped.
    pub fn analyze_seasons(&self, seasons: &HashMap<i32, Vec<HistoricalPick>>) -> DraftHistory {
        let mut history = DraftHistory::new();

        for (&season, picks) in seasons {
            match self.analyze(picks) {
                Ok(analysis) => {
                    info!(
                        "Analysed {} draft: {} picks, {} positions, overall a={:.2} b={:.4}",
                        season,
                        picks.len(),
                        analysis.positions.len(),
                        analysis.overall.a,
                        analysis.overall.b
                    );
                    history.insert(season, analysis);
                }
                Err(e) => warn!("Skipping {} draft: {}", season, e),
            }
        }

        history
    }
}
