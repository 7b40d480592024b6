use crate::config::EstimationSettings;
use crate::error::Result;
use crate::models::DraftHistory;
use player_registry::RankedPlayer;
use std::sync::Arc;
use tracing::debug;

/// Lowest price any player can cost at auction
pub const FLOOR_PRICE: u32 = 1;

/// Predicts a player's auction price from historical price curves.
///
/// Bound to one set of estimation settings and one draft history; rebuild it
/// when either changes. Predictions are pure functions of those inputs.
#[derive(Debug, Clone)]
pub struct CostPredictor {
    settings: EstimationSettings,
    history: Arc<DraftHistory>,
}

impl CostPredictor {
    /// Create a predictor. Only the weight is validated; seasons missing from
    /// `history` are skipped at prediction time.
    pub fn new(settings: EstimationSettings, history: Arc<DraftHistory>) -> Result<Self> {
        settings.validate(None)?;

        let missing = settings.years.iter().filter(|year| !history.contains_key(year)).count();
        if missing > 0 {
            debug!("{} selected seasons have no draft analysis and will be skipped", missing);
        }

        Ok(Self { settings, history })
    }

    pub fn settings(&self) -> &EstimationSettings {
        &self.settings
    }

    pub fn history(&self) -> &Arc<DraftHistory> {
        &self.history
    }

    /// Average the blended overall/positional prediction over the selected
    /// seasons and round up, never below [`FLOOR_PRICE`].
    ///
    /// A season with no curve for the player's position (or a player with no
    /// positional rank) uses the overall prediction for the positional term.
    pub fn predict(&self, player: &RankedPlayer) -> u32 {
        let Some(overall_rank) = player.overall_rank.value() else {
            return FLOOR_PRICE;
        };

        let position_weight = self.settings.position_weight();
        let overall_weight = self.settings.overall_weight();

        let mut total = 0.0;
        let mut seasons = 0usize;
        for year in &self.settings.years {
            let Some(analysis) = self.history.get(year) else {
                continue;
            };

            let overall_prediction = analysis.overall.value(f64::from(overall_rank));
            let positional_prediction =
                match (analysis.positions.get(player.position()), player.position_rank.value()) {
                    (Some(curve), Some(rank)) => curve.value(f64::from(rank)),
                    _ => overall_prediction,
                };

            total += overall_weight * overall_prediction + position_weight * positional_prediction;
            seasons += 1;
        }

        if seasons == 0 {
            return FLOOR_PRICE;
        }

        let average = total / seasons as f64;
        // NaN.max(1.0) is 1.0; infinities saturate
        average.ceil().max(f64::from(FLOOR_PRICE)) as u32
    }
}
