//! Search settings for the candidate player list

use player_registry::lineup::PLAYER_POSITIONS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_PLAYER_COUNT: usize = 300;

/// Filters applied to the displayed player pool; never changes ranks or prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSettings {
    /// Default positions to include
    pub positions: BTreeSet<String>,

    /// Inclusive price range
    pub min_price: u32,
    pub max_price: u32,

    /// Maximum number of players listed
    pub player_count: usize,

    /// Hide players already rostered or priced above the remaining budget
    pub show_only_available: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            positions: PLAYER_POSITIONS.iter().map(|p| p.to_string()).collect(),
            min_price: 0,
            max_price: u32::MAX,
            player_count: DEFAULT_PLAYER_COUNT,
            show_only_available: true,
        }
    }
}

impl SearchSettings {
    /// Default settings with the price range capped at the league's budget
    pub fn for_budget(auction_budget: u32) -> Self {
        Self { max_price: auction_budget, ..Self::default() }
    }

    pub fn includes_position(&self, position: &str) -> bool {
        self.positions.contains(position)
    }

    pub fn price_in_range(&self, price: u32) -> bool {
        (self.min_price..=self.max_price).contains(&price)
    }
}
