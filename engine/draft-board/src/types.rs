use crate::slots::RosterSlot;
use player_registry::{DisplayRank, Player, PlayerId, RankedPlayer};
use serde::{Deserialize, Serialize};

/// A ranked player with the active predictor's price attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedPlayer {
    pub ranked: RankedPlayer,
    pub estimated_cost: u32,
}

impl PricedPlayer {
    pub fn id(&self) -> &PlayerId {
        self.ranked.id()
    }

    pub fn player(&self) -> &Player {
        &self.ranked.player
    }

    pub fn position(&self) -> &str {
        self.ranked.position()
    }

    /// 1-based overall rank for display
    pub fn display_overall_rank(&self) -> DisplayRank {
        self.ranked.overall_rank.display()
    }

    pub fn display_position_rank(&self) -> DisplayRank {
        self.ranked.position_rank.display()
    }
}

/// One roster line as shown on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub slot: RosterSlot,
    pub player: Option<Player>,

    /// Predicted price of the occupant; `None` for an open slot
    pub estimated_cost: Option<u32>,

    /// Accumulated manual adjustment for this slot
    pub adjustment: i64,

    /// What this line contributes to the amount spent
    pub cost: i64,
}

/// Readiness of the board's asynchronous inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}
