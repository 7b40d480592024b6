//! Roster slots and their canonical lineup order

use crate::error::BoardError;
use player_registry::lineup::{BENCH, DST, FLEX, IR, K, QB, RB, RB_WR, SUPER_FLEX, TE, WR, WR_TE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Starting lineup positions in display order
const STARTER_ORDER: [&str; 10] = [QB, RB, WR, TE, FLEX, SUPER_FLEX, RB_WR, WR_TE, K, DST];

/// One line of the roster, e.g. the second RB slot is `RB-1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RosterSlot {
    pub position: String,
    pub index: u32,
}

impl RosterSlot {
    pub fn new(position: impl Into<String>, index: u32) -> Self {
        Self { position: position.into(), index }
    }

    /// Serialized form used as the key of selections and adjustments
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RosterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.position, self.index)
    }
}

impl FromStr for RosterSlot {
    type Err = BoardError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let (position, index) =
            key.rsplit_once('-').ok_or_else(|| BoardError::InvalidSlotKey(key.to_string()))?;
        if position.is_empty() {
            return Err(BoardError::InvalidSlotKey(key.to_string()));
        }
        let index = index.parse().map_err(|_| BoardError::InvalidSlotKey(key.to_string()))?;
        Ok(Self::new(position, index))
    }
}

/// Sort key of a lineup position: starters, then unknown positions, then Bench, then IR
fn position_order(position: &str) -> usize {
    if let Some(order) = STARTER_ORDER.iter().position(|p| *p == position) {
        return order;
    }
    match position {
        BENCH => STARTER_ORDER.len() + 1,
        IR => STARTER_ORDER.len() + 2,
        _ => STARTER_ORDER.len(),
    }
}

/// Expand a roster configuration (position -> count) into ordered slots
pub fn compute_roster_slots(roster_positions: &BTreeMap<String, u32>) -> Vec<RosterSlot> {
    let mut slots: Vec<RosterSlot> = roster_positions
        .iter()
        .flat_map(|(position, count)| {
            (0..*count).map(move |index| RosterSlot::new(position.clone(), index))
        })
        .collect();

    // Stable sort keeps unknown positions alphabetical and indices ascending
    slots.sort_by_key(|slot| position_order(&slot.position));
    slots
}
