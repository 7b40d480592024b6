use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Platform player identifier (Sleeper ids are strings, ESPN ids are numeric)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// A draftable player as supplied by a league platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Display name (e.g., "Bijan Robinson")
    pub full_name: String,

    /// Primary position (e.g., "QB", "RB", "WR", "TE", "K", "D/ST")
    pub default_position: String,

    /// Lineup positions this player may fill, including flex and bench slots
    pub eligible_positions: Vec<String>,

    /// Auction value published by the platform, if any
    #[serde(default)]
    pub platform_price: Option<u32>,

    /// NFL team abbreviation
    #[serde(default)]
    pub team: Option<String>,
}

impl Player {
    /// Whether the player can be placed in a lineup slot of `position`
    pub fn is_eligible_for(&self, position: &str) -> bool {
        self.eligible_positions.iter().any(|p| p == position)
    }
}

/// 0-based ordinal rank, or the single canonical unranked value.
///
/// `Unranked` compares greater than every `Ranked` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ranked(u32),
    Unranked,
}

impl Rank {
    pub fn is_ranked(&self) -> bool {
        matches!(self, Rank::Ranked(_))
    }

    /// The 0-based value, if ranked
    pub fn value(&self) -> Option<u32> {
        match self {
            Rank::Ranked(rank) => Some(*rank),
            Rank::Unranked => None,
        }
    }

    /// Rank as shown to a user: 1-based, unranked stays unranked
    pub fn display(&self) -> DisplayRank {
        DisplayRank(*self)
    }
}

impl From<Option<u32>> for Rank {
    fn from(rank: Option<u32>) -> Self {
        rank.map_or(Rank::Unranked, Rank::Ranked)
    }
}

/// Formats a [`Rank`] 1-based ("1", "2", ...) or "NR" when unranked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRank(Rank);

impl DisplayRank {
    pub fn value(&self) -> Option<u32> {
        self.0.value().map(|rank| rank + 1)
    }
}

impl fmt::Display for DisplayRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(rank) => write!(f, "{rank}"),
            None => f.write_str("NR"),
        }
    }
}

/// Overall and per-position ordinal ranks from one ranking source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    /// player id -> 0-based overall rank (dense or sparse)
    pub overall: HashMap<PlayerId, u32>,

    /// position -> (player id -> 0-based positional rank)
    pub positional: HashMap<String, HashMap<PlayerId, u32>>,
}

impl Rankings {
    pub fn overall_rank(&self, id: &PlayerId) -> Rank {
        self.overall.get(id).copied().into()
    }

    pub fn position_rank(&self, position: &str, id: &PlayerId) -> Rank {
        self.positional.get(position).and_then(|ranks| ranks.get(id)).copied().into()
    }

    pub fn is_empty(&self) -> bool {
        self.overall.is_empty()
    }
}

/// A named ranking source the user can switch between
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSource {
    pub name: String,
    pub value: Rankings,
}

impl RankingSource {
    pub fn new(name: impl Into<String>, value: Rankings) -> Self {
        Self { name: name.into(), value }
    }
}

/// A player merged with the ranks of the active ranking source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub player: Player,
    pub overall_rank: Rank,
    pub position_rank: Rank,
}

impl RankedPlayer {
    pub fn id(&self) -> &PlayerId {
        &self.player.id
    }

    pub fn position(&self) -> &str {
        &self.player.default_position
    }

    /// Sort order for ranked pools: overall rank, then positional rank, then name
    pub fn rank_order(&self, other: &Self) -> Ordering {
        self.overall_rank
            .cmp(&other.overall_rank)
            .then(self.position_rank.cmp(&other.position_rank))
            .then_with(|| self.player.full_name.cmp(&other.player.full_name))
    }
}

/// One row of an imported third-party ADP ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdpRow {
    pub player_id: PlayerId,

    /// 1-based overall ADP rank
    pub overall: u32,

    /// Positional rank string (e.g., "WR12")
    pub positional: String,
}

/// Errors raised while building rankings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankingError {
    #[error("Invalid positional rank '{0}'")]
    InvalidPositionalRank(String),

    #[error("Invalid overall rank {rank} for player {player_id} (ranks are 1-based)")]
    InvalidOverallRank { player_id: PlayerId, rank: u32 },

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
}

pub type Result<T> = std::result::Result<T, RankingError>;
