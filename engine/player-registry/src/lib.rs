//! Player Registry - player pools and ranking sources for auction drafts
//!
//! This crate holds the player pool supplied by a league platform, the ranking
//! sources a user can switch between, and the ranker that merges the two into
//! `RankedPlayer` records for pricing.

pub mod lineup;
pub mod ranker;
pub mod rankings;
pub mod registry;
pub mod types;

pub use ranker::PlayerRanker;
pub use rankings::parse_positional_rank;
pub use registry::PlayerRegistry;
pub use types::{
    AdpRow, DisplayRank, Player, PlayerId, Rank, RankedPlayer, RankingError, RankingSource,
    Rankings, Result,
};
