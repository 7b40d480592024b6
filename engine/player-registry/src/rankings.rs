//! Building `Rankings` from platform order and imported ADP rows

use crate::types::{AdpRow, Player, RankingError, Rankings, Result};
use std::collections::HashMap;

impl Rankings {
    /// Platform-native ranking: the order the platform lists its player pool in.
    ///
    /// Overall rank is the index in `ordered`; positional rank is the index
    /// among players sharing the same default position.
    pub fn from_order(ordered: &[Player]) -> Self {
        let mut rankings = Rankings::default();
        let mut next_by_position: HashMap<&str, u32> = HashMap::new();

        for (index, player) in ordered.iter().enumerate() {
            rankings.overall.insert(player.id.clone(), index as u32);

            let next = next_by_position.entry(player.default_position.as_str()).or_insert(0);
            rankings
                .positional
                .entry(player.default_position.clone())
                .or_default()
                .insert(player.id.clone(), *next);
            *next += 1;
        }

        rankings
    }

    /// Ranking imported from a third-party ADP list.
    ///
    /// Input ranks are 1-based and converted to 0-based. A malformed positional
    /// rank aborts the whole import.
    pub fn from_adp_rows(rows: &[AdpRow]) -> Result<Self> {
        let mut rankings = Rankings::default();

        for row in rows {
            if row.overall == 0 {
                return Err(RankingError::InvalidOverallRank {
                    player_id: row.player_id.clone(),
                    rank: row.overall,
                });
            }
            let (position, rank) = parse_positional_rank(&row.positional)?;

            rankings.overall.insert(row.player_id.clone(), row.overall - 1);
            rankings.positional.entry(position).or_default().insert(row.player_id.clone(), rank);
        }

        tracing::debug!(
            "Imported ADP rankings for {} players across {} positions",
            rankings.overall.len(),
            rankings.positional.len()
        );
        Ok(rankings)
    }
}

/// Parse a positional rank such as `"WR12"` or `"D/ST3"` into `("WR", 11)`.
///
/// The trailing digits are a 1-based rank; everything before them is the position.
pub fn parse_positional_rank(value: &str) -> Result<(String, u32)> {
    let trimmed = value.trim();
    let split = trimmed.find(|c: char| c.is_ascii_digit()).unwrap_or(trimmed.len());
    let (position, digits) = trimmed.split_at(split);

    if position.is_empty() || digits.is_empty() {
        return Err(RankingError::InvalidPositionalRank(value.to_string()));
    }

    let rank: u32 =
        digits.parse().map_err(|_| RankingError::InvalidPositionalRank(value.to_string()))?;
    if rank == 0 {
        return Err(RankingError::InvalidPositionalRank(value.to_string()));
    }

    Ok((position.to_string(), rank - 1))
}
