//! Merging a player pool with a ranking source

use crate::types::{Player, RankedPlayer, Rankings};
use tracing::debug;

/// Merges players with overall and positional ranks from one `Rankings` source
pub struct PlayerRanker;

impl PlayerRanker {
    /// Rank every player against `rankings`.
    ///
    /// Players without an overall rank cannot be priced and are dropped.
    /// The result is ordered by overall rank.
    pub fn rank(players: &[Player], rankings: &Rankings) -> Vec<RankedPlayer> {
        let mut ranked: Vec<RankedPlayer> = players
            .iter()
            .filter_map(|player| {
                let overall_rank = rankings.overall_rank(&player.id);
                if !overall_rank.is_ranked() {
                    return None;
                }
                Some(RankedPlayer {
                    player: player.clone(),
                    overall_rank,
                    position_rank: rankings.position_rank(&player.default_position, &player.id),
                })
            })
            .collect();

        ranked.sort_by(|a, b| a.rank_order(b));

        debug!("Ranked {} of {} players", ranked.len(), players.len());
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlayerId, Rank};
    use std::collections::HashMap;

    fn player(id: &str, position: &str) -> Player {
        Player {
            id: PlayerId::from(id),
            full_name: format!("Player {id}"),
            default_position: position.to_string(),
            eligible_positions: vec![position.to_string()],
            platform_price: None,
            team: None,
        }
    }

    fn rankings() -> Rankings {
        let overall: HashMap<PlayerId, u32> = [
            (PlayerId::from("a"), 3),
            (PlayerId::from("b"), 0),
            (PlayerId::from("c"), 7),
        ]
        .into_iter()
        .collect();
        let rb: HashMap<PlayerId, u32> =
            [(PlayerId::from("a"), 1), (PlayerId::from("b"), 0)].into_iter().collect();
        Rankings { overall, positional: [("RB".to_string(), rb)].into_iter().collect() }
    }

    #[test]
    fn test_unranked_players_are_dropped() {
        let players = vec![player("a", "RB"), player("b", "RB"), player("z", "WR")];
        let ranked = PlayerRanker::rank(&players, &rankings());

        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|p| p.id().as_str() != "z"));
    }

    #[test]
    fn test_ranked_pool_is_ordered_by_overall_rank() {
        let players = vec![player("a", "RB"), player("c", "TE"), player("b", "RB")];
        let ranked = PlayerRanker::rank(&players, &rankings());

        let ids: Vec<&str> = ranked.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_missing_positional_rank_is_unranked() {
        let players = vec![player("c", "TE")];
        let ranked = PlayerRanker::rank(&players, &rankings());

        assert_eq!(ranked[0].overall_rank, Rank::Ranked(7));
        assert_eq!(ranked[0].position_rank, Rank::Unranked);
        assert_eq!(ranked[0].overall_rank.display().to_string(), "8");
        assert_eq!(ranked[0].position_rank.display().to_string(), "NR");
    }

    #[test]
    fn test_unranked_sorts_after_every_rank() {
        assert!(Rank::Unranked > Rank::Ranked(u32::MAX));
        assert!(Rank::Ranked(0) < Rank::Ranked(1));
    }
}
