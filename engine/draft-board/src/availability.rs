//! Player availability and amount-spent calculations

use crate::settings::SearchSettings;
use crate::types::PricedPlayer;
use player_registry::Player;

/// Whether `player` belongs in the candidate list.
///
/// Position and price range always apply. The roster and budget checks apply
/// only with `show_only_available`.
pub fn player_available(
    player: &PricedPlayer,
    settings: &SearchSettings,
    selected_players: &[&Player],
    auction_budget: u32,
    budget_spent: i64,
) -> bool {
    if !settings.includes_position(player.position()) {
        return false;
    }
    if !settings.price_in_range(player.estimated_cost) {
        return false;
    }

    if settings.show_only_available {
        if selected_players.iter().any(|selected| selected.id == *player.id()) {
            return false;
        }
        let remaining = i64::from(auction_budget) - budget_spent;
        if i64::from(player.estimated_cost) > remaining {
            return false;
        }
    }

    true
}

/// Amount committed to the roster: predicted prices of rostered players plus
/// one dollar for every open slot, plus all manual adjustments
pub fn calculate_amount_spent(
    roster_spots: usize,
    selected_costs: &[u32],
    adjustments: impl IntoIterator<Item = i64>,
) -> i64 {
    let open_slots = roster_spots.saturating_sub(selected_costs.len()) as i64;
    let selected: i64 = selected_costs.iter().map(|cost| i64::from(*cost)).sum();
    let adjusted: i64 = adjustments.into_iter().sum();
    open_slots + selected + adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use player_registry::lineup::eligible_lineup_positions;
    use player_registry::{PlayerId, Rank, RankedPlayer};
    use std::collections::BTreeMap;

    fn priced(id: &str, position: &str, estimated_cost: u32) -> PricedPlayer {
        PricedPlayer {
            ranked: RankedPlayer {
                player: Player {
                    id: PlayerId::from(id),
                    full_name: id.to_string(),
                    default_position: position.to_string(),
                    eligible_positions: eligible_lineup_positions(&[position]),
                    platform_price: None,
                    team: None,
                },
                overall_rank: Rank::Ranked(0),
                position_rank: Rank::Ranked(0),
            },
            estimated_cost,
        }
    }

    fn settings(positions: &[&str], show_only_available: bool) -> SearchSettings {
        SearchSettings {
            positions: positions.iter().map(|p| p.to_string()).collect(),
            min_price: 0,
            max_price: 200,
            player_count: 100,
            show_only_available,
        }
    }

    #[test]
    fn test_excluded_position_is_unavailable() {
        let player = priced("te", "TE", 10);
        assert!(!player_available(&player, &settings(&["QB"], false), &[], 200, 0));
        assert!(!player_available(&player, &settings(&["QB"], true), &[], 200, 0));
    }

    #[test]
    fn test_affordable_unselected_player_is_available() {
        let player = priced("wr", "WR", 10);
        assert!(player_available(&player, &settings(&["WR"], true), &[], 100, 50));
    }

    #[test]
    fn test_selected_player_is_unavailable() {
        let player = priced("wr", "WR", 10);
        let rostered = player.player().clone();
        assert!(!player_available(&player, &settings(&["WR"], true), &[&rostered], 100, 50));

        // Without the flag rostered players stay listed
        assert!(player_available(&player, &settings(&["WR"], false), &[&rostered], 100, 50));
    }

    #[test]
    fn test_price_above_max_is_unavailable() {
        let player = priced("rb", "RB", 100);
        let mut search = settings(&["RB"], false);
        search.max_price = 15;
        assert!(!player_available(&player, &search, &[], 200, 0));

        search.max_price = 200;
        search.min_price = 101;
        assert!(!player_available(&player, &search, &[], 200, 0));
    }

    #[test]
    fn test_budget_check_is_gated_by_flag() {
        let player = priced("qb", "QB", 60);
        assert!(!player_available(&player, &settings(&["QB"], true), &[], 100, 50));
        assert!(player_available(&player, &settings(&["QB"], false), &[], 100, 50));

        // Exactly the remaining budget is affordable
        assert!(player_available(&player, &settings(&["QB"], true), &[], 110, 50));
    }

    #[test]
    fn test_amount_spent_for_empty_roster() {
        let adjustments: BTreeMap<String, i64> = BTreeMap::new();
        assert_eq!(calculate_amount_spent(15, &[], adjustments.values().copied()), 15);
    }

    #[test]
    fn test_amount_spent_with_selections_and_adjustments() {
        // 13 open slots at 1 + 45 + 30 + (5 - 3)
        assert_eq!(calculate_amount_spent(15, &[45, 30], [5, -3]), 90);
    }
}
