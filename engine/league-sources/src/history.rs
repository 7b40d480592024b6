//! Joining raw draft picks with player identity to build price history

use crate::error::Result;
use crate::source::LeagueSource;
use crate::types::DraftPick;
use futures::future::try_join_all;
use player_registry::{Player, PlayerId};
use price_engine::HistoricalPick;
use std::collections::HashMap;
use tracing::{debug, info};

/// Attach a position to every pick.
///
/// The player pool decides the position; the position reported with the pick
/// is the fallback for players who have left the pool. Picks with neither are
/// dropped.
pub fn join_draft_picks(picks: &[DraftPick], players: &[Player]) -> Vec<HistoricalPick> {
    let positions: HashMap<&PlayerId, &str> =
        players.iter().map(|player| (&player.id, player.default_position.as_str())).collect();

    let mut dropped = 0usize;
    let joined: Vec<HistoricalPick> = picks
        .iter()
        .filter_map(|pick| {
            let position = positions
                .get(&pick.player_id)
                .map(|position| position.to_string())
                .or_else(|| pick.position.clone());

            match position {
                Some(position) => Some(HistoricalPick {
                    player_id: pick.player_id.clone(),
                    position,
                    price: pick.price,
                    overall_pick_number: pick.overall_pick_number,
                }),
                None => {
                    dropped += 1;
                    None
                }
            }
        })
        .collect();

    if dropped > 0 {
        debug!("Dropped {} picks with no known position", dropped);
    }
    joined
}

/// Fetch and join the auction drafts of `seasons` concurrently.
///
/// Seasons without an auction draft map to an empty pick list.
pub async fn fetch_draft_history(
    source: &dyn LeagueSource,
    seasons: &[i32],
) -> Result<HashMap<i32, Vec<HistoricalPick>>> {
    let fetches = seasons.iter().map(|&season| async move {
        let (picks, players) =
            tokio::try_join!(source.fetch_draft(season), source.fetch_players(season))?;
        Ok::<_, crate::error::SourceError>((season, join_draft_picks(&picks, &players)))
    });

    let history: HashMap<i32, Vec<HistoricalPick>> =
        try_join_all(fetches).await?.into_iter().collect();

    info!(
        "Fetched {} draft history seasons from {} league {}",
        history.len(),
        source.platform(),
        source.league_id()
    );
    Ok(history)
}
