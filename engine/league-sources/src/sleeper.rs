//! Sleeper API integration

use crate::cache::CatalogCache;
use crate::config::SourceConfig;
use crate::error::{Result, SourceError};
use crate::source::{http_client, LeagueSource};
use crate::types::{DraftPick, League, LeagueTeam, Platform};
use async_trait::async_trait;
use player_registry::lineup::{
    eligible_lineup_positions, BENCH, DST, PLAYER_POSITIONS, RB_WR, SUPER_FLEX, WR_TE,
};
use player_registry::{Player, PlayerId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Budget Sleeper assigns to auction drafts unless the commissioner changes it
pub const DEFAULT_AUCTION_BUDGET: u32 = 200;

const PLAYER_CATALOG_KEY: &str = "sleeper:players:nfl";

/// Hard stop on `previous_league_id` chains
const MAX_HISTORY_DEPTH: usize = 20;

/// Sleeper league response
#[derive(Debug, Deserialize)]
struct SleeperLeague {
    league_id: String,
    name: String,
    season: String,
    #[serde(default)]
    roster_positions: Vec<String>,
    previous_league_id: Option<String>,
    draft_id: Option<String>,
}

/// Sleeper draft response
#[derive(Debug, Deserialize)]
struct SleeperDraft {
    draft_id: String,
    #[serde(rename = "type")]
    draft_type: String,
    #[serde(default)]
    settings: SleeperDraftSettings,
}

#[derive(Debug, Default, Deserialize)]
struct SleeperDraftSettings {
    budget: Option<u32>,
}

/// Sleeper draft pick response
#[derive(Debug, Deserialize)]
struct SleeperPick {
    player_id: String,
    pick_no: u32,
    roster_id: Option<u32>,
    #[serde(default)]
    metadata: SleeperPickMetadata,
}

/// Pick metadata; Sleeper sends every value as a string
#[derive(Debug, Default, Deserialize)]
struct SleeperPickMetadata {
    amount: Option<String>,
    position: Option<String>,
}

/// Entry of the `/players/nfl` catalog
#[derive(Debug, Clone, Deserialize)]
struct SleeperPlayer {
    first_name: Option<String>,
    last_name: Option<String>,
    full_name: Option<String>,
    position: Option<String>,
    fantasy_positions: Option<Vec<String>>,
    team: Option<String>,
    search_rank: Option<u32>,
    #[serde(default)]
    active: bool,
}

#[derive(Debug, Deserialize)]
struct SleeperUser {
    user_id: String,
    display_name: String,
    #[serde(default)]
    metadata: Option<SleeperUserMetadata>,
}

#[derive(Debug, Deserialize)]
struct SleeperUserMetadata {
    team_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SleeperRoster {
    roster_id: u32,
    owner_id: Option<String>,
}

/// Sleeper league source
#[derive(Debug)]
pub struct SleeperSource {
    league_id: String,
    api_base_url: String,
    client: reqwest::Client,
    players: CatalogCache<Arc<Vec<Player>>>,

    /// season -> league id, following `previous_league_id`
    seasons: OnceCell<BTreeMap<i32, String>>,
}

impl SleeperSource {
    pub fn new(league_id: impl Into<String>, config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            league_id: league_id.into(),
            api_base_url: config.sleeper_api_base_url.trim_end_matches('/').to_string(),
            client: http_client(config)?,
            players: CatalogCache::new(config.player_cache_ttl()),
            seasons: OnceCell::new(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.api_base_url, path);
        debug!("Sleeper GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::api(
                Platform::Sleeper,
                format!("GET {path} failed: {status} - {body}"),
            ));
        }

        Ok(response.json().await?)
    }

    async fn fetch_sleeper_league(&self, league_id: &str) -> Result<SleeperLeague> {
        // Sleeper answers unknown league ids with `null`
        let league: Option<SleeperLeague> = self.get_json(&format!("/league/{league_id}")).await?;
        league.ok_or_else(|| {
            SourceError::api(Platform::Sleeper, format!("league {league_id} not found"))
        })
    }

    /// Walk the `previous_league_id` chain once and remember every season
    async fn season_leagues(&self) -> Result<&BTreeMap<i32, String>> {
        self.seasons
            .get_or_try_init(|| async {
                let mut seasons = BTreeMap::new();
                let mut next = Some(self.league_id.clone());

                while let Some(league_id) = next.take() {
                    if seasons.len() >= MAX_HISTORY_DEPTH {
                        warn!("Stopping Sleeper league history walk at {} seasons", seasons.len());
                        break;
                    }
                    let league = self.fetch_sleeper_league(&league_id).await?;
                    let season = parse_season(&league.season)?;
                    if seasons.insert(season, league.league_id).is_some() {
                        break;
                    }
                    next = league.previous_league_id.filter(|id| !id.is_empty() && id != "0");
                }

                debug!("Resolved Sleeper league history: {:?}", seasons);
                Ok::<_, SourceError>(seasons)
            })
            .await
    }

    async fn league_for_season(&self, season: i32) -> Result<String> {
        self.season_leagues().await?.get(&season).cloned().ok_or_else(|| {
            SourceError::SeasonNotFound { league_id: self.league_id.clone(), season }
        })
    }

    async fn fetch_player_catalog(&self) -> Result<Arc<Vec<Player>>> {
        let raw: HashMap<String, SleeperPlayer> = self.get_json("/players/nfl").await?;
        let mut ranked: Vec<(Option<u32>, Player)> = raw
            .into_iter()
            .filter_map(|(id, player)| {
                let search_rank = player.search_rank;
                to_player(id, player).map(|player| (search_rank, player))
            })
            .collect();

        // Sleeper's search rank is its native ordering; unranked entries go last
        ranked.sort_by(|(a, pa), (b, pb)| {
            a.unwrap_or(u32::MAX).cmp(&b.unwrap_or(u32::MAX)).then_with(|| pa.id.cmp(&pb.id))
        });

        info!("Loaded {} draftable players from Sleeper", ranked.len());
        Ok(Arc::new(ranked.into_iter().map(|(_, player)| player).collect()))
    }
}

#[async_trait]
impl LeagueSource for SleeperSource {
    fn platform(&self) -> Platform {
        Platform::Sleeper
    }

    fn league_id(&self) -> &str {
        &self.league_id
    }

    async fn fetch_league(&self) -> Result<League> {
        let league = self.fetch_sleeper_league(&self.league_id).await?;
        let season = parse_season(&league.season)?;

        let auction_budget = match &league.draft_id {
            Some(draft_id) => {
                let draft: SleeperDraft = self.get_json(&format!("/draft/{draft_id}")).await?;
                draft.settings.budget.unwrap_or(DEFAULT_AUCTION_BUDGET)
            }
            None => DEFAULT_AUCTION_BUDGET,
        };

        let previous_seasons =
            self.season_leagues().await?.keys().rev().copied().filter(|s| *s < season).collect();

        Ok(League {
            id: league.league_id,
            platform: Platform::Sleeper,
            name: league.name,
            season,
            auction_budget,
            roster_positions: to_roster_positions(&league.roster_positions),
            previous_seasons,
        })
    }

    async fn fetch_draft(&self, season: i32) -> Result<Vec<DraftPick>> {
        let league_id = self.league_for_season(season).await?;
        let drafts: Vec<SleeperDraft> = self.get_json(&format!("/league/{league_id}/drafts")).await?;

        let Some(draft) = drafts.iter().find(|d| d.draft_type == "auction") else {
            info!("Sleeper league {} has no auction draft in {}", league_id, season);
            return Ok(Vec::new());
        };

        let picks: Vec<SleeperPick> =
            self.get_json(&format!("/draft/{}/picks", draft.draft_id)).await?;
        let mut picks: Vec<DraftPick> = picks.into_iter().map(to_draft_pick).collect();
        picks.sort_by_key(|pick| pick.overall_pick_number);
        Ok(picks)
    }

    /// Sleeper only publishes the current catalog, so `season` is ignored
    async fn fetch_players(&self, _season: i32) -> Result<Vec<Player>> {
        let catalog = self
            .players
            .get_or_try_insert_with(PLAYER_CATALOG_KEY, || self.fetch_player_catalog())
            .await?;
        Ok(catalog.as_ref().clone())
    }

    async fn fetch_league_teams(&self, season: i32) -> Result<Vec<LeagueTeam>> {
        let league_id = self.league_for_season(season).await?;
        let users_path = format!("/league/{league_id}/users");
        let rosters_path = format!("/league/{league_id}/rosters");
        let (users, rosters) = tokio::try_join!(
            self.get_json::<Vec<SleeperUser>>(&users_path),
            self.get_json::<Vec<SleeperRoster>>(&rosters_path),
        )?;
        Ok(to_league_teams(users, rosters))
    }
}

fn parse_season(season: &str) -> Result<i32> {
    season
        .parse()
        .map_err(|_| SourceError::api(Platform::Sleeper, format!("invalid season '{season}'")))
}

/// Translate a Sleeper roster or player position into the shared vocabulary
fn map_position(position: &str) -> &str {
    match position {
        "BN" => BENCH,
        "SUPER_FLEX" => SUPER_FLEX,
        "REC_FLEX" => WR_TE,
        "WRRB_FLEX" => RB_WR,
        "DEF" => DST,
        other => other,
    }
}

fn to_roster_positions(positions: &[String]) -> BTreeMap<String, u32> {
    let mut roster = BTreeMap::new();
    for position in positions {
        *roster.entry(map_position(position).to_string()).or_insert(0) += 1;
    }
    roster
}

/// `None` for inactive players and positions that are never drafted (e.g., OL)
fn to_player(id: String, player: SleeperPlayer) -> Option<Player> {
    let position = map_position(player.position.as_deref()?).to_string();
    if !PLAYER_POSITIONS.contains(&position.as_str()) {
        return None;
    }
    let is_defense = position == DST;
    if !player.active && !is_defense {
        return None;
    }

    let mut natural: Vec<String> = player
        .fantasy_positions
        .unwrap_or_default()
        .iter()
        .map(|p| map_position(p).to_string())
        .filter(|p| PLAYER_POSITIONS.contains(&p.as_str()))
        .collect();
    if !natural.contains(&position) {
        natural.insert(0, position.clone());
    }

    let full_name = player.full_name.unwrap_or_else(|| {
        [player.first_name, player.last_name].into_iter().flatten().collect::<Vec<_>>().join(" ")
    });

    Some(Player {
        id: PlayerId::new(id),
        full_name,
        default_position: position,
        eligible_positions: eligible_lineup_positions(&natural),
        platform_price: None,
        team: player.team,
    })
}

fn to_draft_pick(pick: SleeperPick) -> DraftPick {
    let price = pick.metadata.amount.as_deref().and_then(|a| a.parse().ok()).unwrap_or(0);
    DraftPick {
        player_id: PlayerId::new(pick.player_id),
        overall_pick_number: pick.pick_no,
        price,
        team_id: pick.roster_id.map(|id| id.to_string()),
        position: pick.metadata.position.map(|p| map_position(&p).to_string()),
    }
}

fn to_league_teams(users: Vec<SleeperUser>, rosters: Vec<SleeperRoster>) -> Vec<LeagueTeam> {
    let users: HashMap<String, SleeperUser> =
        users.into_iter().map(|user| (user.user_id.clone(), user)).collect();

    rosters
        .into_iter()
        .map(|roster| {
            let user = roster.owner_id.as_ref().and_then(|id| users.get(id));
            let owner = user.map(|u| u.display_name.clone());
            let name = user
                .and_then(|u| u.metadata.as_ref())
                .and_then(|m| m.team_name.clone())
                .filter(|name| !name.is_empty())
                .or_else(|| owner.clone())
                .unwrap_or_else(|| format!("Team {}", roster.roster_id));
            LeagueTeam { id: roster.roster_id.to_string(), name, owner }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sleeper_player(value: serde_json::Value) -> SleeperPlayer {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_roster_positions_use_shared_names() {
        let positions: Vec<String> =
            ["QB", "RB", "RB", "WR", "FLEX", "SUPER_FLEX", "REC_FLEX", "DEF", "BN", "BN", "IR"]
                .into_iter()
                .map(String::from)
                .collect();

        let roster = to_roster_positions(&positions);
        assert_eq!(roster.get("RB"), Some(&2));
        assert_eq!(roster.get("OP"), Some(&1));
        assert_eq!(roster.get("WR/TE"), Some(&1));
        assert_eq!(roster.get("D/ST"), Some(&1));
        assert_eq!(roster.get("Bench"), Some(&2));
        assert_eq!(roster.get("IR"), Some(&1));
        assert!(!roster.contains_key("BN"));
    }

    #[test]
    fn test_to_player() {
        let player = to_player(
            "4034".to_string(),
            sleeper_player(json!({
                "first_name": "Christian",
                "last_name": "McCaffrey",
                "full_name": "Christian McCaffrey",
                "position": "RB",
                "fantasy_positions": ["RB"],
                "team": "SF",
                "search_rank": 1,
                "active": true
            })),
        )
        .unwrap();

        assert_eq!(player.id, PlayerId::from("4034"));
        assert_eq!(player.full_name, "Christian McCaffrey");
        assert_eq!(player.default_position, "RB");
        assert!(player.is_eligible_for("FLEX"));
        assert!(player.is_eligible_for("Bench"));
        assert!(!player.is_eligible_for("QB"));
    }

    #[test]
    fn test_defense_entries_map_to_dst() {
        let player = to_player(
            "KC".to_string(),
            sleeper_player(json!({
                "first_name": "Kansas City",
                "last_name": "Chiefs",
                "position": "DEF",
                "fantasy_positions": ["DEF"],
                "team": "KC"
            })),
        )
        .unwrap();

        assert_eq!(player.full_name, "Kansas City Chiefs");
        assert_eq!(player.default_position, "D/ST");
        assert_eq!(player.eligible_positions, vec!["D/ST", "Bench", "IR"]);
    }

    #[test]
    fn test_undraftable_players_are_dropped() {
        let lineman = sleeper_player(json!({"position": "OT", "active": true}));
        assert!(to_player("1".to_string(), lineman).is_none());

        let retired = sleeper_player(json!({"position": "QB", "active": false}));
        assert!(to_player("2".to_string(), retired).is_none());

        let no_position = sleeper_player(json!({"active": true}));
        assert!(to_player("3".to_string(), no_position).is_none());
    }

    #[test]
    fn test_to_draft_pick() {
        let pick: SleeperPick = serde_json::from_value(json!({
            "player_id": "4034",
            "pick_no": 3,
            "roster_id": 7,
            "picked_by": "user",
            "metadata": {"amount": "61", "position": "RB"}
        }))
        .unwrap();

        let pick = to_draft_pick(pick);
        assert_eq!(pick.price, 61);
        assert_eq!(pick.overall_pick_number, 3);
        assert_eq!(pick.team_id.as_deref(), Some("7"));
        assert_eq!(pick.position.as_deref(), Some("RB"));
    }

    #[test]
    fn test_pick_without_amount_costs_nothing() {
        let pick: SleeperPick =
            serde_json::from_value(json!({"player_id": "KC", "pick_no": 12, "roster_id": null}))
                .unwrap();
        let pick = to_draft_pick(pick);
        assert_eq!(pick.price, 0);
        assert_eq!(pick.team_id, None);
    }

    #[test]
    fn test_league_teams_prefer_team_name() {
        let users: Vec<SleeperUser> = serde_json::from_value(json!([
            {"user_id": "u1", "display_name": "alice", "metadata": {"team_name": "Gridiron Gang"}},
            {"user_id": "u2", "display_name": "bob", "metadata": {}}
        ]))
        .unwrap();
        let rosters: Vec<SleeperRoster> = serde_json::from_value(json!([
            {"roster_id": 1, "owner_id": "u1"},
            {"roster_id": 2, "owner_id": "u2"},
            {"roster_id": 3, "owner_id": null}
        ]))
        .unwrap();

        let teams = to_league_teams(users, rosters);
        assert_eq!(teams[0].name, "Gridiron Gang");
        assert_eq!(teams[0].owner.as_deref(), Some("alice"));
        assert_eq!(teams[1].name, "bob");
        assert_eq!(teams[2].name, "Team 3");
        assert_eq!(teams[2].owner, None);
    }

    #[test]
    fn test_parse_season() {
        assert_eq!(parse_season("2024").unwrap(), 2024);
        assert!(parse_season("next year").is_err());
    }
}
