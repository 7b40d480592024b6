//! ESPN fantasy football API integration

use crate::config::{EspnCredentials, SourceConfig};
use crate::error::{Result, SourceError};
use crate::source::{http_client, LeagueSource};
use crate::types::{DraftPick, League, LeagueTeam, Platform};
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use player_registry::lineup::{
    eligible_lineup_positions, BENCH, DST, FLEX, IR, K, PLAYER_POSITIONS, QB, RB, RB_WR,
    SUPER_FLEX, TE, WR, WR_TE,
};
use player_registry::{Player, PlayerId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

pub const DEFAULT_AUCTION_BUDGET: u32 = 200;

/// Seasons before this one are only served by the `leagueHistory` endpoint
const FIRST_SEASONS_ENDPOINT_YEAR: i32 = 2018;

/// Upper bound on players requested from `kona_player_info`
const PLAYER_LIMIT: u32 = 1500;

/// ESPN lineup slot id -> lineup position
fn slot_position(slot_id: u32) -> Option<&'static str> {
    match slot_id {
        0 => Some(QB),
        2 => Some(RB),
        3 => Some(RB_WR),
        4 => Some(WR),
        5 => Some(WR_TE),
        6 => Some(TE),
        7 => Some(SUPER_FLEX),
        16 => Some(DST),
        17 => Some(K),
        20 => Some(BENCH),
        21 => Some(IR),
        23 => Some(FLEX),
        _ => None,
    }
}

/// ESPN default position id -> player position
fn default_position(position_id: u32) -> Option<&'static str> {
    match position_id {
        1 => Some(QB),
        2 => Some(RB),
        3 => Some(WR),
        4 => Some(TE),
        5 => Some(K),
        16 => Some(DST),
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnLeague {
    id: i64,
    season_id: i32,
    #[serde(default)]
    settings: EspnSettings,
    #[serde(default)]
    status: EspnStatus,
    #[serde(default)]
    draft_detail: EspnDraftDetail,
    #[serde(default)]
    teams: Vec<EspnTeam>,
    #[serde(default)]
    members: Vec<EspnMember>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnSettings {
    #[serde(default)]
    name: String,
    #[serde(default)]
    draft_settings: EspnDraftSettings,
    #[serde(default)]
    roster_settings: EspnRosterSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnDraftSettings {
    #[serde(rename = "type")]
    draft_type: Option<String>,
    auction_budget: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnRosterSettings {
    /// Slot id (as a string key) -> count
    #[serde(default)]
    lineup_slot_counts: HashMap<String, u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnStatus {
    #[serde(default)]
    previous_seasons: Vec<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct EspnDraftDetail {
    #[serde(default)]
    picks: Vec<EspnPick>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnPick {
    player_id: i64,
    overall_pick_number: u32,
    #[serde(default)]
    bid_amount: u32,
    team_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnTeam {
    id: i64,
    name: Option<String>,
    location: Option<String>,
    nickname: Option<String>,
    primary_owner: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnMember {
    id: String,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EspnPlayersResponse {
    #[serde(default)]
    players: Vec<EspnPlayerEntry>,
}

#[derive(Debug, Deserialize)]
struct EspnPlayerEntry {
    player: EspnPlayer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnPlayer {
    id: i64,
    full_name: String,
    default_position_id: u32,
    #[serde(default)]
    eligible_slots: Vec<u32>,
    #[serde(default)]
    draft_ranks_by_rank_type: HashMap<String, EspnDraftRank>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EspnDraftRank {
    auction_value: Option<u32>,
}

/// ESPN league source
#[derive(Debug)]
pub struct EspnSource {
    league_id: String,
    api_base_url: String,
    credentials: Option<EspnCredentials>,
    client: reqwest::Client,
    season: Option<i32>,
}

impl EspnSource {
    pub fn new(league_id: impl Into<String>, config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            league_id: league_id.into(),
            api_base_url: config.espn_api_base_url.trim_end_matches('/').to_string(),
            credentials: config.espn_credentials.clone(),
            client: http_client(config)?,
            season: None,
        })
    }

    /// Pin the season treated as current instead of deriving it from the clock
    pub fn with_season(mut self, season: i32) -> Self {
        self.season = Some(season);
        self
    }

    fn league_path(&self, season: i32) -> (String, bool) {
        if season < FIRST_SEASONS_ENDPOINT_YEAR {
            (format!("/leagueHistory/{}?seasonId={}", self.league_id, season), true)
        } else {
            (format!("/seasons/{}/segments/0/leagues/{}", season, self.league_id), false)
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        views: &[&str],
        filter: Option<String>,
    ) -> Result<T> {
        let url = format!("{}{}", self.api_base_url, path);
        debug!("ESPN GET {} views={:?}", url, views);

        let query: Vec<(&str, &str)> = views.iter().map(|view| ("view", *view)).collect();
        let mut request = self.client.get(&url).query(&query);
        if let Some(credentials) = &self.credentials {
            request = request.header(
                reqwest::header::COOKIE,
                format!("espn_s2={}; SWID={}", credentials.espn_s2, credentials.swid),
            );
        }
        if let Some(filter) = filter {
            request = request.header("X-Fantasy-Filter", filter);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = if status == reqwest::StatusCode::UNAUTHORIZED {
                format!("GET {path} failed: {status} (private league; set ESPN_S2 and ESPN_SWID)")
            } else {
                format!("GET {path} failed: {status}")
            };
            return Err(SourceError::api(Platform::Espn, message));
        }

        Ok(response.json().await?)
    }

    async fn fetch_espn_league(&self, season: i32, views: &[&str]) -> Result<EspnLeague> {
        let (path, is_history) = self.league_path(season);
        if is_history {
            let seasons: Vec<EspnLeague> = self.get_json(&path, views, None).await?;
            seasons.into_iter().find(|league| league.season_id == season).ok_or_else(|| {
                SourceError::SeasonNotFound { league_id: self.league_id.clone(), season }
            })
        } else {
            self.get_json(&path, views, None).await
        }
    }
}

#[async_trait]
impl LeagueSource for EspnSource {
    fn platform(&self) -> Platform {
        Platform::Espn
    }

    fn league_id(&self) -> &str {
        &self.league_id
    }

    async fn fetch_league(&self) -> Result<League> {
        let views = ["mSettings"];
        let league = match self.season {
            Some(season) => self.fetch_espn_league(season, &views).await?,
            None => {
                // Leagues renew late; fall back to last season until they do
                let year = Utc::now().year();
                match self.fetch_espn_league(year, &views).await {
                    Ok(league) => league,
                    Err(SourceError::Api { .. }) => {
                        info!(
                            "ESPN league {} not renewed for {}, using {}",
                            self.league_id,
                            year,
                            year - 1
                        );
                        self.fetch_espn_league(year - 1, &views).await?
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        let mut previous_seasons = league.status.previous_seasons.clone();
        previous_seasons.sort_unstable_by(|a, b| b.cmp(a));

        Ok(League {
            id: league.id.to_string(),
            platform: Platform::Espn,
            name: league.settings.name.clone(),
            season: league.season_id,
            auction_budget: league
                .settings
                .draft_settings
                .auction_budget
                .unwrap_or(DEFAULT_AUCTION_BUDGET),
            roster_positions: to_roster_positions(&league.settings.roster_settings),
            previous_seasons,
        })
    }

    async fn fetch_draft(&self, season: i32) -> Result<Vec<DraftPick>> {
        let league = self.fetch_espn_league(season, &["mSettings", "mDraftDetail"]).await?;

        if league.settings.draft_settings.draft_type.as_deref() != Some("AUCTION") {
            info!("ESPN league {} had no auction draft in {}", self.league_id, season);
            return Ok(Vec::new());
        }

        let mut picks: Vec<DraftPick> =
            league.draft_detail.picks.into_iter().map(to_draft_pick).collect();
        picks.sort_by_key(|pick| pick.overall_pick_number);
        Ok(picks)
    }

    async fn fetch_players(&self, season: i32) -> Result<Vec<Player>> {
        let (path, _) = self.league_path(season.max(FIRST_SEASONS_ENDPOINT_YEAR));
        let filter = serde_json::json!({
            "players": {
                "limit": PLAYER_LIMIT,
                "sortDraftRanks": {"sortPriority": 100, "sortAsc": true, "value": "STANDARD"}
            }
        });

        let response: EspnPlayersResponse =
            self.get_json(&path, &["kona_player_info"], Some(filter.to_string())).await?;
        let players: Vec<Player> =
            response.players.into_iter().filter_map(|entry| to_player(entry.player)).collect();

        info!("Loaded {} draftable players from ESPN for {}", players.len(), season);
        Ok(players)
    }

    async fn fetch_league_teams(&self, season: i32) -> Result<Vec<LeagueTeam>> {
        let league = self.fetch_espn_league(season, &["mTeam"]).await?;
        Ok(to_league_teams(league.teams, league.members))
    }
}

fn to_roster_positions(settings: &EspnRosterSettings) -> BTreeMap<String, u32> {
    let mut roster = BTreeMap::new();
    for (slot_id, count) in &settings.lineup_slot_counts {
        if *count == 0 {
            continue;
        }
        let position = slot_id.parse().ok().and_then(slot_position);
        match position {
            Some(position) => *roster.entry(position.to_string()).or_insert(0) += count,
            None => debug!("Ignoring unsupported ESPN lineup slot {}", slot_id),
        }
    }
    roster
}

fn to_draft_pick(pick: EspnPick) -> DraftPick {
    DraftPick {
        player_id: PlayerId::new(pick.player_id.to_string()),
        overall_pick_number: pick.overall_pick_number,
        price: pick.bid_amount,
        team_id: pick.team_id.map(|id| id.to_string()),
        position: None,
    }
}

fn to_player(player: EspnPlayer) -> Option<Player> {
    let position = default_position(player.default_position_id)?;

    let mut natural = vec![position];
    for slot in player.eligible_slots.iter().filter_map(|slot| slot_position(*slot)) {
        if PLAYER_POSITIONS.contains(&slot) && !natural.contains(&slot) {
            natural.push(slot);
        }
    }

    let platform_price = player
        .draft_ranks_by_rank_type
        .get("STANDARD")
        .and_then(|rank| rank.auction_value)
        .filter(|value| *value > 0);

    Some(Player {
        id: PlayerId::new(player.id.to_string()),
        full_name: player.full_name,
        default_position: position.to_string(),
        eligible_positions: eligible_lineup_positions(&natural),
        platform_price,
        team: None,
    })
}

fn to_league_teams(teams: Vec<EspnTeam>, members: Vec<EspnMember>) -> Vec<LeagueTeam> {
    let members: HashMap<String, Option<String>> =
        members.into_iter().map(|member| (member.id, member.display_name)).collect();

    teams
        .into_iter()
        .map(|team| {
            let name = team
                .name
                .filter(|name| !name.trim().is_empty())
                .or_else(|| match (team.location, team.nickname) {
                    (Some(location), Some(nickname)) => Some(format!("{location} {nickname}")),
                    (location, nickname) => location.or(nickname),
                })
                .unwrap_or_else(|| format!("Team {}", team.id));
            let owner =
                team.primary_owner.as_ref().and_then(|id| members.get(id)).cloned().flatten();
            LeagueTeam { id: team.id.to_string(), name, owner }
        })
        .collect()
}
