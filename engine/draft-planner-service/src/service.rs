//! Planner service: league inputs, draft board assembly and draft sessions

use anyhow::{anyhow, Context, Result};
use draft_board::{DraftBoard, DraftSession};
use league_sources::{
    create_source, fetch_draft_history, League, LeagueSource, LeagueTeam, Platform,
};
use persistence::{create_local_store_with_config, DraftStore};
use player_registry::{AdpRow, Player, PlayerId, PlayerRegistry, RankingSource, Rankings};
use price_engine::{DraftAnalyzer, DraftHistory, RegressionFitter};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::PlannerConfig;

/// Name of the ranking source built from the platform's own player order
pub const PLATFORM_RANKING: &str = "Platform";

/// Name of the ranking source loaded from the configured ADP file
pub const ADP_RANKING: &str = "ADP";

/// An open draft together with the league and player pool it was built from
pub struct PlannerSession {
    pub league: League,
    pub players: PlayerRegistry,
    pub session: DraftSession,
}

/// League source, draft store and analyzer for one league
pub struct PlannerService {
    config: PlannerConfig,
    source: Arc<dyn LeagueSource>,
    store: Arc<dyn DraftStore>,
    analyzer: DraftAnalyzer,
}

impl PlannerService {
    /// Connect to `league_id` on `platform` and open the local draft store
    pub async fn new(config: PlannerConfig, platform: Platform, league_id: &str) -> Result<Self> {
        info!("Initializing planner for {} league {}", platform, league_id);

        let source = create_source(platform, league_id, &config.sources)
            .context("Failed to create league source")?;

        let mut store = create_local_store_with_config(config.persistence.clone())
            .context("Failed to create draft store")?;
        store.initialize().await.context("Failed to initialize draft store")?;

        Ok(Self::with_components(config, source, Arc::new(store)))
    }

    /// Assemble a service from an existing source and store
    pub fn with_components(
        config: PlannerConfig,
        source: Arc<dyn LeagueSource>,
        store: Arc<dyn DraftStore>,
    ) -> Self {
        let analyzer = DraftAnalyzer::new(RegressionFitter::new(config.fitter.clone()));
        Self { config, source, store, analyzer }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn league_id(&self) -> &str {
        self.source.league_id()
    }

    pub async fn fetch_league(&self) -> Result<League> {
        self.source.fetch_league().await.with_context(|| {
            format!("Failed to fetch {} league {}", self.source.platform(), self.source.league_id())
        })
    }

    pub async fn fetch_teams(&self, league: &League) -> Result<Vec<LeagueTeam>> {
        self.source
            .fetch_league_teams(league.season)
            .await
            .with_context(|| format!("Failed to fetch teams for {}", league.name))
    }

    /// The most recent earlier seasons, newest first
    pub fn history_seasons(&self, league: &League) -> Vec<i32> {
        league.previous_seasons.iter().take(self.config.league.history_seasons).copied().collect()
    }

    /// Fetch the league's earlier auction drafts and fit their price curves
    pub async fn analyze_history(&self, league: &League) -> Result<DraftHistory> {
        let seasons = self.history_seasons(league);
        let picks = fetch_draft_history(self.source.as_ref(), &seasons)
            .await
            .context("Failed to fetch draft history")?;

        let history = self.analyzer.analyze_seasons(&picks);
        info!("Analysed {} of {} seasons for {}", history.len(), seasons.len(), league.name);
        Ok(history)
    }

    async fn load_adp_rankings(&self) -> Result<Option<Rankings>> {
        let Some(path) = &self.config.league.adp_file else {
            return Ok(None);
        };

        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read ADP file {:?}", path))?;
        let rows: Vec<AdpRow> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse ADP file {:?}", path))?;
        let rankings = Rankings::from_adp_rows(&rows).context("Invalid ADP rankings")?;

        info!("Loaded {} ADP rankings from {:?}", rows.len(), path);
        Ok(Some(rankings))
    }

    /// Build the draft board and open the named saved draft.
    ///
    /// Players and draft history load concurrently. A failed fetch leaves the
    /// board in its failed state rather than aborting; a malformed ADP file
    /// is an error.
    pub async fn open_session(&self, draft_name: &str) -> Result<PlannerSession> {
        let league = self.fetch_league().await?;
        let mut board = DraftBoard::new(&league.draftable_roster(), league.auction_budget);

        let (players, history, adp) = tokio::join!(
            self.source.fetch_players(league.season),
            self.analyze_history(&league),
            self.load_adp_rankings(),
        );
        let adp = adp?;

        let players = match players {
            Ok(players) => players,
            Err(e) => {
                board.fail(format!("Failed to fetch players: {e}"));
                Vec::new()
            }
        };

        let platform_rankings = Rankings::from_order(&players);
        let mut sources = vec![RankingSource::new(PLATFORM_RANKING, platform_rankings)];
        if let Some(rankings) = adp {
            sources.push(RankingSource::new(ADP_RANKING, rankings));
        }
        board.set_ranking_sources(sources)?;
        board.set_player_pool(players.clone());

        match history {
            Ok(history) => {
                if history.is_empty() {
                    warn!("No auction history for {}; every price will be the floor", league.name);
                }
                if let Err(e) = board.set_history(Arc::new(history)) {
                    board.fail(format!("Invalid estimation settings: {e}"));
                }
            }
            Err(e) => board.fail(format!("{e:#}")),
        }

        let session = DraftSession::open(
            board,
            Arc::clone(&self.store),
            self.source.league_id(),
            draft_name,
            &self.config.session,
        )
        .await
        .with_context(|| format!("Failed to open draft '{draft_name}'"))?;

        Ok(PlannerSession { league, players: PlayerRegistry::from_players(players), session })
    }

    /// Names of the drafts saved for this league
    pub async fn list_drafts(&self) -> Result<Vec<String>> {
        self.store.list(self.source.league_id()).await.context("Failed to list saved drafts")
    }
}

/// Find a player by id, else by unique (or exact) name match
pub fn find_player<'a>(players: &'a PlayerRegistry, query: &str) -> Result<&'a Player> {
    if let Ok(player) = players.get(&PlayerId::from(query)) {
        return Ok(player);
    }

    let matches = players.search_players(query);
    match matches.as_slice() {
        [] => Err(anyhow!("No player matches '{query}'")),
        [player] => Ok(*player),
        many => many
            .iter()
            .find(|player| player.full_name.eq_ignore_ascii_case(query))
            .copied()
            .ok_or_else(|| {
                let names: Vec<&str> =
                    many.iter().take(5).map(|player| player.full_name.as_str()).collect();
                anyhow!("'{query}' matches {} players: {}", many.len(), names.join(", "))
            }),
    }
}
