//! Platform-neutral league source capability

use crate::config::SourceConfig;
use crate::error::Result;
use crate::espn::EspnSource;
use crate::sleeper::SleeperSource;
use crate::types::{DraftPick, League, LeagueTeam, Platform};
use async_trait::async_trait;
use player_registry::Player;
use std::sync::Arc;

/// Read-only access to one league on one platform.
///
/// Every platform-specific code (slot ids, position ids, `BN`, `DEF`, ...)
/// is translated into the shared lineup vocabulary before it is returned.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    fn platform(&self) -> Platform;

    fn league_id(&self) -> &str;

    /// Current-season league settings and the list of earlier seasons
    async fn fetch_league(&self) -> Result<League>;

    /// Picks of the league's auction draft in `season`, in pick order.
    ///
    /// Empty when the season had no auction draft.
    async fn fetch_draft(&self, season: i32) -> Result<Vec<DraftPick>>;

    /// Draftable players for `season`, in the platform's native ranking order
    async fn fetch_players(&self, season: i32) -> Result<Vec<Player>>;

    async fn fetch_league_teams(&self, season: i32) -> Result<Vec<LeagueTeam>>;
}

/// Build the source for a league on `platform`
pub fn create_source(
    platform: Platform,
    league_id: impl Into<String>,
    config: &SourceConfig,
) -> Result<Arc<dyn LeagueSource>> {
    config.validate()?;
    let league_id = league_id.into();

    Ok(match platform {
        Platform::Sleeper => Arc::new(SleeperSource::new(league_id, config)?),
        Platform::Espn => Arc::new(EspnSource::new(league_id, config)?),
    })
}

pub(crate) fn http_client(config: &SourceConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(config.request_timeout())
        .user_agent(concat!("draft-planner/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
