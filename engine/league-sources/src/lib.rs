//! # League Sources
//!
//! Read-only adapters for the fantasy platforms a league can live on.
//!
//! Each platform implements [`LeagueSource`], which returns league settings,
//! completed auction drafts, the player pool and the league's teams in the
//! shared lineup vocabulary from `player_registry::lineup`. Nothing outside
//! this crate sees ESPN slot ids or Sleeper position codes.
//!
//! - **SleeperSource**: Sleeper public API; the ~5MB NFL player catalog is
//!   kept in a [`CatalogCache`] with a configurable TTL
//! - **EspnSource**: ESPN fantasy API; private leagues need the `espn_s2`
//!   and `SWID` cookies
//! - **fetch_draft_history**: concurrent fetch of past seasons, joined with
//!   player positions into `price_engine::HistoricalPick`

pub mod cache;
pub mod config;
pub mod error;
pub mod espn;
pub mod history;
pub mod sleeper;
pub mod source;
pub mod types;

pub use cache::CatalogCache;
pub use config::{EspnCredentials, SourceConfig};
pub use error::{Result, SourceError};
pub use espn::EspnSource;
pub use history::{fetch_draft_history, join_draft_picks};
pub use sleeper::SleeperSource;
pub use source::{create_source, LeagueSource};
pub use types::{DraftPick, League, LeagueTeam, Platform};
