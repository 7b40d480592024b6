//! Draft Planner Service Library
//!
//! Configuration, logging and the service that turns a league's platform data
//! and auction history into draft sessions for the `draft-planner` command.

use anyhow::{Context, Result};
use std::path::Path;

pub mod config;
pub mod logging;
pub mod service;

pub use config::PlannerConfig;
pub use logging::initialize_logging_with_config;
pub use service::{find_player, PlannerService, PlannerSession, ADP_RANKING, PLATFORM_RANKING};

/// Load configuration from an optional file and environment variables
pub fn load_configuration(path: Option<&Path>) -> Result<PlannerConfig> {
    config::load_config(path).context("Failed to load planner configuration")
}
