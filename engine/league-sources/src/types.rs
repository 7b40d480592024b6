use player_registry::lineup::IR;
use player_registry::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Supported league platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Espn,
    Sleeper,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Espn => f.write_str("ESPN"),
            Platform::Sleeper => f.write_str("Sleeper"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "espn" => Ok(Platform::Espn),
            "sleeper" => Ok(Platform::Sleeper),
            other => Err(format!("unknown platform '{other}' (expected espn or sleeper)")),
        }
    }
}

/// League settings relevant to auction planning, for the current season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: String,
    pub platform: Platform,
    pub name: String,
    pub season: i32,

    /// Auction budget per team
    pub auction_budget: u32,

    /// lineup position -> slot count, including bench and IR
    pub roster_positions: BTreeMap<String, u32>,

    /// Earlier seasons of the same league, newest first
    pub previous_seasons: Vec<i32>,
}

impl League {
    /// Roster configuration without IR slots; IR is never drafted into
    pub fn draftable_roster(&self) -> BTreeMap<String, u32> {
        self.roster_positions
            .iter()
            .filter(|(position, count)| position.as_str() != IR && **count > 0)
            .map(|(position, count)| (position.clone(), *count))
            .collect()
    }
}

/// A pick from a completed draft, before it is joined with player identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPick {
    pub player_id: PlayerId,
    pub overall_pick_number: u32,

    /// Winning bid; 0 for keepers or non-auction drafts
    pub price: u32,

    pub team_id: Option<String>,

    /// Position reported with the pick, when the platform includes one
    pub position: Option<String>,
}

/// A team (fantasy roster) in a league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueTeam {
    pub id: String,
    pub name: String,
    pub owner: Option<String>,
}
