use crate::types::{Player, PlayerId, RankingError, Result};
use std::collections::HashMap;
use tracing::{info, warn};

/// Player Registry - the base player pool for one league season
///
/// Keeps the platform's order (used for platform-native rankings) and an
/// id index for lookups from roster selections and draft picks.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    /// Players in platform order
    players: Vec<Player>,

    /// Map from player id to index in `players`
    index_by_id: HashMap<PlayerId, usize>,
}

impl PlayerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a platform player list
    pub fn from_players(players: Vec<Player>) -> Self {
        let mut registry = Self::new();
        registry.load_players(players);
        registry
    }

    /// Replace the pool. Later duplicates of an id are dropped.
    pub fn load_players(&mut self, players: Vec<Player>) {
        self.players.clear();
        self.index_by_id.clear();

        for player in players {
            if self.index_by_id.contains_key(&player.id) {
                warn!("Duplicate player id {} ({}), keeping first entry", player.id, player.full_name);
                continue;
            }
            self.index_by_id.insert(player.id.clone(), self.players.len());
            self.players.push(player);
        }

        info!("Loaded {} players into registry", self.players.len());
    }

    /// Get a player by id
    pub fn get(&self, id: &PlayerId) -> Result<&Player> {
        self.index_by_id
            .get(id)
            .map(|&index| &self.players[index])
            .ok_or_else(|| RankingError::PlayerNotFound(id.clone()))
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.index_by_id.contains_key(id)
    }

    /// All players in platform order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Search for players by partial name match
    pub fn search_players(&self, query: &str) -> Vec<&Player> {
        let query_lower = query.to_lowercase();
        self.players
            .iter()
            .filter(|player| player.full_name.to_lowercase().contains(&query_lower))
            .collect()
    }
}
