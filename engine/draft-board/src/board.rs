//! Draft board: the live state of one mock auction draft
//!
//! Inputs (player pool, ranking sources, draft history) arrive asynchronously
//! and are pushed in through setters. Every setter recomputes the derived
//! state that depends on it, in dependency order:
//!
//! ```text
//! pool + active ranking source -> ranked players
//! history + estimation settings -> cost predictor
//! ranked players + predictor    -> priced players -> availability, budget
//! ```
//!
//! Read accessors fail with `NotReady` until every input has arrived and with
//! `LoadFailed` once a fetch has failed.

use crate::availability::{calculate_amount_spent, player_available};
use crate::error::{BoardError, Result};
use crate::saved::SavedDraft;
use crate::settings::SearchSettings;
use crate::slots::{compute_roster_slots, RosterSlot};
use crate::types::{LoadStatus, PricedPlayer, RosterEntry};
use player_registry::{Player, PlayerId, PlayerRanker, RankedPlayer, RankingSource, Rankings};
use price_engine::{CostPredictor, DraftHistory, EstimationSettings, FLOOR_PRICE};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Live roster and pricing state for one draft session
#[derive(Debug)]
pub struct DraftBoard {
    auction_budget: u32,
    slots: Vec<RosterSlot>,

    // Asynchronous inputs
    player_pool: Option<Vec<Player>>,
    ranking_sources: Option<Vec<RankingSource>>,
    active_source: usize,
    history: Option<Arc<DraftHistory>>,
    load_error: Option<String>,

    // User state
    estimation: EstimationSettings,
    search: SearchSettings,
    selections: BTreeMap<String, Player>,
    adjustments: BTreeMap<String, i64>,

    // Derived state
    ranked: Vec<RankedPlayer>,
    predictor: Option<CostPredictor>,
    priced: Vec<PricedPlayer>,
    priced_index: HashMap<PlayerId, usize>,
}

impl DraftBoard {
    /// Create a board for a roster configuration (IR already excluded)
    pub fn new(roster_positions: &BTreeMap<String, u32>, auction_budget: u32) -> Self {
        let slots = compute_roster_slots(roster_positions);
        info!(
            "Draft board created with {} roster slots and ${} budget",
            slots.len(),
            auction_budget
        );

        Self {
            auction_budget,
            slots,
            player_pool: None,
            ranking_sources: None,
            active_source: 0,
            history: None,
            load_error: None,
            estimation: EstimationSettings::default(),
            search: SearchSettings::for_budget(auction_budget),
            selections: BTreeMap::new(),
            adjustments: BTreeMap::new(),
            ranked: Vec::new(),
            predictor: None,
            priced: Vec::new(),
            priced_index: HashMap::new(),
        }
    }

    pub fn auction_budget(&self) -> u32 {
        self.auction_budget
    }

    /// Roster slots in canonical lineup order
    pub fn slots(&self) -> &[RosterSlot] {
        &self.slots
    }

    pub fn status(&self) -> LoadStatus {
        if let Some(error) = &self.load_error {
            return LoadStatus::Failed(error.clone());
        }
        if self.player_pool.is_some() && self.ranking_sources.is_some() && self.history.is_some() {
            LoadStatus::Ready
        } else {
            LoadStatus::Loading
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status() == LoadStatus::Ready
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.status() {
            LoadStatus::Ready => Ok(()),
            LoadStatus::Loading => Err(BoardError::NotReady),
            LoadStatus::Failed(error) => Err(BoardError::LoadFailed(error)),
        }
    }

    pub fn set_player_pool(&mut self, players: Vec<Player>) {
        debug!("Player pool set: {} players", players.len());
        self.player_pool = Some(players);
        self.recompute_ranked();
    }

    /// Replace the ranking sources; the first one becomes active
    pub fn set_ranking_sources(&mut self, sources: Vec<RankingSource>) -> Result<()> {
        if sources.is_empty() {
            return Err(BoardError::load_failed("at least one ranking source is required"));
        }
        debug!("Ranking sources set: {:?}", sources.iter().map(|s| &s.name).collect::<Vec<_>>());
        self.ranking_sources = Some(sources);
        self.active_source = 0;
        self.recompute_ranked();
        Ok(())
    }

    pub fn ranking_source_names(&self) -> Vec<&str> {
        self.ranking_sources
            .iter()
            .flatten()
            .map(|source| source.name.as_str())
            .collect()
    }

    pub fn active_ranking_source(&self) -> Option<&str> {
        self.ranking_sources
            .as_ref()
            .and_then(|sources| sources.get(self.active_source))
            .map(|source| source.name.as_str())
    }

    pub fn select_ranking_source(&mut self, name: &str) -> Result<()> {
        let index = self
            .ranking_sources
            .iter()
            .flatten()
            .position(|source| source.name == name)
            .ok_or_else(|| BoardError::UnknownRankingSource(name.to_string()))?;

        if index != self.active_source {
            info!("Switching ranking source to {}", name);
            self.active_source = index;
            self.recompute_ranked();
        }
        Ok(())
    }

    /// Install analysed draft history.
    ///
    /// Empty estimation years default to every analysed season; otherwise
    /// years without an analysis are dropped.
    pub fn set_history(&mut self, history: Arc<DraftHistory>) -> Result<()> {
        if self.estimation.years.is_empty() {
            self.estimation = EstimationSettings::for_history(&history, self.estimation.weight);
        } else {
            let dropped = self.estimation.retain_known_years(&history);
            if dropped > 0 {
                warn!("Dropped {} estimation years with no draft analysis", dropped);
            }
        }

        debug!("Draft history set: seasons {:?}", history.keys().collect::<Vec<_>>());
        self.history = Some(history);
        self.rebuild_predictor()
    }

    pub fn history(&self) -> Option<&Arc<DraftHistory>> {
        self.history.as_ref()
    }

    /// Record a failed fetch; the board stays failed from here on
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("Draft board load failed: {}", message);
        self.load_error = Some(message);
    }

    pub fn estimation_settings(&self) -> &EstimationSettings {
        &self.estimation
    }

    pub fn set_estimation_settings(&mut self, settings: EstimationSettings) -> Result<()> {
        settings.validate(self.history.as_deref())?;
        self.estimation = settings;
        self.rebuild_predictor()
    }

    pub fn search_settings(&self) -> &SearchSettings {
        &self.search
    }

    pub fn set_search_settings(&mut self, settings: SearchSettings) {
        self.search = settings;
    }

    fn active_rankings(&self) -> Option<&Rankings> {
        self.ranking_sources
            .as_ref()
            .and_then(|sources| sources.get(self.active_source))
            .map(|source| &source.value)
    }

    fn recompute_ranked(&mut self) {
        let ranked = match (&self.player_pool, self.active_rankings()) {
            (Some(pool), Some(rankings)) => PlayerRanker::rank(pool, rankings),
            _ => Vec::new(),
        };
        self.ranked = ranked;
        self.recompute_priced();
    }

    fn rebuild_predictor(&mut self) -> Result<()> {
        if let Some(history) = &self.history {
            let predictor = CostPredictor::new(self.estimation.clone(), Arc::clone(history))?;
            self.predictor = Some(predictor);
        }
        self.recompute_priced();
        Ok(())
    }

    fn recompute_priced(&mut self) {
        let Some(predictor) = &self.predictor else {
            self.priced.clear();
            self.priced_index.clear();
            return;
        };

        self.priced = self
            .ranked
            .iter()
            .map(|ranked| PricedPlayer {
                ranked: ranked.clone(),
                estimated_cost: predictor.predict(ranked),
            })
            .collect();
        self.priced_index =
            self.priced.iter().enumerate().map(|(i, p)| (p.id().clone(), i)).collect();
        debug!("Priced {} players", self.priced.len());
    }

    pub fn ranked_players(&self) -> Result<&[RankedPlayer]> {
        self.ensure_ready()?;
        Ok(&self.ranked)
    }

    /// Ranked players with estimated costs, in rank order
    pub fn priced_players(&self) -> Result<&[PricedPlayer]> {
        self.ensure_ready()?;
        Ok(&self.priced)
    }

    /// Estimated cost of any player, ranked or not
    fn estimated_cost(&self, player: &Player) -> u32 {
        if let Some(&index) = self.priced_index.get(&player.id) {
            return self.priced[index].estimated_cost;
        }

        // Rostered players can fall out of the active ranking source
        match (&self.predictor, self.active_rankings()) {
            (Some(predictor), Some(rankings)) => predictor.predict(&RankedPlayer {
                player: player.clone(),
                overall_rank: rankings.overall_rank(&player.id),
                position_rank: rankings.position_rank(&player.default_position, &player.id),
            }),
            _ => FLOOR_PRICE,
        }
    }

    pub fn selections(&self) -> &BTreeMap<String, Player> {
        &self.selections
    }

    pub fn adjustments(&self) -> &BTreeMap<String, i64> {
        &self.adjustments
    }

    pub fn occupant(&self, slot: &RosterSlot) -> Option<&Player> {
        self.selections.get(&slot.key())
    }

    /// Rostered players in slot order
    pub fn selected_players(&self) -> Vec<&Player> {
        self.slots.iter().filter_map(|slot| self.occupant(slot)).collect()
    }

    fn open_slots(&self) -> impl Iterator<Item = &RosterSlot> + '_ {
        self.slots.iter().filter(move |slot| !self.selections.contains_key(&slot.key()))
    }

    /// Predicted prices of rostered players, one dollar per open slot, plus adjustments
    pub fn budget_spent(&self) -> Result<i64> {
        self.ensure_ready()?;
        let costs: Vec<u32> =
            self.selected_players().into_iter().map(|p| self.estimated_cost(p)).collect();
        Ok(calculate_amount_spent(self.slots.len(), &costs, self.adjustments.values().copied()))
    }

    pub fn remaining_budget(&self) -> Result<i64> {
        Ok(i64::from(self.auction_budget) - self.budget_spent()?)
    }

    /// Highest bid that still leaves a dollar for every other open slot
    pub fn max_bid(&self) -> Result<i64> {
        let remaining = self.remaining_budget()?;
        if self.open_slots().next().is_none() {
            return Ok(0);
        }
        // The slot being bid on already has its dollar counted in budget_spent
        Ok((remaining + 1).max(0))
    }

    fn available_uncapped(&self) -> Result<Vec<&PricedPlayer>> {
        let spent = self.budget_spent()?;
        let selected = self.selected_players();
        Ok(self
            .priced
            .iter()
            .filter(|p| player_available(p, &self.search, &selected, self.auction_budget, spent))
            .collect())
    }

    /// Candidate players after search settings, capped at `player_count`
    pub fn available_players(&self) -> Result<Vec<&PricedPlayer>> {
        let mut available = self.available_uncapped()?;
        available.truncate(self.search.player_count);
        Ok(available)
    }

    /// Candidate players per included position, each list capped at `player_count`
    pub fn available_by_position(&self) -> Result<BTreeMap<String, Vec<&PricedPlayer>>> {
        let mut by_position: BTreeMap<String, Vec<&PricedPlayer>> =
            self.search.positions.iter().map(|p| (p.clone(), Vec::new())).collect();

        for player in self.available_uncapped()? {
            if let Some(players) = by_position.get_mut(player.position()) {
                if players.len() < self.search.player_count {
                    players.push(player);
                }
            }
        }
        Ok(by_position)
    }

    /// Every roster line with its occupant and cost; costs sum to `budget_spent`
    pub fn roster(&self) -> Result<Vec<RosterEntry>> {
        self.ensure_ready()?;
        Ok(self
            .slots
            .iter()
            .map(|slot| {
                let player = self.occupant(slot).cloned();
                let estimated_cost = player.as_ref().map(|p| self.estimated_cost(p));
                let adjustment = self.adjustments.get(&slot.key()).copied().unwrap_or(0);
                let cost = i64::from(estimated_cost.unwrap_or(FLOOR_PRICE)) + adjustment;
                RosterEntry { slot: slot.clone(), player, estimated_cost, adjustment, cost }
            })
            .collect())
    }

    fn ensure_slot(&self, slot: &RosterSlot) -> Result<()> {
        if self.slots.contains(slot) {
            Ok(())
        } else {
            Err(BoardError::UnknownSlot(slot.key()))
        }
    }

    /// Set or clear a slot; a new occupant drops the slot's adjustment
    fn assign(&mut self, slot: &RosterSlot, player: Option<Player>) {
        let key = slot.key();
        let previous = self.selections.get(&key).map(|p| p.id.clone());
        let next = player.as_ref().map(|p| p.id.clone());

        if previous != next && self.adjustments.remove(&key).is_some() {
            debug!("Cleared cost adjustment for {} after occupant change", key);
        }

        match player {
            Some(player) => {
                debug!("Assigned {} to {}", player.full_name, key);
                self.selections.insert(key, player);
            }
            None => {
                self.selections.remove(&key);
            }
        }
    }

    /// Put a clicked player on the roster.
    ///
    /// Tries the focused slot, then the first open slot of the player's
    /// default position, then the first open slot the player is eligible
    /// for. Returns the slot used, or `None` when nothing fits or the player
    /// is already rostered.
    pub fn on_player_click(
        &mut self,
        player_id: &PlayerId,
        focused: Option<&RosterSlot>,
    ) -> Result<Option<RosterSlot>> {
        self.ensure_ready()?;
        let player = self
            .player_pool
            .iter()
            .flatten()
            .find(|p| p.id == *player_id)
            .cloned()
            .ok_or_else(|| BoardError::PlayerNotFound(player_id.clone()))?;

        if self.selections.values().any(|p| p.id == player.id) {
            debug!("{} is already rostered", player.full_name);
            return Ok(None);
        }

        let target = focused
            .filter(|slot| self.slots.contains(slot) && player.is_eligible_for(&slot.position))
            .cloned()
            .or_else(|| {
                self.open_slots().find(|slot| slot.position == player.default_position).cloned()
            })
            .or_else(|| {
                self.open_slots().find(|slot| player.is_eligible_for(&slot.position)).cloned()
            });

        match target {
            Some(slot) => {
                self.assign(&slot, Some(player));
                Ok(Some(slot))
            }
            None => {
                debug!("No open slot for {}", player.full_name);
                Ok(None)
            }
        }
    }

    /// Directly set or clear one slot.
    ///
    /// A player already rostered elsewhere moves here, leaving the old slot
    /// empty.
    pub fn on_player_selected(&mut self, slot: &RosterSlot, player: Option<Player>) -> Result<()> {
        self.ensure_slot(slot)?;
        if let Some(player) = &player {
            let key = slot.key();
            let elsewhere = self
                .slots
                .iter()
                .find(|other| {
                    other.key() != key
                        && self.selections.get(&other.key()).is_some_and(|p| p.id == player.id)
                })
                .cloned();
            if let Some(previous) = elsewhere {
                debug!("Moving {} from {} to {}", player.full_name, previous, slot);
                self.assign(&previous, None);
            }
        }
        self.assign(slot, player);
        Ok(())
    }

    /// Add `delta` to the slot's accumulated adjustment
    pub fn on_cost_adjusted(&mut self, slot: &RosterSlot, delta: i64) -> Result<()> {
        self.ensure_slot(slot)?;
        *self.adjustments.entry(slot.key()).or_insert(0) += delta;
        Ok(())
    }

    /// Empty every slot and drop every adjustment
    pub fn reset_roster(&mut self) {
        self.selections.clear();
        self.adjustments.clear();
        info!("Roster reset");
    }

    /// Snapshot of the user state, with an entry for every slot
    pub fn to_saved(&self) -> SavedDraft {
        SavedDraft {
            roster_selections: self
                .slots
                .iter()
                .map(|slot| (slot.key(), self.occupant(slot).cloned()))
                .collect(),
            cost_adjustments: self.adjustments.clone(),
            estimation_settings: self.estimation.clone(),
            search_settings: self.search.clone(),
        }
    }

    /// Replace the user state with a saved draft.
    ///
    /// Entries for slots this league no longer has are dropped, as are
    /// estimation years without an analysis once history is loaded.
    pub fn restore(&mut self, saved: SavedDraft) -> Result<()> {
        let mut selections = BTreeMap::new();
        for (key, player) in saved.roster_selections {
            match self.known_slot_key(&key) {
                Some(key) => {
                    if let Some(player) = player {
                        selections.insert(key, player);
                    }
                }
                None => warn!("Ignoring saved selection for unknown slot {}", key),
            }
        }

        let mut adjustments = BTreeMap::new();
        for (key, delta) in saved.cost_adjustments {
            match self.known_slot_key(&key) {
                Some(key) => {
                    adjustments.insert(key, delta);
                }
                None => warn!("Ignoring saved adjustment for unknown slot {}", key),
            }
        }

        let mut estimation = saved.estimation_settings;
        if let Some(history) = &self.history {
            estimation.retain_known_years(history);
        }
        estimation.validate(self.history.as_deref())?;

        self.selections = selections;
        self.adjustments = adjustments;
        self.search = saved.search_settings;
        self.estimation = estimation;
        info!("Restored saved draft with {} rostered players", self.selections.len());
        self.rebuild_predictor()
    }

    fn known_slot_key(&self, key: &str) -> Option<String> {
        let slot: RosterSlot = key.parse().ok()?;
        self.slots.contains(&slot).then(|| slot.key())
    }
}
