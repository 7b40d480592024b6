//! Board and session scenario tests

use std::collections::BTreeMap;
use std::sync::Arc;

use player_registry::lineup::eligible_lineup_positions;
use player_registry::{Player, PlayerId, RankingSource, Rankings};
use price_engine::{DraftAnalysis, DraftHistory, EstimationSettings, ExponentialCoefficients};

use crate::{DraftBoard, RosterSlot};

fn player(id: &str, position: &str) -> Player {
    Player {
        id: PlayerId::from(id),
        full_name: id.to_uppercase(),
        default_position: position.to_string(),
        eligible_positions: eligible_lineup_positions(&[position]),
        platform_price: None,
        team: None,
    }
}

/// Pool in platform order; with the fixture history the estimated costs are
/// 60, 50, 41, 33, 27, 23, 19, 15, 13, 10
fn pool() -> Vec<Player> {
    vec![
        player("rb1", "RB"),
        player("wr1", "WR"),
        player("rb2", "RB"),
        player("qb1", "QB"),
        player("wr2", "WR"),
        player("te1", "TE"),
        player("rb3", "RB"),
        player("wr3", "WR"),
        player("k1", "K"),
        player("rb4", "RB"),
    ]
}

/// price(rank) = 60 * e^(-0.2 * rank), no positional curves
fn history() -> Arc<DraftHistory> {
    Arc::new(DraftHistory::from([(
        2024,
        DraftAnalysis {
            overall: ExponentialCoefficients::new(60.0, -0.2),
            positions: BTreeMap::new(),
        },
    )]))
}

/// QB, 2 RB, 2 WR, TE, FLEX, 2 Bench: 9 slots
fn roster_positions() -> BTreeMap<String, u32> {
    [("QB", 1), ("RB", 2), ("WR", 2), ("TE", 1), ("FLEX", 1), ("Bench", 2)]
        .into_iter()
        .map(|(position, count)| (position.to_string(), count))
        .collect()
}

fn platform_only() -> Vec<RankingSource> {
    vec![RankingSource::new("Platform", Rankings::from_order(&pool()))]
}

fn ready_board() -> DraftBoard {
    let mut board = DraftBoard::new(&roster_positions(), 200);
    let pool = pool();
    let mut reversed = pool.clone();
    reversed.reverse();

    board
        .set_ranking_sources(vec![
            RankingSource::new("Platform", Rankings::from_order(&pool)),
            RankingSource::new("Reversed", Rankings::from_order(&reversed)),
            RankingSource::new("Top three", Rankings::from_order(&pool[..3])),
        ])
        .unwrap();
    board.set_player_pool(pool);
    board.set_history(history()).unwrap();
    board
}

fn slot(key: &str) -> RosterSlot {
    key.parse().unwrap()
}

fn id(id: &str) -> PlayerId {
    PlayerId::from(id)
}

#[cfg(test)]
mod board_tests {
    use super::*;
    use crate::{BoardError, LoadStatus, SearchSettings};

    fn search() -> SearchSettings {
        SearchSettings::for_budget(200)
    }

    #[test]
    fn test_board_not_ready_until_inputs_arrive() {
        let mut board = DraftBoard::new(&roster_positions(), 200);
        assert_eq!(board.status(), LoadStatus::Loading);
        assert!(matches!(board.priced_players(), Err(BoardError::NotReady)));

        board.set_player_pool(pool());
        board.set_history(history()).unwrap();
        assert!(matches!(board.budget_spent(), Err(BoardError::NotReady)));

        board.set_ranking_sources(platform_only()).unwrap();
        assert_eq!(board.status(), LoadStatus::Ready);
    }

    #[test]
    fn test_failed_load_is_terminal() {
        let mut board = ready_board();
        board.fail("Sleeper API error: 503");
        assert!(matches!(board.priced_players(), Err(BoardError::LoadFailed(_))));
        assert!(matches!(board.status(), LoadStatus::Failed(_)));
    }

    #[test]
    fn test_empty_ranking_sources_rejected() {
        let mut board = DraftBoard::new(&roster_positions(), 200);
        assert!(board.set_ranking_sources(Vec::new()).is_err());
    }

    #[test]
    fn test_priced_players_follow_rank_order() {
        let board = ready_board();
        let priced = board.priced_players().unwrap();

        let costs: Vec<u32> = priced.iter().map(|p| p.estimated_cost).collect();
        assert_eq!(costs, vec![60, 50, 41, 33, 27, 23, 19, 15, 13, 10]);
        assert_eq!(priced[0].display_overall_rank().value(), Some(1));
        assert_eq!(priced[2].display_position_rank().value(), Some(2));
    }

    #[test]
    fn test_estimation_years_default_to_history() {
        let board = ready_board();
        assert_eq!(board.estimation_settings().years, vec![2024]);
        assert_eq!(board.estimation_settings().weight, 50);
    }

    #[test]
    fn test_empty_roster_budget() {
        let board = ready_board();
        assert_eq!(board.slots().len(), 9);
        assert_eq!(board.budget_spent().unwrap(), 9);
        assert_eq!(board.remaining_budget().unwrap(), 191);
        assert_eq!(board.max_bid().unwrap(), 192);
    }

    #[test]
    fn test_click_fills_natural_position_then_flex_then_bench() {
        let mut board = ready_board();

        assert_eq!(board.on_player_click(&id("rb1"), None).unwrap(), Some(slot("RB-0")));
        assert_eq!(board.on_player_click(&id("rb2"), None).unwrap(), Some(slot("RB-1")));
        assert_eq!(board.on_player_click(&id("rb3"), None).unwrap(), Some(slot("FLEX-0")));
        assert_eq!(board.on_player_click(&id("rb4"), None).unwrap(), Some(slot("Bench-0")));
        assert_eq!(board.on_player_click(&id("k1"), None).unwrap(), Some(slot("Bench-1")));
        assert_eq!(board.on_player_click(&id("te1"), None).unwrap(), Some(slot("TE-0")));
        assert_eq!(board.selected_players().len(), 6);
    }

    #[test]
    fn test_click_with_no_open_eligible_slot_is_noop() {
        let mut board = DraftBoard::new(&BTreeMap::from([("QB".to_string(), 1)]), 200);
        board.set_ranking_sources(platform_only()).unwrap();
        board.set_player_pool(pool());
        board.set_history(history()).unwrap();

        assert_eq!(board.on_player_click(&id("k1"), None).unwrap(), None);
        assert!(board.selections().is_empty());
    }

    #[test]
    fn test_click_prefers_eligible_focused_slot() {
        let mut board = ready_board();

        assert_eq!(
            board.on_player_click(&id("wr1"), Some(&slot("FLEX-0"))).unwrap(),
            Some(slot("FLEX-0"))
        );

        // A QB cannot fill WR-0, so the focus is ignored
        assert_eq!(
            board.on_player_click(&id("qb1"), Some(&slot("WR-0"))).unwrap(),
            Some(slot("QB-0"))
        );
    }

    #[test]
    fn test_click_ignores_rostered_and_unknown_players() {
        let mut board = ready_board();
        board.on_player_click(&id("rb1"), None).unwrap();

        assert_eq!(board.on_player_click(&id("rb1"), None).unwrap(), None);
        assert_eq!(board.selected_players().len(), 1);
        assert!(matches!(
            board.on_player_click(&id("nobody"), None),
            Err(BoardError::PlayerNotFound(_))
        ));
    }

    #[test]
    fn test_budget_counts_selected_costs_and_open_slots() {
        let mut board = ready_board();
        board.on_player_click(&id("rb1"), None).unwrap();
        board.on_player_click(&id("rb2"), None).unwrap();

        // 60 + 41 + 7 open slots
        assert_eq!(board.budget_spent().unwrap(), 108);
        assert_eq!(board.remaining_budget().unwrap(), 92);
        assert_eq!(board.max_bid().unwrap(), 93);
    }

    #[test]
    fn test_cost_adjustments_accumulate() {
        let mut board = ready_board();
        board.on_player_click(&id("rb1"), None).unwrap();

        board.on_cost_adjusted(&slot("RB-0"), 5).unwrap();
        board.on_cost_adjusted(&slot("RB-0"), -2).unwrap();
        assert_eq!(board.adjustments().get("RB-0"), Some(&3));
        assert_eq!(board.budget_spent().unwrap(), 60 + 8 + 3);

        assert!(matches!(
            board.on_cost_adjusted(&slot("K-0"), 1),
            Err(BoardError::UnknownSlot(_))
        ));
    }

    #[test]
    fn test_reassigning_slot_clears_adjustment() {
        let mut board = ready_board();
        let rb_slot = slot("RB-0");
        board.on_player_selected(&rb_slot, Some(player("rb1", "RB"))).unwrap();
        board.on_cost_adjusted(&rb_slot, 4).unwrap();

        // Same occupant keeps the adjustment
        board.on_player_selected(&rb_slot, Some(player("rb1", "RB"))).unwrap();
        assert_eq!(board.adjustments().get("RB-0"), Some(&4));

        board.on_player_selected(&rb_slot, Some(player("rb2", "RB"))).unwrap();
        assert_eq!(board.adjustments().get("RB-0"), None);

        board.on_cost_adjusted(&rb_slot, 2).unwrap();
        board.on_player_selected(&rb_slot, None).unwrap();
        assert_eq!(board.adjustments().get("RB-0"), None);
        assert_eq!(board.occupant(&rb_slot), None);
    }

    #[test]
    fn test_selecting_rostered_player_moves_them() {
        let mut board = ready_board();
        board.on_player_click(&id("rb1"), None).unwrap();
        board.on_cost_adjusted(&slot("RB-0"), 5).unwrap();
        assert_eq!(board.budget_spent().unwrap(), 60 + 8 + 5);

        board.on_player_selected(&slot("FLEX-0"), Some(player("rb1", "RB"))).unwrap();

        assert_eq!(board.occupant(&slot("RB-0")), None);
        assert_eq!(board.adjustments().get("RB-0"), None);
        assert_eq!(board.occupant(&slot("FLEX-0")).map(|p| p.id.clone()), Some(id("rb1")));
        assert_eq!(board.selected_players().len(), 1);
        assert_eq!(board.budget_spent().unwrap(), 60 + 8);
    }

    #[test]
    fn test_selecting_unknown_slot_fails() {
        let mut board = ready_board();
        assert!(matches!(
            board.on_player_selected(&slot("IR-0"), Some(player("rb1", "RB"))),
            Err(BoardError::UnknownSlot(_))
        ));
    }

    #[test]
    fn test_full_roster_has_no_max_bid() {
        let mut board = DraftBoard::new(&BTreeMap::from([("RB".to_string(), 1)]), 200);
        board.set_ranking_sources(platform_only()).unwrap();
        board.set_player_pool(pool());
        board.set_history(history()).unwrap();

        board.on_player_click(&id("rb1"), None).unwrap();
        assert_eq!(board.remaining_budget().unwrap(), 140);
        assert_eq!(board.max_bid().unwrap(), 0);
    }

    #[test]
    fn test_available_players_hide_rostered_and_respect_filters() {
        let mut board = ready_board();
        board.on_player_click(&id("rb1"), None).unwrap();

        let available = board.available_players().unwrap();
        assert_eq!(available.len(), 9);
        assert_eq!(available[0].id(), &id("wr1"));

        board.set_search_settings(SearchSettings { max_price: 30, ..search() });
        let ids: Vec<&str> =
            board.available_players().unwrap().iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["wr2", "te1", "rb3", "wr3", "k1", "rb4"]);

        board.set_search_settings(SearchSettings { player_count: 2, ..search() });
        assert_eq!(board.available_players().unwrap().len(), 2);
    }

    #[test]
    fn test_over_budget_hides_everyone_only_when_filtering() {
        let mut board = ready_board();
        board.on_player_click(&id("rb1"), None).unwrap();
        board.on_cost_adjusted(&slot("QB-0"), 150).unwrap();
        assert!(board.remaining_budget().unwrap() < 0);
        assert_eq!(board.max_bid().unwrap(), 0);

        assert!(board.available_players().unwrap().is_empty());

        board.set_search_settings(SearchSettings {
            show_only_available: false,
            ..search()
        });
        assert_eq!(board.available_players().unwrap().len(), 10);
    }

    #[test]
    fn test_available_by_position() {
        let mut board = ready_board();
        board.on_player_click(&id("rb1"), None).unwrap();
        board.set_search_settings(SearchSettings {
            positions: ["RB", "WR"].into_iter().map(String::from).collect(),
            player_count: 2,
            ..search()
        });

        let by_position = board.available_by_position().unwrap();
        assert_eq!(by_position.len(), 2);
        let rbs: Vec<&str> = by_position["RB"].iter().map(|p| p.id().as_str()).collect();
        let wrs: Vec<&str> = by_position["WR"].iter().map(|p| p.id().as_str()).collect();
        assert_eq!(rbs, vec!["rb2", "rb3"]);
        assert_eq!(wrs, vec!["wr1", "wr2"]);
    }

    #[test]
    fn test_roster_costs_sum_to_budget_spent() {
        let mut board = ready_board();
        board.on_player_click(&id("rb1"), None).unwrap();
        board.on_player_click(&id("qb1"), None).unwrap();
        board.on_cost_adjusted(&slot("QB-0"), 6).unwrap();
        board.on_cost_adjusted(&slot("Bench-1"), -1).unwrap();

        let roster = board.roster().unwrap();
        assert_eq!(roster.len(), 9);
        assert_eq!(roster[0].slot, slot("QB-0"));
        assert_eq!(roster[0].estimated_cost, Some(33));
        assert_eq!(roster[0].cost, 39);
        assert_eq!(roster[8].cost, 0);

        let total: i64 = roster.iter().map(|entry| entry.cost).sum();
        assert_eq!(total, board.budget_spent().unwrap());
    }

    #[test]
    fn test_switching_ranking_source_reprices() {
        let mut board = ready_board();
        assert_eq!(board.active_ranking_source(), Some("Platform"));

        board.select_ranking_source("Reversed").unwrap();
        let priced = board.priced_players().unwrap();
        assert_eq!(priced[0].id(), &id("rb4"));
        assert_eq!(priced[0].estimated_cost, 60);

        assert!(matches!(
            board.select_ranking_source("Yahoo"),
            Err(BoardError::UnknownRankingSource(_))
        ));
        assert_eq!(board.active_ranking_source(), Some("Reversed"));
        assert_eq!(board.ranking_source_names(), vec!["Platform", "Reversed", "Top three"]);
    }

    #[test]
    fn test_rostered_player_missing_from_source_costs_floor() {
        let mut board = ready_board();
        board.on_player_click(&id("qb1"), None).unwrap();
        assert_eq!(board.budget_spent().unwrap(), 33 + 8);

        board.select_ranking_source("Top three").unwrap();
        assert_eq!(board.priced_players().unwrap().len(), 3);
        assert_eq!(board.budget_spent().unwrap(), 1 + 8);
    }

    #[test]
    fn test_estimation_settings_are_validated() {
        let mut board = ready_board();
        let unknown_year = EstimationSettings { years: vec![2019], weight: 50 };
        assert!(matches!(
            board.set_estimation_settings(unknown_year),
            Err(BoardError::PriceEngine(_))
        ));

        let too_heavy = EstimationSettings { years: vec![2024], weight: 101 };
        assert!(board.set_estimation_settings(too_heavy).is_err());

        // No years selected prices everyone at the floor
        board.set_estimation_settings(EstimationSettings { years: vec![], weight: 0 }).unwrap();
        assert!(board.priced_players().unwrap().iter().all(|p| p.estimated_cost == 1));
    }

    #[test]
    fn test_reset_roster() {
        let mut board = ready_board();
        board.on_player_click(&id("rb1"), None).unwrap();
        board.on_cost_adjusted(&slot("RB-0"), 3).unwrap();

        board.reset_roster();
        assert!(board.selections().is_empty());
        assert!(board.adjustments().is_empty());
        assert_eq!(board.budget_spent().unwrap(), 9);
    }

    #[test]
    fn test_saved_round_trip_through_board() {
        let mut board = ready_board();
        board.on_player_click(&id("rb1"), None).unwrap();
        board.on_cost_adjusted(&slot("RB-0"), 2).unwrap();
        board.set_search_settings(SearchSettings { min_price: 5, ..search() });

        let saved = board.to_saved();
        assert_eq!(saved.roster_selections.len(), 9);
        assert_eq!(saved.roster_selections["RB-1"], None);

        let mut restored = ready_board();
        restored.restore(saved.clone()).unwrap();
        assert_eq!(restored.to_saved(), saved);
        assert_eq!(restored.budget_spent().unwrap(), board.budget_spent().unwrap());
    }

    #[test]
    fn test_restore_drops_unknown_slots_and_years() {
        let mut saved = ready_board().to_saved();
        saved.roster_selections.insert("K-0".to_string(), Some(player("k1", "K")));
        saved.cost_adjustments.insert("K-0".to_string(), 3);
        saved.cost_adjustments.insert("garbage".to_string(), 3);
        saved.estimation_settings.years = vec![2024, 2015];

        let mut board = ready_board();
        board.restore(saved).unwrap();
        assert!(board.selections().is_empty());
        assert!(board.adjustments().is_empty());
        assert_eq!(board.estimation_settings().years, vec![2024]);
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;
    use crate::{DraftSession, SavedDraft, SessionConfig};
    use persistence::{create_local_store, DraftRecord, DraftStore, InMemoryDraftStore};
    use persistence::Result as StoreResult;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::TempDir;

    fn config() -> SessionConfig {
        SessionConfig { save_debounce_ms: 10 }
    }

    /// In-memory store whose writes take a while to land
    struct SlowStore {
        inner: InMemoryDraftStore,
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl DraftStore for SlowStore {
        async fn load(
            &self,
            league_id: &str,
            draft_name: &str,
        ) -> StoreResult<Option<DraftRecord>> {
            self.inner.load(league_id, draft_name).await
        }

        async fn save(
            &self,
            league_id: &str,
            draft_name: &str,
            record: DraftRecord,
        ) -> StoreResult<()> {
            tokio::time::sleep(self.delay).await;
            self.inner.save(league_id, draft_name, record).await
        }

        async fn delete(&self, league_id: &str, draft_name: &str) -> StoreResult<bool> {
            self.inner.delete(league_id, draft_name).await
        }

        async fn list(&self, league_id: &str) -> StoreResult<Vec<String>> {
            self.inner.list(league_id).await
        }
    }

    #[tokio::test]
    async fn test_changes_autosave_and_reload() {
        let store = Arc::new(InMemoryDraftStore::new());
        let mut session =
            DraftSession::open(ready_board(), store.clone(), "league", "mock", &config())
                .await
                .unwrap();

        session.on_player_click(&id("rb1"), None).unwrap();
        session.on_cost_adjusted(&slot("RB-0"), 7).unwrap();
        session
            .set_estimation_settings(EstimationSettings { years: vec![2024], weight: 80 })
            .unwrap();
        let expected = session.board().to_saved();
        session.close().await;

        let record = store.load("league", "mock").await.unwrap().unwrap();
        assert_eq!(SavedDraft::from_record(record), Some(expected.clone()));

        let reopened =
            DraftSession::open(ready_board(), store.clone(), "league", "mock", &config())
                .await
                .unwrap();
        assert_eq!(reopened.board().to_saved(), expected);
        assert_eq!(reopened.board().budget_spent().unwrap(), 60 + 8 + 7);
    }

    #[tokio::test]
    async fn test_autosave_happens_without_close() {
        let store = Arc::new(InMemoryDraftStore::new());
        let mut session =
            DraftSession::open(ready_board(), store.clone(), "league", "mock", &config())
                .await
                .unwrap();

        for player in ["rb1", "wr1", "qb1"] {
            session.on_player_click(&id(player), None).unwrap();
        }
        tokio::time::sleep(Duration::from_millis(200)).await;

        let record = store.load("league", "mock").await.unwrap().unwrap();
        let saved = SavedDraft::from_record(record).unwrap();
        assert_eq!(saved.roster_selections.values().filter(|p| p.is_some()).count(), 3);
    }

    #[tokio::test]
    async fn test_no_autosave_before_board_is_ready() {
        let store = Arc::new(InMemoryDraftStore::new());
        let board = DraftBoard::new(&roster_positions(), 200);
        let mut session =
            DraftSession::open(board, store.clone(), "league", "mock", &config()).await.unwrap();

        session.on_player_selected(&slot("RB-0"), Some(player("rb1", "RB"))).unwrap();
        let board = session.close().await;

        assert_eq!(board.selected_players().len(), 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_save_as_switches_draft_name() {
        let store = Arc::new(InMemoryDraftStore::new());
        let mut session =
            DraftSession::open(ready_board(), store.clone(), "league", "default", &config())
                .await
                .unwrap();

        session.on_player_click(&id("te1"), None).unwrap();
        session.save_as("te premium").await.unwrap();
        assert_eq!(session.draft_name(), "te premium");
        session.close().await;

        let names = store.list("league").await.unwrap();
        assert!(names.contains(&"te premium".to_string()));
    }

    #[tokio::test]
    async fn test_delete_resets_roster_and_removes_draft() {
        let store = Arc::new(InMemoryDraftStore::new());
        let mut session =
            DraftSession::open(ready_board(), store.clone(), "league", "mock", &config())
                .await
                .unwrap();

        session.on_player_click(&id("rb1"), None).unwrap();
        session.save_as("mock").await.unwrap();
        session.on_player_click(&id("wr1"), None).unwrap();

        assert!(session.delete().await.unwrap());
        assert!(session.board().selections().is_empty());

        session.close().await;
        assert_eq!(store.load("league", "mock").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_waits_for_autosave_in_progress() {
        let inner = InMemoryDraftStore::new();
        let store = Arc::new(SlowStore { inner, delay: Duration::from_millis(100) });
        let mut session =
            DraftSession::open(ready_board(), store.clone(), "league", "mock", &config())
                .await
                .unwrap();

        session.on_player_click(&id("rb1"), None).unwrap();
        // Past the debounce, so the autosave is being written
        tokio::time::sleep(Duration::from_millis(40)).await;

        session.delete().await.unwrap();
        session.close().await;
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(store.load("league", "mock").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_change_does_not_autosave() {
        let store = Arc::new(InMemoryDraftStore::new());
        let mut session =
            DraftSession::open(ready_board(), store.clone(), "league", "mock", &config())
                .await
                .unwrap();

        assert!(session.on_cost_adjusted(&slot("IR-0"), 3).is_err());
        assert!(session.on_player_click(&id("nobody"), None).is_err());
        session.close().await;

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_incomplete_saved_draft_uses_defaults() {
        let store = Arc::new(InMemoryDraftStore::new());
        let partial = json!({"rosterSelections": {"RB-0": null}, "costAdjustments": {}});
        store.save("league", "mock", DraftRecord::new(3, partial)).await.unwrap();

        let session =
            DraftSession::open(ready_board(), store.clone(), "league", "mock", &config())
                .await
                .unwrap();
        assert_eq!(session.board().to_saved(), ready_board().to_saved());
    }

    #[tokio::test]
    async fn test_corrupt_saved_draft_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = create_local_store(temp_dir.path()).unwrap();
        store.initialize().await.unwrap();

        let league_dir = temp_dir.path().join("drafts").join("league");
        tokio::fs::create_dir_all(&league_dir).await.unwrap();
        tokio::fs::write(league_dir.join("mock.json"), "{\"version\": 3, \"sav").await.unwrap();

        let session =
            DraftSession::open(ready_board(), Arc::new(store), "league", "mock", &config())
                .await
                .unwrap();
        assert!(session.board().selections().is_empty());
    }

    #[tokio::test]
    async fn test_local_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = create_local_store(temp_dir.path()).unwrap();
        store.initialize().await.unwrap();
        let store = Arc::new(store);

        let mut session =
            DraftSession::open(ready_board(), store.clone(), "123456", "My Mock", &config())
                .await
                .unwrap();
        session.on_player_click(&id("wr2"), None).unwrap();
        session.on_player_click(&id("k1"), None).unwrap();
        let expected = session.board().to_saved();
        session.close().await;

        let reopened =
            DraftSession::open(ready_board(), store.clone(), "123456", "My Mock", &config())
                .await
                .unwrap();
        assert_eq!(reopened.board().to_saved(), expected);
    }
}
