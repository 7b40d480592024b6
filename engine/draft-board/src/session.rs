//! Draft session: a board bound to one saved draft
//!
//! Every roster or settings change made through the session (once the board
//! is ready) queues a save. Saves are debounced and written by a background
//! task; callers never wait for them.

use crate::board::DraftBoard;
use crate::config::SessionConfig;
use crate::error::Result;
use crate::saved::SavedDraft;
use crate::settings::SearchSettings;
use crate::slots::RosterSlot;
use persistence::{DraftRecord, DraftStore, PersistenceError};
use player_registry::{Player, PlayerId};
use price_engine::EstimationSettings;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
struct PendingSave {
    draft_name: String,
    record: DraftRecord,
}

/// A draft board plus its storage key and background saver
pub struct DraftSession {
    league_id: String,
    draft_name: String,
    board: DraftBoard,
    store: Arc<dyn DraftStore>,
    pending: watch::Sender<Option<PendingSave>>,
    // Held across every store write or delete so they never interleave
    write_lock: Arc<Mutex<()>>,
    saver: JoinHandle<()>,
}

impl DraftSession {
    /// Load the named draft into `board` and start the background saver.
    ///
    /// A missing, corrupt, unmigratable or incomplete saved draft leaves the
    /// board at its defaults.
    pub async fn open(
        mut board: DraftBoard,
        store: Arc<dyn DraftStore>,
        league_id: impl Into<String>,
        draft_name: impl Into<String>,
        config: &SessionConfig,
    ) -> Result<Self> {
        let league_id = league_id.into();
        let draft_name = draft_name.into();

        let saved = match store.load(&league_id, &draft_name).await {
            Ok(Some(record)) => SavedDraft::from_record(record),
            Ok(None) => None,
            Err(PersistenceError::Corruption(message)) => {
                warn!("Saved draft {}/{} is corrupt: {}", league_id, draft_name, message);
                None
            }
            Err(e) => return Err(e.into()),
        };

        match saved {
            Some(saved) => match board.restore(saved) {
                Ok(()) => info!("Opened saved draft {}/{}", league_id, draft_name),
                Err(e) => warn!("Could not restore draft {}/{}: {}", league_id, draft_name, e),
            },
            None => info!("No saved draft {}/{}, starting fresh", league_id, draft_name),
        }

        let (pending, receiver) = watch::channel(None);
        let write_lock = Arc::new(Mutex::new(()));
        let saver = tokio::spawn(run_saver(
            Arc::clone(&store),
            league_id.clone(),
            receiver,
            Arc::clone(&write_lock),
            config.save_debounce(),
        ));

        Ok(Self { league_id, draft_name, board, store, pending, write_lock, saver })
    }

    pub fn league_id(&self) -> &str {
        &self.league_id
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn board(&self) -> &DraftBoard {
        &self.board
    }

    /// Mutate the board and queue a save if the change succeeded
    pub fn update<R>(&mut self, change: impl FnOnce(&mut DraftBoard) -> Result<R>) -> Result<R> {
        let result = change(&mut self.board)?;
        self.schedule_save();
        Ok(result)
    }

    fn schedule_save(&self) {
        if !self.board.is_ready() {
            return;
        }
        match self.board.to_saved().to_record() {
            Ok(record) => {
                let save = PendingSave { draft_name: self.draft_name.clone(), record };
                self.pending.send_replace(Some(save));
            }
            Err(e) => warn!("Could not serialize draft {}: {}", self.draft_name, e),
        }
    }

    pub fn on_player_click(
        &mut self,
        player_id: &PlayerId,
        focused: Option<&RosterSlot>,
    ) -> Result<Option<RosterSlot>> {
        self.update(|board| board.on_player_click(player_id, focused))
    }

    pub fn on_player_selected(&mut self, slot: &RosterSlot, player: Option<Player>) -> Result<()> {
        self.update(|board| board.on_player_selected(slot, player))
    }

    pub fn on_cost_adjusted(&mut self, slot: &RosterSlot, delta: i64) -> Result<()> {
        self.update(|board| board.on_cost_adjusted(slot, delta))
    }

    pub fn set_estimation_settings(&mut self, settings: EstimationSettings) -> Result<()> {
        self.update(|board| board.set_estimation_settings(settings))
    }

    pub fn set_search_settings(&mut self, settings: SearchSettings) {
        self.board.set_search_settings(settings);
        self.schedule_save();
    }

    pub fn reset_roster(&mut self) {
        self.board.reset_roster();
        self.schedule_save();
    }

    /// Save now under `draft_name` and keep autosaving there
    pub async fn save_as(&mut self, draft_name: impl Into<String>) -> Result<()> {
        let draft_name = draft_name.into();
        let record = self.board.to_saved().to_record()?;
        {
            let _write = self.write_lock.lock().await;
            self.store.save(&self.league_id, &draft_name, record).await?;
        }

        info!("Saved draft {}/{}", self.league_id, draft_name);
        self.draft_name = draft_name;
        Ok(())
    }

    /// Delete the saved draft and empty the roster.
    ///
    /// Waits out an autosave already being written, then drops any queued
    /// save so the entry is not written back.
    pub async fn delete(&mut self) -> Result<bool> {
        let removed = {
            let _write = self.write_lock.lock().await;
            self.pending.send_replace(None);
            self.store.delete(&self.league_id, &self.draft_name).await?
        };
        self.board.reset_roster();
        info!("Deleted draft {}/{} (existed: {})", self.league_id, self.draft_name, removed);
        Ok(removed)
    }

    /// Stop the saver after it writes any queued save
    pub async fn close(self) -> DraftBoard {
        let Self { board, pending, saver, .. } = self;
        drop(pending);
        if let Err(e) = saver.await {
            warn!("Draft saver task failed: {}", e);
        }
        board
    }
}

/// Write the latest queued draft once no change has arrived for `debounce`
async fn run_saver(
    store: Arc<dyn DraftStore>,
    league_id: String,
    mut receiver: watch::Receiver<Option<PendingSave>>,
    write_lock: Arc<Mutex<()>>,
    debounce: Duration,
) {
    while receiver.changed().await.is_ok() {
        loop {
            match tokio::time::timeout(debounce, receiver.changed()).await {
                Ok(Ok(())) => continue,
                Ok(Err(_)) | Err(_) => break,
            }
        }

        // Take the queued save under the lock so a delete can cancel it
        let _write = write_lock.lock().await;
        let pending = receiver.borrow_and_update().clone();
        let Some(pending) = pending else {
            debug!("Queued save for league {} was cancelled", league_id);
            continue;
        };

        match store.save(&league_id, &pending.draft_name, pending.record).await {
            Ok(()) => debug!("Autosaved draft {}/{}", league_id, pending.draft_name),
            Err(e) => warn!("Autosave of draft {}/{} failed: {}", league_id, pending.draft_name, e),
        }
    }
}
