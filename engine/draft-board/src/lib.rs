//! # Draft Board
//!
//! Live state of a mock auction draft: which player sits in which roster
//! slot, what each player is expected to cost, and how much budget is left.
//!
//! - **DraftBoard**: owns roster selections, cost adjustments and settings,
//!   and recomputes ranked/priced players whenever an input changes
//! - **DraftSession**: binds a board to a named saved draft and autosaves it
//! - **SavedDraft**: persisted form, with migrations from older versions
//! - **compute_roster_slots / player_available / calculate_amount_spent**:
//!   the pure pieces the board is built from

pub mod availability;
pub mod board;
pub mod config;
pub mod error;
pub mod saved;
pub mod session;
pub mod settings;
pub mod slots;
pub mod types;

#[cfg(test)]
mod tests;

pub use availability::{calculate_amount_spent, player_available};
pub use board::DraftBoard;
pub use config::SessionConfig;
pub use error::{BoardError, Result};
pub use saved::{SavedDraft, CURRENT_VERSION};
pub use session::DraftSession;
pub use settings::SearchSettings;
pub use slots::{compute_roster_slots, RosterSlot};
pub use types::{LoadStatus, PricedPlayer, RosterEntry};
