//! Application state shared by the CLI and the HTTP API.
//!
//! [`App`] owns the store, the loaded catalog and the in-progress draw
//! session. It is cheap to clone; clones share the same session and
//! database connection.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::{Catalog, Deck, DeckError};
use crate::db::Database;
use crate::interpret;
use crate::models::*;
use crate::selection::{SelectOutcome, SelectionTracker};

/// Readings listed on the home screen.
pub const RECENT_READINGS: usize = 3;

pub const HISTORY_CLEARED_NOTICE: &str = "История очищена";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No card selection in progress")]
    NoSession,

    #[error("Slot {slot} is outside the deck (1..={size})")]
    SlotOutOfRange { slot: usize, size: usize },

    #[error("Card not found in the dealt deck: {0}")]
    NotInDeck(String),

    #[error("Selection not complete: {selected} of {needed} cards chosen")]
    NotReady { selected: usize, needed: usize },

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Reading(#[from] ReadingError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// One card-selection session: the spread, the dealt deck and the picks.
#[derive(Debug, Clone)]
struct DrawSession {
    spread: Spread,
    deck: Deck,
    tracker: SelectionTracker,
}

impl DrawSession {
    fn view(&self) -> SessionView {
        SessionView {
            spread: self.spread,
            needed: self.tracker.needed(),
            selected: self.tracker.selected().to_vec(),
            opened_slots: self
                .tracker
                .selected()
                .iter()
                .filter_map(|c| self.deck.slot_of(&c.name))
                .collect(),
            deck_size: self.deck.len(),
            progress: self.tracker.progress(),
            ready: self.tracker.is_ready(),
        }
    }
}

/// Snapshot of the selection screen.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub spread: Spread,
    pub needed: usize,
    pub selected: Vec<Card>,
    /// Deck slots (1-based) of the selected cards, in selection order.
    pub opened_slots: Vec<usize>,
    pub deck_size: usize,
    pub progress: f32,
    pub ready: bool,
}

/// Result of a selection attempt.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    #[serde(flatten)]
    pub outcome: SelectOutcome,
    pub session: SessionView,
    pub notice: Option<Notice>,
}

#[derive(Clone)]
pub struct App {
    db: Database,
    catalog: Arc<Catalog>,
    session: Arc<Mutex<Option<DrawSession>>>,
    toast_duration: Duration,
    success_duration: Duration,
}

impl App {
    pub fn new(db: Database, catalog: Catalog) -> Self {
        Self {
            db,
            catalog: Arc::new(catalog),
            session: Arc::new(Mutex::new(None)),
            toast_duration: TOAST_DURATION,
            success_duration: SUCCESS_DURATION,
        }
    }

    pub fn with_notice_durations(mut self, toast: Duration, success: Duration) -> Self {
        self.toast_duration = toast;
        self.success_duration = success;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ============================================================
    // Spreads
    // ============================================================

    pub fn spreads(&self) -> Vec<Spread> {
        all_spreads()
    }

    pub fn selected_spread(&self) -> Result<Spread, AppError> {
        Ok(self.db.get_selected_spread()?.spread())
    }

    /// Persists the spread choice and abandons any session in progress.
    pub fn select_spread(&self, id: SpreadId) -> Result<Spread, AppError> {
        self.db.set_selected_spread(id)?;
        *self.lock_session() = None;
        tracing::debug!("Selected spread {}", id);
        Ok(id.spread())
    }

    // ============================================================
    // Card selection
    // ============================================================

    /// Deals a fresh deck for the selected spread and resets the picks.
    pub fn start_session<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SessionView, AppError> {
        let spread = self.selected_spread()?;
        let deck = Deck::shuffle(&self.catalog, rng).inspect_err(|e| {
            tracing::error!("Cannot deal a deck: {}", e);
        })?;

        let session = DrawSession {
            spread,
            deck,
            tracker: SelectionTracker::new(&spread),
        };
        let view = session.view();
        *self.lock_session() = Some(session);

        tracing::info!("Started {} session ({} cards needed)", spread.id, spread.cards);
        Ok(view)
    }

    pub fn session(&self) -> Option<SessionView> {
        self.lock_session().as_ref().map(DrawSession::view)
    }

    /// Picks the card at a 1-based deck slot.
    pub fn select_slot(&self, slot: usize) -> Result<Selection, AppError> {
        let mut guard = self.lock_session();
        let session = guard.as_mut().ok_or(AppError::NoSession)?;
        let card = session
            .deck
            .slot(slot)
            .cloned()
            .ok_or(AppError::SlotOutOfRange {
                slot,
                size: session.deck.len(),
            })?;
        Ok(self.apply_selection(session, &card))
    }

    /// Picks a card from the dealt deck by name.
    pub fn select_card(&self, name: &str) -> Result<Selection, AppError> {
        let mut guard = self.lock_session();
        let session = guard.as_mut().ok_or(AppError::NoSession)?;
        let card = session
            .deck
            .find(name)
            .cloned()
            .ok_or_else(|| AppError::NotInDeck(name.to_string()))?;
        Ok(self.apply_selection(session, &card))
    }

    fn apply_selection(&self, session: &mut DrawSession, card: &Card) -> Selection {
        let outcome = session.tracker.select(card);
        match &outcome {
            SelectOutcome::Full => tracing::debug!("Rejected {}: spread complete", card.name),
            SelectOutcome::AlreadySelected { .. } => {
                tracing::debug!("Rejected {}: already selected", card.name)
            }
            _ => tracing::debug!(
                "Selected {} ({}/{})",
                card.name,
                session.tracker.count(),
                session.tracker.needed()
            ),
        }

        let notice = outcome
            .notice()
            .map(|n| n.with_duration(self.toast_duration));
        Selection {
            outcome,
            session: session.view(),
            notice,
        }
    }

    /// Turns a complete selection into a reading, storing it as current and
    /// in history. The session ends.
    pub fn complete_reading(&self, now: DateTime<Utc>) -> Result<Reading, AppError> {
        let mut guard = self.lock_session();
        let session = guard.as_ref().ok_or(AppError::NoSession)?;
        if !session.tracker.is_ready() {
            return Err(AppError::NotReady {
                selected: session.tracker.count(),
                needed: session.tracker.needed(),
            });
        }

        let reading = Reading::new(&session.spread, session.tracker.selected().to_vec(), now)?;
        self.db.record_reading(&reading)?;
        *guard = None;

        tracing::info!(
            "Recorded {} reading: {}",
            reading.spread_type,
            reading.card_names().join(", ")
        );
        Ok(reading)
    }

    // ============================================================
    // Readings
    // ============================================================

    pub fn current_reading(&self) -> Result<Option<Reading>, AppError> {
        Ok(self.db.get_current_reading()?)
    }

    /// The current reading with freshly generated text.
    pub fn reading_view<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Option<ReadingView>, AppError> {
        Ok(self.current_reading()?.map(|reading| {
            let interpretation = interpret::interpret_reading(&reading, rng);
            ReadingView {
                reading,
                interpretation,
            }
        }))
    }

    pub fn share_text(&self) -> Result<Option<String>, AppError> {
        Ok(self.current_reading()?.map(|r| r.share_text()))
    }

    pub fn card(&self, name: &str) -> Option<Card> {
        self.catalog.get(name).cloned()
    }

    // ============================================================
    // History
    // ============================================================

    pub fn history(&self) -> Result<History, AppError> {
        Ok(self.db.get_history()?)
    }

    pub fn recent_history(&self) -> Result<Vec<Reading>, AppError> {
        Ok(self.history()?.recent(RECENT_READINGS).to_vec())
    }

    pub fn history_stats(&self, now: DateTime<Utc>) -> Result<HistoryStats, AppError> {
        Ok(self.history()?.stats(now))
    }

    /// Makes a past reading current again without adding it to history twice.
    pub fn view_history_reading(&self, id: Uuid) -> Result<Option<Reading>, AppError> {
        let history = self.history()?;
        let Some(reading) = history.find(id) else {
            return Ok(None);
        };
        self.db.set_current_reading(reading)?;
        Ok(Some(reading.clone()))
    }

    pub fn clear_history(&self) -> Result<Notice, AppError> {
        self.db.clear_history()?;
        tracing::info!("History cleared");
        Ok(Notice::success(HISTORY_CLEARED_NOTICE).with_duration(self.success_duration))
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Option<DrawSession>> {
        self.session.lock().expect("session lock poisoned")
    }
}
