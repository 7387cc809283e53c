//! Tracks the cards chosen during one draw session.

use serde::Serialize;

use crate::models::{Card, Notice, Spread};

/// Notice shown when the spread already has all its cards.
pub const ENOUGH_CARDS_NOTICE: &str = "Вы уже выбрали достаточно карт";

/// Notice shown when an already opened card is picked again.
pub const ALREADY_OPEN_NOTICE: &str = "Эта карта уже открыта";

/// What happened to a selection attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectOutcome {
    /// The card was added; more are needed.
    Added { card: Card },
    /// The card was added and the spread is now complete.
    Ready { card: Card },
    /// The card was already chosen. Nothing changed; its details can be shown again.
    AlreadySelected { card: Card },
    /// The spread was already complete. Nothing changed.
    Full,
}

impl SelectOutcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::AlreadySelected { .. } => Some(Notice::info(ALREADY_OPEN_NOTICE)),
            Self::Full => Some(Notice::info(ENOUGH_CARDS_NOTICE)),
            Self::Added { .. } | Self::Ready { .. } => None,
        }
    }

    pub fn card(&self) -> Option<&Card> {
        match self {
            Self::Added { card } | Self::Ready { card } | Self::AlreadySelected { card } => {
                Some(card)
            }
            Self::Full => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionTracker {
    needed: usize,
    cards: Vec<Card>,
}

impl SelectionTracker {
    pub fn new(spread: &Spread) -> Self {
        Self {
            needed: spread.cards,
            cards: Vec::with_capacity(spread.cards),
        }
    }

    pub fn select(&mut self, card: &Card) -> SelectOutcome {
        // an opened card stays opened, even once the spread is full
        if self.contains(&card.name) {
            return SelectOutcome::AlreadySelected { card: card.clone() };
        }
        if self.is_ready() {
            return SelectOutcome::Full;
        }

        self.cards.push(card.clone());
        if self.is_ready() {
            SelectOutcome::Ready { card: card.clone() }
        } else {
            SelectOutcome::Added { card: card.clone() }
        }
    }

    pub fn reset(&mut self) {
        self.cards.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cards.iter().any(|c| c.name == name)
    }

    pub fn is_ready(&self) -> bool {
        self.cards.len() >= self.needed
    }

    pub fn selected(&self) -> &[Card] {
        &self.cards
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn needed(&self) -> usize {
        self.needed
    }

    /// Share of required cards already chosen, from 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        if self.needed == 0 {
            return 1.0;
        }
        self.cards.len() as f32 / self.needed as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpreadId;

    fn card(name: &str) -> Card {
        Card {
            name: name.to_string(),
            image: String::new(),
            meaning: "начало".to_string(),
            full_meaning: None,
        }
    }

    #[test]
    fn test_single_spread_becomes_ready() {
        let mut tracker = SelectionTracker::new(&SpreadId::Single.spread());
        let outcome = tracker.select(&card("Шут"));
        assert_eq!(outcome, SelectOutcome::Ready { card: card("Шут") });
        assert!(tracker.is_ready());
        assert_eq!(tracker.progress(), 1.0);
    }

    #[test]
    fn test_over_selection_is_a_no_op() {
        let mut tracker = SelectionTracker::new(&SpreadId::Single.spread());
        tracker.select(&card("Шут"));
        let outcome = tracker.select(&card("Маг"));

        assert_eq!(outcome, SelectOutcome::Full);
        assert_eq!(tracker.count(), 1);
        assert_eq!(
            outcome.notice().map(|n| n.text),
            Some(ENOUGH_CARDS_NOTICE.to_string())
        );
    }

    #[test]
    fn test_reselecting_is_a_no_op() {
        let mut tracker = SelectionTracker::new(&SpreadId::Love.spread());
        tracker.select(&card("Шут"));
        let outcome = tracker.select(&card("Шут"));

        assert_eq!(outcome, SelectOutcome::AlreadySelected { card: card("Шут") });
        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn test_reset_clears_selection() {
        let mut tracker = SelectionTracker::new(&SpreadId::Career.spread());
        tracker.select(&card("Шут"));
        tracker.select(&card("Маг"));
        assert_eq!(tracker.progress(), 2.0 / 7.0);

        tracker.reset();
        assert_eq!(tracker.count(), 0);
        assert!(!tracker.is_ready());
    }
}
