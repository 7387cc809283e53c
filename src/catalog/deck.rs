use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use super::Catalog;
use crate::models::Card;

/// Number of face-down cards laid out for selection.
pub const DECK_SIZE: usize = 22;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Not enough cards in catalog: need {needed}, have {available}")]
    NotEnoughCards { needed: usize, available: usize },
}

/// The shuffled cards a user picks from, addressed by slot `1..=len`.
#[derive(Debug, Clone, Serialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Shuffles a copy of the catalog and keeps the first [`DECK_SIZE`] cards.
    pub fn shuffle<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Result<Self, DeckError> {
        if catalog.len() < DECK_SIZE {
            return Err(DeckError::NotEnoughCards {
                needed: DECK_SIZE,
                available: catalog.len(),
            });
        }

        let mut cards = catalog.cards().to_vec();
        cards.shuffle(rng);
        cards.truncate(DECK_SIZE);
        Ok(Self { cards })
    }

    /// Card at a 1-based slot.
    pub fn slot(&self, slot: usize) -> Option<&Card> {
        slot.checked_sub(1).and_then(|i| self.cards.get(i))
    }

    pub fn find(&self, name: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.name == name)
    }

    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.name == name).map(|i| i + 1)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
