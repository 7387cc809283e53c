use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::card::Card;
use super::spread::{Spread, SpreadId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadingError {
    #[error("spread '{spread}' needs {needed} cards, got {got}")]
    CardCountMismatch {
        spread: SpreadId,
        needed: usize,
        got: usize,
    },
}

/// The completed result of one card-selection session.
///
/// Readings are immutable once created. They are stored as the "current"
/// reading and pushed onto the [`History`](super::History). The serialized
/// form uses camelCase keys (`spreadType`, `spreadName`) so stored blobs stay
/// readable by other clients of the same store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Older stored readings have no id; they receive a fresh one on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub spread_type: SpreadId,
    pub spread_name: String,
    /// Drawn cards in selection order. Length equals the spread's requirement.
    pub cards: Vec<Card>,
    pub date: DateTime<Utc>,
}

impl Reading {
    pub fn new(spread: &Spread, cards: Vec<Card>, date: DateTime<Utc>) -> Result<Self, ReadingError> {
        if cards.len() != spread.cards {
            return Err(ReadingError::CardCountMismatch {
                spread: spread.id,
                needed: spread.cards,
                got: cards.len(),
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            spread_type: spread.id,
            spread_name: spread.name.to_string(),
            cards,
            date,
        })
    }

    pub fn card_names(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.name.as_str()).collect()
    }

    /// Plain-text summary handed to a share surface.
    pub fn share_text(&self) -> String {
        format!(
            "Моё таро-предсказание ({}): {}",
            self.spread_name,
            self.card_names().join(", ")
        )
    }
}

/// Generated text for a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub general: String,
    pub cards: Vec<CardInterpretation>,
    pub advice: String,
}

/// Interpretation of one card in its spread position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInterpretation {
    pub position: String,
    pub name: String,
    pub image: String,
    pub text: String,
}

/// A reading together with its generated interpretation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingView {
    pub reading: Reading,
    pub interpretation: Interpretation,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str) -> Card {
        Card {
            name: name.to_string(),
            image: format!("images/{}.jpg", name),
            meaning: "начало".to_string(),
            full_meaning: None,
        }
    }

    #[test]
    fn test_rejects_wrong_card_count() {
        let spread = SpreadId::Love.spread();
        let err = Reading::new(&spread, vec![card("Шут")], Utc::now()).unwrap_err();
        assert_eq!(
            err,
            ReadingError::CardCountMismatch {
                spread: SpreadId::Love,
                needed: 6,
                got: 1
            }
        );
    }

    #[test]
    fn test_share_text_lists_cards() {
        let spread = SpreadId::Single.spread();
        let reading = Reading::new(&spread, vec![card("Шут")], Utc::now()).unwrap();
        assert_eq!(reading.share_text(), "Моё таро-предсказание (Карта дня): Шут");
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let spread = SpreadId::Single.spread();
        let reading = Reading::new(&spread, vec![card("Шут")], Utc::now()).unwrap();
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["spreadType"], "single");
        assert_eq!(json["spreadName"], "Карта дня");
    }

    #[test]
    fn test_reading_without_id_gets_one() {
        let json = r#"{
            "spreadType": "single",
            "spreadName": "Карта дня",
            "cards": [{"name": "Шут", "image": "fool.jpg", "meaning": "начало"}],
            "date": "2025-01-01T10:00:00Z"
        }"#;
        let reading: Reading = serde_json::from_str(json).unwrap();
        assert!(!reading.id.is_nil());
        assert_eq!(reading.cards.len(), 1);
    }
}
