//! The card catalog and where it comes from.
//!
//! The catalog is loaded once at startup from one of:
//! - the copy embedded in the binary (default),
//! - a JSON file on disk,
//! - an `http://` or `https://` URL.
//!
//! A failed load degrades to an empty catalog plus an error notice; there is
//! no retry.

mod deck;

pub use deck::*;

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Card, Notice};

const EMBEDDED_CARDS: &str = include_str!("../../data/cards.json");

/// Notice shown when the catalog could not be loaded.
pub const LOAD_FAILED_NOTICE: &str = "Не удалось загрузить данные карт. Пожалуйста, попробуйте позже.";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate card name in catalog: {0}")]
    DuplicateName(String),
}

/// Where card data is read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogSource {
    #[default]
    Embedded,
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// Parses a source string: empty or `embedded`, a URL, or a file path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == "embedded" {
            Self::Embedded
        } else if s.starts_with("http://") || s.starts_with("https://") {
            Self::Url(s.to_string())
        } else {
            Self::File(PathBuf::from(s))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => f.write_str("embedded"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Ordered, immutable list of cards with unique names.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    pub fn new(cards: Vec<Card>) -> Result<Self, CatalogError> {
        if let Some(name) = first_duplicate(&cards) {
            return Err(CatalogError::DuplicateName(name));
        }
        Ok(Self { cards })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CARDS)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Self::new(cards)
    }

    pub async fn fetch(source: &CatalogSource) -> Result<Self, CatalogError> {
        match source {
            CatalogSource::Embedded => Self::embedded(),
            CatalogSource::File(path) => {
                let json = tokio::fs::read_to_string(path).await?;
                Self::from_json(&json)
            }
            CatalogSource::Url(url) => {
                let cards: Vec<Card> = reqwest::get(url)
                    .await?
                    .error_for_status()?
                    .json()
                    .await?;
                Self::new(cards)
            }
        }
    }

    /// Loads the catalog, falling back to an empty one with an error notice.
    pub async fn load(source: &CatalogSource) -> (Self, Option<Notice>) {
        match Self::fetch(source).await {
            Ok(catalog) => {
                tracing::info!("Loaded {} cards from {}", catalog.len(), source);
                (catalog, None)
            }
            Err(e) => {
                tracing::error!("Failed to load card data from {}: {}", source, e);
                (Self::empty(), Some(Notice::error(LOAD_FAILED_NOTICE)))
            }
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, name: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn first_duplicate(cards: &[Card]) -> Option<String> {
    let mut seen = HashSet::new();
    cards
        .iter()
        .find(|c| !seen.insert(c.name.as_str()))
        .map(|c| c.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAJOR_ARCANA;

    #[test]
    fn test_source_parsing() {
        assert_eq!(CatalogSource::parse(""), CatalogSource::Embedded);
        assert_eq!(CatalogSource::parse("embedded"), CatalogSource::Embedded);
        assert_eq!(
            CatalogSource::parse("https://example.com/cards.json"),
            CatalogSource::Url("https://example.com/cards.json".to_string())
        );
        assert_eq!(
            CatalogSource::parse("data/cards.json"),
            CatalogSource::File(PathBuf::from("data/cards.json"))
        );
    }

    #[test]
    fn test_embedded_catalog_has_every_major() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.len() >= DECK_SIZE);
        for name in MAJOR_ARCANA {
            assert!(catalog.get(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let json = r#"[
            {"name": "Шут", "image": "a.jpg", "meaning": "начало"},
            {"name": "Шут", "image": "b.jpg", "meaning": "свобода"}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateName(name)) if name == "Шут"
        ));
    }
}
