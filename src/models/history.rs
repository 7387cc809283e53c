use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reading::Reading;

/// Maximum number of readings kept in history.
pub const HISTORY_LIMIT: usize = 10;

/// Longest favorite-spread name shown before it is shortened.
const FAVORITE_NAME_MAX_CHARS: usize = 8;

/// Past readings, newest first, never longer than [`HISTORY_LIMIT`].
///
/// History only changes through [`History::push`] and [`History::clear`].
/// It serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<Reading>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reading at the front, dropping the oldest entry past the cap.
    pub fn push(&mut self, reading: Reading) {
        self.0.insert(0, reading);
        self.0.truncate(HISTORY_LIMIT);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn readings(&self) -> &[Reading] {
        &self.0
    }

    pub fn newest(&self) -> Option<&Reading> {
        self.0.first()
    }

    pub fn recent(&self, n: usize) -> &[Reading] {
        &self.0[..n.min(self.0.len())]
    }

    pub fn find(&self, id: uuid::Uuid) -> Option<&Reading> {
        self.0.iter().find(|r| r.id == id)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> HistoryStats {
        HistoryStats {
            total: self.len(),
            favorite_spread: self.favorite_spread(),
            days_since_last: self.newest().map(|r| (now - r.date).num_days()),
        }
    }

    /// Most frequent spread name. Ties go to the name seen last in
    /// first-appearance order.
    fn favorite_spread(&self) -> Option<String> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for reading in &self.0 {
            match counts.iter_mut().find(|(name, _)| *name == reading.spread_name) {
                Some((_, count)) => *count += 1,
                None => counts.push((&reading.spread_name, 1)),
            }
        }

        let (name, _) = counts
            .into_iter()
            .reduce(|best, next| if best.1 > next.1 { best } else { next })?;

        if name.chars().count() > FAVORITE_NAME_MAX_CHARS {
            let short: String = name.chars().take(FAVORITE_NAME_MAX_CHARS).collect();
            Some(format!("{}...", short))
        } else {
            Some(name.to_string())
        }
    }
}

impl From<Vec<Reading>> for History {
    fn from(mut readings: Vec<Reading>) -> Self {
        readings.truncate(HISTORY_LIMIT);
        Self(readings)
    }
}

/// Summary numbers shown above the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total: usize,
    pub favorite_spread: Option<String>,
    pub days_since_last: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Card, SpreadId};
    use chrono::Duration;

    fn reading(spread: SpreadId, date: DateTime<Utc>) -> Reading {
        let spread = spread.spread();
        let cards = (0..spread.cards)
            .map(|i| Card {
                name: format!("Карта {}", i),
                image: String::new(),
                meaning: "сила".to_string(),
                full_meaning: None,
            })
            .collect();
        Reading::new(&spread, cards, date).unwrap()
    }

    #[test]
    fn test_push_keeps_newest_first() {
        let mut history = History::new();
        let first = reading(SpreadId::Single, Utc::now());
        let second = reading(SpreadId::Love, Utc::now());
        history.push(first.clone());
        history.push(second.clone());
        assert_eq!(history.readings(), &[second, first]);
    }

    #[test]
    fn test_push_drops_oldest_past_limit() {
        let mut history = History::new();
        let mut pushed = Vec::new();
        for _ in 0..HISTORY_LIMIT {
            let r = reading(SpreadId::Single, Utc::now());
            pushed.push(r.clone());
            history.push(r);
        }
        let oldest = pushed[0].id;
        let newest = reading(SpreadId::Career, Utc::now());
        history.push(newest.clone());

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.readings()[0].id, newest.id);
        assert!(history.find(oldest).is_none());
    }

    #[test]
    fn test_stats_on_empty_history() {
        let stats = History::new().stats(Utc::now());
        assert_eq!(
            stats,
            HistoryStats {
                total: 0,
                favorite_spread: None,
                days_since_last: None
            }
        );
    }

    #[test]
    fn test_favorite_spread_is_shortened() {
        let mut history = History::new();
        history.push(reading(SpreadId::Celtic, Utc::now()));
        history.push(reading(SpreadId::Celtic, Utc::now()));
        history.push(reading(SpreadId::Career, Utc::now()));

        let stats = history.stats(Utc::now());
        assert_eq!(stats.favorite_spread.as_deref(), Some("Кельтски..."));
    }

    #[test]
    fn test_favorite_spread_tie_goes_to_later_name() {
        let mut history = History::new();
        history.push(reading(SpreadId::Single, Utc::now()));
        history.push(reading(SpreadId::Career, Utc::now()));

        // newest first: Карьера appears first, Карта дня second
        let stats = history.stats(Utc::now());
        assert_eq!(stats.favorite_spread.as_deref(), Some("Карта дн..."));
    }

    #[test]
    fn test_days_since_last_reading() {
        let now = Utc::now();
        let mut history = History::new();
        history.push(reading(SpreadId::Single, now - Duration::days(5)));
        history.push(reading(SpreadId::Single, now - Duration::hours(50)));

        assert_eq!(history.stats(now).days_since_last, Some(2));
    }

    #[test]
    fn test_from_vec_enforces_limit() {
        let readings: Vec<Reading> = (0..15)
            .map(|_| reading(SpreadId::Single, Utc::now()))
            .collect();
        assert_eq!(History::from(readings).len(), HISTORY_LIMIT);
    }
}
