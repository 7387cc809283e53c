use serde::{Deserialize, Serialize};

/// The 22 canonical major-arcana names.
///
/// A card counts as major when its name is in this list; the reading
/// generator uses the share of majors to frame the whole draw.
pub const MAJOR_ARCANA: [&str; 22] = [
    "Шут",
    "Маг",
    "Жрица",
    "Императрица",
    "Император",
    "Жрец",
    "Влюбленные",
    "Колесница",
    "Сила",
    "Отшельник",
    "Колесо Фортуны",
    "Справедливость",
    "Повешенный",
    "Смерть",
    "Умеренность",
    "Дьявол",
    "Башня",
    "Звезда",
    "Луна",
    "Солнце",
    "Суд",
    "Мир",
];

/// A single tarot card from the catalog.
///
/// The name is unique within a catalog and doubles as the card's identifier.
/// `meaning` is a short comma-separated list of keywords; `full_meaning` is
/// the optional long-form text shown on the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub image: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_meaning: Option<String>,
}

impl Card {
    pub fn is_major_arcana(&self) -> bool {
        MAJOR_ARCANA.contains(&self.name.as_str())
    }

    /// Long-form meaning when the catalog provides one, otherwise the short one.
    pub fn interpretation(&self) -> &str {
        self.full_meaning.as_deref().unwrap_or(&self.meaning)
    }
}
