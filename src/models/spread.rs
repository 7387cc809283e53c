use serde::{Deserialize, Serialize};

/// Identifier of one of the fixed spread layouts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpreadId {
    #[default]
    Single,
    Celtic,
    Love,
    Career,
}

impl SpreadId {
    pub const ALL: [SpreadId; 4] = [Self::Single, Self::Celtic, Self::Love, Self::Career];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Celtic => "celtic",
            Self::Love => "love",
            Self::Career => "career",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "single" => Some(Self::Single),
            "celtic" => Some(Self::Celtic),
            "love" => Some(Self::Love),
            "career" => Some(Self::Career),
            _ => None,
        }
    }

    pub fn spread(&self) -> Spread {
        match self {
            Self::Single => Spread {
                id: *self,
                name: "Карта дня",
                description: "Быстрое предсказание на день",
                icon: "🌟",
                cards: 1,
            },
            Self::Celtic => Spread {
                id: *self,
                name: "Кельтский крест",
                description: "Полный анализ ситуации",
                icon: "✨",
                cards: 10,
            },
            Self::Love => Spread {
                id: *self,
                name: "Отношения",
                description: "Анализ любовных отношений",
                icon: "💕",
                cards: 6,
            },
            Self::Career => Spread {
                id: *self,
                name: "Карьера",
                description: "Профессиональные перспективы",
                icon: "💼",
                cards: 7,
            },
        }
    }
}

impl std::fmt::Display for SpreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named layout: how many cards a reading uses and how it is presented.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Spread {
    pub id: SpreadId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Number of cards the user must select.
    pub cards: usize,
}

/// All spreads in display order.
pub fn all_spreads() -> Vec<Spread> {
    SpreadId::ALL.iter().map(SpreadId::spread).collect()
}
