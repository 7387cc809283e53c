//! Position labels for each spread.

use crate::models::SpreadId;

const SINGLE: &[&str] = &["Карта дня"];

const CELTIC: &[&str] = &[
    "1. Настоящий момент",
    "2. Препятствие",
    "3. Основа ситуации",
    "4. Недавнее прошлое",
    "5. Возможный исход",
    "6. Ближайшее будущее",
    "7. Ваше отношение",
    "8. Внешние влияния",
    "9. Надежды и страхи",
    "10. Окончательный итог",
];

const LOVE: &[&str] = &[
    "1. Ваша роль",
    "2. Роль партнера",
    "3. Суть отношений",
    "4. Что укрепляет союз",
    "5. Что ослабляет союз",
    "6. Перспектива",
];

const CAREER: &[&str] = &[
    "1. Текущая позиция",
    "2. Ваши амбиции",
    "3. Препятствия",
    "4. Ваши сильные стороны",
    "5. Что нужно развить",
    "6. Следующий шаг",
    "7. Потенциальный результат",
];

/// Ordered position labels for a spread.
pub fn labels(spread: SpreadId) -> &'static [&'static str] {
    match spread {
        SpreadId::Single => SINGLE,
        SpreadId::Celtic => CELTIC,
        SpreadId::Love => LOVE,
        SpreadId::Career => CAREER,
    }
}

/// Label for the card at `index`, synthesized when the list runs out.
pub fn title(labels: &[&str], index: usize) -> String {
    match labels.get(index) {
        Some(label) => label.to_string(),
        None => format!("Позиция {}", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lists_match_card_counts() {
        for id in SpreadId::ALL {
            assert_eq!(labels(id).len(), id.spread().cards, "spread {}", id);
        }
    }

    #[test]
    fn test_title_falls_back_past_the_list() {
        assert_eq!(title(SINGLE, 0), "Карта дня");
        assert_eq!(title(SINGLE, 1), "Позиция 2");
        assert_eq!(title(&[], 0), "Позиция 1");
    }
}
