//! Reading generation.
//!
//! Turns an ordered draw into three pieces of text:
//!
//! - a general interpretation framed by the share of major arcana,
//!   naming the central card (index `N / 2`) and the concluding card
//!   (index `N - 1`);
//! - one interpretation per card, labelled by its spread position;
//! - advice picked by a keyword tally, closed by a sentence about a
//!   randomly chosen card.
//!
//! Everything except the closing advice sentence is deterministic. The
//! random source is passed in so callers can pin it.

pub mod advice;
pub mod positions;

use rand::Rng;

use crate::models::{Card, CardInterpretation, Interpretation, Reading, SpreadId};

const MAJOR_THEME: &str = "Ваш расклад указывает на значительные жизненные события и уроки, так как в нем преобладают Старшие Арканы. ";
const MIXED_THEME: &str = "Ваш расклад затрагивает несколько ключевых аспектов вашей жизни. ";

/// Interprets a stored reading.
pub fn interpret_reading<R: Rng + ?Sized>(reading: &Reading, rng: &mut R) -> Interpretation {
    interpret(&reading.cards, reading.spread_type, rng)
}

pub fn interpret<R: Rng + ?Sized>(cards: &[Card], spread: SpreadId, rng: &mut R) -> Interpretation {
    Interpretation {
        general: general_interpretation(cards),
        cards: card_interpretations(cards, positions::labels(spread)),
        advice: advice::advice(cards, rng),
    }
}

/// Framing sentence plus the central and concluding cards.
///
/// An empty draw yields an empty string.
pub fn general_interpretation(cards: &[Card]) -> String {
    let Some(last) = cards.last() else {
        return String::new();
    };
    let central = &cards[cards.len() / 2];

    let majors = cards.iter().filter(|c| c.is_major_arcana()).count();
    // strictly more than half
    let theme = if majors * 2 > cards.len() {
        MAJOR_THEME
    } else {
        MIXED_THEME
    };

    format!(
        "{}Центральной темой является '{}', что говорит о важности {}. Расклад завершается картой '{}', указывая на исход, связанный с {}.",
        theme,
        central.name,
        central.meaning.to_lowercase(),
        last.name,
        last.meaning.to_lowercase()
    )
}

/// Zips position labels with cards, synthesizing labels past the list.
pub fn card_interpretations(cards: &[Card], labels: &[&str]) -> Vec<CardInterpretation> {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| CardInterpretation {
            position: positions::title(labels, i),
            name: card.name.clone(),
            image: card.image.clone(),
            text: card.interpretation().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn card(name: &str, meaning: &str) -> Card {
        Card {
            name: name.to_string(),
            image: format!("images/{}.jpg", name),
            meaning: meaning.to_string(),
            full_meaning: None,
        }
    }

    #[test]
    fn test_half_majors_is_not_enough() {
        let cards = vec![card("Шут", "Начало"), card("Туз Кубков", "Чувства")];
        assert!(general_interpretation(&cards).starts_with(MIXED_THEME));
    }

    #[test]
    fn test_majority_of_majors() {
        let cards = vec![
            card("Шут", "Начало"),
            card("Маг", "Воля"),
            card("Туз Кубков", "Чувства"),
        ];
        let text = general_interpretation(&cards);
        assert!(text.starts_with(MAJOR_THEME));
        assert!(text.contains("Центральной темой является 'Маг', что говорит о важности воля."));
        assert!(text.ends_with("завершается картой 'Туз Кубков', указывая на исход, связанный с чувства."));
    }

    #[test]
    fn test_empty_draw() {
        assert_eq!(general_interpretation(&[]), "");
    }

    #[test]
    fn test_interpret_uses_spread_labels() {
        let cards = vec![card("Шут", "начало, свобода")];
        let result = interpret(&cards, SpreadId::Single, &mut StepRng::new(0, 0));
        assert_eq!(result.cards[0].position, "Карта дня");
        assert_eq!(result.cards[0].text, "начало, свобода");
        assert!(result.advice.starts_with(advice::ENCOURAGING));
    }
}
