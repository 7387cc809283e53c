//! Keyword-tally advice with one randomized closing sentence.

use rand::Rng;

use crate::models::Card;

const POSITIVE_KEYWORDS: [&str; 7] = [
    "успех", "радость", "надежда", "сила", "гармония", "начало", "любовь",
];

const CHALLENGING_KEYWORDS: [&str; 6] = [
    "разрушение",
    "иллюзия",
    "зависимость",
    "жертва",
    "конец",
    "препятствие",
];

pub const ENCOURAGING: &str = "Расклад в целом благоприятен. Карты советуют вам действовать смело и с оптимизмом. Доверяйте своим силам и идите к цели, сейчас для этого подходящее время.";

pub const CAUTIONARY: &str = "Карты указывают на наличие трудностей. Вам рекомендуется проявить осторожность, терпение и мудрость. Не торопите события и обдумайте каждый шаг. Это время для внутренней работы и преодоления препятствий.";

pub const BALANCED: &str = "Ситуация неоднозначна и требует баланса. Сочетайте решительные действия с обдуманностью. Прислушивайтесь к своей интуиции, но не забывайте о логике. Гармония между этими аспектами приведет вас к успеху.";

/// Number of cards whose meaning hits each keyword set.
///
/// A card counts at most once per set, no matter how many keywords match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub positive: usize,
    pub challenging: usize,
}

impl Tally {
    pub fn of(cards: &[Card]) -> Self {
        cards.iter().fold(Self::default(), |mut tally, card| {
            let meaning = card.meaning.to_lowercase();
            if POSITIVE_KEYWORDS.iter().any(|kw| meaning.contains(kw)) {
                tally.positive += 1;
            }
            if CHALLENGING_KEYWORDS.iter().any(|kw| meaning.contains(kw)) {
                tally.challenging += 1;
            }
            tally
        })
    }

    pub fn paragraph(&self) -> &'static str {
        match self.positive.cmp(&self.challenging) {
            std::cmp::Ordering::Greater => ENCOURAGING,
            std::cmp::Ordering::Less => CAUTIONARY,
            std::cmp::Ordering::Equal => BALANCED,
        }
    }
}

/// Base paragraph chosen by the keyword tally.
pub fn base_paragraph(cards: &[Card]) -> &'static str {
    Tally::of(cards).paragraph()
}

/// Number of closing-sentence phrasings.
const TEMPLATES: usize = 2;

/// Closing sentence about one randomly picked card, in a randomly picked phrasing.
pub fn closing_sentence<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Option<String> {
    if cards.is_empty() {
        return None;
    }

    let card = &cards[rng.gen_range(0..cards.len())];
    let template = rng.gen_range(0..TEMPLATES);
    Some(phrase(card, template))
}

/// Renders closing phrasing `template` for `card`.
///
/// The first phrasing quotes the first comma segment of the meaning,
/// the second quotes the second segment, or the first when there is none.
pub fn phrase(card: &Card, template: usize) -> String {
    // Segments are trimmed and a blank second segment counts as missing, so
    // "Начало, свобода" reads "...: свобода." with a single space.
    let mut segments = card.meaning.split(',').map(str::trim);
    let first = segments.next().unwrap_or_default();
    let second = segments.next().filter(|s| !s.is_empty()).unwrap_or(first);

    if template % TEMPLATES == 0 {
        format!(
            "Особенно обратите внимание на карту '{}', которая призывает к {}.",
            card.name,
            first.to_lowercase()
        )
    } else {
        format!("Ключевой совет дает карта '{}': {}.", card.name, second)
    }
}

/// Full advice text: the tally paragraph followed by the closing sentence.
pub fn advice<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> String {
    let base = base_paragraph(cards);
    match closing_sentence(cards, rng) {
        Some(sentence) => format!("{} {}", base, sentence),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn card(name: &str, meaning: &str) -> Card {
        Card {
            name: name.to_string(),
            image: String::new(),
            meaning: meaning.to_string(),
            full_meaning: None,
        }
    }

    #[test]
    fn test_card_counts_once_per_set() {
        let cards = vec![card("Солнце", "Успех, радость, любовь")];
        assert_eq!(
            Tally::of(&cards),
            Tally {
                positive: 1,
                challenging: 0
            }
        );
    }

    #[test]
    fn test_card_can_count_for_both_sets() {
        let cards = vec![card("Смерть", "конец, новое начало")];
        assert_eq!(
            Tally::of(&cards),
            Tally {
                positive: 1,
                challenging: 1
            }
        );
        assert_eq!(base_paragraph(&cards), BALANCED);
    }

    #[test]
    fn test_challenging_wins() {
        let cards = vec![
            card("Башня", "разрушение, потрясение"),
            card("Луна", "иллюзия, страх"),
            card("Звезда", "надежда"),
        ];
        assert_eq!(base_paragraph(&cards), CAUTIONARY);
    }

    #[test]
    fn test_closing_sentence_with_pinned_rng() {
        let cards = vec![card("Шут", "Начало, свобода"), card("Маг", "воля")];
        let mut rng = StepRng::new(0, 0);
        assert_eq!(
            closing_sentence(&cards, &mut rng).unwrap(),
            "Особенно обратите внимание на карту 'Шут', которая призывает к начало."
        );
    }

    #[test]
    fn test_second_phrasing_quotes_second_segment() {
        assert_eq!(
            phrase(&card("Шут", "Начало, свобода"), 1),
            "Ключевой совет дает карта 'Шут': свобода."
        );
    }

    #[test]
    fn test_second_phrasing_falls_back_to_first_segment() {
        assert_eq!(
            phrase(&card("Маг", "Воля"), 1),
            "Ключевой совет дает карта 'Маг': Воля."
        );
        assert_eq!(
            phrase(&card("Маг", "Воля,"), 1),
            "Ключевой совет дает карта 'Маг': Воля."
        );
    }

    #[test]
    fn test_empty_draw_gets_bare_paragraph() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(advice(&[], &mut rng), BALANCED);
    }
}
