//! Plain-text rendering of the screens for the terminal.

use crate::app::SessionView;
use crate::models::*;

const CLOSED: char = '◇';
const OPENED: char = '●';
const SLOTS_PER_ROW: usize = 6;
const PROGRESS_WIDTH: usize = 20;

fn notice_symbol(kind: NoticeKind) -> char {
    match kind {
        NoticeKind::Info => 'ℹ',
        NoticeKind::Success => '✓',
        NoticeKind::Error => '✗',
    }
}

fn format_date(reading: &Reading) -> String {
    reading.date.format("%d.%m.%Y").to_string()
}

pub fn render_notice(notice: &Notice) -> String {
    format!("{} {}\n", notice_symbol(notice.kind), notice.text)
}

/// `[########............]` for a progress between 0.0 and 1.0.
pub fn progress_bar(progress: f32, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// Home screen: available spreads and the most recent readings.
///
/// Example output:
/// ```text
/// Taro — Откройте тайны судьбы
///
/// Доступные расклады
///  🌟 single  Карта дня (1 карт) — Быстрое предсказание на день
/// *✨ celtic  Кельтский крест (10 карт) — Полный анализ ситуации
/// ```
pub fn render_home(spreads: &[Spread], selected: SpreadId, recent: &[Reading]) -> String {
    let mut output = String::from("Taro — Откройте тайны судьбы\n\nДоступные расклады\n");
    for spread in spreads {
        let marker = if spread.id == selected { '*' } else { ' ' };
        output.push_str(&format!(
            "{}{} {:<7} {} ({} карт) — {}\n",
            marker,
            spread.icon,
            spread.id.as_str(),
            spread.name,
            spread.cards,
            spread.description
        ));
    }

    output.push_str("\nИстория предсказаний\n");
    if recent.is_empty() {
        output.push_str("  История предсказаний появится здесь\n");
    }
    for reading in recent {
        output.push_str(&format!(
            "  {}  {}  {} карт\n",
            format_date(reading),
            reading.spread_name,
            reading.cards.len()
        ));
    }
    output
}

/// Card-selection screen: progress and the face-down slots.
pub fn render_session(view: &SessionView) -> String {
    let mut output = format!(
        "Выбор карт — {}\nНеобходимо выбрать: {}\nВыбрано: {}\n{}\n\n",
        view.spread.name,
        view.needed,
        view.selected.len(),
        progress_bar(view.progress, PROGRESS_WIDTH)
    );

    for slot in 1..=view.deck_size {
        let symbol = if view.opened_slots.contains(&slot) {
            OPENED
        } else {
            CLOSED
        };
        output.push_str(&format!("{} {:>2}", symbol, slot));
        if slot % SLOTS_PER_ROW == 0 || slot == view.deck_size {
            output.push('\n');
        } else {
            output.push_str("   ");
        }
    }

    if !view.selected.is_empty() {
        let names: Vec<&str> = view.selected.iter().map(|c| c.name.as_str()).collect();
        output.push_str(&format!("\nВыбранные карты: {}\n", names.join(", ")));
    }
    output
}

/// Card detail view.
pub fn render_card(card: &Card) -> String {
    format!("{}\n{}\n", card.name, card.interpretation())
}

/// Reading screen: drawn cards, general text, per-position text, advice.
pub fn render_reading(view: &ReadingView) -> String {
    let reading = &view.reading;
    let interpretation = &view.interpretation;

    let mut output = format!("{} — {}\n\n", reading.spread_name, format_date(reading));
    for (i, card) in reading.cards.iter().enumerate() {
        output.push_str(&format!("{:>2}. {}\n", i + 1, card.name));
    }

    output.push_str("\nОбщее толкование\n");
    output.push_str(&interpretation.general);
    output.push_str("\n\nЗначение карт\n");
    for card in &interpretation.cards {
        output.push_str(&format!("{}\n  {}: {}\n", card.position, card.name, card.text));
    }

    output.push_str("\nСовет\n");
    output.push_str(&interpretation.advice);
    output.push('\n');
    output
}

/// History screen: stats header and one line per reading.
pub fn render_history(history: &History, stats: &HistoryStats) -> String {
    let mut output = String::from("История предсказаний\n\n");
    output.push_str(&format!(
        "Всего: {}   Любимый: {}   Дней назад: {}\n\n",
        stats.total,
        stats.favorite_spread.as_deref().unwrap_or("-"),
        stats
            .days_since_last
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));

    if history.is_empty() {
        output.push_str("Нет предсказаний\nСделайте свой первый расклад, чтобы увидеть историю\n");
        return output;
    }

    for (i, reading) in history.readings().iter().enumerate() {
        output.push_str(&format!(
            "{:>2}. {}  {}  {} карт  [{}]\n    {}\n",
            i + 1,
            reading.spread_name,
            format_date(reading),
            reading.cards.len(),
            reading.id,
            reading.card_names().join(", ")
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn card(name: &str) -> Card {
        Card {
            name: name.to_string(),
            image: String::new(),
            meaning: "Начало, свобода".to_string(),
            full_meaning: None,
        }
    }

    fn single_reading() -> Reading {
        let date = Utc.with_ymd_and_hms(2025, 3, 8, 12, 0, 0).unwrap();
        Reading::new(&SpreadId::Single.spread(), vec![card("Шут")], date).unwrap()
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[....]");
        assert_eq!(progress_bar(0.5, 4), "[##..]");
        assert_eq!(progress_bar(1.5, 4), "[####]");
    }

    #[test]
    fn test_home_marks_selected_spread() {
        let output = render_home(&all_spreads(), SpreadId::Love, &[]);
        assert!(output.contains("*💕 love"));
        assert!(output.contains("История предсказаний появится здесь"));
    }

    #[test]
    fn test_session_marks_opened_slots() {
        let view = SessionView {
            spread: SpreadId::Love.spread(),
            needed: 6,
            selected: vec![card("Шут")],
            opened_slots: vec![2],
            deck_size: 7,
            progress: 1.0 / 6.0,
            ready: false,
        };
        let output = render_session(&view);
        assert!(output.contains("◇  1   ●  2   ◇  3"));
        assert!(output.contains("Выбранные карты: Шут"));
        assert!(output.ends_with("◇  7\n\nВыбранные карты: Шут\n"));
    }

    #[test]
    fn test_empty_history() {
        let output = render_history(&History::new(), &History::new().stats(Utc::now()));
        assert!(output.contains("Всего: 0   Любимый: -   Дней назад: -"));
        assert!(output.contains("Нет предсказаний"));
    }

    #[test]
    fn test_reading_sections() {
        let view = ReadingView {
            reading: single_reading(),
            interpretation: Interpretation {
                general: "Общее".to_string(),
                cards: vec![CardInterpretation {
                    position: "Карта дня".to_string(),
                    name: "Шут".to_string(),
                    image: String::new(),
                    text: "Начало, свобода".to_string(),
                }],
                advice: "Совет дня".to_string(),
            },
        };
        let output = render_reading(&view);
        assert!(output.starts_with("Карта дня — 08.03.2025\n\n 1. Шут\n"));
        assert!(output.contains("Карта дня\n  Шут: Начало, свобода\n"));
        assert!(output.ends_with("Совет\nСовет дня\n"));
    }
}
