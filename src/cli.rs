//! Terminal front-end: screens, the interactive draw and history actions.
//!
//! Everything writes to a caller-supplied writer so stdout stays free of
//! log output and tests can capture the screens.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::app::{App, AppError};
use crate::models::*;
use crate::render;
use crate::screen::Screen;

const PREPARING: &str = "Готовим ваш расклад...";
const NO_SESSION: &str = "Нет активного выбора карт. Начните расклад командой `taro draw`.";
const NO_READING: &str = "Нет текущего предсказания. Начните расклад командой `taro draw`.";
const QUIT_COMMANDS: [&str; 3] = ["q", "quit", "exit"];

/// Renders one screen.
pub fn show_screen<W: Write, R: Rng + ?Sized>(
    app: &App,
    screen: Screen,
    out: &mut W,
    rng: &mut R,
) -> Result<()> {
    let text = match screen {
        Screen::Home => render::render_home(
            &app.spreads(),
            app.selected_spread()?.id,
            &app.recent_history()?,
        ),
        Screen::Cards => match app.session() {
            Some(view) => render::render_session(&view),
            None => format!("{}\n", NO_SESSION),
        },
        Screen::Reading => match app.reading_view(rng)? {
            Some(view) => render::render_reading(&view),
            None => format!("{}\n", NO_READING),
        },
        Screen::History => {
            let history = app.history()?;
            render::render_history(&history, &history.stats(Utc::now()))
        }
    };
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// What the user asked for at the selection prompt.
#[derive(Debug, PartialEq, Eq)]
enum Pick {
    Slot(usize),
    Name(String),
    Quit,
    Nothing,
}

fn parse_pick(line: &str) -> Pick {
    let line = line.trim();
    if line.is_empty() {
        Pick::Nothing
    } else if QUIT_COMMANDS.contains(&line.to_lowercase().as_str()) {
        Pick::Quit
    } else if let Ok(slot) = line.parse::<usize>() {
        Pick::Slot(slot)
    } else {
        Pick::Name(line.to_string())
    }
}

/// Runs a full draw: deal, pick until the spread is complete, record the
/// reading, pause, then show it.
///
/// `picks` are consumed before prompting on `input`. Returns `None` when the
/// user quits or input runs out before the spread is complete.
pub async fn draw<B: BufRead, W: Write, R: Rng + ?Sized>(
    app: &App,
    spread: Option<SpreadId>,
    picks: &[usize],
    delay: Duration,
    input: &mut B,
    out: &mut W,
    rng: &mut R,
) -> Result<Option<Reading>> {
    if let Some(id) = spread {
        app.select_spread(id)?;
    }
    let view = app.start_session(rng)?;
    out.write_all(render::render_session(&view).as_bytes())?;

    let mut queued = picks.iter().copied();
    let mut ready = view.ready;
    while !ready {
        let pick = match queued.next() {
            Some(slot) => Pick::Slot(slot),
            None => {
                write!(
                    out,
                    "Выберите карту (1-{}) или 'q' для выхода> ",
                    view.deck_size
                )?;
                out.flush()?;
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    writeln!(out)?;
                    return Ok(None);
                }
                parse_pick(&line)
            }
        };

        let selection = match pick {
            Pick::Slot(slot) => app.select_slot(slot),
            Pick::Name(name) => app.select_card(&name),
            Pick::Quit => return Ok(None),
            Pick::Nothing => continue,
        };

        match selection {
            Ok(selection) => {
                if let Some(card) = selection.outcome.card() {
                    out.write_all(render::render_card(card).as_bytes())?;
                }
                if let Some(notice) = &selection.notice {
                    out.write_all(render::render_notice(notice).as_bytes())?;
                }
                writeln!(
                    out,
                    "Выбрано: {} из {} {}",
                    selection.session.selected.len(),
                    selection.session.needed,
                    render::progress_bar(selection.session.progress, 20)
                )?;
                ready = selection.session.ready;
            }
            Err(e @ (AppError::SlotOutOfRange { .. } | AppError::NotInDeck(_))) => {
                out.write_all(render::render_notice(&Notice::error(e.to_string())).as_bytes())?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let reading = app.complete_reading(Utc::now())?;

    writeln!(out, "{}", PREPARING)?;
    out.flush()?;
    if !wait_or_cancel(delay).await {
        tracing::debug!("Reading delay skipped");
    }

    if let Some(view) = app.reading_view(rng)? {
        writeln!(out)?;
        out.write_all(render::render_reading(&view).as_bytes())?;
    }
    Ok(Some(reading))
}

/// Sleeps for `delay` unless Ctrl-C arrives first. Returns `false` when
/// cancelled.
pub async fn wait_or_cancel(delay: Duration) -> bool {
    if delay.is_zero() {
        return true;
    }
    tokio::select! {
        _ = tokio::time::sleep(delay) => true,
        _ = tokio::signal::ctrl_c() => false,
    }
}

/// Shows a history entry addressed by its 1-based position or its id, and
/// makes it the current reading.
pub fn view_history_entry<W: Write, R: Rng + ?Sized>(
    app: &App,
    target: &str,
    out: &mut W,
    rng: &mut R,
) -> Result<bool> {
    let id = match target.trim().parse::<usize>() {
        Ok(index) => {
            let history = app.history()?;
            index
                .checked_sub(1)
                .and_then(|i| history.readings().get(i))
                .map(|r| r.id)
        }
        Err(_) => Uuid::parse_str(target.trim()).ok(),
    };

    let Some(id) = id else {
        writeln!(out, "Предсказание не найдено: {}", target)?;
        return Ok(false);
    };
    if app.view_history_reading(id)?.is_none() {
        writeln!(out, "Предсказание не найдено: {}", target)?;
        return Ok(false);
    }
    show_screen(app, Screen::Reading, out, rng)?;
    Ok(true)
}

/// Clears history after confirmation (skipped with `assume_yes`).
pub fn clear_history<B: BufRead, W: Write>(
    app: &App,
    assume_yes: bool,
    input: &mut B,
    out: &mut W,
) -> Result<bool> {
    if !assume_yes {
        write!(
            out,
            "Очистить историю? Все сохраненные предсказания будут удалены безвозвратно. [y/N] "
        )?;
        out.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        if !matches!(line.trim().to_lowercase().as_str(), "y" | "yes" | "д" | "да") {
            writeln!(out, "Отмена")?;
            return Ok(false);
        }
    }

    let notice = app.clear_history()?;
    out.write_all(render::render_notice(&notice).as_bytes())?;
    Ok(true)
}

pub fn share<W: Write>(app: &App, out: &mut W) -> Result<bool> {
    match app.share_text()? {
        Some(text) => {
            writeln!(out, "{}", text)?;
            Ok(true)
        }
        None => {
            writeln!(out, "{}", NO_READING)?;
            Ok(false)
        }
    }
}

pub fn show_card<W: Write>(app: &App, name: &str, out: &mut W) -> Result<bool> {
    match app.card(name) {
        Some(card) => {
            out.write_all(render::render_card(&card).as_bytes())?;
            Ok(true)
        }
        None => {
            writeln!(out, "Карта не найдена: {}", name)?;
            Ok(false)
        }
    }
}
