use crate::countdown::RemainingDuration;
use crate::location::models::LocationTime;
use anyhow::{Context, Result};
use crossterm::{
    cursor, execute, queue,
    style::{Print, Stylize},
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use serde::Serialize;
use std::io::{Stdout, Write, stdout};

pub const LOADING_TEXT: &str = "Loading prayer times...";

const HEADER_TITLE: &str = "Ramadan Mubarak";
const HEADER_SUBTITLE: &str = "May this holy month bring peace and blessings";
const FOOTER_BLESSING: &str = "May your fasting be accepted";
const FOOTER_ARABIC: &str = "تقبل الله منا ومنكم";

/// What the screen shows. Exactly one variant at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum DisplayState {
    Loading,
    Error(String),
    Ready(ReadyView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadyView {
    pub remaining: RemainingDuration,
    /// Maghrib exactly as the prayer-times service returned it
    pub maghrib: String,
    pub message: &'static str,
    pub location: LocationTime,
}

impl DisplayState {
    /// Loading may resolve once; errors are final; ready only refreshes.
    pub fn can_transition_to(&self, next: &DisplayState) -> bool {
        matches!(
            (self, next),
            (DisplayState::Loading, DisplayState::Error(_))
                | (DisplayState::Loading, DisplayState::Ready(_))
                | (DisplayState::Ready(_), DisplayState::Ready(_))
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            DisplayState::Loading => "loading",
            DisplayState::Error(_) => "error",
            DisplayState::Ready(_) => "ready",
        }
    }
}

pub fn render_lines(state: &DisplayState) -> Vec<String> {
    match state {
        DisplayState::Loading => vec![LOADING_TEXT.to_string()],
        DisplayState::Error(message) => vec![message.clone()],
        DisplayState::Ready(view) => render_ready(view),
    }
}

fn render_ready(view: &ReadyView) -> Vec<String> {
    let remaining = &view.remaining;
    let location = &view.location;

    let timezone = match &location.utc_offset {
        Some(offset) => format!("Timezone: {} ({})", location.timezone, offset),
        None => format!("Timezone: {}", location.timezone),
    };

    vec![
        HEADER_TITLE.to_string(),
        HEADER_SUBTITLE.to_string(),
        String::new(),
        "Time Until Maghrib".to_string(),
        format!(
            "{:>4} Hours  {:>2} Minutes  {:>2} Seconds",
            remaining.hours, remaining.minutes, remaining.seconds
        ),
        String::new(),
        format!("Maghrib Prayer: {}", view.maghrib),
        String::new(),
        view.message.to_string(),
        String::new(),
        format!("Location: {}, {}", location.city, location.country),
        timezone,
        String::new(),
        FOOTER_BLESSING.to_string(),
        FOOTER_ARABIC.to_string(),
    ]
}

/// Full-screen, redraw-in-place renderer on stdout.
pub struct TerminalDisplay {
    out: Stdout,
    active: bool,
}

impl TerminalDisplay {
    pub fn enter() -> Result<Self> {
        let mut out = stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter alternate screen")?;
        Ok(Self { out, active: true })
    }

    pub fn draw(&mut self, state: &DisplayState) -> Result<()> {
        queue!(
            self.out,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;

        for line in render_lines(state) {
            match state {
                DisplayState::Error(_) => queue!(self.out, Print(line.red().bold()))?,
                DisplayState::Loading => queue!(self.out, Print(line.yellow()))?,
                DisplayState::Ready(view) if line == view.message => {
                    queue!(self.out, Print(line.bold()))?
                }
                DisplayState::Ready(_) => queue!(self.out, Print(line))?,
            }
            queue!(self.out, cursor::MoveToNextLine(1))?;
        }

        self.out.flush().context("Failed to flush terminal")?;
        Ok(())
    }

    pub fn leave(mut self) -> Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            execute!(self.out, LeaveAlternateScreen, cursor::Show)
                .context("Failed to restore terminal")?;
        }
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::warn!("terminal not restored: {:#}", e);
        }
    }
}
