use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use parking_lot::Mutex;

use eggrs_core::ReactionConfig;

/// What the status line currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerState {
    pub message: Option<String>,
    pub background: Option<String>,
    /// Bumped on every show, so a stale hide timer leaves a newer banner alone
    generation: u64,
}

impl BannerState {
    /// Apply a reaction; returns the generation to hand to a hide timer
    pub fn show(&mut self, reaction: &ReactionConfig) -> u64 {
        self.generation += 1;
        if reaction.message.is_some() {
            self.message = reaction.message.clone();
        }
        if reaction.background.is_some() {
            self.background = reaction.background.clone();
        }
        self.generation
    }

    /// Hide the banner if nothing newer was shown since `generation`
    pub fn hide_if_current(&mut self, generation: u64) -> bool {
        if self.generation != generation || self.message.is_none() {
            return false;
        }
        self.message = None;
        true
    }
}

/// Write the status line for `state`
pub fn render<W: Write>(out: &mut W, state: &BannerState) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    let mut line = String::new();
    if let Some(background) = &state.background {
        line.push_str(&format!("[bg: {}] ", background));
    }
    match &state.message {
        Some(message) => line.push_str(message),
        None => line.push_str("type away... (Ctrl-C to quit)"),
    }
    queue!(out, Print(line))?;
    out.flush()
}

/// Shared banner, updated by reactions and by hide timers
#[derive(Clone, Default)]
pub struct Banner {
    state: Arc<Mutex<BannerState>>,
}

impl Banner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BannerState {
        self.state.lock().clone()
    }

    pub fn redraw(&self) {
        let state = self.state.lock();
        if let Err(e) = render(&mut io::stdout(), &state) {
            log::warn!("Failed to draw banner: {}", e);
        }
    }

    /// Run a configured reaction: banner, bell, and an optional timed hide
    pub fn react(&self, reaction: &ReactionConfig) {
        let generation = self.state.lock().show(reaction);
        if reaction.bell {
            print!("\x07");
        }
        self.redraw();

        if let Some(ms) = reaction.hide_after_ms {
            let banner = self.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(ms));
                if banner.state.lock().hide_if_current(generation) {
                    banner.redraw();
                }
            });
        }
    }
}
