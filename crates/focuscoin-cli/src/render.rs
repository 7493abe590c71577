//! Terminal rendering for session events.

use std::io::Write;

use focuscoin_core::{format_time, Event, SessionTimer, Scheduler, TimerState};

/// Text shown when a session finishes.
pub fn celebration(symbol: &str, reward: u64, total_secs: u64) -> String {
    let hours = total_secs as f64 / 3600.0;
    format!("Congratulations! You earned {symbol} {reward} for completing {hours:.2} hour session.")
}

pub struct Output {
    json: bool,
    symbol: String,
}

impl Output {
    pub fn new(json: bool, symbol: impl Into<String>) -> Self {
        Self {
            json,
            symbol: symbol.into(),
        }
    }

    pub fn event(&self, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }
        match event {
            Event::SessionStarted {
                task_label,
                total_secs,
                ..
            } => {
                let label = if task_label.is_empty() { "(untitled)" } else { task_label.as_str() };
                println!("Focus: {label} for {}", format_time(*total_secs));
                println!("Commands: p = pause, r = resume, x = exit");
            }
            Event::SessionPaused { remaining_secs, .. } => {
                println!("\nPaused at {}", format_time(*remaining_secs));
            }
            Event::SessionResumed { .. } => println!("Resumed"),
            Event::SessionCompleted {
                reward, total_secs, ..
            } => {
                println!("\n{}", celebration(&self.symbol, *reward, *total_secs));
            }
            Event::SessionExited { .. } => println!("\nSession exited"),
            Event::RewardCredited {
                balance,
                persist_error,
                ..
            } => {
                println!("Total earnings: {} {balance}", self.symbol);
                if let Some(err) = persist_error {
                    eprintln!("warning: balance not saved: {err}");
                }
            }
        }
        Ok(())
    }

    /// Redraw the countdown line in place.
    pub fn progress<S: Scheduler>(&self, timer: &SessionTimer<S>) {
        if self.json || timer.state() != TimerState::Running {
            return;
        }
        print!("\r⏱  {}", format_time(timer.remaining_secs()));
        let _ = std::io::stdout().flush();
    }
}
