//! Reward table and duration helpers.
//!
//! Canonical presets pay a fixed amount. Any other duration is paid
//! pro rata at the one-hour rate, rounded down.

use serde::{Deserialize, Serialize};

const SECS_PER_HOUR: u64 = 3600;

/// Reward paid per hour for custom durations.
pub const HOURLY_RATE: u64 = 250;

/// One of the three canonical session lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    OneHour,
    TwoHours,
    ThreeHours,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::OneHour, Preset::TwoHours, Preset::ThreeHours];

    pub fn duration_secs(self) -> u64 {
        match self {
            Preset::OneHour => 3600,
            Preset::TwoHours => 7200,
            Preset::ThreeHours => 10800,
        }
    }

    pub fn reward(self) -> u64 {
        match self {
            Preset::OneHour => 250,
            Preset::TwoHours => 500,
            Preset::ThreeHours => 750,
        }
    }

    /// Exact match against a canonical duration.
    pub fn from_secs(secs: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.duration_secs() == secs)
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1h" | "1" => Ok(Preset::OneHour),
            "2h" | "2" => Ok(Preset::TwoHours),
            "3h" | "3" => Ok(Preset::ThreeHours),
            other => Err(format!("unknown preset '{other}' (expected 1h, 2h or 3h)")),
        }
    }
}

/// Reward earned for finishing a session of `duration_secs`.
pub fn compute_reward(duration_secs: u64) -> u64 {
    if let Some(preset) = Preset::from_secs(duration_secs) {
        return preset.reward();
    }
    let scaled = duration_secs as u128 * HOURLY_RATE as u128 / SECS_PER_HOUR as u128;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// `HH:MM:SS`, hours unbounded.
pub fn format_time(secs: u64) -> String {
    let hours = secs / SECS_PER_HOUR;
    let minutes = (secs % SECS_PER_HOUR) / 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parse free-form minutes text into whole seconds.
///
/// Accepts decimals ("12.5" is 750 seconds). Returns `None` for anything
/// that is not a finite positive number or that rounds down to zero seconds.
pub fn parse_custom_minutes(input: &str) -> Option<u64> {
    let minutes: f64 = input.trim().parse().ok()?;
    if !minutes.is_finite() || minutes <= 0.0 {
        return None;
    }
    let secs = (minutes * 60.0).floor();
    if secs < 1.0 || secs > u64::MAX as f64 {
        return None;
    }
    Some(secs as u64)
}
