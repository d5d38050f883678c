//! Season/week types and the single reference time zone.
//!
//! All game times and "now" comparisons happen in fixed US Central time so
//! that play-status resolution is a pure function of its inputs.

use crate::error::{CommanderError, Result};
use chrono::{DateTime, Datelike, Duration, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for season years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The season in progress at `now`. January and February still belong
    /// to the previous calendar year's season.
    pub fn current_at(now: DateTime<FixedOffset>) -> Self {
        let year = now.year() as u16;
        if now.month() < 3 {
            Self(year - 1)
        } else {
            Self(year)
        }
    }

    pub fn current() -> Self {
        Self::current_at(now_central())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = CommanderError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for week numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = CommanderError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// A player's scheduled game time in the reference time zone.
///
/// `Bye` (no game this week) and `Unknown` (no schedule information yet)
/// are distinct sentinels: byes display as `"BYE"`, unknown as `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameTime {
    At(DateTime<FixedOffset>),
    Bye,
    Unknown,
}

/// The fixed US Central reference offset (UTC-5).
pub fn central() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).expect("UTC-5 is in range")
}

/// "Now" in the reference time zone.
///
/// The offset stays on daylight time year-round, so once standard time
/// begins in November an hour is subtracted to keep game-time comparisons
/// aligned with the wall clock.
pub fn now_central() -> DateTime<FixedOffset> {
    let now = Utc::now().with_timezone(&central());
    if now.month() >= 11 && now.day() >= 5 {
        now - Duration::hours(1)
    } else {
        now
    }
}

/// Kickoff Tuesday for a season; week N covers the N-th seven-day window
/// from here.
pub fn season_start(season: Season) -> DateTime<FixedOffset> {
    central()
        .with_ymd_and_hms(season.as_u16() as i32, 9, 5, 0, 0, 0)
        .single()
        .expect("fixed-offset dates are unambiguous")
}

/// The NFL week in progress at `now`, clamped to at least week 1.
pub fn current_week_at(now: DateTime<FixedOffset>) -> Week {
    let delta = now - season_start(Season::current_at(now));
    let week = delta.num_days() / 7 + 1;
    Week(week.max(1) as u16)
}

pub fn current_week() -> Week {
    current_week_at(now_central())
}
