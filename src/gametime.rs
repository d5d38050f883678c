//! Shared pro-team game-time knowledge and play-status resolution.
//!
//! ESPN reports a game time and completion state per player; Sleeper reports
//! neither. Within one aggregation call every successfully resolved game
//! time is recorded here under the pro team's canonical code, so players
//! from platforms without native schedule data can borrow it.

use crate::model::PlayStatus;
use crate::types::time::GameTime;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};


/// Call-scoped map from canonical pro-team code to (game time, completed).
///
/// Shared via `Arc` across the concurrent league fetches of a single
/// aggregation call and never persisted beyond it. First write wins: every
/// writer derives the same fact for a given pro team, so later inserts are
/// redundant.
#[derive(Debug, Default)]
pub struct ProTeamGameCache {
    inner: Mutex<HashMap<String, (GameTime, bool)>>,
}

impl ProTeamGameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pro team's game time and completion flag, keeping any
    /// existing entry.
    pub fn record(&self, pro_team: &str, game_time: GameTime, completed: bool) {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.entry(pro_team.to_string())
            .or_insert((game_time, completed));
    }

    /// Look up a pro team's game state, if any player has reported it yet.
    pub fn lookup(&self, pro_team: &str) -> Option<(GameTime, bool)> {
        let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.get(pro_team).copied()
    }
}

/// Resolve a player's play status from fixed inputs.
///
/// Bye weeks and unknown game times both resolve to `Future`; the
/// distinction only matters for display.
pub fn resolve(
    now: DateTime<FixedOffset>,
    game_time: GameTime,
    completed: bool,
) -> PlayStatus {
    match game_time {
        GameTime::Bye | GameTime::Unknown => PlayStatus::Future,
        GameTime::At(kickoff) => {
            if now < kickoff {
                PlayStatus::Future
            } else if completed {
                PlayStatus::Played
            } else {
                PlayStatus::Playing
            }
        }
    }
}
