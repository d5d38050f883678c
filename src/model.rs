//! Canonical player/team/matchup model every platform normalizes into.

use crate::platforms::Platform;
use crate::types::ids::TeamId;
use crate::types::position::Position;
use crate::types::time::{GameTime, Week};
use serde::Serialize;

/// Whether a player's game this week is upcoming, underway, or finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayStatus {
    Future,
    Playing,
    Played,
}

/// Health/attention flag attached to each player.
///
/// `Warning` marks a healthy player whose merged projection came back as
/// exactly zero, the signal that the lossy projection name-key join most
/// likely missed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Healthy,
    Injured(String),
    Warning,
}

/// One rostered player in canonical form.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Platform-scoped player ID.
    pub id: String,
    /// Display name: `"F. Last"` for individuals, full form for D/ST units.
    pub name: String,
    /// Source full name; feeds the projection name-key.
    pub full_name: String,
    pub position: Position,
    /// Lineup slot this week; may differ from position (BE, IR, FLEX).
    pub slot: Position,
    /// Points scored so far this week.
    pub points: f64,
    /// Projected points; 0.0 when no projection is available.
    pub projected: f64,
    /// Pro-team code in the canonical (ESPN) vocabulary; `"FA"` if none.
    pub pro_team: String,
    pub game_time: GameTime,
    pub play_status: PlayStatus,
    pub status: PlayerStatus,
}

/// One side of a matchup: the owner plus the full roster, bench included.
#[derive(Debug, Clone, Serialize)]
pub struct TeamSide {
    pub team_id: TeamId,
    pub owner: String,
    pub platform: Platform,
    pub players: Vec<Player>,
}

/// A pair of team sides for one league-week.
#[derive(Debug, Clone, Serialize)]
pub struct Matchup {
    pub league: String,
    pub week: Week,
    pub home: TeamSide,
    pub away: TeamSide,
}

/// One side's result in one historical week, used for season-long records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalRecord {
    pub year: u16,
    pub week: u16,
    /// 1-based matchup sequence number within the week.
    pub matchup: u16,
    pub owner: String,
    pub points: f64,
    pub projected: f64,
    /// `points - projected`.
    pub diff: f64,
}

/// Round to two decimal places for display and record totals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.346), 12.35);
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(-0.006), -0.01);
        assert_eq!(round2(0.0), 0.0);
    }
}
