//! Roster composition: turn one side's full player list into the view the
//! caller asked for.

use crate::error::CommanderError;
use crate::model::{round2, PlayStatus, Player, TeamSide};
use crate::platforms::Platform;
use crate::types::ids::TeamId;
use crate::types::position::Position;
use crate::types::time::GameTime;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
mod tests;

/// Which players make up the displayed roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The platform-declared starters.
    #[default]
    Default,
    /// The best possible lineup, irrespective of what was started.
    Max,
    /// The entire roster, bench and IR included.
    All,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Default => "default",
            Mode::Max => "max",
            Mode::All => "all",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Mode {
    type Err = CommanderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Mode::Default),
            "max" => Ok(Mode::Max),
            "all" => Ok(Mode::All),
            other => Err(CommanderError::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// One player plus their rendered score/time strings.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    #[serde(flatten)]
    pub player: Player,
    /// Points once the game has started, else a day/time label.
    pub display: String,
    /// Same content with a one-letter day, for the stacked right column.
    pub display_stack: String,
}

/// A composed side ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct TeamView {
    pub team_id: TeamId,
    pub owner: String,
    pub platform: Platform,
    pub roster: Vec<PlayerView>,
    pub points: f64,
    pub projected: f64,
}

/// Compose one side's displayed roster for a mode.
pub fn organize(side: &TeamSide, mode: Mode) -> TeamView {
    let (mut active, mut inactive): (Vec<Player>, Vec<Player>) = side
        .players
        .iter()
        .cloned()
        .partition(|player| !player.slot.is_inactive_slot());
    active.sort_by(player_order);
    inactive.sort_by(player_order);

    let roster: Vec<Player> = match mode {
        Mode::Default => active,
        Mode::All => active.into_iter().chain(inactive).collect(),
        Mode::Max => optimal_lineup(&side.players, side.platform),
    };

    let points = round2(roster.iter().map(|player| player.points).sum());
    let projected = round2(roster.iter().map(|player| player.projected).sum());

    TeamView {
        team_id: side.team_id,
        owner: side.owner.clone(),
        platform: side.platform,
        roster: roster.into_iter().map(player_view).collect(),
        points,
        projected,
    }
}

/// Lineup slots filled in order by the max-mode reconstruction. The
/// public-API platform's leagues run a second FLEX.
pub fn max_slots(platform: Platform) -> Vec<Position> {
    let mut slots = vec![
        Position::QB,
        Position::RB,
        Position::RB,
        Position::WR,
        Position::WR,
        Position::TE,
        Position::FLEX,
        Position::DST,
        Position::K,
    ];
    if platform == Platform::Sleeper {
        slots.insert(7, Position::FLEX);
    }
    slots
}

/// Greedy optimal-lineup reconstruction: for each slot in fixed order, the
/// highest-projected eligible player not already assigned. Unfillable
/// slots are skipped.
fn optimal_lineup(players: &[Player], platform: Platform) -> Vec<Player> {
    let mut used = vec![false; players.len()];
    let mut lineup = Vec::new();

    for slot in max_slots(platform) {
        let candidate = players
            .iter()
            .enumerate()
            .filter(|(index, player)| !used[*index] && eligible(player.position, slot))
            .max_by(|(_, a), (_, b)| {
                a.projected
                    .partial_cmp(&b.projected)
                    .unwrap_or(Ordering::Equal)
            });
        if let Some((index, player)) = candidate {
            used[index] = true;
            lineup.push(player.clone());
        }
    }
    lineup
}

fn eligible(position: Position, slot: Position) -> bool {
    position == slot || (slot == Position::FLEX && position.is_flex_eligible())
}

/// Fixed sort: position-group rank, then points descending, then projected
/// descending. Bench and IR rank by slot, everyone else by position.
fn sort_rank(player: &Player) -> u8 {
    match player.slot {
        Position::BE => 5,
        Position::IR => 6,
        _ => match player.position {
            Position::QB => 1,
            Position::DST => 3,
            Position::K => 4,
            _ => 2,
        },
    }
}

fn player_order(a: &Player, b: &Player) -> Ordering {
    sort_rank(a)
        .cmp(&sort_rank(b))
        .then_with(|| b.points.partial_cmp(&a.points).unwrap_or(Ordering::Equal))
        .then_with(|| {
            b.projected
                .partial_cmp(&a.projected)
                .unwrap_or(Ordering::Equal)
        })
}

fn player_view(player: Player) -> PlayerView {
    let (display, display_stack) = display_strings(&player);
    PlayerView {
        player,
        display,
        display_stack,
    }
}

fn display_strings(player: &Player) -> (String, String) {
    if player.play_status != PlayStatus::Future {
        let score = format!("{:.2}", player.points);
        return (score.clone(), score);
    }
    match player.game_time {
        GameTime::At(kickoff) => {
            let full = kickoff.format("%a %I:%M").to_string();
            let compact = format!(
                "{} {}",
                full.chars().take(1).collect::<String>(),
                kickoff.format("%I:%M")
            );
            (full, compact)
        }
        GameTime::Bye => ("BYE".to_string(), "BYE".to_string()),
        GameTime::Unknown => ("N/A".to_string(), "N/A".to_string()),
    }
}
