//! Canonical normalization: platform-native player records into [`Player`].
//!
//! Each mapping is pure apart from one deliberate side effect: a player
//! arriving with a real game time records it in the shared
//! [`ProTeamGameCache`] so that platforms without native schedule data can
//! borrow it within the same aggregation pass.

use crate::gametime::{self, ProTeamGameCache};
use crate::model::{Player, PlayerStatus};
use crate::platforms::espn::{ProSchedule, RosterEntry};
use crate::platforms::sleeper::SleeperPlayer;
use crate::types::position::Position;
use crate::types::team_code::{translate, TeamVocab};
use crate::types::time::{now_central, GameTime, Week};
use tracing::warn;

/// Abbreviate an individual player's name to `"F. Last"` form.
///
/// Defense units never pass through here; they keep their full form
/// because they contain no given name.
pub fn abbreviate_name(full: &str) -> String {
    let mut tokens = full.split_whitespace();
    let Some(first) = tokens.next() else {
        return String::new();
    };
    let rest: Vec<&str> = tokens.collect();
    if rest.is_empty() {
        return first.to_string();
    }
    let initial: String = first.chars().take(1).collect();
    format!("{}. {}", initial, rest.join(" "))
}

/// ESPN `defaultPositionId` to canonical position.
pub fn espn_position(default_position_id: i8) -> Option<Position> {
    match default_position_id {
        0 | 1 => Some(Position::QB),
        2 => Some(Position::RB),
        3 => Some(Position::WR),
        4 | 6 => Some(Position::TE),
        5 | 17 => Some(Position::K),
        16 => Some(Position::DST),
        _ => None,
    }
}

/// ESPN `lineupSlotId` to canonical slot.
pub fn espn_slot(lineup_slot_id: u8) -> Position {
    match lineup_slot_id {
        0 => Position::QB,
        2 => Position::RB,
        4 => Position::WR,
        6 => Position::TE,
        16 => Position::DST,
        17 => Position::K,
        20 => Position::BE,
        21 => Position::IR,
        // 3 (RB/WR), 5 (WR/TE), 23 (FLEX) and friends are all active
        // multi-position slots.
        _ => Position::FLEX,
    }
}

/// Normalize one ESPN roster entry. Malformed entries are skipped.
pub fn espn_player(
    entry: &RosterEntry,
    week: Week,
    pro: &ProSchedule,
    cache: &ProTeamGameCache,
) -> Option<Player> {
    let Some(pool_entry) = entry.player_pool_entry.as_ref() else {
        warn!(slot = entry.lineup_slot_id, "roster entry without player, skipping");
        return None;
    };
    let native = &pool_entry.player;
    let Some(full_name) = native.full_name.clone() else {
        warn!(id = native.id, "espn player without a name, skipping");
        return None;
    };
    let Some(position) = espn_position(native.default_position_id) else {
        warn!(
            id = native.id,
            position_id = native.default_position_id,
            "unmapped espn position, skipping"
        );
        return None;
    };

    let points = native
        .weekly_total(week, 0)
        .unwrap_or(pool_entry.applied_stat_total);
    let projected = native.weekly_total(week, 1).unwrap_or(0.0);

    let (pro_team, game_time, completed) = match pro.get(native.pro_team_id) {
        Some(team) => (team.abbrev.clone(), team.game_time, team.completed),
        None => ("FA".to_string(), GameTime::Unknown, false),
    };

    if matches!(game_time, GameTime::At(_)) {
        cache.record(&pro_team, game_time, completed);
    }

    let name = if position == Position::DST {
        full_name.clone()
    } else {
        abbreviate_name(&full_name)
    };

    Some(Player {
        id: native.id.to_string(),
        name,
        full_name,
        position,
        slot: espn_slot(entry.lineup_slot_id),
        points,
        projected,
        pro_team,
        game_time,
        play_status: gametime::resolve(now_central(), game_time, completed),
        status: health_status(native.injury_status.as_deref()),
    })
}

/// Normalize one Sleeper catalog entry for a rostered player.
///
/// Sleeper has no game times of its own; the shared cache (already warmed
/// by any ESPN leagues in the same pass) supplies them, defaulting to
/// `Unknown` when no entry exists yet.
pub fn sleeper_player(
    id: &str,
    data: &SleeperPlayer,
    points: f64,
    starter: bool,
    cache: &ProTeamGameCache,
) -> Option<Player> {
    let raw_position = data
        .fantasy_positions
        .as_ref()
        .and_then(|positions| positions.first());
    let Some(raw_position) = raw_position else {
        warn!(id, "sleeper player without a position, skipping");
        return None;
    };
    let Ok(position) = Position::canonicalize(raw_position) else {
        warn!(id, position = %raw_position, "unmapped sleeper position, skipping");
        return None;
    };

    let full_name = match (&data.full_name, &data.last_name) {
        (Some(name), _) => name.clone(),
        (None, Some(last)) => format!("{} D/ST", last),
        (None, None) => {
            warn!(id, "sleeper player without a name, skipping");
            return None;
        }
    };

    let pro_team = match data.team.as_deref() {
        Some(code) => translate(code, TeamVocab::Sleeper, TeamVocab::Espn),
        None => "FA".to_string(),
    };
    let (game_time, completed) = cache
        .lookup(&pro_team)
        .unwrap_or((GameTime::Unknown, false));

    let name = if position == Position::DST {
        full_name.clone()
    } else {
        abbreviate_name(&full_name)
    };

    Some(Player {
        id: id.to_string(),
        name,
        full_name,
        position,
        slot: if starter { position } else { Position::BE },
        points,
        projected: 0.0,
        pro_team,
        game_time,
        play_status: gametime::resolve(now_central(), game_time, completed),
        status: health_status(data.injury_status.as_deref()),
    })
}

fn health_status(injury_status: Option<&str>) -> PlayerStatus {
    match injury_status {
        None | Some("") | Some("ACTIVE") | Some("NORMAL") => PlayerStatus::Healthy,
        Some(status) => PlayerStatus::Injured(status.to_string()),
    }
}
