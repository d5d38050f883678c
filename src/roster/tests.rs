use super::*;
use crate::model::PlayerStatus;
use chrono::TimeZone;

fn player(
    name: &str,
    position: Position,
    slot: Position,
    points: f64,
    projected: f64,
) -> Player {
    Player {
        id: name.to_string(),
        name: name.to_string(),
        full_name: name.to_string(),
        position,
        slot,
        points,
        projected,
        pro_team: "KC".to_string(),
        game_time: GameTime::Unknown,
        play_status: PlayStatus::Played,
        status: PlayerStatus::Healthy,
    }
}

fn sample_side(platform: Platform) -> TeamSide {
    TeamSide {
        team_id: TeamId::new(1),
        owner: "David".to_string(),
        platform,
        players: vec![
            player("QB1", Position::QB, Position::QB, 21.0, 19.0),
            player("RB1", Position::RB, Position::RB, 14.0, 12.0),
            player("RB2", Position::RB, Position::RB, 9.0, 11.0),
            player("WR1", Position::WR, Position::WR, 17.0, 13.0),
            player("WR2", Position::WR, Position::WR, 6.0, 10.0),
            player("TE1", Position::TE, Position::TE, 8.0, 7.0),
            player("DST1", Position::DST, Position::DST, 11.0, 6.0),
            player("K1", Position::K, Position::K, 7.0, 8.0),
            player("WRB", Position::WR, Position::BE, 19.0, 15.0),
        ],
    }
}

#[test]
fn test_default_mode_is_starters_only() {
    let side = sample_side(Platform::Espn);
    let view = organize(&side, Mode::Default);
    assert_eq!(view.roster.len(), 8);
    assert!(view.roster.iter().all(|p| !p.player.slot.is_inactive_slot()));
}

#[test]
fn test_all_mode_is_exactly_active_plus_inactive() {
    let side = sample_side(Platform::Espn);
    let view = organize(&side, Mode::All);
    assert_eq!(view.roster.len(), side.players.len());
    // Inactive slots sort after the active group.
    assert_eq!(view.roster.last().unwrap().player.name, "WRB");
}

#[test]
fn test_sort_order_rank_then_points_then_projected() {
    let side = sample_side(Platform::Espn);
    let view = organize(&side, Mode::Default);
    let names: Vec<&str> = view.roster.iter().map(|p| p.player.name.as_str()).collect();
    // QB first; skill positions by points descending; DST; K.
    assert_eq!(
        names,
        vec!["QB1", "WR1", "RB1", "RB2", "TE1", "WR2", "DST1", "K1"]
    );
}

#[test]
fn test_sort_tiebreak_on_projected() {
    let mut side = sample_side(Platform::Espn);
    side.players.push(player("WR3", Position::WR, Position::WR, 9.0, 14.0));
    let view = organize(&side, Mode::Default);
    let names: Vec<&str> = view.roster.iter().map(|p| p.player.name.as_str()).collect();
    // WR3 ties RB2 on points but wins on projection.
    let wr3 = names.iter().position(|n| *n == "WR3").unwrap();
    let rb2 = names.iter().position(|n| *n == "RB2").unwrap();
    assert!(wr3 < rb2);
}

#[test]
fn test_max_mode_fills_slots_without_repeats() {
    let side = sample_side(Platform::Espn);
    let view = organize(&side, Mode::Max);

    assert_eq!(view.roster.len(), max_slots(Platform::Espn).len());
    let mut ids: Vec<&str> = view.roster.iter().map(|p| p.player.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), view.roster.len());

    // The benched WR out-projects WR2, so the reconstruction starts him.
    assert!(view.roster.iter().any(|p| p.player.name == "WRB"));
}

#[test]
fn test_max_mode_sleeper_gets_second_flex() {
    assert_eq!(max_slots(Platform::Espn).len(), 9);
    assert_eq!(max_slots(Platform::Sleeper).len(), 10);
    assert_eq!(
        max_slots(Platform::Sleeper)
            .iter()
            .filter(|slot| **slot == Position::FLEX)
            .count(),
        2
    );

    // With nine skill players only eight ESPN slots can be filled plus the
    // extra Sleeper FLEX picks one more.
    let side = sample_side(Platform::Sleeper);
    let view = organize(&side, Mode::Max);
    assert_eq!(view.roster.len(), 9);
}

#[test]
fn test_max_mode_skips_unfillable_slots() {
    let side = TeamSide {
        team_id: TeamId::new(1),
        owner: "David".to_string(),
        platform: Platform::Espn,
        players: vec![
            player("QB1", Position::QB, Position::QB, 10.0, 10.0),
            player("RB1", Position::RB, Position::RB, 10.0, 10.0),
        ],
    };
    let view = organize(&side, Mode::Max);
    // QB, RB, and the FLEX slot cannot double-assign RB1.
    assert_eq!(view.roster.len(), 2);
}

#[test]
fn test_totals_round_to_two_places() {
    let mut side = sample_side(Platform::Espn);
    for p in &mut side.players {
        p.points = 10.111;
        p.projected = 9.999;
    }
    let view = organize(&side, Mode::Default);
    assert_eq!(view.points, round2(10.111 * 8.0));
    assert_eq!(view.projected, round2(9.999 * 8.0));
}

#[test]
fn test_display_shows_points_once_started() {
    let side = sample_side(Platform::Espn);
    let view = organize(&side, Mode::Default);
    assert_eq!(view.roster[0].display, "21.00");
    assert_eq!(view.roster[0].display_stack, "21.00");
}

#[test]
fn test_display_future_game_time_labels() {
    let kickoff = crate::types::time::central()
        .with_ymd_and_hms(2025, 9, 7, 12, 0, 0)
        .single()
        .unwrap();

    let mut upcoming = player("QB1", Position::QB, Position::QB, 0.0, 19.0);
    upcoming.play_status = PlayStatus::Future;
    upcoming.game_time = GameTime::At(kickoff);

    let mut bye = player("WR1", Position::WR, Position::WR, 0.0, 0.0);
    bye.play_status = PlayStatus::Future;
    bye.game_time = GameTime::Bye;

    let mut unknown = player("RB1", Position::RB, Position::RB, 0.0, 0.0);
    unknown.play_status = PlayStatus::Future;
    unknown.game_time = GameTime::Unknown;

    let side = TeamSide {
        team_id: TeamId::new(1),
        owner: "David".to_string(),
        platform: Platform::Espn,
        players: vec![upcoming, bye, unknown],
    };
    let view = organize(&side, Mode::Default);

    let by_name = |name: &str| {
        view.roster
            .iter()
            .find(|p| p.player.name == name)
            .unwrap()
            .clone()
    };
    assert_eq!(by_name("QB1").display, "Sun 12:00");
    assert_eq!(by_name("QB1").display_stack, "S 12:00");
    assert_eq!(by_name("WR1").display, "BYE");
    assert_eq!(by_name("RB1").display, "N/A");
}

#[test]
fn test_mode_parsing() {
    assert_eq!("default".parse::<Mode>().unwrap(), Mode::Default);
    assert_eq!("MAX".parse::<Mode>().unwrap(), Mode::Max);
    assert_eq!("all".parse::<Mode>().unwrap(), Mode::All);
    assert!("best".parse::<Mode>().is_err());
}
