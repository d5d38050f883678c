//! Weekly matchups command.

use crate::aggregate::{matchups_for_profile, WeeklyView};
use crate::config::Profiles;
use crate::error::Result;
use crate::model::PlayerStatus;
use crate::platforms::CancelToken;
use crate::projections::ProjectionTable;
use crate::roster::{Mode, PlayerView, TeamView};
use crate::types::time::Week;
use std::path::Path;
use std::sync::Arc;

pub struct MatchupsParams<'a> {
    pub profile: &'a str,
    pub week: Option<Week>,
    pub mode: Mode,
    pub config: Option<&'a Path>,
    pub projections: Option<&'a Path>,
    pub as_json: bool,
}

pub async fn handle_matchups(params: MatchupsParams<'_>) -> Result<()> {
    let profiles = Profiles::load(params.config)?;
    let projections = match params.projections {
        Some(path) => ProjectionTable::from_json_file(path)?,
        None => ProjectionTable::default(),
    };

    let views = matchups_for_profile(
        &profiles,
        params.profile,
        params.week,
        params.mode,
        Arc::new(projections),
        CancelToken::new(),
    )
    .await?;

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if views.is_empty() {
        println!("No matchups found for {}", params.profile);
        return Ok(());
    }
    for view in &views {
        print_matchup(view, params.mode);
    }
    Ok(())
}

fn print_matchup(view: &WeeklyView, mode: Mode) {
    println!("{} (week {}, {})", view.league, view.week, mode);
    print_side(&view.home);
    println!("  vs");
    print_side(&view.away);
    println!();
}

fn print_side(side: &TeamView) {
    println!(
        "  {:<20} {:>8.2}  proj {:>8.2}",
        side.owner, side.points, side.projected
    );
    for player in &side.roster {
        println!("{}", player_row(player));
    }
}

fn player_row(player: &PlayerView) -> String {
    let marker = match &player.player.status {
        PlayerStatus::Healthy => String::new(),
        PlayerStatus::Warning => " [!]".to_string(),
        PlayerStatus::Injured(status) => format!(" [{}]", status),
    };
    format!(
        "    {:<4} {:<22} {:<4} {:>10}{}",
        player.player.slot, player.player.name, player.player.pro_team, player.display, marker
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlayStatus, Player};
    use crate::types::position::Position;
    use crate::types::time::GameTime;

    fn view(status: PlayerStatus, display: &str) -> PlayerView {
        PlayerView {
            player: Player {
                id: "1".to_string(),
                name: "J. Jefferson".to_string(),
                full_name: "Justin Jefferson".to_string(),
                position: Position::WR,
                slot: Position::WR,
                points: 18.3,
                projected: 17.1,
                pro_team: "MIN".to_string(),
                game_time: GameTime::Unknown,
                play_status: PlayStatus::Played,
                status,
            },
            display: display.to_string(),
            display_stack: display.to_string(),
        }
    }

    #[test]
    fn test_player_row_markers() {
        let healthy = player_row(&view(PlayerStatus::Healthy, "18.30"));
        assert!(!healthy.contains('['));

        let warning = player_row(&view(PlayerStatus::Warning, "18.30"));
        assert!(warning.ends_with("[!]"));

        let injured = player_row(&view(PlayerStatus::Injured("OUT".to_string()), "18.30"));
        assert!(injured.ends_with("[OUT]"));
    }
}
