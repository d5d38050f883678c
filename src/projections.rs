//! Projection table lookup and the best-effort merge onto rosters.
//!
//! The projection dataset arrives as an opaque nested mapping scraped
//! elsewhere: pro team -> position -> name key -> scoring system -> points.
//! Lookups are total and degrade to 0.0; a zero projection on a healthy
//! player flips their status to `Warning` because the approximate name-key
//! join has most likely failed.

use crate::model::{Player, PlayerStatus};
use crate::types::position::Position;
use crate::types::team_code::{translate, TeamVocab};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

type ScoringMap = HashMap<String, f64>;
type NameMap = HashMap<String, ScoringMap>;
type PositionMap = HashMap<String, NameMap>;

/// Projected points keyed by pro team (fp vocabulary), canonical position
/// token, name key, and scoring system.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectionTable(HashMap<String, PositionMap>);

impl ProjectionTable {
    pub fn from_json_file(path: &Path) -> crate::Result<Self> {
        let file = File::open(path)?;
        let table = serde_json::from_reader(BufReader::new(file))?;
        Ok(table)
    }

    /// Look up a projection; 0.0 on any missing level.
    pub fn lookup(
        &self,
        team_fp: &str,
        position: Position,
        name_key: &str,
        scoring: &str,
    ) -> f64 {
        self.0
            .get(team_fp)
            .and_then(|positions| positions.get(&position.to_string()))
            .and_then(|names| names.get(name_key))
            .and_then(|scorings| scorings.get(scoring))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The lossy join key matching a player across independently-sourced data.
///
/// First two whitespace tokens of the full name, or `"<lastname> D/ST"` for
/// defense units. Three-word surnames and suffixes like "Jr." collide by
/// design; the `Warning` status is the detection mechanism.
pub fn name_key(full_name: &str, position: Position) -> String {
    if position == Position::DST {
        let last = full_name
            .split_whitespace()
            .rev()
            .find(|token| *token != "D/ST")
            .unwrap_or("");
        format!("{} D/ST", last)
    } else {
        full_name
            .split_whitespace()
            .take(2)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Fill projections for players that lack one and flag suspicious zeros.
///
/// Players arriving with a platform projection keep it; everyone else gets
/// the table lookup. Any healthy player left at exactly 0.0 projected is
/// downgraded to `Warning`.
pub fn merge_projections(players: &mut [Player], table: &ProjectionTable, scoring: &str) {
    for player in players.iter_mut() {
        if player.projected == 0.0 {
            let team_fp = translate(&player.pro_team, TeamVocab::Espn, TeamVocab::Fp);
            let key = name_key(&player.full_name, player.position);
            player.projected = table.lookup(&team_fp, player.position, &key, scoring);
        }
        if player.status == PlayerStatus::Healthy && player.projected == 0.0 {
            player.status = PlayerStatus::Warning;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlayStatus, Player};
    use crate::types::time::GameTime;

    fn table_with(team: &str, position: &str, name: &str, scoring: &str, points: f64) -> ProjectionTable {
        let mut scorings = ScoringMap::new();
        scorings.insert(scoring.to_string(), points);
        let mut names = NameMap::new();
        names.insert(name.to_string(), scorings);
        let mut positions = PositionMap::new();
        positions.insert(position.to_string(), names);
        let mut teams = HashMap::new();
        teams.insert(team.to_string(), positions);
        ProjectionTable(teams)
    }

    fn player(full_name: &str, position: Position, pro_team: &str, projected: f64) -> Player {
        Player {
            id: "1".to_string(),
            name: full_name.to_string(),
            full_name: full_name.to_string(),
            position,
            slot: position,
            points: 0.0,
            projected,
            pro_team: pro_team.to_string(),
            game_time: GameTime::Unknown,
            play_status: PlayStatus::Future,
            status: PlayerStatus::Healthy,
        }
    }

    #[test]
    fn test_lookup_hit() {
        let table = table_with("MIN", "WR", "Justin Jefferson", "ppr", 18.4);
        assert_eq!(table.lookup("MIN", Position::WR, "Justin Jefferson", "ppr"), 18.4);
    }

    #[test]
    fn test_lookup_never_fails() {
        let table = table_with("MIN", "WR", "Justin Jefferson", "ppr", 18.4);
        assert_eq!(table.lookup("GB", Position::WR, "Justin Jefferson", "ppr"), 0.0);
        assert_eq!(table.lookup("MIN", Position::RB, "Justin Jefferson", "ppr"), 0.0);
        assert_eq!(table.lookup("MIN", Position::WR, "Jordan Addison", "ppr"), 0.0);
        assert_eq!(
            table.lookup("MIN", Position::WR, "Justin Jefferson", "half-point-ppr"),
            0.0
        );
        assert_eq!(
            ProjectionTable::default().lookup("MIN", Position::WR, "Justin Jefferson", "ppr"),
            0.0
        );
    }

    #[test]
    fn test_name_key_first_two_tokens() {
        assert_eq!(name_key("Justin Jefferson", Position::WR), "Justin Jefferson");
        assert_eq!(name_key("Amon-Ra St. Brown", Position::WR), "Amon-Ra St.");
        assert_eq!(name_key("Kenneth Walker III", Position::RB), "Kenneth Walker");
    }

    #[test]
    fn test_name_key_defense_units() {
        assert_eq!(name_key("Cowboys D/ST", Position::DST), "Cowboys D/ST");
        assert_eq!(name_key("49ers D/ST", Position::DST), "49ers D/ST");
    }

    #[test]
    fn test_merge_fills_missing_projection() {
        let table = table_with("WAS", "WR", "Terry McLaurin", "ppr", 14.2);
        // Player carries the canonical (ESPN) code; the merge translates it
        // into the projection source's vocabulary.
        let mut players = vec![player("Terry McLaurin", Position::WR, "WSH", 0.0)];
        merge_projections(&mut players, &table, "ppr");
        assert_eq!(players[0].projected, 14.2);
        assert_eq!(players[0].status, PlayerStatus::Healthy);
    }

    #[test]
    fn test_merge_keeps_platform_projection() {
        let table = table_with("MIN", "WR", "Justin Jefferson", "ppr", 18.4);
        let mut players = vec![player("Justin Jefferson", Position::WR, "MIN", 21.0)];
        merge_projections(&mut players, &table, "ppr");
        assert_eq!(players[0].projected, 21.0);
    }

    #[test]
    fn test_merge_flags_healthy_zero_projection() {
        let table = ProjectionTable::default();
        let mut players = vec![player("Marvin Harrison Jr.", Position::WR, "ARI", 0.0)];
        merge_projections(&mut players, &table, "ppr");
        assert_eq!(players[0].projected, 0.0);
        assert_eq!(players[0].status, PlayerStatus::Warning);
    }

    #[test]
    fn test_merge_leaves_injured_status_alone() {
        let table = ProjectionTable::default();
        let mut players = vec![player("Nick Chubb", Position::RB, "CLE", 0.0)];
        players[0].status = PlayerStatus::Injured("OUT".to_string());
        merge_projections(&mut players, &table, "ppr");
        assert_eq!(players[0].status, PlayerStatus::Injured("OUT".to_string()));
    }
}
