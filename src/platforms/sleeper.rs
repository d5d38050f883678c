//! Public-API adapter for Sleeper.
//!
//! Four unauthenticated endpoints per league-week: the global player
//! catalog, the league's rosters and users, and the week's matchups. The
//! roster/user join happens in-process; a side that cannot be correlated is
//! omitted rather than failing the league. Sleeper reports neither
//! projections nor game times; both are backfilled downstream.

use super::{
    classify_response, CancelToken, FetchedMatchup, FetchedSide, Platform, PlatformAdapter,
};
use crate::config::LeagueConfig;
use crate::error::Result;
use crate::gametime::ProTeamGameCache;
use crate::normalize;
use crate::types::ids::TeamId;
use crate::types::time::{Season, Week};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Base path for the Sleeper public API.
pub const SLEEPER_BASE_URL: &str = "https://api.sleeper.app/v1";

const PLATFORM: &str = "sleeper";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SleeperPlayer {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub injury_status: Option<String>,
    #[serde(default)]
    pub fantasy_positions: Option<Vec<String>>,
    #[serde(default)]
    pub team: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SleeperRoster {
    pub roster_id: u32,
    #[serde(default)]
    pub owner_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SleeperUser {
    pub user_id: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SleeperMatchup {
    pub roster_id: u32,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub starters: Vec<String>,
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub players_points: HashMap<String, f64>,
}

pub type PlayerCatalog = HashMap<String, SleeperPlayer>;

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

pub struct SleeperAdapter {
    client: Client,
}

impl SleeperAdapter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        league: &LeagueConfig,
        url: String,
    ) -> Result<T> {
        let response = self.client.get(&url).send().await?;
        let response = classify_response(PLATFORM, league.league_id, response)?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PlatformAdapter for SleeperAdapter {
    fn platform(&self) -> Platform {
        Platform::Sleeper
    }

    async fn fetch_week(
        &self,
        league: &LeagueConfig,
        _season: Season,
        week: Week,
        cache: &ProTeamGameCache,
        _cancel: &CancelToken,
    ) -> Result<Vec<FetchedMatchup>> {
        let league_id = league.league_id;

        let catalog: PlayerCatalog = self
            .get_json(league, format!("{SLEEPER_BASE_URL}/players/nfl"))
            .await?;
        let rosters: Vec<SleeperRoster> = self
            .get_json(league, format!("{SLEEPER_BASE_URL}/league/{league_id}/rosters"))
            .await?;
        let users: Vec<SleeperUser> = self
            .get_json(league, format!("{SLEEPER_BASE_URL}/league/{league_id}/users"))
            .await?;
        let matchups: Vec<SleeperMatchup> = self
            .get_json(
                league,
                format!("{SLEEPER_BASE_URL}/league/{league_id}/matchups/{week}"),
            )
            .await?;

        debug!(%league_id, matchup_rows = matchups.len(), "joining sleeper league");
        Ok(join_league_week(&catalog, &rosters, &users, matchups, cache))
    }
}

/// Correlate matchup rows to users and pair them into matchups.
///
/// Rows are grouped by `matchup_id` in ascending order; a row whose roster
/// or user cannot be found is dropped with a warning, and any group left
/// without exactly two sides is discarded.
pub(crate) fn join_league_week(
    catalog: &PlayerCatalog,
    rosters: &[SleeperRoster],
    users: &[SleeperUser],
    matchups: Vec<SleeperMatchup>,
    cache: &ProTeamGameCache,
) -> Vec<FetchedMatchup> {
    let mut groups: BTreeMap<u32, Vec<FetchedSide>> = BTreeMap::new();

    for matchup in matchups {
        let Some(matchup_id) = matchup.matchup_id else {
            continue;
        };
        match join_side(catalog, rosters, users, &matchup, cache) {
            Some(side) => groups.entry(matchup_id).or_default().push(side),
            None => {
                warn!(
                    roster_id = matchup.roster_id,
                    "no user found for roster, omitting side"
                );
            }
        }
    }

    groups
        .into_values()
        .filter_map(|mut sides| {
            if sides.len() == 2 {
                let away = sides.pop()?;
                let home = sides.pop()?;
                Some(FetchedMatchup {
                    // Sleeper matchup rows never describe playoff brackets.
                    playoff: false,
                    home,
                    away,
                })
            } else {
                None
            }
        })
        .collect()
}

fn join_side(
    catalog: &PlayerCatalog,
    rosters: &[SleeperRoster],
    users: &[SleeperUser],
    matchup: &SleeperMatchup,
    cache: &ProTeamGameCache,
) -> Option<FetchedSide> {
    let roster = rosters
        .iter()
        .find(|roster| roster.roster_id == matchup.roster_id)?;
    let owner_id = roster.owner_id.as_deref()?;
    let user = users.iter().find(|user| user.user_id == owner_id)?;

    let players = matchup
        .players
        .iter()
        .filter_map(|player_id| {
            let data = catalog.get(player_id)?;
            let points = matchup.players_points.get(player_id).copied().unwrap_or(0.0);
            let starter = matchup.starters.iter().any(|id| id == player_id);
            normalize::sleeper_player(player_id, data, points, starter, cache)
        })
        .collect();

    Some(FetchedSide {
        team_id: TeamId::new(matchup.roster_id),
        owner: user.display_name.clone(),
        players,
        points: matchup.points,
        projected: 0.0,
    })
}
