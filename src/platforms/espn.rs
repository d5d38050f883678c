//! Session-based adapter for the ESPN fantasy v3 API.
//!
//! Every call authenticates with the league's stored cookie pair. ESPN
//! enforces rolling session validity, so transient denial is retried per
//! the adapter's [`RetryPolicy`] rather than surfaced.

use super::{
    classify_response, CancelToken, FetchedMatchup, FetchedSide, Platform, PlatformAdapter,
    RetryPolicy,
};
use crate::config::LeagueConfig;
use crate::error::{CommanderError, Result};
use crate::gametime::ProTeamGameCache;
use crate::model::round2;
use crate::normalize;
use crate::types::ids::{LeagueId, TeamId};
use crate::types::time::{central, GameTime, Season, Week};
use async_trait::async_trait;
use chrono::TimeZone;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::Client;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Base path for the ESPN fantasy football v3 API.
pub const ESPN_BASE_URL: &str = "https://lm-api-reads.fantasy.espn.com/apis/v3/games/ffl";

const PLATFORM: &str = "espn";

/// Pro game status id ESPN uses for a finished game.
const GAME_STATUS_FINAL: u8 = 3;

// ---------------------------------------------------------------------------
// Wire types (league week)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LeagueWeek {
    #[serde(default)]
    pub schedule: Vec<ScheduleItem>,
    #[serde(default)]
    pub teams: Vec<EspnTeam>,
    #[serde(default)]
    pub members: Vec<EspnMember>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleItem {
    #[serde(rename = "matchupPeriodId")]
    pub matchup_period_id: u16,
    #[serde(rename = "playoffTierType", default)]
    pub playoff_tier_type: Option<String>,
    pub home: Option<ScheduleSide>,
    pub away: Option<ScheduleSide>,
}

impl ScheduleItem {
    pub fn is_playoff(&self) -> bool {
        matches!(self.playoff_tier_type.as_deref(), Some(tier) if tier != "NONE")
    }
}

#[derive(Debug, Deserialize)]
pub struct ScheduleSide {
    #[serde(rename = "teamId")]
    pub team_id: u32,
    #[serde(rename = "totalPoints", default)]
    pub total_points: f64,
    #[serde(rename = "totalProjectedPointsLive", default)]
    pub total_projected: Option<f64>,
    #[serde(rename = "rosterForCurrentScoringPeriod", default)]
    pub roster: Option<EspnRoster>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnRoster {
    #[serde(default)]
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RosterEntry {
    #[serde(rename = "lineupSlotId")]
    pub lineup_slot_id: u8,
    #[serde(rename = "playerPoolEntry")]
    pub player_pool_entry: Option<PlayerPoolEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerPoolEntry {
    #[serde(rename = "appliedStatTotal", default)]
    pub applied_stat_total: f64,
    pub player: EspnPlayer,
}

#[derive(Debug, Deserialize)]
pub struct EspnPlayer {
    pub id: i64,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(rename = "defaultPositionId", default)]
    pub default_position_id: i8,
    #[serde(rename = "proTeamId", default)]
    pub pro_team_id: u8,
    #[serde(rename = "injuryStatus", default)]
    pub injury_status: Option<String>,
    #[serde(default)]
    pub stats: Vec<EspnStatLine>,
}

#[derive(Debug, Deserialize)]
pub struct EspnStatLine {
    #[serde(rename = "scoringPeriodId")]
    pub scoring_period_id: u16,
    #[serde(rename = "statSourceId")]
    pub stat_source_id: u8,
    #[serde(rename = "appliedTotal", default)]
    pub applied_total: f64,
}

impl EspnPlayer {
    /// The applied total for one week from one stat source.
    /// `stat_source_id`: 0 = actual, 1 = projected.
    pub fn weekly_total(&self, week: Week, stat_source_id: u8) -> Option<f64> {
        self.stats
            .iter()
            .find(|line| {
                line.scoring_period_id == week.as_u16() && line.stat_source_id == stat_source_id
            })
            .map(|line| line.applied_total)
    }
}

#[derive(Debug, Deserialize)]
pub struct EspnTeam {
    pub id: u32,
    #[serde(rename = "primaryOwner", default)]
    pub primary_owner: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EspnMember {
    pub id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Wire types (pro-team schedules)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ProSeasonResponse {
    pub settings: ProScheduleSettings,
}

#[derive(Debug, Deserialize)]
pub struct ProScheduleSettings {
    #[serde(rename = "proTeams", default)]
    pub pro_teams: Vec<ProTeamEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ProTeamEntry {
    pub id: u8,
    #[serde(default)]
    pub abbrev: Option<String>,
    #[serde(rename = "proGamesByScoringPeriod", default)]
    pub games_by_period: BTreeMap<String, Vec<ProGame>>,
}

#[derive(Debug, Deserialize)]
pub struct ProGame {
    #[serde(default)]
    pub date: Option<i64>,
    #[serde(rename = "statusTypeId", default)]
    pub status_type_id: Option<u8>,
}

/// One week's schedule state per pro team, resolved from the season view.
#[derive(Debug, Clone)]
pub struct ProTeamWeek {
    pub abbrev: String,
    pub game_time: GameTime,
    pub completed: bool,
}

/// Per-pro-team game lookup for one scoring period.
#[derive(Debug, Clone, Default)]
pub struct ProSchedule {
    teams: HashMap<u8, ProTeamWeek>,
}

impl ProSchedule {
    pub fn from_season(response: &ProSeasonResponse, week: Week) -> Self {
        let mut teams = HashMap::new();
        for entry in &response.settings.pro_teams {
            let Some(abbrev) = entry.abbrev.as_deref() else {
                continue;
            };
            let (game_time, completed) = match entry
                .games_by_period
                .get(&week.as_u16().to_string())
                .and_then(|games| games.first())
            {
                // No game in this scoring period: the team is on bye.
                None => (GameTime::Bye, false),
                Some(game) => {
                    let game_time = game
                        .date
                        .and_then(|millis| chrono::Utc.timestamp_millis_opt(millis).single())
                        .map(|utc| GameTime::At(utc.with_timezone(&central())))
                        .unwrap_or(GameTime::Unknown);
                    (game_time, game.status_type_id == Some(GAME_STATUS_FINAL))
                }
            };
            teams.insert(
                entry.id,
                ProTeamWeek {
                    abbrev: abbrev.to_uppercase(),
                    game_time,
                    completed,
                },
            );
        }
        Self { teams }
    }

    pub fn get(&self, pro_team_id: u8) -> Option<&ProTeamWeek> {
        self.teams.get(&pro_team_id)
    }
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

pub struct EspnAdapter {
    client: Client,
    retry: RetryPolicy,
}

impl EspnAdapter {
    pub fn new(client: Client, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Acquire a season handle: build the cookie headers and fetch the
    /// league's team/member roll once, retrying transient denial.
    pub async fn open_season(
        &self,
        league: &LeagueConfig,
        season: Season,
        cancel: &CancelToken,
    ) -> Result<EspnSeason> {
        let (swid, s2) = league.credentials()?;
        let headers = cookie_header_map(swid, s2)?;
        let league_id = league.league_id;

        let roll: LeagueWeek = self
            .retry
            .run(cancel, || {
                let headers = headers.clone();
                async move {
                    let url = format!(
                        "{ESPN_BASE_URL}/seasons/{}/segments/0/leagues/{}",
                        season, league_id
                    );
                    let response = self
                        .client
                        .get(&url)
                        .headers(headers)
                        .query(&[("view", "mTeam")])
                        .send()
                        .await?;
                    let response = classify_response(PLATFORM, league_id, response)?;
                    Ok(response.json::<LeagueWeek>().await?)
                }
            })
            .await?;

        Ok(EspnSeason {
            client: self.client.clone(),
            retry: self.retry,
            headers,
            league_id,
            season,
            owners: owner_index(&roll.teams, &roll.members),
        })
    }

    /// Fetch per-pro-team game times for one week of the season.
    pub async fn pro_schedule(
        &self,
        league_id: LeagueId,
        season: Season,
        week: Week,
        cancel: &CancelToken,
    ) -> Result<ProSchedule> {
        let response: ProSeasonResponse = self
            .retry
            .run(cancel, || async move {
                let url = format!("{ESPN_BASE_URL}/seasons/{}", season);
                let response = self
                    .client
                    .get(&url)
                    .query(&[("view", "proTeamSchedules_wl")])
                    .send()
                    .await?;
                let response = classify_response(PLATFORM, league_id, response)?;
                Ok(response.json::<ProSeasonResponse>().await?)
            })
            .await?;
        Ok(ProSchedule::from_season(&response, week))
    }
}

#[async_trait]
impl PlatformAdapter for EspnAdapter {
    fn platform(&self) -> Platform {
        Platform::Espn
    }

    async fn fetch_week(
        &self,
        league: &LeagueConfig,
        season: Season,
        week: Week,
        cache: &ProTeamGameCache,
        cancel: &CancelToken,
    ) -> Result<Vec<FetchedMatchup>> {
        let pro = self.pro_schedule(league.league_id, season, week, cancel).await?;
        let season_handle = self.open_season(league, season, cancel).await?;
        let league_week = season_handle.box_scores(week, cancel).await?;

        week_matchups(&league_week, &season_handle.owners, league.league_id, week, &pro, cache)
    }
}

/// Pick the requested scoring period out of a league week and normalize it.
///
/// A week the league's schedule does not cover at all is a not-found, not an
/// empty result.
pub(crate) fn week_matchups(
    league_week: &LeagueWeek,
    owners: &HashMap<u32, String>,
    league_id: LeagueId,
    week: Week,
    pro: &ProSchedule,
    cache: &ProTeamGameCache,
) -> Result<Vec<FetchedMatchup>> {
    let items: Vec<&ScheduleItem> = league_week
        .schedule
        .iter()
        .filter(|item| item.matchup_period_id == week.as_u16())
        .collect();
    if items.is_empty() {
        return Err(CommanderError::UpstreamNotFound {
            platform: PLATFORM,
            league_id: league_id.to_string(),
        });
    }
    Ok(items
        .into_iter()
        .filter_map(|item| to_fetched(item, owners, week, pro, cache))
        .collect())
}

/// A validated session for one league-year; weeks are fetched from here.
pub struct EspnSeason {
    client: Client,
    retry: RetryPolicy,
    headers: HeaderMap,
    league_id: LeagueId,
    season: Season,
    owners: HashMap<u32, String>,
}

impl EspnSeason {
    /// Raw box-score view for one week, retried on transient denial.
    pub async fn box_scores(&self, week: Week, cancel: &CancelToken) -> Result<LeagueWeek> {
        let league_id = self.league_id;
        self.retry
            .run(cancel, || {
                let headers = self.headers.clone();
                async move {
                    let url = format!(
                        "{ESPN_BASE_URL}/seasons/{}/segments/0/leagues/{}",
                        self.season, league_id
                    );
                    let response = self
                        .client
                        .get(&url)
                        .headers(headers)
                        .query(&[
                            ("view", "mBoxscore"),
                            ("scoringPeriodId", &week.as_u16().to_string()),
                        ])
                        .send()
                        .await?;
                    let response = classify_response(PLATFORM, league_id, response)?;
                    Ok(response.json::<LeagueWeek>().await?)
                }
            })
            .await
    }

    /// Simplified per-week fetch for historical records: team-level scores
    /// only, no roster normalization.
    pub async fn week_scores(&self, week: Week, cancel: &CancelToken) -> Result<WeekScores> {
        let league_week = self.box_scores(week, cancel).await?;
        Ok(week_scores(&league_week, &self.owners, week))
    }
}

/// Team-level results for one historical week.
#[derive(Debug, Clone, Default)]
pub struct WeekScores {
    /// Whether the week's first matchup is a playoff game.
    pub playoff: bool,
    pub matchups: Vec<(ScoreSide, ScoreSide)>,
}

#[derive(Debug, Clone)]
pub struct ScoreSide {
    pub team_id: TeamId,
    pub owner: String,
    pub points: f64,
    pub projected: f64,
}

pub(crate) fn week_scores(
    league_week: &LeagueWeek,
    owners: &HashMap<u32, String>,
    week: Week,
) -> WeekScores {
    let items: Vec<&ScheduleItem> = league_week
        .schedule
        .iter()
        .filter(|item| item.matchup_period_id == week.as_u16())
        .collect();

    let playoff = items.first().map(|item| item.is_playoff()).unwrap_or(false);
    let matchups = items
        .iter()
        .filter_map(|item| {
            let home = score_side(item.home.as_ref()?, owners, week)?;
            let away = score_side(item.away.as_ref()?, owners, week)?;
            Some((home, away))
        })
        .collect();

    WeekScores { playoff, matchups }
}

fn score_side(
    side: &ScheduleSide,
    owners: &HashMap<u32, String>,
    week: Week,
) -> Option<ScoreSide> {
    Some(ScoreSide {
        team_id: TeamId::new(side.team_id),
        owner: owner_name(owners, side.team_id),
        points: side.total_points,
        projected: side
            .total_projected
            .unwrap_or_else(|| starter_projection_total(side, week)),
    })
}

/// Sum of the starters' projected points, the fallback when ESPN reports no
/// live team projection (always the case for completed weeks).
fn starter_projection_total(side: &ScheduleSide, week: Week) -> f64 {
    let Some(roster) = side.roster.as_ref() else {
        return 0.0;
    };
    let total = roster
        .entries
        .iter()
        .filter(|entry| !normalize::espn_slot(entry.lineup_slot_id).is_inactive_slot())
        .filter_map(|entry| entry.player_pool_entry.as_ref())
        .filter_map(|ppe| ppe.player.weekly_total(week, 1))
        .sum();
    round2(total)
}

fn to_fetched(
    item: &ScheduleItem,
    owners: &HashMap<u32, String>,
    week: Week,
    pro: &ProSchedule,
    cache: &ProTeamGameCache,
) -> Option<FetchedMatchup> {
    let home = fetched_side(item.home.as_ref()?, owners, week, pro, cache);
    let away = fetched_side(item.away.as_ref()?, owners, week, pro, cache);
    Some(FetchedMatchup {
        playoff: item.is_playoff(),
        home,
        away,
    })
}

fn fetched_side(
    side: &ScheduleSide,
    owners: &HashMap<u32, String>,
    week: Week,
    pro: &ProSchedule,
    cache: &ProTeamGameCache,
) -> FetchedSide {
    let players: Vec<_> = side
        .roster
        .as_ref()
        .map(|roster| {
            roster
                .entries
                .iter()
                .filter_map(|entry| normalize::espn_player(entry, week, pro, cache))
                .collect()
        })
        .unwrap_or_default();

    let projected = side
        .total_projected
        .unwrap_or_else(|| starter_projection_total(side, week));

    debug!(
        team_id = side.team_id,
        players = players.len(),
        "normalized espn side"
    );

    FetchedSide {
        team_id: TeamId::new(side.team_id),
        owner: owner_name(owners, side.team_id),
        players,
        points: side.total_points,
        projected,
    }
}

fn owner_index(teams: &[EspnTeam], members: &[EspnMember]) -> HashMap<u32, String> {
    teams
        .iter()
        .filter_map(|team| {
            let guid = team.primary_owner.as_deref()?;
            let member = members.iter().find(|member| member.id == guid)?;
            let name = member
                .first_name
                .clone()
                .or_else(|| member.display_name.clone())?;
            // First token only; members carry "First Last" display names.
            let first = name.split_whitespace().next().unwrap_or("").to_string();
            Some((team.id, first))
        })
        .collect()
}

fn owner_name(owners: &HashMap<u32, String>, team_id: u32) -> String {
    owners
        .get(&team_id)
        .cloned()
        .unwrap_or_else(|| "None".to_string())
}

/// Cookie headers for the stored session pair. Spaces occasionally creep
/// into stored s2 tokens and must be stripped.
fn cookie_header_map(swid: &str, s2: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let cookie = format!("SWID={}; espn_s2={}", swid, s2.replace(' ', ""));
    headers.insert(COOKIE, HeaderValue::from_str(&cookie)?);
    Ok(headers)
}
