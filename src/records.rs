//! Season-long historical records: concurrent fan-out across every tracked
//! league, season year, and week, then extremes ranking.
//!
//! Only the session platform keeps usable season history here; its rolling
//! session denial is absorbed by unbounded retries, so a year's worth of
//! weeks eventually resolves. Weeks still in progress and playoff weeks
//! are excluded entirely.

use crate::aggregate::drain_indexed;
use crate::config::{LeagueConfig, Profiles};
use crate::error::Result;
use crate::model::{round2, HistoricalRecord};
use crate::platforms::espn::{EspnAdapter, WeekScores};
use crate::platforms::{CancelToken, Platform, RetryPolicy};
use crate::types::time::{current_week, Season, Week};
use reqwest::Client;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Regular-season weeks included in historical records.
pub const HISTORY_WEEKS: u16 = 14;

/// Top-3 extremes over one league's full history, three metrics in both
/// directions.
#[derive(Debug, Clone, Serialize)]
pub struct Leaderboards {
    pub most_points: Vec<HistoricalRecord>,
    pub fewest_points: Vec<HistoricalRecord>,
    pub highest_projected: Vec<HistoricalRecord>,
    pub lowest_projected: Vec<HistoricalRecord>,
    pub best_vs_projection: Vec<HistoricalRecord>,
    pub worst_vs_projection: Vec<HistoricalRecord>,
}

/// One league's complete scoring history plus its leaderboards.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueRecords {
    pub league: String,
    pub records: Vec<HistoricalRecord>,
    pub leaderboards: Leaderboards,
}

/// Collect historical records for every session-platform league of a
/// profile. Leagues fan out concurrently; config order is preserved.
pub async fn records_for_profile(
    profiles: &Profiles,
    profile: &str,
    cancel: CancelToken,
) -> Result<Vec<LeagueRecords>> {
    let leagues = profiles.leagues(profile)?;
    let client = Client::new();
    let retry = RetryPolicy::default();

    let mut results: Vec<Option<LeagueRecords>> = vec![None; leagues.len()];
    let mut set: JoinSet<(usize, Option<LeagueRecords>)> = JoinSet::new();
    for (index, league) in leagues.iter().enumerate() {
        if league.platform != Platform::Espn {
            debug!(league = %league.name, "platform keeps no season history, skipping");
            continue;
        }
        let league = league.clone();
        let client = client.clone();
        let cancel = cancel.clone();
        set.spawn(async move {
            let records = league_records(client, retry, league, cancel).await;
            (index, records)
        });
    }
    drain_indexed(set, &mut results).await;
    Ok(results.into_iter().flatten().collect())
}

async fn league_records(
    client: Client,
    retry: RetryPolicy,
    league: LeagueConfig,
    cancel: CancelToken,
) -> Option<LeagueRecords> {
    let Some(start_year) = league.start_year else {
        warn!(league = %league.name, "no start year configured, skipping history");
        return None;
    };
    let current_season = Season::current();
    let current = (current_season.as_u16(), current_week());

    let mut years: JoinSet<Vec<HistoricalRecord>> = JoinSet::new();
    for year in start_year..=current_season.as_u16() {
        let client = client.clone();
        let league = league.clone();
        let cancel = cancel.clone();
        years.spawn(async move {
            year_records(client, retry, league, year, current, cancel).await
        });
    }

    let mut records = Vec::new();
    while let Some(joined) = years.join_next().await {
        match joined {
            Ok(year_records) => records.extend(year_records),
            Err(err) => warn!(league = %league.name, error = %err, "year task failed"),
        }
    }

    records.sort_by(|a, b| (a.year, a.week, a.matchup).cmp(&(b.year, b.week, b.matchup)));
    debug!(league = %league.name, records = records.len(), "history collected");

    let leaderboards = rank(&records);
    Some(LeagueRecords {
        league: league.name,
        records,
        leaderboards,
    })
}

async fn year_records(
    client: Client,
    retry: RetryPolicy,
    league: LeagueConfig,
    year: u16,
    current: (u16, Week),
    cancel: CancelToken,
) -> Vec<HistoricalRecord> {
    let adapter = EspnAdapter::new(client, retry);
    let season = match adapter
        .open_season(&league, Season::new(year), &cancel)
        .await
    {
        Ok(season) => Arc::new(season),
        Err(err) => {
            warn!(league = %league.name, year, error = %err, "season unavailable, skipping");
            return Vec::new();
        }
    };

    let mut weeks: JoinSet<Vec<HistoricalRecord>> = JoinSet::new();
    for week in 1..=HISTORY_WEEKS {
        let season = Arc::clone(&season);
        let cancel = cancel.clone();
        weeks.spawn(async move {
            match season.week_scores(Week::new(week), &cancel).await {
                Ok(scores) => week_records(year, Week::new(week), &scores, current),
                Err(err) => {
                    warn!(year, week, error = %err, "week unavailable, skipping");
                    Vec::new()
                }
            }
        });
    }

    let mut records = Vec::new();
    while let Some(joined) = weeks.join_next().await {
        match joined {
            Ok(week_records) => records.extend(week_records),
            Err(err) => warn!(year, error = %err, "week task failed"),
        }
    }
    records
}

/// Classify one fetched week and emit its records.
///
/// A playoff week is excluded regardless of scores, as is any week at or
/// after the current in-progress week of the current season. Sides with a
/// zero score (placeholder artifacts) emit nothing.
pub fn week_records(
    year: u16,
    week: Week,
    scores: &WeekScores,
    current: (u16, Week),
) -> Vec<HistoricalRecord> {
    if scores.playoff {
        return Vec::new();
    }
    let (current_year, current_week) = current;
    if year >= current_year && week >= current_week {
        return Vec::new();
    }

    let mut records = Vec::new();
    for (sequence, (home, away)) in scores.matchups.iter().enumerate() {
        for side in [home, away] {
            if side.points == 0.0 {
                continue;
            }
            let owner = if side.owner == "None" {
                "Redacted".to_string()
            } else {
                side.owner.clone()
            };
            records.push(HistoricalRecord {
                year,
                week: week.as_u16(),
                matchup: (sequence + 1) as u16,
                owner,
                points: round2(side.points),
                projected: round2(side.projected),
                diff: round2(side.points - side.projected),
            });
        }
    }
    records
}

/// Rank a league's records into the six leaderboards.
pub fn rank(records: &[HistoricalRecord]) -> Leaderboards {
    Leaderboards {
        most_points: top3(records, |r| r.points, true),
        fewest_points: top3(records, |r| r.points, false),
        highest_projected: top3(records, |r| r.projected, true),
        lowest_projected: top3(records, |r| r.projected, false),
        best_vs_projection: top3(records, |r| r.diff, true),
        worst_vs_projection: top3(records, |r| r.diff, false),
    }
}

fn top3(
    records: &[HistoricalRecord],
    key: fn(&HistoricalRecord) -> f64,
    descending: bool,
) -> Vec<HistoricalRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal));
    if descending {
        sorted.reverse();
    }
    sorted.truncate(3);
    sorted
}
