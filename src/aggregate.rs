//! Weekly matchup aggregation: the presentation boundary for one profile.
//!
//! Leagues fan out concurrently, all sharing one call-scoped
//! [`ProTeamGameCache`]. Session-platform leagues run first so their game
//! times are cached before the public platform needs to borrow them. No
//! single league's failure prevents the others from rendering.

use crate::config::{LeagueConfig, Profiles};
use crate::error::Result;
use crate::gametime::ProTeamGameCache;
use crate::model::TeamSide;
use crate::platforms::{adapter_for, CancelToken, FetchedSide, Platform, RetryPolicy};
use crate::projections::{merge_projections, ProjectionTable};
use crate::roster::{organize, Mode, TeamView};
use crate::types::time::{current_week, Season, Week};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::warn;

/// One league's matchup for the requested week, tracked team first.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyView {
    pub league: String,
    pub week: Week,
    pub home: TeamView,
    pub away: TeamView,
}

/// Build the ordered matchup list for a profile.
///
/// `week` defaults to the week in progress; `mode` selects the roster
/// composition. Unknown profiles fail with the known-profile list; any
/// other per-league failure degrades to omission.
pub async fn matchups_for_profile(
    profiles: &Profiles,
    profile: &str,
    week: Option<Week>,
    mode: Mode,
    projections: Arc<ProjectionTable>,
    cancel: CancelToken,
) -> Result<Vec<WeeklyView>> {
    let leagues = profiles.leagues(profile)?;
    let week = week.unwrap_or_else(current_week);
    let season = Season::current();
    let cache = Arc::new(ProTeamGameCache::new());
    let client = Client::new();
    let retry = RetryPolicy::default();

    let mut results: Vec<Option<WeeklyView>> = vec![None; leagues.len()];

    for pass in [Platform::Espn, Platform::Sleeper] {
        let mut set: JoinSet<(usize, Option<WeeklyView>)> = JoinSet::new();
        for (index, league) in leagues.iter().enumerate() {
            if league.platform != pass {
                continue;
            }
            let league = league.clone();
            let client = client.clone();
            let cache = Arc::clone(&cache);
            let projections = Arc::clone(&projections);
            let cancel = cancel.clone();
            set.spawn(async move {
                let view = league_week_view(
                    client,
                    retry,
                    league,
                    season,
                    week,
                    mode,
                    cache,
                    projections,
                    cancel,
                )
                .await;
                (index, view)
            });
        }
        drain_indexed(set, &mut results).await;
    }

    Ok(results.into_iter().flatten().collect())
}

/// Drain a fan-out set, placing each task's result at its config index.
///
/// A panicked task loses only its own slot; the other leagues still render.
pub(crate) async fn drain_indexed<T: 'static>(
    mut set: JoinSet<(usize, Option<T>)>,
    results: &mut [Option<T>],
) {
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, value)) => results[index] = value,
            Err(err) => warn!(error = %err, "league task failed"),
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn league_week_view(
    client: Client,
    retry: RetryPolicy,
    league: LeagueConfig,
    season: Season,
    week: Week,
    mode: Mode,
    cache: Arc<ProTeamGameCache>,
    projections: Arc<ProjectionTable>,
    cancel: CancelToken,
) -> Option<WeeklyView> {
    let adapter = adapter_for(league.platform, client, retry);
    let matchups = match adapter
        .fetch_week(&league, season, week, &cache, &cancel)
        .await
    {
        Ok(matchups) => matchups,
        Err(err) => {
            warn!(league = %league.name, error = %err, "skipping league");
            return None;
        }
    };

    let found = matchups
        .into_iter()
        .filter(|matchup| !matchup.is_placeholder())
        .find(|matchup| {
            matchup.home.team_id == league.team_id || matchup.away.team_id == league.team_id
        });
    let Some(found) = found else {
        warn!(league = %league.name, team_id = %league.team_id, "no matchup for tracked team");
        return None;
    };

    // Orient the matchup so the tracked team renders as the home side.
    let (mine, theirs) = if found.home.team_id == league.team_id {
        (found.home, found.away)
    } else {
        (found.away, found.home)
    };

    let mut home = to_side(mine, &league);
    let mut away = to_side(theirs, &league);
    merge_projections(&mut home.players, &projections, &league.scoring);
    merge_projections(&mut away.players, &projections, &league.scoring);

    Some(WeeklyView {
        league: league.name.clone(),
        week,
        home: organize(&home, mode),
        away: organize(&away, mode),
    })
}

fn to_side(fetched: FetchedSide, league: &LeagueConfig) -> TeamSide {
    TeamSide {
        team_id: fetched.team_id,
        owner: fetched.owner,
        platform: league.platform,
        players: fetched.players,
    }
}
