//! Platform adapters and the shared fetch/retry machinery.

pub mod espn;
pub mod sleeper;

use crate::config::LeagueConfig;
use crate::error::{CommanderError, Result};
use crate::gametime::ProTeamGameCache;
use crate::model::Player;
use crate::types::ids::{LeagueId, TeamId};
use crate::types::time::{Season, Week};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Which external platform a league lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Espn,
    Sleeper,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Espn => "espn",
            Platform::Sleeper => "sleeper",
        }
    }
}

/// Cooperative cancellation handle checked between retry attempts.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Retry policy for transient upstream denial.
///
/// The session platform enforces rolling session validity; a denied call is
/// expected to succeed eventually, so the default is unbounded attempts
/// with a fixed half-second backoff. Callers needing bounded latency cap
/// the attempts or cancel the token.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub backoff: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff: Duration::from_millis(500),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Run `op`, retrying on `UpstreamUnavailable` until it succeeds, the
    /// attempt cap is reached, or the token is cancelled. Every other error
    /// passes through immediately.
    pub async fn run<T, F, Fut>(&self, cancel: &CancelToken, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            if cancel.is_cancelled() {
                return Err(CommanderError::Cancelled);
            }
            match op().await {
                Err(CommanderError::UpstreamUnavailable { platform }) => {
                    attempt += 1;
                    if let Some(max) = self.max_attempts {
                        if attempt >= max {
                            return Err(CommanderError::UpstreamUnavailable { platform });
                        }
                    }
                    debug!(platform, attempt, "upstream denied, backing off");
                    tokio::time::sleep(self.backoff).await;
                }
                other => return other,
            }
        }
    }
}

/// Map an HTTP response into the error taxonomy.
///
/// 401/403/429 are transient session denial; 404 is permanent for the
/// call. Anything else surfaces as a plain HTTP error.
pub(crate) fn classify_response(
    platform: &'static str,
    league_id: LeagueId,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    match response.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            Err(CommanderError::UpstreamUnavailable { platform })
        }
        StatusCode::NOT_FOUND => Err(CommanderError::UpstreamNotFound {
            platform,
            league_id: league_id.to_string(),
        }),
        _ => Ok(response.error_for_status()?),
    }
}

/// One side of a platform-fetched matchup, already normalized.
#[derive(Debug, Clone)]
pub struct FetchedSide {
    pub team_id: TeamId,
    pub owner: String,
    pub players: Vec<Player>,
    /// Team total reported by the platform.
    pub points: f64,
    /// Team projection reported by the platform; 0.0 when it has none.
    pub projected: f64,
}

/// A matchup as fetched from one platform for one league-week.
#[derive(Debug, Clone)]
pub struct FetchedMatchup {
    pub playoff: bool,
    pub home: FetchedSide,
    pub away: FetchedSide,
}

impl FetchedMatchup {
    /// Pre-season placeholder matchups report zero everywhere and carry no
    /// rosters; they are dropped rather than rendered. A real matchup
    /// viewed before any game kicks off also totals zero, but its sides
    /// have rostered players.
    pub fn is_placeholder(&self) -> bool {
        self.home.points == 0.0
            && self.away.points == 0.0
            && self.home.projected == 0.0
            && self.away.projected == 0.0
            && self.home.players.is_empty()
            && self.away.players.is_empty()
    }
}

/// The seam every platform implements: one league-week's matchups in
/// canonical form.
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    fn platform(&self) -> Platform;

    async fn fetch_week(
        &self,
        league: &LeagueConfig,
        season: Season,
        week: Week,
        cache: &ProTeamGameCache,
        cancel: &CancelToken,
    ) -> Result<Vec<FetchedMatchup>>;
}

/// Construct the adapter for a platform over a shared HTTP client.
pub fn adapter_for(
    platform: Platform,
    client: Client,
    retry: RetryPolicy,
) -> Box<dyn PlatformAdapter> {
    match platform {
        Platform::Espn => Box::new(espn::EspnAdapter::new(client, retry)),
        Platform::Sleeper => Box::new(sleeper::SleeperAdapter::new(client)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_retry_policy_retries_until_success() {
        let policy = RetryPolicy {
            backoff: Duration::from_millis(1),
            max_attempts: None,
        };
        let cancel = CancelToken::new();
        let mut remaining_failures = 3;

        let result = policy
            .run(&cancel, || {
                let fail = remaining_failures > 0;
                if fail {
                    remaining_failures -= 1;
                }
                async move {
                    if fail {
                        Err(CommanderError::UpstreamUnavailable { platform: "espn" })
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(remaining_failures, 0);
    }

    #[tokio::test]
    async fn test_retry_policy_respects_attempt_cap() {
        let policy = RetryPolicy {
            backoff: Duration::from_millis(1),
            max_attempts: Some(2),
        };
        let cancel = CancelToken::new();

        let result: Result<u32> = policy
            .run(&cancel, || async {
                Err(CommanderError::UpstreamUnavailable { platform: "espn" })
            })
            .await;

        assert!(matches!(
            result,
            Err(CommanderError::UpstreamUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_retry_policy_passes_other_errors_through() {
        let policy = RetryPolicy::default();
        let cancel = CancelToken::new();
        let mut attempts = 0;

        let result: Result<u32> = policy
            .run(&cancel, || {
                attempts += 1;
                async {
                    Err(CommanderError::UpstreamNotFound {
                        platform: "espn",
                        league_id: "1".to_string(),
                    })
                }
            })
            .await;

        assert!(matches!(result, Err(CommanderError::UpstreamNotFound { .. })));
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn test_retry_policy_stops_on_cancel() {
        let policy = RetryPolicy::default();
        let cancel = CancelToken::new();
        cancel.cancel();

        let result: Result<u32> = policy.run(&cancel, || async { Ok(1) }).await;
        assert!(matches!(result, Err(CommanderError::Cancelled)));
    }

    fn roster_of_one() -> Vec<Player> {
        use crate::model::{PlayStatus, PlayerStatus};
        use crate::types::position::Position;
        use crate::types::time::GameTime;

        vec![Player {
            id: "1".to_string(),
            name: "J. Jefferson".to_string(),
            full_name: "Justin Jefferson".to_string(),
            position: Position::WR,
            slot: Position::WR,
            points: 0.0,
            projected: 0.0,
            pro_team: "MIN".to_string(),
            game_time: GameTime::Unknown,
            play_status: PlayStatus::Future,
            status: PlayerStatus::Healthy,
        }]
    }

    fn response_with_status(status: u16) -> reqwest::Response {
        http::Response::builder()
            .status(status)
            .body("")
            .unwrap()
            .into()
    }

    #[test]
    fn test_classify_response_taxonomy() {
        let league_id = LeagueId::new(30191259);

        for denied in [401, 403, 429] {
            let result = classify_response("espn", league_id, response_with_status(denied));
            assert!(matches!(
                result,
                Err(CommanderError::UpstreamUnavailable { platform: "espn" })
            ));
        }

        match classify_response("espn", league_id, response_with_status(404)) {
            Err(CommanderError::UpstreamNotFound { league_id, .. }) => {
                assert_eq!(league_id, "30191259");
            }
            _ => panic!("expected UpstreamNotFound"),
        }

        assert!(classify_response("espn", league_id, response_with_status(200)).is_ok());
    }

    #[test]
    fn test_placeholder_detection() {
        let side = |points: f64, projected: f64, players: Vec<Player>| FetchedSide {
            team_id: TeamId::new(1),
            owner: "A".to_string(),
            players,
            points,
            projected,
        };
        let placeholder = FetchedMatchup {
            playoff: false,
            home: side(0.0, 0.0, Vec::new()),
            away: side(0.0, 0.0, Vec::new()),
        };
        assert!(placeholder.is_placeholder());

        let live = FetchedMatchup {
            playoff: false,
            home: side(0.0, 101.5, Vec::new()),
            away: side(0.0, 98.0, Vec::new()),
        };
        assert!(!live.is_placeholder());
    }

    #[test]
    fn test_pre_kickoff_matchup_with_rosters_is_not_a_placeholder() {
        // A platform with no native projections reports all-zero totals
        // until the first game starts; rostered sides must still render.
        let side = |players: Vec<Player>| FetchedSide {
            team_id: TeamId::new(1),
            owner: "A".to_string(),
            players,
            points: 0.0,
            projected: 0.0,
        };
        let pre_kickoff = FetchedMatchup {
            playoff: false,
            home: side(roster_of_one()),
            away: side(roster_of_one()),
        };
        assert!(!pre_kickoff.is_placeholder());
    }
}
