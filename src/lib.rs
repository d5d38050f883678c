//! Fantasy Football Matchup Commander
//!
//! Pulls weekly matchup data from two incompatible fantasy platforms (the
//! cookie-session ESPN v3 API and the public Sleeper JSON API), merges it
//! with an independently-sourced projection table, and produces a
//! normalized view of each tracked profile's matchups plus season-long
//! historical records.
//!
//! ## Features
//!
//! - **Canonical normalization**: one player/team/matchup model across
//!   platforms, including position and pro-team code reconciliation
//! - **Projection merge**: best-effort enrichment from an opaque nested
//!   projection table, with a `warning` flag when the lossy name-key join
//!   likely missed
//! - **Play-status resolution**: future/playing/played per player, with
//!   game times shared across platforms through a call-scoped cache
//! - **Roster composition**: declared starters, entire roster, or a greedy
//!   optimal-lineup reconstruction
//! - **Historical records**: concurrent fan-out across every tracked
//!   league, season year, and week, ranked into leaderboards
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ffl_commander::{
//!     aggregate::matchups_for_profile, config::Profiles, platforms::CancelToken,
//!     projections::ProjectionTable, roster::Mode,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> ffl_commander::Result<()> {
//! let profiles = Profiles::load(None)?;
//! let views = matchups_for_profile(
//!     &profiles,
//!     "david",
//!     None,
//!     Mode::Default,
//!     Arc::new(ProjectionTable::default()),
//!     CancelToken::new(),
//! )
//! .await?;
//! for view in views {
//!     println!("{}: {} vs {}", view.league, view.home.owner, view.away.owner);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gametime;
pub mod model;
pub mod normalize;
pub mod platforms;
pub mod projections;
pub mod records;
pub mod roster;
pub mod types;

// Re-export commonly used types
pub use error::{CommanderError, Result};
pub use model::{HistoricalRecord, Matchup, PlayStatus, Player, PlayerStatus, TeamSide};
pub use platforms::Platform;
pub use roster::Mode;
pub use types::ids::{LeagueId, TeamId};
pub use types::position::Position;
pub use types::time::{GameTime, Season, Week};
