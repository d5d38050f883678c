//! CLI argument definitions.

use crate::roster::Mode;
use crate::types::time::Week;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "ffl-commander", about = "Fantasy football matchup commander")]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a profile's matchups across every tracked league.
    ///
    /// Defaults to the week currently in progress and the platform-declared
    /// starters; `--mode max` reconstructs the best possible lineup,
    /// `--mode all` shows the entire roster.
    Matchups {
        /// Profile name from the profiles file.
        profile: String,

        /// Week override (defaults to the current week).
        #[clap(long, short)]
        week: Option<Week>,

        /// Roster composition: default, max, or all.
        #[clap(long, short, default_value_t = Mode::Default)]
        mode: Mode,

        /// Profiles file (or set `FFL_COMMANDER_PROFILES`).
        #[clap(long)]
        config: Option<PathBuf>,

        /// Projection table JSON: pro team -> position -> name key ->
        /// scoring system -> points.
        #[clap(long)]
        projections: Option<PathBuf>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Build season-long scoring records for a profile's leagues.
    ///
    /// Fans out across every tracked season year and week concurrently;
    /// transient session denial is retried until the upstream recovers.
    Records {
        /// Profile name from the profiles file.
        profile: String,

        /// Profiles file (or set `FFL_COMMANDER_PROFILES`).
        #[clap(long)]
        config: Option<PathBuf>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,

        /// Print every collected record, not only the leaderboards.
        #[clap(long)]
        verbose: bool,
    },

    /// List configured profile names.
    Profiles {
        /// Profiles file (or set `FFL_COMMANDER_PROFILES`).
        #[clap(long)]
        config: Option<PathBuf>,
    },
}
