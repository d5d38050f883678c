//! Persistent configuration: which leagues each profile tracks.
//!
//! Read-only from this crate's perspective. The file is JSON mapping a
//! profile name to its ordered league list; session credentials for the
//! ESPN platform travel with the league entry.

use crate::error::{CommanderError, Result};
use crate::platforms::Platform;
use crate::types::ids::{LeagueId, TeamId};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const PROFILES_ENV_VAR: &str = "FFL_COMMANDER_PROFILES";

/// One tracked league within a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    /// Display name used in output.
    pub name: String,
    pub platform: Platform,
    /// Scoring system identifier for projection lookups, e.g. `"ppr"`.
    pub scoring: String,
    pub league_id: LeagueId,
    /// The profile owner's team within this league.
    pub team_id: TeamId,
    /// First season to include in historical records (session platform).
    #[serde(default)]
    pub start_year: Option<u16>,
    /// ESPN session cookie pair, supplied out of band.
    #[serde(default)]
    pub swid: Option<String>,
    #[serde(default)]
    pub s2: Option<String>,
}

impl LeagueConfig {
    /// The session credential pair, required for the ESPN platform.
    pub fn credentials(&self) -> Result<(&str, &str)> {
        match (self.swid.as_deref(), self.s2.as_deref()) {
            (Some(swid), Some(s2)) => Ok((swid, s2)),
            _ => Err(CommanderError::MissingCredentials {
                league_id: self.league_id.to_string(),
            }),
        }
    }
}

/// All configured profiles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profiles(HashMap<String, Vec<LeagueConfig>>);

impl Profiles {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let profiles = serde_json::from_reader(BufReader::new(file))?;
        Ok(profiles)
    }

    /// Load from an explicit path, the `FFL_COMMANDER_PROFILES` env var, or
    /// the default config-dir location, in that order.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_json_file(path);
        }
        if let Ok(env_path) = std::env::var(PROFILES_ENV_VAR) {
            return Self::from_json_file(Path::new(&env_path));
        }
        let default = default_path().ok_or_else(|| CommanderError::MissingConfig {
            env_var: PROFILES_ENV_VAR.to_string(),
        })?;
        if !default.exists() {
            return Err(CommanderError::MissingConfig {
                env_var: PROFILES_ENV_VAR.to_string(),
            });
        }
        Self::from_json_file(&default)
    }

    /// Sorted profile names, used in the unknown-profile message.
    pub fn known(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.keys().cloned().collect();
        names.sort();
        names
    }

    /// The league list for a profile, or `ProfileNotFound` naming the
    /// profiles that do exist.
    pub fn leagues(&self, profile: &str) -> Result<&[LeagueConfig]> {
        self.0
            .get(profile)
            .map(Vec::as_slice)
            .ok_or_else(|| CommanderError::ProfileNotFound {
                profile: profile.to_string(),
                known: self.known(),
            })
    }

    #[cfg(test)]
    pub(crate) fn from_map(map: HashMap<String, Vec<LeagueConfig>>) -> Self {
        Self(map)
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ffl-commander").join("profiles.json"))
}
