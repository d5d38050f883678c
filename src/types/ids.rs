//! ID types shared across platforms.

use crate::error::{CommanderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for league IDs.
///
/// Wide enough for both platforms: ESPN league IDs fit in a u32, Sleeper
/// league IDs are snowflake-style u64 values.
///
/// # Examples
///
/// ```rust
/// use ffl_commander::LeagueId;
///
/// let league_id = LeagueId::new(30191259);
/// assert_eq!(league_id.as_u64(), 30191259);
/// assert_eq!(league_id.to_string(), "30191259");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeagueId(pub u64);

impl LeagueId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LeagueId {
    type Err = CommanderError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for a fantasy team's ID within one league.
///
/// ESPN team IDs and Sleeper roster IDs share this type; both are small
/// per-league ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl TeamId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = CommanderError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_id_roundtrip() {
        let id: LeagueId = "992213857386684416".parse().unwrap();
        assert_eq!(id.as_u64(), 992213857386684416);
        assert_eq!(id.to_string().parse::<LeagueId>().unwrap(), id);
    }

    #[test]
    fn test_team_id_parse_rejects_garbage() {
        assert!("abc".parse::<TeamId>().is_err());
    }
}
