//! Canonical position vocabulary shared by every platform.

use crate::error::CommanderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical fantasy football positions and roster slots.
///
/// Every platform token is collapsed into this vocabulary before any lookup
/// or comparison: `D/ST`, `DST`, and `DEF` are all [`Position::DST`].
///
/// - **Individual positions**: QB, RB, WR, TE, DST, K
/// - **Lineup-only slot**: FLEX (eligible for RB/WR/TE)
/// - **Inactive slots**: BE (bench), IR (injured reserve)
///
/// # Examples
///
/// ```rust
/// use ffl_commander::Position;
///
/// assert_eq!(Position::canonicalize("D/ST").unwrap(), Position::DST);
/// assert_eq!(Position::canonicalize("DEF").unwrap(), Position::DST);
/// assert_eq!(Position::DST.to_string(), "DST");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    DST,
    K,
    FLEX,
    BE,
    IR,
}

impl Position {
    /// Collapse a platform position token into the canonical vocabulary.
    ///
    /// Idempotent over canonical tokens: canonicalizing `"DST"` yields
    /// [`Position::DST`] unchanged.
    pub fn canonicalize(token: &str) -> Result<Self, CommanderError> {
        let stripped: String = token
            .trim()
            .chars()
            .filter(|c| *c != '/')
            .collect::<String>()
            .to_uppercase();

        match stripped.as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "DST" | "DEF" => Ok(Position::DST),
            "K" => Ok(Position::K),
            "FLEX" => Ok(Position::FLEX),
            "BE" | "BN" | "BENCH" => Ok(Position::BE),
            "IR" => Ok(Position::IR),
            _ => Err(CommanderError::InvalidPosition {
                position: token.to_string(),
            }),
        }
    }

    /// Whether this slot keeps a player out of the active lineup.
    pub fn is_inactive_slot(&self) -> bool {
        matches!(self, Position::BE | Position::IR)
    }

    /// Whether a player at this position may fill a FLEX lineup slot.
    pub fn is_flex_eligible(&self) -> bool {
        matches!(self, Position::RB | Position::WR | Position::TE)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::DST => "DST",
            Position::K => "K",
            Position::FLEX => "FLEX",
            Position::BE => "BE",
            Position::IR => "IR",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = CommanderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::canonicalize(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_collapses_punctuation_variants() {
        assert_eq!(Position::canonicalize("D/ST").unwrap(), Position::DST);
        assert_eq!(Position::canonicalize("DST").unwrap(), Position::DST);
        assert_eq!(Position::canonicalize("DEF").unwrap(), Position::DST);
        assert_eq!(Position::canonicalize("def").unwrap(), Position::DST);
    }

    #[test]
    fn test_canonicalize_is_idempotent_over_canonical_tokens() {
        for pos in [
            Position::QB,
            Position::RB,
            Position::WR,
            Position::TE,
            Position::DST,
            Position::K,
            Position::FLEX,
            Position::BE,
            Position::IR,
        ] {
            assert_eq!(Position::canonicalize(&pos.to_string()).unwrap(), pos);
        }
    }

    #[test]
    fn test_canonicalize_rejects_unknown_tokens() {
        assert!(Position::canonicalize("P").is_err());
        assert!(Position::canonicalize("").is_err());
    }

    #[test]
    fn test_inactive_slots() {
        assert!(Position::BE.is_inactive_slot());
        assert!(Position::IR.is_inactive_slot());
        assert!(!Position::QB.is_inactive_slot());
        assert!(!Position::FLEX.is_inactive_slot());
    }

    #[test]
    fn test_flex_eligibility() {
        assert!(Position::RB.is_flex_eligible());
        assert!(Position::WR.is_flex_eligible());
        assert!(Position::TE.is_flex_eligible());
        assert!(!Position::QB.is_flex_eligible());
        assert!(!Position::K.is_flex_eligible());
        assert!(!Position::DST.is_flex_eligible());
    }
}
