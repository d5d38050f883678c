//! Pro-team code vocabularies and the fixed cross-platform translation table.
//!
//! The three data sources disagree on exactly three team abbreviations
//! (Washington, Jacksonville, Las Vegas). Every cross-platform team lookup
//! goes through [`translate`]; codes outside the table pass through
//! unchanged.

/// Which source's abbreviation vocabulary a team code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamVocab {
    /// ESPN abbreviations; also the canonical vocabulary for the game cache.
    Espn,
    /// Sleeper abbreviations.
    Sleeper,
    /// The projection source's abbreviations.
    Fp,
}

impl TeamVocab {
    fn index(self) -> usize {
        match self {
            TeamVocab::Espn => 0,
            TeamVocab::Sleeper => 1,
            TeamVocab::Fp => 2,
        }
    }
}

/// The only known naming divergences, as (espn, sleeper, fp) rows.
const TRANSLATIONS: [[&str; 3]; 3] = [
    ["WSH", "WAS", "WAS"],
    ["JAX", "JAX", "JAC"],
    ["OAK", "LV", "LV"],
];

/// Translate a pro-team code between source vocabularies.
///
/// Total: codes not in the translation table are returned unchanged.
pub fn translate(code: &str, from: TeamVocab, to: TeamVocab) -> String {
    let from_col = from.index();
    let to_col = to.index();
    for row in &TRANSLATIONS {
        if row[from_col] == code {
            return row[to_col].to_string();
        }
    }
    code.to_string()
}
