//! Type-safe wrappers and shared vocabularies for cross-platform fantasy data.

pub mod ids;
pub mod position;
pub mod team_code;
pub mod time;
