//! Command handlers dispatched from the CLI entry point.

pub mod matchups;
pub mod records;

use crate::config::Profiles;
use crate::error::Result;
use std::path::Path;

/// Print the configured profile names.
pub fn handle_profiles(config: Option<&Path>) -> Result<()> {
    let profiles = Profiles::load(config)?;
    for name in profiles.known() {
        println!("{}", name);
    }
    Ok(())
}
