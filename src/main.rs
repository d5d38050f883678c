//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use ffl_commander::{
    cli::{Cli, Commands},
    commands::{
        handle_profiles,
        matchups::{handle_matchups, MatchupsParams},
        records::handle_records,
    },
    Result,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let app = Cli::parse();

    match app.command {
        Commands::Matchups {
            profile,
            week,
            mode,
            config,
            projections,
            json,
        } => {
            handle_matchups(MatchupsParams {
                profile: &profile,
                week,
                mode,
                config: config.as_deref(),
                projections: projections.as_deref(),
                as_json: json,
            })
            .await?
        }

        Commands::Records {
            profile,
            config,
            json,
            verbose,
        } => handle_records(&profile, config.as_deref(), json, verbose).await?,

        Commands::Profiles { config } => handle_profiles(config.as_deref())?,
    }

    Ok(())
}
