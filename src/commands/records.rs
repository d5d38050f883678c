//! Historical records command.

use crate::config::Profiles;
use crate::error::Result;
use crate::model::HistoricalRecord;
use crate::platforms::CancelToken;
use crate::records::{records_for_profile, LeagueRecords};
use std::path::Path;

pub async fn handle_records(
    profile: &str,
    config: Option<&Path>,
    as_json: bool,
    verbose: bool,
) -> Result<()> {
    let profiles = Profiles::load(config)?;
    let leagues = records_for_profile(&profiles, profile, CancelToken::new()).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&leagues)?);
        return Ok(());
    }

    if leagues.is_empty() {
        println!("No historical records found for {}", profile);
        return Ok(());
    }
    for league in &leagues {
        print_league(league, verbose);
    }
    Ok(())
}

fn print_league(league: &LeagueRecords, verbose: bool) {
    println!("{} ({} records)", league.league, league.records.len());

    let boards = &league.leaderboards;
    print_board("Most points", &boards.most_points);
    print_board("Fewest points", &boards.fewest_points);
    print_board("Highest projected", &boards.highest_projected);
    print_board("Lowest projected", &boards.lowest_projected);
    print_board("Best vs projection", &boards.best_vs_projection);
    print_board("Worst vs projection", &boards.worst_vs_projection);

    if verbose {
        println!("  All records:");
        for record in &league.records {
            println!("    {}", record_row(record));
        }
    }
    println!();
}

fn print_board(title: &str, records: &[HistoricalRecord]) {
    println!("  {}:", title);
    for record in records {
        println!("    {}", record_row(record));
    }
}

fn record_row(record: &HistoricalRecord) -> String {
    format!(
        "{} wk{:<2} m{} {:<16} {:>7.2} proj {:>7.2} ({:+.2})",
        record.year, record.week, record.matchup, record.owner, record.points,
        record.projected, record.diff
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_row_format() {
        let record = HistoricalRecord {
            year: 2022,
            week: 7,
            matchup: 3,
            owner: "David".to_string(),
            points: 131.42,
            projected: 120.0,
            diff: 11.42,
        };
        let row = record_row(&record);
        assert!(row.starts_with("2022 wk7"));
        assert!(row.contains("David"));
        assert!(row.contains("(+11.42)"));
    }
}
