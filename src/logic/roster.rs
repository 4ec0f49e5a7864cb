//! Roster import: read team names from CSV.

use crate::models::{RoundRobin, Team, TournamentError};
use serde::Deserialize;
use std::io::Read;
use thiserror::Error;

/// Errors from reading a roster file.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Invalid roster CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Roster CSV has no 'name' column")]
    MissingNameColumn,
}

#[derive(Deserialize)]
struct RosterRow {
    name: String,
}

/// Read teams from CSV with a `name` header column. Names are trimmed and blank rows
/// are skipped; other columns are ignored.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Team>, RosterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    if !rdr.headers()?.iter().any(|h| h == "name") {
        return Err(RosterError::MissingNameColumn);
    }
    let mut teams = Vec::new();
    for row in rdr.deserialize::<RosterRow>() {
        let row = row?;
        if !row.name.is_empty() {
            teams.push(Team::new(row.name));
        }
    }
    Ok(teams)
}

/// Add every team in order. Stops at the first error (only possible once started, in
/// which case nothing is added).
pub fn add_roster(
    tournament: &mut RoundRobin<Team>,
    teams: impl IntoIterator<Item = Team>,
) -> Result<usize, TournamentError> {
    let mut added = 0;
    for team in teams {
        tournament.add_team(team)?;
        added += 1;
    }
    Ok(added)
}
