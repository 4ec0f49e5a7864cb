//! Tournament logic: starting, schedule generation, roster import, the report.

mod format;
mod report;
mod roster;
mod schedule;
mod setup;

pub use format::TournamentFormat;
pub use roster::{add_roster, read_roster, RosterError};
pub use setup::{start_tournament, start_tournament_with_rng};
