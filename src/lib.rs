//! Round-robin tournament scheduler: library with models and scheduling logic.

pub mod logic;
pub mod models;

pub use logic::{
    add_roster, read_roster, start_tournament, start_tournament_with_rng, RosterError,
    TournamentFormat,
};
pub use models::{
    Match, Participant, RoundRobin, Team, TeamId, TournamentError, TournamentId, BYE_TEAM_NAME,
};
