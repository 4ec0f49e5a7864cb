//! Data structures for the scheduler: teams, matches, tournament state.

mod game;
mod team;
mod tournament;

pub use game::Match;
pub use team::{Participant, Team, TeamId, BYE_TEAM_NAME};
pub use tournament::{RoundRobin, TournamentError, TournamentId};
