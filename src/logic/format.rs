//! Capability shared by tournament formats.

use crate::logic::setup::start_tournament;
use crate::models::{Participant, RoundRobin, TournamentError};
use std::sync::Arc;

/// What any tournament format offers its callers. Round-robin is the only format.
pub trait TournamentFormat<T> {
    fn add_team(&mut self, team: T) -> Result<(), TournamentError>;

    fn team(&self, index: usize) -> Result<&T, TournamentError>;

    fn teams(&self) -> &[Arc<T>];

    /// Lock the roster and generate the schedule. One-shot.
    fn start_tournament(&mut self) -> Result<(), TournamentError>;
}

impl<T: Participant> TournamentFormat<T> for RoundRobin<T> {
    fn add_team(&mut self, team: T) -> Result<(), TournamentError> {
        RoundRobin::add_team(self, team)
    }

    fn team(&self, index: usize) -> Result<&T, TournamentError> {
        RoundRobin::team(self, index)
    }

    fn teams(&self) -> &[Arc<T>] {
        RoundRobin::teams(self)
    }

    fn start_tournament(&mut self) -> Result<(), TournamentError> {
        start_tournament(self)
    }
}
