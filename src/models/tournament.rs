//! RoundRobin tournament state: roster, start latch, and generated schedule.

use crate::models::game::Match;
use crate::models::team::{Participant, Team};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TournamentError {
    /// The roster is frozen once the tournament has started.
    #[error("Tournament has started; the roster is locked")]
    Locked,
    /// `start_tournament` was already called.
    #[error("Tournament has already started")]
    AlreadyStarted,
    #[error("Team index {index} out of range (roster has {len} teams)")]
    TeamIndexOutOfRange { index: usize, len: usize },
    /// Week or position outside the generated schedule (always the case before start).
    #[error("No match at week {week}, position {position}")]
    MatchOutOfRange { week: usize, position: usize },
    #[error("Run-throughs must be at least 1")]
    InvalidRunThroughs,
    /// More matches than a `u32` sequence number can count.
    #[error("Schedule too large to number its matches")]
    ScheduleTooLarge,
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// A round-robin tournament over participants of type `T`.
///
/// Teams are added while the tournament is open. Starting it pads the roster to an even
/// size, shuffles it once and fills `schedule` with `run_throughs * (n - 1)` weeks.
#[derive(Clone, Debug, Serialize)]
pub struct RoundRobin<T = Team> {
    pub(crate) id: TournamentId,
    pub(crate) name: String,
    pub(crate) run_throughs: u32,
    /// Reordered in place while the schedule is generated; frozen afterwards.
    pub(crate) teams: Vec<Arc<T>>,
    pub(crate) started: bool,
    /// One entry per week, each holding `teams.len() / 2` matches.
    pub(crate) schedule: Vec<Vec<Match<T>>>,
}

impl<T: Participant> RoundRobin<T> {
    /// Create an open tournament with no teams.
    pub fn new(name: impl Into<String>, run_throughs: u32) -> Result<Self, TournamentError> {
        if run_throughs == 0 {
            return Err(TournamentError::InvalidRunThroughs);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            run_throughs,
            teams: Vec::new(),
            started: false,
            schedule: Vec::new(),
        })
    }

    /// Create an open tournament with initial teams. Still open until started.
    pub fn with_teams(
        name: impl Into<String>,
        run_throughs: u32,
        teams: impl IntoIterator<Item = T>,
    ) -> Result<Self, TournamentError> {
        let mut t = Self::new(name, run_throughs)?;
        t.teams = teams.into_iter().map(Arc::new).collect();
        Ok(t)
    }

    pub fn id(&self) -> TournamentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run_throughs(&self) -> u32 {
        self.run_throughs
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Number of teams, including the bye team once started with an odd roster.
    pub fn num_teams(&self) -> usize {
        self.teams.len()
    }

    pub fn team(&self, index: usize) -> Result<&T, TournamentError> {
        self.teams
            .get(index)
            .map(|t| &**t)
            .ok_or(TournamentError::TeamIndexOutOfRange {
                index,
                len: self.teams.len(),
            })
    }

    /// Roster in its current order (shuffled and rotated once started).
    pub fn teams(&self) -> &[Arc<T>] {
        &self.teams
    }

    /// Append a team (duplicates allowed). Fails once the tournament has started.
    pub fn add_team(&mut self, team: T) -> Result<(), TournamentError> {
        if self.started {
            return Err(TournamentError::Locked);
        }
        self.teams.push(Arc::new(team));
        Ok(())
    }

    /// Remove the first team equal to `team`. Returns whether one was found.
    pub fn remove_team(&mut self, team: &T) -> Result<bool, TournamentError> {
        if self.started {
            return Err(TournamentError::Locked);
        }
        match self.teams.iter().position(|t| **t == *team) {
            Some(idx) => {
                self.teams.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// All generated weeks in order (empty before start).
    pub fn weeks(&self) -> &[Vec<Match<T>>] {
        &self.schedule
    }

    pub fn week(&self, index: usize) -> Option<&[Match<T>]> {
        self.schedule.get(index).map(Vec::as_slice)
    }

    pub fn num_weeks(&self) -> usize {
        self.schedule.len()
    }

    /// Weeks in one full pass; 0 before start.
    pub fn weeks_per_round(&self) -> usize {
        if self.started {
            self.teams.len().saturating_sub(1)
        } else {
            0
        }
    }

    /// 0 before start.
    pub fn matches_per_week(&self) -> usize {
        if self.started {
            self.teams.len() / 2
        } else {
            0
        }
    }

    /// Weeks of run-through `r` (0-based), or `None` if there is no such pass.
    pub fn run_through(&self, r: usize) -> Option<&[Vec<Match<T>>]> {
        let wpr = self.weeks_per_round();
        if !self.started || r >= self.run_throughs as usize {
            return None;
        }
        self.schedule.get(r * wpr..(r + 1) * wpr)
    }

    pub fn match_at(&self, week: usize, position: usize) -> Result<&Match<T>, TournamentError> {
        self.schedule
            .get(week)
            .and_then(|w| w.get(position))
            .ok_or(TournamentError::MatchOutOfRange { week, position })
    }

    /// Every match in generation order.
    pub fn matches(&self) -> impl Iterator<Item = &Match<T>> {
        self.schedule.iter().flatten()
    }

    /// Matches `team` plays in, in generation order.
    pub fn matches_for<'a>(&'a self, team: &'a T) -> impl Iterator<Item = &'a Match<T>> + 'a {
        self.matches().filter(move |m| m.involves(team))
    }

    /// The real team paired with the bye in `week`, if the roster was padded.
    pub fn bye_team(&self, week: usize) -> Option<&T> {
        self.week(week)?.iter().find(|m| m.is_bye()).map(|m| {
            if m.team_a().is_bye() {
                m.team_b()
            } else {
                m.team_a()
            }
        })
    }
}
