//! Match: one pairing of two roster teams with its sequence number.

use crate::models::team::Participant;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A single scheduled match. Only the scheduler builds these.
///
/// Both sides share ownership with the tournament roster, so a match never holds a
/// copy of a team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Match<T> {
    team_a: Arc<T>,
    team_b: Arc<T>,
    /// 1-based, unique within the tournament, in generation order.
    number: u32,
}

impl<T: Participant> Match<T> {
    pub(crate) fn new(team_a: Arc<T>, team_b: Arc<T>, number: u32) -> Self {
        Self {
            team_a,
            team_b,
            number,
        }
    }

    pub fn team_a(&self) -> &T {
        &self.team_a
    }

    pub fn team_b(&self) -> &T {
        &self.team_b
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Whether `team` plays on either side of this match.
    pub fn involves(&self, team: &T) -> bool {
        *self.team_a == *team || *self.team_b == *team
    }

    /// The other side of the match, if `team` is playing in it.
    pub fn opponent_of(&self, team: &T) -> Option<&T> {
        if *self.team_a == *team {
            Some(&self.team_b)
        } else if *self.team_b == *team {
            Some(&self.team_a)
        } else {
            None
        }
    }

    /// True when one side is the synthetic bye team (the other side sits out).
    pub fn is_bye(&self) -> bool {
        self.team_a.is_bye() || self.team_b.is_bye()
    }
}

impl<T: Participant> fmt::Display for Match<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Match {}: {} vs {}",
            self.number,
            self.team_a.name(),
            self.team_b.name()
        )
    }
}
