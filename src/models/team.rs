//! Team and the Participant bound used by the scheduler.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a team (used in lookups and the web API).
pub type TeamId = Uuid;

/// Display name of the synthetic team added to odd rosters.
pub const BYE_TEAM_NAME: &str = "Bye Match";

/// Anything that can be entered into a tournament roster.
///
/// Implement this for your own type to carry extra participant data through the
/// schedule; `Team` is the stock implementation.
pub trait Participant: Clone + PartialEq {
    fn name(&self) -> &str;

    /// True only for the placeholder created by [`Participant::bye`].
    fn is_bye(&self) -> bool;

    /// Create the placeholder that pads an odd roster.
    fn bye() -> Self;
}

/// A team in the tournament.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Set only on the synthetic bye team.
    pub bye: bool,
}

impl Team {
    /// Create a new team with the given name and a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bye: false,
        }
    }
}

impl Participant for Team {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_bye(&self) -> bool {
        self.bye
    }

    fn bye() -> Self {
        Self {
            bye: true,
            ..Self::new(BYE_TEAM_NAME)
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_is_not_same_team() {
        assert_ne!(Team::new("Hawks"), Team::new("Hawks"));
    }

    #[test]
    fn bye_is_distinguishable_from_real_team_with_same_name() {
        let real = Team::new(BYE_TEAM_NAME);
        let bye = Team::bye();
        assert!(!real.is_bye());
        assert!(bye.is_bye());
        assert_eq!(bye.name(), real.name());
        assert_ne!(bye, real);
    }
}
