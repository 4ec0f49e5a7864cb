//! Text report of the whole schedule.

use crate::models::{Participant, RoundRobin};
use std::fmt;

/// Before start this is just `Tournament {name}`. After start it lists the schedule
/// grouped by run-through and week, one indented match per line.
impl<T: Participant> fmt::Display for RoundRobin<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.started {
            return write!(f, "Tournament {}", self.name);
        }

        f.write_str(&self.name)?;
        let wpr = self.weeks_per_round();
        for r in 0..self.run_throughs as usize {
            write!(f, "\nRun Through {}", r + 1)?;
            for (w, week) in self.run_through(r).unwrap_or_default().iter().enumerate() {
                write!(f, "\n  Week {}", r * wpr + w + 1)?;
                for m in week {
                    write!(f, "\n    {}", m)?;
                }
            }
        }
        Ok(())
    }
}
