//! Schedule generation: bye padding, the initial shuffle, and the circle method.

use crate::models::{Match, Participant};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// Append a bye team if the roster is odd. Returns whether one was added.
pub(crate) fn even_up<T: Participant>(teams: &mut Vec<Arc<T>>) -> bool {
    if teams.len() % 2 == 1 {
        teams.push(Arc::new(T::bye()));
        true
    } else {
        false
    }
}

/// Uniform in-place shuffle of the whole roster.
pub(crate) fn randomize<T, R: Rng + ?Sized>(teams: &mut [Arc<T>], rng: &mut R) {
    teams.shuffle(rng);
}

/// Rotate every team but the first one step to the right: the last team moves to
/// index 1 and the others shift up by one.
pub(crate) fn rotate<T>(teams: &mut [T]) {
    if teams.len() > 2 {
        teams[1..].rotate_right(1);
    }
}

/// Matches in `run_throughs` passes over an even roster of `n`, or `None` when that
/// overflows the `u32` match numbers.
pub(crate) fn total_matches(n: usize, run_throughs: u32) -> Option<u32> {
    let weeks = u32::try_from(n.saturating_sub(1)).ok()?;
    let per_week = u32::try_from(n / 2).ok()?;
    run_throughs.checked_mul(weeks)?.checked_mul(per_week)
}

/// One week of pairings from the current seating: slot `m` pairs `teams[m]` with
/// `teams[n - m - 1]`. `next_number` is advanced past every match built.
fn pair_week<T: Participant>(teams: &[Arc<T>], next_number: &mut u32) -> Vec<Match<T>> {
    let n = teams.len();
    (0..n / 2)
        .map(|m| {
            let number = *next_number;
            *next_number += 1;
            Match::new(Arc::clone(&teams[m]), Arc::clone(&teams[n - m - 1]), number)
        })
        .collect()
}

/// Build `run_throughs * (n - 1)` weeks, rotating `teams` after each week.
///
/// `teams` must already be even-sized and [`total_matches`] must fit. The rotation has
/// period `n - 1`, so every run-through reproduces the same week-by-week pairings.
pub(crate) fn generate<T: Participant>(
    teams: &mut [Arc<T>],
    run_throughs: u32,
) -> Vec<Vec<Match<T>>> {
    let weeks_per_round = teams.len().saturating_sub(1);
    let mut schedule = Vec::new();
    let mut next_number = 1;

    for r in 0..run_throughs {
        for w in 0..weeks_per_round {
            let first = next_number;
            let week = pair_week(teams, &mut next_number);
            debug!(
                "Run-through {} week {}: {} matches from #{}",
                r + 1,
                w + 1,
                week.len(),
                first
            );
            schedule.push(week);
            rotate(teams);
        }
    }

    schedule
}
