//! Start phase: lock the roster and generate the schedule.

use crate::logic::schedule::{even_up, generate, randomize, total_matches};
use crate::models::{Participant, RoundRobin, TournamentError};
use log::{debug, info};
use rand::Rng;

/// Start the tournament with the thread-local generator. See [`start_tournament_with_rng`].
pub fn start_tournament<T: Participant>(
    tournament: &mut RoundRobin<T>,
) -> Result<(), TournamentError> {
    start_tournament_with_rng(tournament, &mut rand::thread_rng())
}

/// Start the tournament: pad an odd roster with a bye, shuffle once with `rng`, then fill
/// the schedule with the circle method.
///
/// An empty roster starts with an empty schedule. Fails without touching any state if the
/// tournament is already started or its match numbers would not fit in a `u32`.
pub fn start_tournament_with_rng<T: Participant, R: Rng + ?Sized>(
    tournament: &mut RoundRobin<T>,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.started {
        return Err(TournamentError::AlreadyStarted);
    }
    let padded = tournament.teams.len() + tournament.teams.len() % 2;
    if total_matches(padded, tournament.run_throughs).is_none() {
        return Err(TournamentError::ScheduleTooLarge);
    }
    tournament.started = true;

    if even_up(&mut tournament.teams) {
        debug!("Added bye team to odd roster of '{}'", tournament.name);
    }
    randomize(&mut tournament.teams, rng);
    tournament.schedule = generate(&mut tournament.teams, tournament.run_throughs);

    info!(
        "Started tournament '{}': {} teams, {} weeks, {} matches",
        tournament.name,
        tournament.teams.len(),
        tournament.schedule.len(),
        tournament.schedule.iter().map(Vec::len).sum::<usize>()
    );
    Ok(())
}
