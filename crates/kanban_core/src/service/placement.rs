//! Maps placement intents onto rank generator calls.
//!
//! Neighbor resolution (task id -> rank) happens in the task service; this
//! module only decides which generator operation a given pair of resolved
//! neighbor ranks requires.

use crate::rank::{self, InvalidOrderError, Rank};

/// Rank for a task created at the end of a lane: the middle of the space for
/// an empty lane, otherwise strictly after the current greatest rank.
pub fn rank_for_creation(greatest: Option<&Rank>) -> Rank {
    match greatest {
        None => rank::middle(),
        Some(last) => rank::next(last),
    }
}

/// Rank for a moved task relative to its resolved neighbors.
///
/// - no neighbors: empty destination lane, middle of the space
/// - previous only: end of the lane
/// - next only: start of the lane
/// - both: strictly between, failing with [`InvalidOrderError`] when the
///   neighbors do not satisfy `previous < next`
pub fn rank_for_move(
    previous: Option<&Rank>,
    next: Option<&Rank>,
) -> Result<Rank, InvalidOrderError> {
    match (previous, next) {
        (None, None) => Ok(rank::middle()),
        (Some(previous), None) => Ok(rank::next(previous)),
        (None, Some(next)) => Ok(rank::prev(next)),
        (Some(previous), Some(next)) => rank::between(previous, next),
    }
}
