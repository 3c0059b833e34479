//! Rank generation: midpoints over the lexicographic key space.
//!
//! # Responsibility
//! - Produce a first rank for an empty lane (`middle`).
//! - Produce append/prepend ranks (`next`/`prev`) with room left over.
//! - Produce a rank strictly between two neighbors (`between`).
//!
//! # Invariants
//! - Outputs are always valid `Rank` values (never ending in the minimum
//!   symbol), so every output remains a legal input later.
//! - No call ever requires renumbering existing ranks; tight insertions grow
//!   the string by roughly one symbol instead.

use super::{Rank, MID_ORDINAL, RADIX};
use std::fmt::{Display, Formatter};

/// `between` was called with endpoints that do not sort `low < high`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOrderError {
    pub low: Rank,
    pub high: Rank,
}

impl Display for InvalidOrderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rank `{}` must sort strictly before rank `{}`",
            self.low, self.high
        )
    }
}

impl std::error::Error for InvalidOrderError {}

/// The first rank ever assigned in a lane: the middle of the whole space.
pub fn middle() -> Rank {
    Rank::from_ordinals(&[MID_ORDINAL])
}

/// A rank strictly greater than `rank`.
///
/// Each emitted symbol halves the interval left between `rank` and the open
/// top of the space, so sequential appends only occasionally extend the
/// string length.
pub fn next(rank: &Rank) -> Rank {
    Rank::from_ordinals(&midpoint_above(&rank.ordinals()))
}

/// A rank strictly less than `rank`; mirror of [`next`] toward the open
/// bottom of the space.
pub fn prev(rank: &Rank) -> Rank {
    Rank::from_ordinals(&midpoint_below(&rank.ordinals()))
}

/// A rank strictly between `low` and `high`.
///
/// Walks both strings symbol by symbol, treating a missing trailing symbol
/// in the shorter string as the alphabet minimum. The first position whose
/// ordinals leave a gap receives their floored mean; adjacent ordinals pin
/// the low symbol and subdivide the tail instead, extending the result by a
/// middle symbol when the low side is exhausted.
///
/// # Errors
/// Returns [`InvalidOrderError`] when `low >= high`.
pub fn between(low: &Rank, high: &Rank) -> Result<Rank, InvalidOrderError> {
    if low >= high {
        return Err(InvalidOrderError {
            low: low.clone(),
            high: high.clone(),
        });
    }

    let low_ordinals = low.ordinals();
    let high_ordinals = high.ordinals();
    let mut out = Vec::with_capacity(high_ordinals.len() + 1);

    for (position, &high_ordinal) in high_ordinals.iter().enumerate() {
        let low_ordinal = low_ordinals.get(position).copied().unwrap_or(0);
        if high_ordinal - low_ordinal > 1 {
            out.push((low_ordinal + high_ordinal) / 2);
            return Ok(Rank::from_ordinals(&out));
        }

        out.push(low_ordinal);
        if high_ordinal - low_ordinal == 1 {
            // Pinned strictly below `high` at this position; anything greater
            // than the rest of `low` now fits.
            let low_tail = low_ordinals.get(position + 1..).unwrap_or(&[]);
            out.extend(midpoint_above(low_tail));
            return Ok(Rank::from_ordinals(&out));
        }
    }

    // `high` exhausted as a prefix of `low` contradicts `low < high`, which
    // the guard above already rejected.
    Err(InvalidOrderError {
        low: low.clone(),
        high: high.clone(),
    })
}

/// Ordinals strictly greater than `tail`, taking half the remaining interval
/// toward the open top at each position.
fn midpoint_above(tail: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(tail.len() + 1);
    let mut position = 0;
    loop {
        let low_ordinal = tail.get(position).copied().unwrap_or(0);
        let mid = (low_ordinal + RADIX) / 2;
        if mid > low_ordinal {
            out.push(mid);
            return out;
        }
        // Maximum symbol: copy it and subdivide one position deeper.
        out.push(low_ordinal);
        position += 1;
    }
}

/// Ordinals strictly less than `bound` but above the all-minimum floor;
/// mirror of [`midpoint_above`].
fn midpoint_below(bound: &[u8]) -> Vec<u8> {
    // A well-formed rank never ends with the minimum symbol, so a non-zero
    // ordinal exists. The fallback keeps corrupt input from panicking.
    let Some(pivot) = bound.iter().position(|&ord| ord != 0) else {
        return vec![MID_ORDINAL];
    };

    let mut out = vec![0; pivot];
    let high_ordinal = bound[pivot];
    if high_ordinal >= 2 {
        out.push(high_ordinal / 2);
    } else {
        // Adjacent to the floor: step into the subdivision below.
        out.push(0);
        out.push(MID_ORDINAL);
    }
    out
}
