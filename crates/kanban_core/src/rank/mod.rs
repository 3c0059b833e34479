//! Ordering-rank alphabet and the validated rank string type.
//!
//! # Responsibility
//! - Define the 36-symbol ordered alphabet ranks are built from.
//! - Provide the `Rank` type whose lexicographic order is display order.
//!
//! # Invariants
//! - A `Rank` is non-empty, uses alphabet symbols only, and never ends with
//!   the minimum symbol (such a string has no strictly-between neighbor
//!   against its own prefix).
//! - Ranks are produced by `rank::generator` and parsed from storage; callers
//!   never assemble them by hand.

use serde::Serialize;
use std::fmt::{Display, Formatter};

pub mod generator;

pub use generator::{between, middle, next, prev, InvalidOrderError};

/// Number of symbols in the rank alphabet: digits `0-9` then `a-z`.
pub const RADIX: u8 = 36;

/// Smallest symbol in the alphabet.
pub const MIN_SYMBOL: char = '0';

/// Largest symbol in the alphabet.
pub const MAX_SYMBOL: char = 'z';

/// Ordinal of the symbol sitting at the numeric middle of the alphabet.
pub(crate) const MID_ORDINAL: u8 = RADIX / 2;

/// Maps an ASCII symbol to its alphabet ordinal, or `None` if foreign.
pub(crate) fn ordinal(symbol: u8) -> Option<u8> {
    match symbol {
        b'0'..=b'9' => Some(symbol - b'0'),
        b'a'..=b'z' => Some(symbol - b'a' + 10),
        _ => None,
    }
}

/// Maps an alphabet ordinal back to its ASCII symbol.
///
/// Ordinals come from `ordinal()` or from generator arithmetic, both of
/// which stay inside `0..RADIX`.
pub(crate) fn symbol(ordinal: u8) -> u8 {
    debug_assert!(ordinal < RADIX);
    if ordinal < 10 {
        b'0' + ordinal
    } else {
        b'a' + (ordinal - 10)
    }
}

/// Opaque, lexicographically ordered position key for a task within a lane.
///
/// The derived `Ord` is plain string comparison, which for this ASCII-only
/// alphabet matches the ordinal order the generator works in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Rank(String);

/// Why a persisted string failed to parse as a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankParseError {
    Empty,
    UnknownSymbol { symbol: char },
    TrailingMinimum,
}

impl Display for RankParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "rank is empty"),
            Self::UnknownSymbol { symbol } => {
                write!(f, "rank contains symbol `{symbol}` outside the alphabet")
            }
            Self::TrailingMinimum => {
                write!(f, "rank ends with the minimum symbol `{MIN_SYMBOL}`")
            }
        }
    }
}

impl std::error::Error for RankParseError {}

impl Rank {
    /// Parses and validates a rank read back from storage.
    pub fn parse(value: &str) -> Result<Self, RankParseError> {
        let bytes = value.as_bytes();
        if bytes.is_empty() {
            return Err(RankParseError::Empty);
        }
        for &byte in bytes {
            if ordinal(byte).is_none() {
                return Err(RankParseError::UnknownSymbol {
                    symbol: byte as char,
                });
            }
        }
        if bytes[bytes.len() - 1] == MIN_SYMBOL as u8 {
            return Err(RankParseError::TrailingMinimum);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds a rank from generator-produced ordinals.
    pub(crate) fn from_ordinals(ordinals: &[u8]) -> Self {
        debug_assert!(!ordinals.is_empty());
        debug_assert!(ordinals[ordinals.len() - 1] > 0);
        Self(
            ordinals
                .iter()
                .map(|&ord| symbol(ord) as char)
                .collect::<String>(),
        )
    }

    /// Ordinal view consumed by the generator arithmetic.
    pub(crate) fn ordinals(&self) -> Vec<u8> {
        self.0
            .bytes()
            .map(|byte| ordinal(byte).unwrap_or(0))
            .collect()
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Rank {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
