//! Creation guard that makes "create" safe under retries and races.
//!
//! # Responsibility
//! - Short-circuit creation when the caller's token already matched.
//! - Convert the store's duplicate-token race signal into a follow-up read,
//!   so both racers observe the same stored entity.
//!
//! # Invariants
//! - Return-existing semantics: on a token hit the retried payload's fields
//!   are discarded in favor of the stored entity, never merged.
//! - Only `DuplicateIdempotencyKey` is recovered; every other store failure
//!   propagates unchanged.

use crate::repo::{RepoError, RepoResult};

/// Trims the caller-supplied token; whitespace-only tokens count as absent.
pub fn normalized_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

/// Runs a creation request under the deduplication contract.
///
/// `find_existing` reads by token within the creation scope; `insert`
/// performs the actual insert, receiving the normalized token to attach (or
/// `None` when the caller supplied none, in which case every call creates).
pub fn create_idempotent<T>(
    key: Option<&str>,
    find_existing: impl Fn(&str) -> RepoResult<Option<T>>,
    insert: impl FnOnce(Option<&str>) -> RepoResult<T>,
) -> RepoResult<T> {
    let Some(key) = normalized_key(key) else {
        return insert(None);
    };

    if let Some(existing) = find_existing(key)? {
        return Ok(existing);
    }

    match insert(Some(key)) {
        Ok(created) => Ok(created),
        Err(duplicate @ RepoError::DuplicateIdempotencyKey { .. }) => {
            // Lost the insert race: the winner's row carries our token now.
            match find_existing(key)? {
                Some(existing) => Ok(existing),
                None => Err(duplicate),
            }
        }
        Err(err) => Err(err),
    }
}
