//! Ordering helpers for record listings.
//!
//! Listings are newest first. Ties keep their input order (the sort is
//! stable), so callers that pre-sort by address get a fully deterministic
//! result.

use crate::errors::{TagsumError, TagsumResult};

/// Sort by a key, largest first. Stable.
pub fn sort_desc_by_key<T, K, F>(items: &mut [T], mut key_fn: F)
where
    F: FnMut(&T) -> K,
    K: Ord,
{
    items.sort_by(|a, b| key_fn(b).cmp(&key_fn(a)));
}

/// Ensure a slice is already in descending key order.
pub fn ensure_sorted_desc<T, K, F>(items: &[T], mut key_fn: F) -> TagsumResult<()>
where
    F: FnMut(&T) -> K,
    K: Ord,
{
    for w in items.windows(2) {
        if key_fn(&w[0]) < key_fn(&w[1]) {
            return Err(TagsumError::invariant("collection is not sorted newest first"));
        }
    }
    Ok(())
}
