//! Batch join of independently keyed collections
//!
//! Primary and related documents are fetched with one call each, then merged in
//! memory. Explicit ID lists dictate output order; store order is never trusted.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use tracing::debug;

use crate::adapters::StoreResult;
use crate::error::Result;

/// A primary document with its related documents
#[derive(Debug, Clone, PartialEq)]
pub struct Joined<P, R> {
    pub primary: P,
    pub related: Vec<R>,
}

/// Reorder `items` to follow `requested`, dropping IDs with no match.
///
/// Repeated IDs in `requested` yield the document once, at its first position.
pub fn order_by_ids<T, K, F>(requested: &[K], items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash + Copy,
    F: Fn(&T) -> K,
{
    let mut by_id: HashMap<K, T> = HashMap::with_capacity(items.len());
    for item in items {
        by_id.entry(key(&item)).or_insert(item);
    }
    requested.iter().filter_map(|id| by_id.remove(id)).collect()
}

/// Group `items` by foreign key, keeping their relative order inside a bucket.
/// Items without a key are dropped.
pub fn bucket_by<T, K, F>(items: Vec<T>, key: F) -> HashMap<K, Vec<T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> Option<K>,
{
    let mut buckets: HashMap<K, Vec<T>> = HashMap::new();
    for item in items {
        if let Some(k) = key(&item) {
            buckets.entry(k).or_default().push(item);
        }
    }
    buckets
}

/// Attach related documents to already ordered primaries.
/// A primary with nothing related gets an empty list.
pub fn join_related<P, R, K, FP, FR>(
    primaries: Vec<P>,
    related: Vec<R>,
    primary_key: FP,
    foreign_key: FR,
) -> Vec<Joined<P, R>>
where
    K: Eq + Hash,
    FP: Fn(&P) -> K,
    FR: Fn(&R) -> Option<K>,
{
    let mut buckets = bucket_by(related, foreign_key);
    primaries
        .into_iter()
        .map(|primary| {
            let related = buckets.remove(&primary_key(&primary)).unwrap_or_default();
            Joined { primary, related }
        })
        .collect()
}

/// Fetch primaries and related documents concurrently, then join them in
/// `ids` order. Either fetch failing fails the whole join.
pub async fn join_ordered<P, R, K, FutP, FutR, FP, FR>(
    ids: &[K],
    fetch_primary: FutP,
    fetch_related: FutR,
    primary_key: FP,
    foreign_key: FR,
) -> Result<Vec<Joined<P, R>>>
where
    K: Eq + Hash + Copy,
    FutP: Future<Output = StoreResult<Vec<P>>>,
    FutR: Future<Output = StoreResult<Vec<R>>>,
    FP: Fn(&P) -> K,
    FR: Fn(&R) -> Option<K>,
{
    let (primaries, related) = tokio::try_join!(fetch_primary, fetch_related)?;

    let found = primaries.len();
    let ordered = order_by_ids(ids, primaries, &primary_key);
    if ordered.len() < ids.len() {
        debug!(
            requested = ids.len(),
            found,
            kept = ordered.len(),
            "dropped ids without a document"
        );
    }

    Ok(join_related(ordered, related, primary_key, foreign_key))
}
