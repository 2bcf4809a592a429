//! Point-in-time snapshot lookup with fallback to the latest earlier day

use std::future::Future;
use tracing::{error, warn};

use crate::adapters::StoreResult;
use crate::domain::{DayKey, WatchlistSnapshot};
use crate::error::Result;

/// Anything keyed by a calendar day
pub trait DaySnapshot {
    fn day_key(&self) -> DayKey;
}

impl DaySnapshot for WatchlistSnapshot {
    fn day_key(&self) -> DayKey {
        self.key()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackOutcome {
    Exact,
    /// An earlier snapshot was returned
    Fallback,
    /// Nothing on or before the requested day
    Miss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotResolution<S> {
    pub requested: DayKey,
    pub snapshot: Option<S>,
    pub outcome: FallbackOutcome,
    pub warning: Option<String>,
}

impl<S> SnapshotResolution<S> {
    pub fn is_stale(&self) -> bool {
        self.outcome != FallbackOutcome::Exact
    }
}

fn fallback_warning(label: &str, requested: DayKey, returned: DayKey) -> String {
    format!(
        "{} data for {} not available. Returning most recent data from {}. This may indicate a data pipeline issue.",
        label, requested, returned
    )
}

fn miss_warning(label: &str, requested: DayKey) -> String {
    format!(
        "No {} data available for {}-{:03} or any previous dates.",
        label.to_lowercase(),
        requested.year,
        requested.day
    )
}

/// Resolve a snapshot for `requested`
///
/// `predecessor` is only queried when the exact lookup misses. A missing or
/// stale answer is still success; only store failures are errors.
pub async fn resolve_snapshot<S, L, LF, P, PF>(
    label: &str,
    requested: DayKey,
    lookup: L,
    predecessor: P,
) -> Result<SnapshotResolution<S>>
where
    S: DaySnapshot,
    L: FnOnce(DayKey) -> LF,
    LF: Future<Output = StoreResult<Option<S>>>,
    P: FnOnce(DayKey) -> PF,
    PF: Future<Output = StoreResult<Option<S>>>,
{
    if let Some(snapshot) = lookup(requested).await? {
        return Ok(SnapshotResolution {
            requested,
            snapshot: Some(snapshot),
            outcome: FallbackOutcome::Exact,
            warning: None,
        });
    }

    match predecessor(requested).await? {
        Some(snapshot) => {
            let returned = snapshot.day_key();
            warn!(%requested, %returned, "{} snapshot missing, using earlier day", label);
            Ok(SnapshotResolution {
                requested,
                snapshot: Some(snapshot),
                outcome: FallbackOutcome::Fallback,
                warning: Some(fallback_warning(label, requested, returned)),
            })
        }
        None => {
            error!(%requested, "no {} snapshot on or before requested day", label);
            Ok(SnapshotResolution {
                requested,
                snapshot: None,
                outcome: FallbackOutcome::Miss,
                warning: Some(miss_warning(label, requested)),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FeedError, StoreError};
    use chrono::Utc;

    fn snapshot(year: i32, day: u32) -> WatchlistSnapshot {
        WatchlistSnapshot {
            year,
            day,
            player_ids: vec![9, 4],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn stored() -> Vec<WatchlistSnapshot> {
        vec![snapshot(2024, 10)]
    }

    async fn resolve(day: u32) -> SnapshotResolution<WatchlistSnapshot> {
        let days = stored();
        resolve_snapshot(
            "Watchlist",
            DayKey::new(2024, day),
            |key| {
                let found = days.iter().find(|s| s.key() == key).cloned();
                async move { Ok(found) }
            },
            |key| {
                let found = days
                    .iter()
                    .filter(|s| s.key() < key)
                    .max_by_key(|s| s.key())
                    .cloned();
                async move { Ok(found) }
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_exact_hit_has_no_warning() {
        let resolution = resolve(10).await;
        assert_eq!(resolution.outcome, FallbackOutcome::Exact);
        assert!(resolution.warning.is_none());
        assert!(!resolution.is_stale());
    }

    #[tokio::test]
    async fn test_falls_back_to_earlier_day() {
        let resolution = resolve(16).await;
        assert_eq!(resolution.outcome, FallbackOutcome::Fallback);
        assert_eq!(
            resolution.snapshot.map(|s| s.key()),
            Some(DayKey::new(2024, 10))
        );
        assert_eq!(
            resolution.warning.as_deref(),
            Some(
                "Watchlist data for 2024-01-16 not available. Returning most recent data from 2024-01-10. This may indicate a data pipeline issue."
            )
        );
    }

    #[tokio::test]
    async fn test_miss_returns_warning_without_snapshot() {
        let resolution = resolve(5).await;
        assert_eq!(resolution.outcome, FallbackOutcome::Miss);
        assert!(resolution.snapshot.is_none());
        assert_eq!(
            resolution.warning.as_deref(),
            Some("No watchlist data available for 2024-005 or any previous dates.")
        );
    }

    #[tokio::test]
    async fn test_store_failure_is_an_error() {
        let result = resolve_snapshot::<WatchlistSnapshot, _, _, _, _>(
            "Watchlist",
            DayKey::new(2024, 16),
            |_| async { Err(StoreError::Unavailable("watchlist".into())) },
            |_| async { Ok(None) },
        )
        .await;
        assert!(matches!(result, Err(FeedError::Dependency(_))));
    }
}
