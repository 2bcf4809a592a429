//! Aggregation core: batch joins, tiered visibility, temporal fallback and
//! response shapes.

pub mod assemble;
pub mod fallback;
pub mod join;
pub mod visibility;

pub use assemble::*;
pub use fallback::{resolve_snapshot, DaySnapshot, FallbackOutcome, SnapshotResolution};
pub use join::{bucket_by, join_ordered, join_related, order_by_ids, Joined};
pub use visibility::{apply_visibility, MaskPolicy, PredictionSet};
