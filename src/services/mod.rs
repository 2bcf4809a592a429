//! Query surfaces
//!
//! [`FeedService`] owns the read-only store handle and the policy constants
//! every surface needs. Each submodule adds one family of surfaces to it.

pub mod combos;
pub mod fixtures;
pub mod health;
pub mod leagues;
pub mod players;
pub mod predictions;

use serde::Serialize;
use std::sync::Arc;

use crate::adapters::DocumentStore;
use crate::config::{AppConfig, LimitsConfig};
use crate::engine::MaskPolicy;

pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use leagues::{LeagueOverview, NextFixture, StandingRow};
pub use players::{PlayerProfile, WatchlistPlayer, WatchlistView};
pub use predictions::PredictionQuery;

/// A successful payload plus advisory warnings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithWarnings<T> {
    pub data: T,
    pub warnings: Vec<String>,
}

impl<T> WithWarnings<T> {
    pub fn clean(data: T) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct FeedService {
    store: Arc<dyn DocumentStore>,
    limits: LimitsConfig,
    mask: MaskPolicy,
}

impl FeedService {
    pub fn new(store: Arc<dyn DocumentStore>, limits: LimitsConfig, mask: MaskPolicy) -> Self {
        Self {
            store,
            limits,
            mask,
        }
    }

    pub fn from_config(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Self {
        Self::new(
            store,
            config.limits.clone(),
            config.visibility.mask_policy(),
        )
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    pub fn mask(&self) -> &MaskPolicy {
        &self.mask
    }
}
