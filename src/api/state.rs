use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::auth::{extract_credential, StaticTokenResolver, ViewerResolver};
use crate::adapters::DocumentStore;
use crate::config::AppConfig;
use crate::domain::Viewer;
use crate::services::FeedService;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub feed: FeedService,

    /// Credential to viewer mapping
    pub resolver: Arc<dyn ViewerResolver>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(feed: FeedService, resolver: Arc<dyn ViewerResolver>) -> Self {
        Self {
            feed,
            resolver,
            start_time: Utc::now(),
        }
    }

    /// State wired from configuration with the static token resolver
    pub fn from_config(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Self {
        let resolver = StaticTokenResolver::new(&config.auth.tokens);
        if resolver.is_empty() {
            warn!("no access tokens configured, every caller is a free viewer");
        } else {
            info!(tokens = resolver.len(), "access tokens loaded");
        }
        Self::new(FeedService::from_config(store, config), Arc::new(resolver))
    }

    pub fn viewer(&self, headers: &HeaderMap) -> Option<Viewer> {
        self.resolver.resolve(extract_credential(headers))
    }
}
