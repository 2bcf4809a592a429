//! Liveness and readiness reporting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::FeedService;

/// Health status for a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub last_check: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
}

/// Client-facing text for a failed ping; the cause is only logged
pub const STORE_UNREACHABLE: &str = "Document store unreachable";

impl FeedService {
    /// Ping the document store and report overall health
    pub async fn health(&self, started_at: DateTime<Utc>) -> HealthResponse {
        let now = Utc::now();
        let store = match self.store.ping().await {
            Ok(()) => ComponentHealth {
                name: "document_store".to_string(),
                status: HealthStatus::Healthy,
                message: None,
                last_check: now,
            },
            Err(e) => {
                warn!(error = %e, "document store ping failed");
                ComponentHealth {
                    name: "document_store".to_string(),
                    status: HealthStatus::Unhealthy,
                    message: Some(STORE_UNREACHABLE.to_string()),
                    last_check: now,
                }
            }
        };

        let components = vec![store];
        let status = if components.iter().all(|c| c.status.is_healthy()) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        HealthResponse {
            status,
            timestamp: now,
            uptime_seconds: (now - started_at).num_seconds().max(0) as u64,
            components,
        }
    }
}
