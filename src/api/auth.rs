use axum::http::{header::AUTHORIZATION, HeaderMap};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use crate::config::TokenEntry;
use crate::domain::{Tier, Viewer};

pub const TOKEN_HEADER: &str = "x-matchday-token";

/// Turns an inbound credential into a viewer. `None` means anonymous.
pub trait ViewerResolver: Send + Sync {
    fn resolve(&self, credential: Option<&str>) -> Option<Viewer>;
}

pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.trim().as_bytes());
    hex::encode(hasher.finalize())
}

fn extract_bearer_token(raw: &str) -> Option<&str> {
    raw.strip_prefix("Bearer ")
        .or_else(|| raw.strip_prefix("bearer "))
        .map(str::trim)
}

/// Token from `x-matchday-token`, else from a bearer `Authorization` header
pub fn extract_credential(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(extract_bearer_token)
        })
        .filter(|t| !t.is_empty())
}

/// Resolver over a fixed token table. Only fingerprints are held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    tiers: HashMap<String, Tier>,
}

impl StaticTokenResolver {
    pub fn new<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a TokenEntry>,
    {
        Self {
            tiers: entries
                .into_iter()
                .map(|e| (token_fingerprint(&e.token), e.tier))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl ViewerResolver for StaticTokenResolver {
    fn resolve(&self, credential: Option<&str>) -> Option<Viewer> {
        let tier = self.tiers.get(&token_fingerprint(credential?))?;
        Some(Viewer {
            tier: *tier,
            is_authenticated: true,
        })
    }
}
