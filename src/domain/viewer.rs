use serde::{Deserialize, Serialize};

/// Subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Premium,
}

/// Capability context of the caller. Anonymous callers are `Option::<Viewer>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub tier: Tier,
    pub is_authenticated: bool,
}

impl Viewer {
    pub fn premium() -> Self {
        Self {
            tier: Tier::Premium,
            is_authenticated: true,
        }
    }

    pub fn free() -> Self {
        Self {
            tier: Tier::Free,
            is_authenticated: true,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.is_authenticated && self.tier == Tier::Premium
    }
}

/// Full detail only goes to authenticated premium viewers
pub fn sees_full_detail(viewer: Option<&Viewer>) -> bool {
    viewer.is_some_and(Viewer::is_premium)
}
