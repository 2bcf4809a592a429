use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ComboId, FixtureId};

/// A curated bundle of fixtures. `fixture_ids` is the canonical display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartCombo {
    pub combo_id: ComboId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub fixture_ids: Vec<FixtureId>,
    pub is_active: bool,
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub total_odds: f64,
    #[serde(default)]
    pub previous_week_combo_accuracy: Option<f64>,
}

impl SmartCombo {
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Combo {}", self.combo_id))
    }
}

/// Picks the current combo: active ones only, earliest `starts_at` wins,
/// then lowest id so the choice is stable.
pub fn select_current_combo<'a, I>(combos: I) -> Option<&'a SmartCombo>
where
    I: IntoIterator<Item = &'a SmartCombo>,
{
    combos
        .into_iter()
        .filter(|c| c.is_active)
        .min_by(|a, b| {
            a.starts_at
                .cmp(&b.starts_at)
                .then_with(|| a.combo_id.cmp(&b.combo_id))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn combo(id: ComboId, active: bool, start_day: u32) -> SmartCombo {
        let starts_at = Utc.with_ymd_and_hms(2026, 3, start_day, 0, 0, 0).unwrap();
        SmartCombo {
            combo_id: id,
            name: None,
            description: None,
            fixture_ids: vec![],
            is_active: active,
            starts_at,
            expires_at: starts_at + chrono::Duration::days(7),
            confidence: 0.0,
            total_odds: 0.0,
            previous_week_combo_accuracy: None,
        }
    }

    #[test]
    fn test_current_combo_prefers_earliest_active() {
        let combos = vec![combo(1, false, 1), combo(2, true, 9), combo(3, true, 4)];
        assert_eq!(select_current_combo(&combos).map(|c| c.combo_id), Some(3));
    }

    #[test]
    fn test_current_combo_none_when_inactive() {
        let combos = vec![combo(1, false, 1)];
        assert!(select_current_combo(&combos).is_none());
        assert_eq!(combos[0].display_name(), "Combo 1");
    }
}
