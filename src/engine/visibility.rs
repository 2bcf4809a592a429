//! Tiered visibility
//!
//! Non-premium viewers get the numbers but not the words: text fields are
//! replaced by a fixed placeholder while every numeric and identity field stays
//! as stored. The transform never reorders, drops or adds records.

use std::collections::HashSet;

use crate::domain::{sees_full_detail, Prediction, Viewer};

pub const DEFAULT_MASKED_LABEL: &str = "Premium insight";
pub const DEFAULT_MASKED_REASON: &str = "Upgrade to premium to see the reasoning behind this prediction.";

/// Placeholder text written into masked predictions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskPolicy {
    pub label: String,
    pub reason: String,
}

impl Default for MaskPolicy {
    fn default() -> Self {
        Self {
            label: DEFAULT_MASKED_LABEL.to_string(),
            reason: DEFAULT_MASKED_REASON.to_string(),
        }
    }
}

impl MaskPolicy {
    pub fn new(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Replace the text fields of `prediction`. Reason lists keep their length.
    pub fn mask(&self, prediction: &mut Prediction) {
        prediction.prediction_display_name = self.label.clone();
        for reason in prediction.pre_game_prediction_reasons.iter_mut() {
            *reason = self.reason.clone();
        }
        if let Some(reasons) = prediction.prediction_reasons.as_mut() {
            for reason in reasons.iter_mut() {
                *reason = self.reason.clone();
            }
        }
        prediction.locked = true;
    }
}

/// Which policy applies to a prediction set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSet {
    /// The first prediction of each fixture stays readable
    Fixture,
    /// Every prediction is masked
    Player,
}

/// Apply the viewer's visibility to an already sorted prediction sequence
pub fn apply_visibility(
    mut predictions: Vec<Prediction>,
    viewer: Option<&Viewer>,
    set: PredictionSet,
    policy: &MaskPolicy,
) -> Vec<Prediction> {
    if predictions.is_empty() || sees_full_detail(viewer) {
        return predictions;
    }

    match set {
        PredictionSet::Player => predictions.iter_mut().for_each(|p| policy.mask(p)),
        PredictionSet::Fixture => {
            let mut headline_seen = HashSet::new();
            for prediction in predictions.iter_mut() {
                let is_headline = prediction
                    .fixture_id()
                    .is_some_and(|id| headline_seen.insert(id));
                if !is_headline {
                    policy.mask(prediction);
                }
            }
        }
    }

    predictions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::predictions_for_tests::prediction;
    use crate::domain::PredictionSubject;

    fn ranked_fixture_set() -> Vec<Prediction> {
        // A(0.9), B(0.7), C(0.5) already ranked by the active sort
        vec![
            prediction(PredictionSubject::fixture(1), 1, 0.9),
            prediction(PredictionSubject::fixture(1), 2, 0.7),
            prediction(PredictionSubject::fixture(1), 3, 0.5),
        ]
    }

    fn numbers(p: &Prediction) -> (i64, f64, Option<f64>, Option<f64>, f64) {
        (
            p.prediction_id,
            p.pre_game_prediction,
            p.prediction,
            p.pct_change_value,
            p.pct_change_interval,
        )
    }

    #[test]
    fn test_premium_passes_through() {
        let input = ranked_fixture_set();
        let viewer = Viewer::premium();
        let out = apply_visibility(
            input.clone(),
            Some(&viewer),
            PredictionSet::Fixture,
            &MaskPolicy::default(),
        );
        assert_eq!(out, input);
    }

    #[test]
    fn test_free_fixture_set_keeps_only_headline() {
        let input = ranked_fixture_set();
        let policy = MaskPolicy::default();
        let out = apply_visibility(input.clone(), None, PredictionSet::Fixture, &policy);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0], input[0]);
        for (masked, original) in out[1..].iter().zip(&input[1..]) {
            assert!(masked.locked);
            assert_eq!(masked.prediction_display_name, policy.label);
            assert_eq!(masked.pre_game_prediction_reasons, vec![policy.reason.clone()]);
            assert_eq!(
                masked.prediction_reasons,
                Some(vec![policy.reason.clone()])
            );
            assert_eq!(numbers(masked), numbers(original));
            assert_eq!(masked.subject, original.subject);
        }
    }

    #[test]
    fn test_headline_is_per_fixture() {
        let input = vec![
            prediction(PredictionSubject::fixture(1), 1, 0.9),
            prediction(PredictionSubject::fixture(2), 2, 0.8),
            prediction(PredictionSubject::fixture(1), 3, 0.7),
        ];
        let viewer = Viewer::free();
        let out = apply_visibility(
            input,
            Some(&viewer),
            PredictionSet::Fixture,
            &MaskPolicy::default(),
        );
        let locked: Vec<_> = out.iter().map(|p| p.locked).collect();
        assert_eq!(locked, vec![false, false, true]);
    }

    #[test]
    fn test_free_player_set_masks_everything() {
        let input = vec![
            prediction(PredictionSubject::player(7), 1, 0.9),
            prediction(PredictionSubject::player(7), 2, 0.4),
        ];
        let out = apply_visibility(
            input.clone(),
            None,
            PredictionSet::Player,
            &MaskPolicy::default(),
        );
        assert!(out.iter().all(|p| p.locked));
        for (masked, original) in out.iter().zip(&input) {
            assert_eq!(numbers(masked), numbers(original));
        }
    }

    #[test]
    fn test_masking_is_idempotent() {
        let policy = MaskPolicy::new("Locked", "Hidden");
        let once = apply_visibility(ranked_fixture_set(), None, PredictionSet::Fixture, &policy);
        let twice = apply_visibility(once.clone(), None, PredictionSet::Fixture, &policy);
        assert_eq!(once, twice);

        let once = apply_visibility(ranked_fixture_set(), None, PredictionSet::Player, &policy);
        let twice = apply_visibility(once.clone(), None, PredictionSet::Player, &policy);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input_unchanged() {
        let out = apply_visibility(Vec::new(), None, PredictionSet::Player, &MaskPolicy::default());
        assert!(out.is_empty());
    }
}
