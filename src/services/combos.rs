use std::collections::HashMap;
use tracing::{info, instrument, warn};

use super::FeedService;
use crate::adapters::ComboPredictionFilter;
use crate::criteria::DEFAULT_PREDICTION_SORT;
use crate::domain::Viewer;
use crate::engine::{apply_visibility, bucket_by, ComboFixture, ComboView, PredictionSet};
use crate::error::{FeedError, Result};
use crate::validation::dedup_preserving_order;

impl FeedService {
    /// The active combo with its fixtures in stored `fixture_ids` order
    ///
    /// A member without a fixture document is kept as an id-only entry so the
    /// combo's declared membership survives.
    #[instrument(skip(self, viewer))]
    pub async fn current_combo(&self, viewer: Option<&Viewer>) -> Result<ComboView> {
        let combo = self
            .store
            .current_combo()
            .await?
            .ok_or_else(|| FeedError::not_found("No active smart combo"))?;

        let ids = dedup_preserving_order(&combo.fixture_ids);
        let filter = ComboPredictionFilter {
            combo_id: Some(combo.combo_id),
            fixture_id: None,
        };
        let (fixtures, predictions) = tokio::try_join!(
            self.store.fixtures_by_ids(&ids),
            self.store
                .combo_predictions(filter, DEFAULT_PREDICTION_SORT, None),
        )?;

        let mut fixtures: HashMap<_, _> = fixtures.into_iter().map(|f| (f.fixture_id, f)).collect();
        let mut buckets = bucket_by(predictions, |p| p.fixture_id());

        let members: Vec<ComboFixture> = ids
            .iter()
            .map(|&fixture_id| {
                let fixture = fixtures.remove(&fixture_id);
                if fixture.is_none() {
                    warn!(combo_id = combo.combo_id, fixture_id, "combo fixture document missing");
                }
                let related = buckets.remove(&fixture_id).unwrap_or_default();
                ComboFixture {
                    fixture_id,
                    fixture: fixture.map(Into::into),
                    predictions: apply_visibility(
                        related,
                        viewer,
                        PredictionSet::Fixture,
                        &self.mask,
                    ),
                }
            })
            .collect();

        info!(combo_id = combo.combo_id, fixtures = members.len(), "current combo");
        Ok(ComboView {
            combo: combo.into(),
            fixtures: members,
        })
    }
}
