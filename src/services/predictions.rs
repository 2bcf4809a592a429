use tracing::{info, instrument};

use super::FeedService;
use crate::adapters::ComboPredictionFilter;
use crate::criteria::{resolve_prediction_sort, SortSpec};
use crate::domain::{ComboId, FixtureId, PlayerId, Prediction, PredictionSortField, Viewer};
use crate::engine::{apply_visibility, PredictionSet};
use crate::error::{FeedError, Result};
use crate::validation::{dedup_preserving_order, parse_id_list, validate_limit};

/// Raw sort and page parameters shared by the prediction surfaces
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictionQuery<'a> {
    pub sort_by: Option<&'a str>,
    pub sort_order: Option<&'a str>,
    pub limit: Option<i64>,
}

impl FeedService {
    fn resolve_page(
        &self,
        query: &PredictionQuery<'_>,
    ) -> Result<(SortSpec<PredictionSortField>, usize)> {
        let limit = validate_limit(
            query.limit,
            self.limits.prediction_limit_default,
            self.limits.prediction_limit_max,
        )?;
        Ok((resolve_prediction_sort(query.sort_by, query.sort_order), limit))
    }

    /// Predictions for one or more fixtures; the top one per fixture stays
    /// readable for non-premium viewers.
    #[instrument(skip(self, viewer))]
    pub async fn fixture_predictions(
        &self,
        fixture_id: Option<FixtureId>,
        fixture_ids: Option<&str>,
        query: PredictionQuery<'_>,
        viewer: Option<&Viewer>,
    ) -> Result<Vec<Prediction>> {
        let mut ids = match fixture_ids.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => parse_id_list(raw, "fixture_ids", None)?,
            None => Vec::new(),
        };
        ids.extend(fixture_id);
        if ids.is_empty() {
            return Err(FeedError::validation(
                "fixture_id or fixture_ids is required",
            ));
        }
        let ids = dedup_preserving_order(&ids);
        let (sort, limit) = self.resolve_page(&query)?;

        let predictions = self
            .store
            .predictions_for_fixtures(&ids, sort, Some(limit))
            .await?;
        info!(fixtures = ids.len(), count = predictions.len(), "fixture predictions");
        Ok(apply_visibility(
            predictions,
            viewer,
            PredictionSet::Fixture,
            &self.mask,
        ))
    }

    /// Predictions about a player; fully masked for non-premium viewers
    #[instrument(skip(self, viewer))]
    pub async fn player_predictions(
        &self,
        player_id: PlayerId,
        query: PredictionQuery<'_>,
        viewer: Option<&Viewer>,
    ) -> Result<Vec<Prediction>> {
        let (sort, limit) = self.resolve_page(&query)?;
        let predictions = self
            .store
            .predictions_for_player(player_id, sort, limit)
            .await?;
        info!(count = predictions.len(), "player predictions");
        Ok(apply_visibility(
            predictions,
            viewer,
            PredictionSet::Player,
            &self.mask,
        ))
    }

    /// Smart-combo predictions, optionally narrowed to a combo or fixture
    #[instrument(skip(self, viewer))]
    pub async fn combo_predictions(
        &self,
        combo_id: Option<ComboId>,
        fixture_id: Option<FixtureId>,
        query: PredictionQuery<'_>,
        viewer: Option<&Viewer>,
    ) -> Result<Vec<Prediction>> {
        let (sort, limit) = self.resolve_page(&query)?;
        let filter = ComboPredictionFilter {
            combo_id,
            fixture_id,
        };
        let predictions = self
            .store
            .combo_predictions(filter, sort, Some(limit))
            .await?;
        info!(count = predictions.len(), "combo predictions");
        Ok(apply_visibility(
            predictions,
            viewer,
            PredictionSet::Fixture,
            &self.mask,
        ))
    }
}
