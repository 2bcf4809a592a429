use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use super::FeedService;
use crate::criteria::{resolve_fixture_criteria, FixtureFilterParams, DEFAULT_PREDICTION_SORT};
use crate::domain::{Fixture, FixtureDetailKind, FixtureId, Prediction, Viewer};
use crate::engine::{
    apply_visibility, join_ordered, join_related, truncate, FixtureCard, FixturesPage, Joined,
    PredictionSet,
};
use crate::error::{FeedError, Result};
use crate::validation::{dedup_preserving_order, parse_id_list};

impl FeedService {
    fn into_cards(
        &self,
        joined: Vec<Joined<Fixture, Prediction>>,
        viewer: Option<&Viewer>,
    ) -> Vec<FixtureCard> {
        joined
            .into_iter()
            .map(|Joined { primary, related }| {
                let visible = apply_visibility(related, viewer, PredictionSet::Fixture, &self.mask);
                FixtureCard::new(primary, visible)
            })
            .collect()
    }

    /// Cards for an explicit id list, in request order
    pub(crate) async fn cards_for_ids(
        &self,
        ids: &[FixtureId],
        viewer: Option<&Viewer>,
    ) -> Result<Vec<FixtureCard>> {
        let ids = dedup_preserving_order(ids);
        let joined = join_ordered(
            &ids,
            self.store.fixtures_by_ids(&ids),
            self.store
                .predictions_for_fixtures(&ids, DEFAULT_PREDICTION_SORT, None),
            |f: &Fixture| f.fixture_id,
            |p: &Prediction| p.fixture_id(),
        )
        .await?;
        Ok(self.into_cards(joined, viewer))
    }

    /// Cards for fixtures already in their final order
    pub(crate) async fn cards_for_fixtures(
        &self,
        fixtures: Vec<Fixture>,
        viewer: Option<&Viewer>,
    ) -> Result<Vec<FixtureCard>> {
        if fixtures.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<FixtureId> = fixtures.iter().map(|f| f.fixture_id).collect();
        let predictions = self
            .store
            .predictions_for_fixtures(&ids, DEFAULT_PREDICTION_SORT, None)
            .await?;
        let joined = join_related(fixtures, predictions, |f| f.fixture_id, |p| p.fixture_id());
        Ok(self.into_cards(joined, viewer))
    }

    /// Fixtures for a comma-separated id list, in request order
    #[instrument(skip(self, viewer))]
    pub async fn fixtures_by_ids(
        &self,
        raw_ids: &str,
        viewer: Option<&Viewer>,
    ) -> Result<FixturesPage> {
        let ids = parse_id_list(raw_ids, "fixture_ids", None)?;
        let fixtures = self.cards_for_ids(&ids, viewer).await?;
        info!(requested = ids.len(), returned = fixtures.len(), "fixtures by id");
        Ok(FixturesPage {
            fixture_ids: None,
            fixtures,
        })
    }

    /// Featured fixtures: a short explicit list, in request order
    #[instrument(skip(self, viewer))]
    pub async fn featured_fixtures(
        &self,
        raw_ids: &str,
        viewer: Option<&Viewer>,
    ) -> Result<Vec<FixtureCard>> {
        let ids = parse_id_list(raw_ids, "fixture_ids", Some(self.limits.featured_max_ids))?;
        self.cards_for_ids(&ids, viewer).await
    }

    /// Filter-driven list: every matching id plus the first few as cards
    #[instrument(skip(self, params, viewer))]
    pub async fn fixtures(
        &self,
        params: &FixtureFilterParams<'_>,
        viewer: Option<&Viewer>,
        now: DateTime<Utc>,
    ) -> Result<FixturesPage> {
        let criteria = resolve_fixture_criteria(params, now, self.limits.list_cap)?;
        debug!(?criteria, "resolved fixture criteria");

        let found = self.store.find_fixtures(&criteria).await?;
        let fixture_ids: Vec<FixtureId> = found.iter().map(|f| f.fixture_id).collect();
        let head = truncate(found, self.limits.card_fixtures);
        let fixtures = self.cards_for_fixtures(head, viewer).await?;

        info!(matched = fixture_ids.len(), cards = fixtures.len(), "fixtures by filter");
        Ok(FixturesPage {
            fixture_ids: Some(fixture_ids),
            fixtures,
        })
    }

    /// Only the ordered ids of a filter-driven list
    pub async fn fixture_ids(
        &self,
        params: &FixtureFilterParams<'_>,
        now: DateTime<Utc>,
    ) -> Result<Vec<FixtureId>> {
        let criteria = resolve_fixture_criteria(params, now, self.limits.list_cap)?;
        let found = self.store.find_fixtures(&criteria).await?;
        Ok(found.into_iter().map(|f| f.fixture_id).collect())
    }

    /// Commentary, weather or statistics document for one fixture
    pub async fn fixture_detail(
        &self,
        kind: &str,
        fixture_id: FixtureId,
    ) -> Result<serde_json::Value> {
        let kind = FixtureDetailKind::parse(kind).ok_or_else(|| {
            FeedError::validation(format!(
                "Unknown fixture detail '{}'. Must be one of: commentary, weather, statistics",
                kind
            ))
        })?;
        self.store
            .fixture_detail(kind, fixture_id)
            .await?
            .ok_or_else(|| {
                FeedError::not_found(format!(
                    "No {} found for fixture {}",
                    kind.as_str(),
                    fixture_id
                ))
            })
    }
}
