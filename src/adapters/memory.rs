//! In-memory document store
//!
//! Backs the test suites and the demo server when no database is configured.
//! Batch lookups return documents in insertion order, not request order, the
//! same way a document store answers an `$in` query.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{ComboPredictionFilter, DocumentStore, SeasonWindow, StoreResult};
use crate::criteria::{FixtureCriteria, SortSpec};
use crate::domain::{
    select_current_combo, DayKey, Fixture, FixtureDetailKind, FixtureId, FixtureStatus, League,
    LeagueId, Player, PlayerId, PlayerStatLine, Prediction, PredictionSortField, Season, SeasonId,
    SmartCombo, StandingItem, WatchlistSnapshot,
};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Collections {
    fixtures: Vec<Fixture>,
    fixture_details: Vec<(FixtureDetailKind, FixtureId, serde_json::Value)>,
    predictions: Vec<Prediction>,
    combo_predictions: Vec<Prediction>,
    combos: Vec<SmartCombo>,
    leagues: Vec<League>,
    seasons: Vec<Season>,
    standings: Vec<StandingItem>,
    players: Vec<Player>,
    player_stats: Vec<PlayerStatLine>,
    watchlists: Vec<WatchlistSnapshot>,
}

/// Thread-safe in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<Collections>>,
    failing: Arc<RwLock<HashSet<&'static str>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read of `collection` fail until [`MemoryStore::heal`] is called
    pub async fn fail_collection(&self, collection: &'static str) {
        self.failing.write().await.insert(collection);
    }

    pub async fn heal(&self) {
        self.failing.write().await.clear();
    }

    async fn guard(&self, collection: &'static str) -> StoreResult<()> {
        if self.failing.read().await.contains(collection) {
            return Err(StoreError::Unavailable(format!(
                "{} collection unreachable",
                collection
            )));
        }
        Ok(())
    }

    pub async fn insert_fixtures<I: IntoIterator<Item = Fixture>>(&self, items: I) {
        self.data.write().await.fixtures.extend(items);
    }

    pub async fn insert_fixture_detail(
        &self,
        kind: FixtureDetailKind,
        fixture_id: FixtureId,
        payload: serde_json::Value,
    ) {
        self.data
            .write()
            .await
            .fixture_details
            .push((kind, fixture_id, payload));
    }

    pub async fn insert_predictions<I: IntoIterator<Item = Prediction>>(&self, items: I) {
        self.data.write().await.predictions.extend(items);
    }

    pub async fn insert_combo_predictions<I: IntoIterator<Item = Prediction>>(&self, items: I) {
        self.data.write().await.combo_predictions.extend(items);
    }

    pub async fn insert_combos<I: IntoIterator<Item = SmartCombo>>(&self, items: I) {
        self.data.write().await.combos.extend(items);
    }

    pub async fn insert_leagues<I: IntoIterator<Item = League>>(&self, items: I) {
        self.data.write().await.leagues.extend(items);
    }

    pub async fn insert_seasons<I: IntoIterator<Item = Season>>(&self, items: I) {
        self.data.write().await.seasons.extend(items);
    }

    pub async fn insert_standings<I: IntoIterator<Item = StandingItem>>(&self, items: I) {
        self.data.write().await.standings.extend(items);
    }

    pub async fn insert_players<I: IntoIterator<Item = Player>>(&self, items: I) {
        self.data.write().await.players.extend(items);
    }

    pub async fn insert_player_stats<I: IntoIterator<Item = PlayerStatLine>>(&self, items: I) {
        self.data.write().await.player_stats.extend(items);
    }

    pub async fn insert_watchlists<I: IntoIterator<Item = WatchlistSnapshot>>(&self, items: I) {
        self.data.write().await.watchlists.extend(items);
    }
}

fn sorted_limited(
    mut items: Vec<Prediction>,
    sort: SortSpec<PredictionSortField>,
    limit: Option<usize>,
) -> Vec<Prediction> {
    sort.sort(&mut items);
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fixtures_by_ids(&self, ids: &[FixtureId]) -> StoreResult<Vec<Fixture>> {
        self.guard("fixtures").await?;
        let data = self.data.read().await;
        Ok(data
            .fixtures
            .iter()
            .filter(|f| ids.contains(&f.fixture_id))
            .cloned()
            .collect())
    }

    async fn find_fixtures(&self, criteria: &FixtureCriteria) -> StoreResult<Vec<Fixture>> {
        self.guard("fixtures").await?;
        let data = self.data.read().await;
        let mut found: Vec<Fixture> = data
            .fixtures
            .iter()
            .filter(|f| criteria.matches(f))
            .cloned()
            .collect();
        found.sort_by(|a, b| criteria.sort.compare(a, b));
        found.truncate(criteria.limit);
        Ok(found)
    }

    async fn league_fixtures(
        &self,
        league_id: LeagueId,
        season_id: SeasonId,
        window: SeasonWindow,
        limit: usize,
    ) -> StoreResult<Vec<Fixture>> {
        self.guard("fixtures").await?;
        let data = self.data.read().await;
        let mut found: Vec<Fixture> = data
            .fixtures
            .iter()
            .filter(|f| f.league_id == league_id && f.season_id == Some(season_id))
            .filter(|f| match window {
                SeasonWindow::Ahead => f.status() != FixtureStatus::Finished,
                SeasonWindow::Behind => f.status() == FixtureStatus::Finished,
            })
            .cloned()
            .collect();
        match window {
            SeasonWindow::Ahead => found.sort_by_key(|f| (f.kickoff_at, f.fixture_id)),
            SeasonWindow::Behind => {
                found.sort_by_key(|f| (std::cmp::Reverse(f.kickoff_at), f.fixture_id))
            }
        }
        found.truncate(limit);
        Ok(found)
    }

    async fn fixture_detail(
        &self,
        kind: FixtureDetailKind,
        fixture_id: FixtureId,
    ) -> StoreResult<Option<serde_json::Value>> {
        self.guard("fixture_details").await?;
        let data = self.data.read().await;
        Ok(data
            .fixture_details
            .iter()
            .find(|(k, id, _)| *k == kind && *id == fixture_id)
            .map(|(_, _, payload)| payload.clone()))
    }

    async fn predictions_for_fixtures(
        &self,
        fixture_ids: &[FixtureId],
        sort: SortSpec<PredictionSortField>,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Prediction>> {
        self.guard("predictions").await?;
        let data = self.data.read().await;
        let found = data
            .predictions
            .iter()
            .filter(|p| p.fixture_id().is_some_and(|id| fixture_ids.contains(&id)))
            .cloned()
            .collect();
        Ok(sorted_limited(found, sort, limit))
    }

    async fn predictions_for_player(
        &self,
        player_id: PlayerId,
        sort: SortSpec<PredictionSortField>,
        limit: usize,
    ) -> StoreResult<Vec<Prediction>> {
        self.guard("predictions").await?;
        let data = self.data.read().await;
        let found = data
            .predictions
            .iter()
            .filter(|p| p.player_id() == Some(player_id))
            .cloned()
            .collect();
        Ok(sorted_limited(found, sort, Some(limit)))
    }

    async fn combo_predictions(
        &self,
        filter: ComboPredictionFilter,
        sort: SortSpec<PredictionSortField>,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Prediction>> {
        self.guard("smart_combo_predictions").await?;
        let data = self.data.read().await;
        let found = data
            .combo_predictions
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        Ok(sorted_limited(found, sort, limit))
    }

    async fn current_combo(&self) -> StoreResult<Option<SmartCombo>> {
        self.guard("smart_combos").await?;
        let data = self.data.read().await;
        Ok(select_current_combo(&data.combos).cloned())
    }

    async fn leagues(&self) -> StoreResult<Vec<League>> {
        self.guard("leagues").await?;
        let data = self.data.read().await;
        Ok(data.leagues.iter().filter(|l| l.is_prod).cloned().collect())
    }

    async fn league(&self, league_id: LeagueId) -> StoreResult<Option<League>> {
        self.guard("leagues").await?;
        let data = self.data.read().await;
        Ok(data
            .leagues
            .iter()
            .find(|l| l.league_id == league_id)
            .cloned())
    }

    async fn seasons(&self, league_id: LeagueId) -> StoreResult<Vec<Season>> {
        self.guard("league_seasons").await?;
        let data = self.data.read().await;
        Ok(data
            .seasons
            .iter()
            .filter(|s| s.league_id == league_id)
            .cloned()
            .collect())
    }

    async fn season(
        &self,
        league_id: LeagueId,
        season_id: SeasonId,
    ) -> StoreResult<Option<Season>> {
        self.guard("league_seasons").await?;
        let data = self.data.read().await;
        Ok(data
            .seasons
            .iter()
            .find(|s| s.league_id == league_id && s.season_id == season_id)
            .cloned())
    }

    async fn standings(
        &self,
        league_id: LeagueId,
        season_id: SeasonId,
    ) -> StoreResult<Vec<StandingItem>> {
        self.guard("standings").await?;
        let data = self.data.read().await;
        let mut rows: Vec<StandingItem> = data
            .standings
            .iter()
            .filter(|s| s.league_id == league_id && s.season_id == season_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.position);
        Ok(rows)
    }

    async fn players_by_ids(&self, ids: &[PlayerId]) -> StoreResult<Vec<Player>> {
        self.guard("players").await?;
        let data = self.data.read().await;
        Ok(data
            .players
            .iter()
            .filter(|p| ids.contains(&p.player_id))
            .cloned()
            .collect())
    }

    async fn player_stats(
        &self,
        player_ids: &[PlayerId],
        season_id: Option<SeasonId>,
    ) -> StoreResult<Vec<PlayerStatLine>> {
        self.guard("player_statistics").await?;
        let data = self.data.read().await;
        Ok(data
            .player_stats
            .iter()
            .filter(|s| player_ids.contains(&s.player_id) && s.season_id == season_id)
            .cloned()
            .collect())
    }

    async fn latest_player_season(&self, player_id: PlayerId) -> StoreResult<Option<SeasonId>> {
        self.guard("player_statistics").await?;
        let data = self.data.read().await;
        Ok(data
            .player_stats
            .iter()
            .filter(|s| s.player_id == player_id)
            .filter_map(|s| s.season_id)
            .max())
    }

    async fn watchlist_on(
        &self,
        key: DayKey,
        player_id: Option<PlayerId>,
    ) -> StoreResult<Option<WatchlistSnapshot>> {
        self.guard("players_watchlist").await?;
        let data = self.data.read().await;
        Ok(data
            .watchlists
            .iter()
            .find(|w| w.key() == key && player_id.map_or(true, |id| w.contains(id)))
            .cloned())
    }

    async fn watchlist_before(
        &self,
        key: DayKey,
        player_id: Option<PlayerId>,
    ) -> StoreResult<Option<WatchlistSnapshot>> {
        self.guard("players_watchlist").await?;
        let data = self.data.read().await;
        Ok(data
            .watchlists
            .iter()
            .filter(|w| w.key() < key && player_id.map_or(true, |id| w.contains(id)))
            .max_by_key(|w| w.key())
            .cloned())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.guard("fixtures").await
    }
}
