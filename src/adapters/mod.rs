//! Document store adapters
//!
//! The aggregation core only talks to [`DocumentStore`]. Every method is a single
//! batch call; joins are assembled in memory by the engine, never by per-row
//! lookups.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::criteria::{FixtureCriteria, SortSpec};
use crate::domain::{
    ComboId, DayKey, Fixture, FixtureDetailKind, FixtureId, League, LeagueId, Player, PlayerId,
    PlayerStatLine, Prediction, PredictionSortField, Season, SeasonId, SmartCombo, StandingItem,
    WatchlistSnapshot,
};
use crate::error::StoreError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Which end of a league season to read fixtures from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonWindow {
    /// Live and upcoming fixtures, earliest kickoff first
    Ahead,
    /// Finished fixtures, latest kickoff first
    Behind,
}

/// Filter for smart-combo prediction lookups; empty matches everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComboPredictionFilter {
    pub combo_id: Option<ComboId>,
    pub fixture_id: Option<FixtureId>,
}

impl ComboPredictionFilter {
    pub fn matches(&self, prediction: &Prediction) -> bool {
        self.combo_id.map_or(true, |id| prediction.combo_id == Some(id))
            && self
                .fixture_id
                .map_or(true, |id| prediction.fixture_id() == Some(id))
    }
}

/// Read-only document store handle
///
/// Batch lookups by ID set return documents in whatever order the store
/// produces; callers must not rely on it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    // ==================== Fixtures ====================

    async fn fixtures_by_ids(&self, ids: &[FixtureId]) -> StoreResult<Vec<Fixture>>;

    /// Fixtures matching `criteria`, sorted and limited by the store
    async fn find_fixtures(&self, criteria: &FixtureCriteria) -> StoreResult<Vec<Fixture>>;

    async fn league_fixtures(
        &self,
        league_id: LeagueId,
        season_id: SeasonId,
        window: SeasonWindow,
        limit: usize,
    ) -> StoreResult<Vec<Fixture>>;

    /// Commentary, weather or statistics document for a fixture
    async fn fixture_detail(
        &self,
        kind: FixtureDetailKind,
        fixture_id: FixtureId,
    ) -> StoreResult<Option<serde_json::Value>>;

    // ==================== Predictions ====================

    async fn predictions_for_fixtures(
        &self,
        fixture_ids: &[FixtureId],
        sort: SortSpec<PredictionSortField>,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Prediction>>;

    async fn predictions_for_player(
        &self,
        player_id: PlayerId,
        sort: SortSpec<PredictionSortField>,
        limit: usize,
    ) -> StoreResult<Vec<Prediction>>;

    async fn combo_predictions(
        &self,
        filter: ComboPredictionFilter,
        sort: SortSpec<PredictionSortField>,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Prediction>>;

    // ==================== Smart combos ====================

    /// The active combo with the earliest `starts_at`
    async fn current_combo(&self) -> StoreResult<Option<SmartCombo>>;

    // ==================== Leagues ====================

    /// Production leagues
    async fn leagues(&self) -> StoreResult<Vec<League>>;

    async fn league(&self, league_id: LeagueId) -> StoreResult<Option<League>>;

    async fn seasons(&self, league_id: LeagueId) -> StoreResult<Vec<Season>>;

    async fn season(&self, league_id: LeagueId, season_id: SeasonId)
        -> StoreResult<Option<Season>>;

    /// Standings rows ordered by table position
    async fn standings(
        &self,
        league_id: LeagueId,
        season_id: SeasonId,
    ) -> StoreResult<Vec<StandingItem>>;

    // ==================== Players ====================

    async fn players_by_ids(&self, ids: &[PlayerId]) -> StoreResult<Vec<Player>>;

    /// Statistic lines for `player_ids`; `season_id == None` selects career lines
    async fn player_stats(
        &self,
        player_ids: &[PlayerId],
        season_id: Option<SeasonId>,
    ) -> StoreResult<Vec<PlayerStatLine>>;

    /// Most recent season a player has statistics for
    async fn latest_player_season(&self, player_id: PlayerId) -> StoreResult<Option<SeasonId>>;

    // ==================== Watchlist ====================

    async fn watchlist_on(
        &self,
        key: DayKey,
        player_id: Option<PlayerId>,
    ) -> StoreResult<Option<WatchlistSnapshot>>;

    /// Latest snapshot strictly before `key`
    async fn watchlist_before(
        &self,
        key: DayKey,
        player_id: Option<PlayerId>,
    ) -> StoreResult<Option<WatchlistSnapshot>>;

    // ==================== Health ====================

    async fn ping(&self) -> StoreResult<()>;
}
