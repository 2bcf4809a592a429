use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow, Postgres};
use sqlx::{QueryBuilder, Row};
use tracing::{debug, info, instrument};

use super::{ComboPredictionFilter, DocumentStore, SeasonWindow, StoreResult};
use crate::criteria::{FixtureCriteria, FixtureSortField, SortSpec};
use crate::domain::{
    DayKey, Fixture, FixtureDetailKind, FixtureId, FixtureStatus, Form, League, LeagueId, Player,
    PlayerId, PlayerStatLine, Prediction, PredictionSortField, PredictionSubject, Season,
    SeasonId, SmartCombo, StandingItem, TeamSide, WatchlistSnapshot, DEFAULT_PCT_CHANGE_INTERVAL,
};
use crate::error::StoreError;

const FIXTURE_COLUMNS: &str = r#"
    SELECT fixture_id, league_id, league_name, season_id,
           home_team_id, home_name, home_short_code, home_logo, home_score,
           away_team_id, away_name, away_short_code, away_logo, away_score,
           kickoff_at, minutes_elapsed, ended_at
    FROM fixtures
"#;

const PREDICTION_COLUMNS: &str = r#"
    SELECT prediction_id, subject_kind, subject_id, NULL::BIGINT AS combo_id,
           prediction_type, prediction_display_name,
           pre_game_prediction, pre_game_prediction_reasons,
           prediction, prediction_reasons,
           pct_change_value, pct_change_interval, created_at, updated_at
    FROM predictions
"#;

const COMBO_PREDICTION_COLUMNS: &str = r#"
    SELECT prediction_id, 'fixture' AS subject_kind, fixture_id AS subject_id, combo_id,
           prediction_type, prediction_display_name,
           pre_game_prediction, pre_game_prediction_reasons,
           prediction, prediction_reasons,
           pct_change_value, pct_change_interval, created_at, updated_at
    FROM smart_combo_predictions
"#;

const STAT_COLUMNS: &str = r#"
    SELECT player_id, season_id, team_id, jersey_number, position_id,
           appearances, minutes_played, goals, assists, yellow_cards, red_cards, rating
    FROM player_statistics
"#;

/// PostgreSQL document store
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn new(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run migrations
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_predictions(
        &self,
        mut qb: QueryBuilder<'_, Postgres>,
        sort: SortSpec<PredictionSortField>,
        limit: Option<usize>,
        collection: &str,
    ) -> StoreResult<Vec<Prediction>> {
        push_prediction_order(&mut qb, sort);
        if let Some(limit) = limit {
            qb.push(" LIMIT ").push_bind(limit as i64);
        }
        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| prediction_from_row(row, collection))
            .collect()
    }
}

// ==================== Row decoding ====================

fn decode_error(collection: &str, reason: impl Into<String>) -> StoreError {
    StoreError::Decode {
        collection: collection.to_string(),
        reason: reason.into(),
    }
}

fn opt_u32(row: &PgRow, column: &str) -> StoreResult<Option<u32>> {
    Ok(row
        .try_get::<Option<i32>, _>(column)?
        .and_then(|v| u32::try_from(v).ok()))
}

fn req_u32(row: &PgRow, column: &str, collection: &str) -> StoreResult<u32> {
    let value: i32 = row.try_get(column)?;
    u32::try_from(value)
        .map_err(|_| decode_error(collection, format!("{} is negative ({})", column, value)))
}

fn team_side(row: &PgRow, prefix: &str) -> StoreResult<TeamSide> {
    Ok(TeamSide {
        team_id: row.try_get(format!("{prefix}_team_id").as_str())?,
        name: row.try_get(format!("{prefix}_name").as_str())?,
        short_code: row.try_get(format!("{prefix}_short_code").as_str())?,
        logo: row.try_get(format!("{prefix}_logo").as_str())?,
        score: opt_u32(row, &format!("{prefix}_score"))?,
    })
}

fn fixture_from_row(row: &PgRow) -> StoreResult<Fixture> {
    Ok(Fixture {
        fixture_id: row.try_get("fixture_id")?,
        league_id: row.try_get("league_id")?,
        league_name: row.try_get("league_name")?,
        season_id: row.try_get("season_id")?,
        home: team_side(row, "home")?,
        away: team_side(row, "away")?,
        kickoff_at: row.try_get("kickoff_at")?,
        minutes_elapsed: opt_u32(row, "minutes_elapsed")?,
        ended_at: row.try_get("ended_at")?,
    })
}

fn prediction_from_row(row: &PgRow, collection: &str) -> StoreResult<Prediction> {
    let kind: String = row.try_get("subject_kind")?;
    let subject_id: i64 = row.try_get("subject_id")?;
    let subject = match kind.as_str() {
        "fixture" => PredictionSubject::fixture(subject_id),
        "player" => PredictionSubject::player(subject_id),
        other => return Err(decode_error(collection, format!("unknown subject '{}'", other))),
    };

    Ok(Prediction {
        subject,
        combo_id: row.try_get("combo_id")?,
        prediction_id: row.try_get("prediction_id")?,
        prediction_type: row.try_get("prediction_type")?,
        prediction_display_name: row.try_get("prediction_display_name")?,
        pre_game_prediction: row.try_get("pre_game_prediction")?,
        pre_game_prediction_reasons: row
            .try_get::<Option<Vec<String>>, _>("pre_game_prediction_reasons")?
            .unwrap_or_default(),
        prediction: row.try_get("prediction")?,
        prediction_reasons: row.try_get("prediction_reasons")?,
        pct_change_value: row.try_get("pct_change_value")?,
        pct_change_interval: row
            .try_get::<Option<f64>, _>("pct_change_interval")?
            .unwrap_or(DEFAULT_PCT_CHANGE_INTERVAL),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        locked: false,
    })
}

fn combo_from_row(row: &PgRow) -> StoreResult<SmartCombo> {
    Ok(SmartCombo {
        combo_id: row.try_get("combo_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        fixture_ids: row.try_get("fixture_ids")?,
        is_active: row.try_get("is_active")?,
        starts_at: row.try_get("starts_at")?,
        expires_at: row.try_get("expires_at")?,
        confidence: row.try_get("confidence")?,
        total_odds: row.try_get("total_odds")?,
        previous_week_combo_accuracy: row.try_get("previous_week_combo_accuracy")?,
    })
}

fn league_from_row(row: &PgRow) -> StoreResult<League> {
    Ok(League {
        league_id: row.try_get("league_id")?,
        league_name: row.try_get("league_name")?,
        short_code: row.try_get("short_code")?,
        country_id: row.try_get("country_id")?,
        country_name: row.try_get("country_name")?,
        league_type: row.try_get("league_type")?,
        league_sub_type: row.try_get("league_sub_type")?,
        image_path: row.try_get("image_path")?,
        is_prod: row.try_get("is_prod")?,
    })
}

fn season_from_row(row: &PgRow) -> StoreResult<Season> {
    Ok(Season {
        league_id: row.try_get("league_id")?,
        season_id: row.try_get("season_id")?,
        season_name: row.try_get("season_name")?,
        is_current: row.try_get("is_current")?,
        starting_at: row.try_get::<Option<NaiveDate>, _>("starting_at")?,
        ending_at: row.try_get::<Option<NaiveDate>, _>("ending_at")?,
    })
}

fn standing_from_row(row: &PgRow) -> StoreResult<StandingItem> {
    let form: Vec<String> = row
        .try_get::<Option<Vec<String>>, _>("form")?
        .unwrap_or_default();
    Ok(StandingItem {
        league_id: row.try_get("league_id")?,
        season_id: row.try_get("season_id")?,
        team_id: row.try_get("team_id")?,
        team_name: row.try_get("team_name")?,
        team_logo: row.try_get("team_logo")?,
        position: req_u32(row, "position", "standings")?,
        points: row.try_get("points")?,
        wins: req_u32(row, "wins", "standings")?,
        draws: req_u32(row, "draws", "standings")?,
        losses: req_u32(row, "losses", "standings")?,
        goal_difference: row.try_get("goal_difference")?,
        form: Form::parse(&form),
        next_fixture_id: row.try_get("next_fixture_id")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn player_from_row(row: &PgRow) -> StoreResult<Player> {
    Ok(Player {
        player_id: row.try_get("player_id")?,
        display_name: row.try_get("display_name")?,
        common_name: row.try_get("common_name")?,
        position_id: row.try_get("position_id")?,
        nationality_id: row.try_get("nationality_id")?,
        team_id: row.try_get("team_id")?,
        image_path: row.try_get("image_path")?,
    })
}

fn stat_line_from_row(row: &PgRow) -> StoreResult<PlayerStatLine> {
    Ok(PlayerStatLine {
        player_id: row.try_get("player_id")?,
        season_id: row.try_get("season_id")?,
        team_id: row.try_get("team_id")?,
        jersey_number: opt_u32(row, "jersey_number")?,
        position_id: row.try_get("position_id")?,
        appearances: opt_u32(row, "appearances")?,
        minutes_played: opt_u32(row, "minutes_played")?,
        goals: opt_u32(row, "goals")?,
        assists: opt_u32(row, "assists")?,
        yellow_cards: opt_u32(row, "yellow_cards")?,
        red_cards: opt_u32(row, "red_cards")?,
        rating: row.try_get("rating")?,
    })
}

fn watchlist_from_row(row: &PgRow) -> StoreResult<WatchlistSnapshot> {
    Ok(WatchlistSnapshot {
        year: row.try_get("year")?,
        day: req_u32(row, "day", "players_watchlist")?,
        player_ids: row.try_get("player_ids")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// ==================== Query fragments ====================

fn push_status_filter(qb: &mut QueryBuilder<'_, Postgres>, status: FixtureStatus) {
    qb.push(match status {
        FixtureStatus::Finished => " AND ended_at IS NOT NULL",
        FixtureStatus::Live => " AND ended_at IS NULL AND minutes_elapsed IS NOT NULL",
        FixtureStatus::Upcoming => " AND ended_at IS NULL AND minutes_elapsed IS NULL",
    });
}

fn push_prediction_order(qb: &mut QueryBuilder<'_, Postgres>, sort: SortSpec<PredictionSortField>) {
    qb.push(format!(
        " ORDER BY {} {}, prediction_id {}, subject_id ASC",
        sort.field.column(),
        sort.direction.as_sql(),
        sort.direction.keyword(),
    ));
}

fn push_fixture_order(qb: &mut QueryBuilder<'_, Postgres>, sort: SortSpec<FixtureSortField>) {
    match sort.field {
        FixtureSortField::Kickoff => qb.push(format!(
            " ORDER BY kickoff_at {}, fixture_id ASC",
            sort.direction.keyword()
        )),
        FixtureSortField::League => qb.push(format!(
            " ORDER BY league_name {}, league_id {}, kickoff_at ASC, fixture_id ASC",
            sort.direction.as_sql(),
            sort.direction.keyword()
        )),
    };
}

fn push_watchlist_player(qb: &mut QueryBuilder<'_, Postgres>, player_id: Option<PlayerId>) {
    if let Some(player_id) = player_id {
        qb.push(" AND ").push_bind(player_id).push(" = ANY(player_ids)");
    }
}

const WATCHLIST_COLUMNS: &str =
    "SELECT year, day, player_ids, created_at, updated_at FROM players_watchlist";

fn watchlist_on_query(key: DayKey, player_id: Option<PlayerId>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(WATCHLIST_COLUMNS);
    qb.push(" WHERE year = ").push_bind(key.year);
    qb.push(" AND day = ").push_bind(key.day as i32);
    push_watchlist_player(&mut qb, player_id);
    qb.push(" LIMIT 1");
    qb
}

/// Latest snapshot strictly before `key`
fn watchlist_before_query(
    key: DayKey,
    player_id: Option<PlayerId>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(WATCHLIST_COLUMNS);
    qb.push(" WHERE (year, day) < (")
        .push_bind(key.year)
        .push(", ")
        .push_bind(key.day as i32)
        .push(")");
    push_watchlist_player(&mut qb, player_id);
    qb.push(" ORDER BY year DESC, day DESC LIMIT 1");
    qb
}

#[async_trait]
impl DocumentStore for PostgresStore {
    #[instrument(skip(self))]
    async fn fixtures_by_ids(&self, ids: &[FixtureId]) -> StoreResult<Vec<Fixture>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(&format!("{FIXTURE_COLUMNS} WHERE fixture_id = ANY($1)"))
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        debug!(requested = ids.len(), found = rows.len(), "fixtures batch");
        rows.iter().map(fixture_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn find_fixtures(&self, criteria: &FixtureCriteria) -> StoreResult<Vec<Fixture>> {
        let mut qb = QueryBuilder::<Postgres>::new(FIXTURE_COLUMNS);
        qb.push(" WHERE 1=1");
        if !criteria.league_ids.is_empty() {
            qb.push(" AND league_id = ANY(")
                .push_bind(criteria.league_ids.clone())
                .push(")");
        }
        if let Some(status) = criteria.match_type {
            push_status_filter(&mut qb, status);
        }
        if let Some(range) = criteria.date_range {
            qb.push(" AND kickoff_at >= ").push_bind(range.start);
            qb.push(" AND kickoff_at <= ").push_bind(range.end);
        }
        push_fixture_order(&mut qb, criteria.sort);
        qb.push(" LIMIT ").push_bind(criteria.limit as i64);

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(fixture_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn league_fixtures(
        &self,
        league_id: LeagueId,
        season_id: SeasonId,
        window: SeasonWindow,
        limit: usize,
    ) -> StoreResult<Vec<Fixture>> {
        let mut qb = QueryBuilder::<Postgres>::new(FIXTURE_COLUMNS);
        qb.push(" WHERE league_id = ").push_bind(league_id);
        qb.push(" AND season_id = ").push_bind(season_id);
        match window {
            SeasonWindow::Ahead => {
                qb.push(" AND ended_at IS NULL ORDER BY kickoff_at ASC, fixture_id ASC");
            }
            SeasonWindow::Behind => {
                qb.push(" AND ended_at IS NOT NULL ORDER BY kickoff_at DESC, fixture_id ASC");
            }
        }
        qb.push(" LIMIT ").push_bind(limit as i64);

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(fixture_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn fixture_detail(
        &self,
        kind: FixtureDetailKind,
        fixture_id: FixtureId,
    ) -> StoreResult<Option<serde_json::Value>> {
        let row = sqlx::query(
            "SELECT payload FROM fixture_details WHERE fixture_id = $1 AND kind = $2",
        )
        .bind(fixture_id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.try_get("payload")).transpose()?)
    }

    #[instrument(skip(self))]
    async fn predictions_for_fixtures(
        &self,
        fixture_ids: &[FixtureId],
        sort: SortSpec<PredictionSortField>,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Prediction>> {
        if fixture_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut qb = QueryBuilder::<Postgres>::new(PREDICTION_COLUMNS);
        qb.push(" WHERE subject_kind = 'fixture' AND subject_id = ANY(")
            .push_bind(fixture_ids.to_vec())
            .push(")");
        self.fetch_predictions(qb, sort, limit, "predictions").await
    }

    #[instrument(skip(self))]
    async fn predictions_for_player(
        &self,
        player_id: PlayerId,
        sort: SortSpec<PredictionSortField>,
        limit: usize,
    ) -> StoreResult<Vec<Prediction>> {
        let mut qb = QueryBuilder::<Postgres>::new(PREDICTION_COLUMNS);
        qb.push(" WHERE subject_kind = 'player' AND subject_id = ")
            .push_bind(player_id);
        self.fetch_predictions(qb, sort, Some(limit), "predictions")
            .await
    }

    #[instrument(skip(self))]
    async fn combo_predictions(
        &self,
        filter: ComboPredictionFilter,
        sort: SortSpec<PredictionSortField>,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Prediction>> {
        let mut qb = QueryBuilder::<Postgres>::new(COMBO_PREDICTION_COLUMNS);
        qb.push(" WHERE 1=1");
        if let Some(combo_id) = filter.combo_id {
            qb.push(" AND combo_id = ").push_bind(combo_id);
        }
        if let Some(fixture_id) = filter.fixture_id {
            qb.push(" AND fixture_id = ").push_bind(fixture_id);
        }
        self.fetch_predictions(qb, sort, limit, "smart_combo_predictions")
            .await
    }

    #[instrument(skip(self))]
    async fn current_combo(&self) -> StoreResult<Option<SmartCombo>> {
        let row = sqlx::query(
            r#"
            SELECT combo_id, name, description, fixture_ids, is_active, starts_at, expires_at,
                   confidence, total_odds, previous_week_combo_accuracy
            FROM smart_combos
            WHERE is_active
            ORDER BY starts_at ASC, combo_id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(combo_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn leagues(&self) -> StoreResult<Vec<League>> {
        let rows = sqlx::query("SELECT * FROM leagues WHERE is_prod")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(league_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn league(&self, league_id: LeagueId) -> StoreResult<Option<League>> {
        let row = sqlx::query("SELECT * FROM leagues WHERE league_id = $1")
            .bind(league_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(league_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn seasons(&self, league_id: LeagueId) -> StoreResult<Vec<Season>> {
        let rows = sqlx::query("SELECT * FROM league_seasons WHERE league_id = $1")
            .bind(league_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(season_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn season(
        &self,
        league_id: LeagueId,
        season_id: SeasonId,
    ) -> StoreResult<Option<Season>> {
        let row = sqlx::query("SELECT * FROM league_seasons WHERE league_id = $1 AND season_id = $2")
            .bind(league_id)
            .bind(season_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(season_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn standings(
        &self,
        league_id: LeagueId,
        season_id: SeasonId,
    ) -> StoreResult<Vec<StandingItem>> {
        let rows = sqlx::query(
            "SELECT * FROM standings WHERE league_id = $1 AND season_id = $2 ORDER BY position ASC",
        )
        .bind(league_id)
        .bind(season_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(standing_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn players_by_ids(&self, ids: &[PlayerId]) -> StoreResult<Vec<Player>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query("SELECT * FROM players WHERE player_id = ANY($1)")
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(player_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn player_stats(
        &self,
        player_ids: &[PlayerId],
        season_id: Option<SeasonId>,
    ) -> StoreResult<Vec<PlayerStatLine>> {
        if player_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut qb = QueryBuilder::<Postgres>::new(STAT_COLUMNS);
        qb.push(" WHERE player_id = ANY(")
            .push_bind(player_ids.to_vec())
            .push(")");
        match season_id {
            Some(season_id) => {
                qb.push(" AND season_id = ").push_bind(season_id);
            }
            None => {
                qb.push(" AND season_id IS NULL");
            }
        }
        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(stat_line_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn latest_player_season(&self, player_id: PlayerId) -> StoreResult<Option<SeasonId>> {
        let row = sqlx::query(
            "SELECT MAX(season_id) AS season_id FROM player_statistics WHERE player_id = $1",
        )
        .bind(player_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get("season_id")?)
    }

    #[instrument(skip(self))]
    async fn watchlist_on(
        &self,
        key: DayKey,
        player_id: Option<PlayerId>,
    ) -> StoreResult<Option<WatchlistSnapshot>> {
        let mut qb = watchlist_on_query(key, player_id);
        let row = qb.build().fetch_optional(&self.pool).await?;
        row.as_ref().map(watchlist_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn watchlist_before(
        &self,
        key: DayKey,
        player_id: Option<PlayerId>,
    ) -> StoreResult<Option<WatchlistSnapshot>> {
        let mut qb = watchlist_before_query(key, player_id);
        let row = qb.build().fetch_optional(&self.pool).await?;
        row.as_ref().map(watchlist_from_row).transpose()
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{SortDirection, DEFAULT_PREDICTION_SORT};

    fn sql_of(build: impl FnOnce(&mut QueryBuilder<'static, Postgres>)) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1");
        build(&mut qb);
        qb.sql().to_string()
    }

    #[test]
    fn test_prediction_order_has_one_nulls_clause() {
        let sql = sql_of(|qb| push_prediction_order(qb, DEFAULT_PREDICTION_SORT));
        assert_eq!(
            sql,
            "SELECT 1 ORDER BY pct_change_value DESC NULLS LAST, prediction_id DESC, subject_id ASC"
        );
        assert_eq!(sql.matches("NULLS").count(), 1);

        let asc = SortSpec::new(PredictionSortField::CreatedAt, SortDirection::Asc);
        let sql = sql_of(|qb| push_prediction_order(qb, asc));
        assert!(sql.ends_with("ORDER BY created_at ASC NULLS FIRST, prediction_id ASC, subject_id ASC"));
    }

    #[test]
    fn test_fixture_order() {
        let kickoff = SortSpec::new(FixtureSortField::Kickoff, SortDirection::Desc);
        assert_eq!(
            sql_of(|qb| push_fixture_order(qb, kickoff)),
            "SELECT 1 ORDER BY kickoff_at DESC, fixture_id ASC"
        );
        let league = SortSpec::new(FixtureSortField::League, SortDirection::Asc);
        let sql = sql_of(|qb| push_fixture_order(qb, league));
        assert_eq!(sql.matches("NULLS").count(), 1);
    }

    #[test]
    fn test_status_filters() {
        assert_eq!(
            sql_of(|qb| push_status_filter(qb, FixtureStatus::Live)),
            "SELECT 1 AND ended_at IS NULL AND minutes_elapsed IS NOT NULL"
        );
        assert_eq!(
            sql_of(|qb| push_status_filter(qb, FixtureStatus::Finished)),
            "SELECT 1 AND ended_at IS NOT NULL"
        );
        assert_eq!(
            sql_of(|qb| push_status_filter(qb, FixtureStatus::Upcoming)),
            "SELECT 1 AND ended_at IS NULL AND minutes_elapsed IS NULL"
        );
    }

    #[test]
    fn test_watchlist_queries() {
        let before = watchlist_before_query(DayKey::new(2024, 16), None);
        assert_eq!(
            before.sql(),
            "SELECT year, day, player_ids, created_at, updated_at FROM players_watchlist \
             WHERE (year, day) < ($1, $2) ORDER BY year DESC, day DESC LIMIT 1"
        );

        let filtered = watchlist_before_query(DayKey::new(2024, 16), Some(4));
        assert!(filtered.sql().contains("< ($1, $2) AND $3 = ANY(player_ids) ORDER BY"));

        let exact = watchlist_on_query(DayKey::new(2024, 16), Some(4));
        assert!(exact
            .sql()
            .ends_with("WHERE year = $1 AND day = $2 AND $3 = ANY(player_ids) LIMIT 1"));
    }
}
