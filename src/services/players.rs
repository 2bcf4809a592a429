use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, instrument};

use super::{FeedService, WithWarnings};
use crate::criteria::{SortDirection, SortSpec};
use crate::domain::{
    DayKey, Player, PlayerId, PlayerStatLine, Prediction, PredictionSortField, SeasonId, Viewer,
    WatchlistSnapshot,
};
use crate::engine::{
    apply_visibility, order_by_ids, resolve_snapshot, truncate, PredictionSet, SnapshotResolution,
};
use crate::error::{FeedError, Result};
use crate::validation::validate_limit;

const WATCHLIST_LABEL: &str = "Watchlist";

const RECENT_FIRST: SortSpec<PredictionSortField> = SortSpec {
    field: PredictionSortField::CreatedAt,
    direction: SortDirection::Desc,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub player: Player,
    /// Most recent first
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistView {
    pub year: i32,
    pub day: u32,
    pub date: String,
    pub requested_date: String,
    pub is_fallback: bool,
    pub player_ids: Vec<PlayerId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistPlayer {
    #[serde(flatten)]
    pub player: Player,
    pub career: Option<PlayerStatLine>,
}

fn requested_day(
    year: Option<i32>,
    day: Option<u32>,
    now: DateTime<Utc>,
) -> Result<DayKey> {
    match (year, day) {
        (None, None) => Ok(DayKey::of(now)),
        (Some(year), Some(day)) => {
            let key = DayKey::new(year, day);
            if key.to_date().is_none() {
                return Err(FeedError::validation(format!(
                    "day must be a valid day of year {} (1-365/366), got {}",
                    year, day
                )));
            }
            Ok(key)
        }
        _ => Err(FeedError::validation(
            "year and day must be provided together",
        )),
    }
}

impl FeedService {
    async fn resolve_watchlist(
        &self,
        key: DayKey,
        player_id: Option<PlayerId>,
    ) -> Result<SnapshotResolution<WatchlistSnapshot>> {
        resolve_snapshot(
            WATCHLIST_LABEL,
            key,
            |k| self.store.watchlist_on(k, player_id),
            |k| self.store.watchlist_before(k, player_id),
        )
        .await
    }

    /// Core player document plus recent predictions, all masked for
    /// non-premium viewers
    #[instrument(skip(self, viewer))]
    pub async fn player(
        &self,
        player_id: PlayerId,
        viewer: Option<&Viewer>,
    ) -> Result<PlayerProfile> {
        let ids = [player_id];
        let (players, predictions) = tokio::try_join!(
            self.store.players_by_ids(&ids),
            self.store.predictions_for_player(
                player_id,
                RECENT_FIRST,
                self.limits.player_recent_predictions
            ),
        )?;

        let player = players
            .into_iter()
            .find(|p| p.player_id == player_id)
            .ok_or_else(|| FeedError::not_found(format!("Player {} not found", player_id)))?;

        Ok(PlayerProfile {
            player,
            predictions: apply_visibility(predictions, viewer, PredictionSet::Player, &self.mask),
        })
    }

    /// Statistics for one season, defaulting to the latest season on record
    #[instrument(skip(self))]
    pub async fn player_statistics(
        &self,
        player_id: PlayerId,
        season_id: Option<SeasonId>,
    ) -> Result<PlayerStatLine> {
        let season_id = match season_id {
            Some(id) => id,
            None => self
                .store
                .latest_player_season(player_id)
                .await?
                .ok_or_else(|| {
                    FeedError::not_found(format!("No statistics found for player {}", player_id))
                })?,
        };

        let ids = [player_id];
        self.store
            .player_stats(&ids, Some(season_id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                FeedError::not_found(format!(
                    "No statistics found for player {} in season {}",
                    player_id, season_id
                ))
            })
    }

    /// Watchlist for a day, falling back to the latest earlier snapshot
    #[instrument(skip(self))]
    pub async fn watchlist(
        &self,
        year: Option<i32>,
        day: Option<u32>,
        player_id: Option<PlayerId>,
        limit: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<WithWarnings<Option<WatchlistView>>> {
        let key = requested_day(year, day, now)?;
        let limit = validate_limit(
            limit,
            self.limits.prediction_limit_default,
            self.limits.prediction_limit_max,
        )?;

        let resolution = self.resolve_watchlist(key, player_id).await?;
        let is_fallback = resolution.is_stale();
        let view = resolution.snapshot.map(|snapshot| WatchlistView {
            year: snapshot.year,
            day: snapshot.day,
            date: snapshot.key().to_string(),
            requested_date: key.to_string(),
            is_fallback,
            player_ids: truncate(snapshot.player_ids, limit),
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        });

        Ok(WithWarnings {
            data: view,
            warnings: resolution.warning.into_iter().collect(),
        })
    }

    /// Players on today's watchlist with their career statistics, in
    /// watchlist order
    #[instrument(skip(self))]
    pub async fn watchlist_players(
        &self,
        now: DateTime<Utc>,
    ) -> Result<WithWarnings<Vec<WatchlistPlayer>>> {
        let resolution = self.resolve_watchlist(DayKey::of(now), None).await?;
        let warnings: Vec<String> = resolution.warning.into_iter().collect();
        let Some(snapshot) = resolution.snapshot else {
            return Ok(WithWarnings {
                data: Vec::new(),
                warnings,
            });
        };

        let ids = truncate(snapshot.player_ids, self.limits.watchlist_players);
        let (players, career) = tokio::try_join!(
            self.store.players_by_ids(&ids),
            self.store.player_stats(&ids, None),
        )?;

        let mut career: HashMap<PlayerId, PlayerStatLine> =
            career.into_iter().map(|s| (s.player_id, s)).collect();
        let players: Vec<WatchlistPlayer> = order_by_ids(&ids, players, |p| p.player_id)
            .into_iter()
            .map(|player| WatchlistPlayer {
                career: career.remove(&player.player_id),
                player,
            })
            .collect();

        info!(listed = ids.len(), returned = players.len(), "watchlist players");
        Ok(WithWarnings {
            data: players,
            warnings,
        })
    }
}
