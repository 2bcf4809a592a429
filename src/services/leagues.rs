use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

use super::FeedService;
use crate::adapters::SeasonWindow;
use crate::domain::{
    Fixture, FixtureId, Form, League, LeagueId, Season, SeasonId, StandingItem, Viewer,
};
use crate::engine::FixtureCard;
use crate::error::{FeedError, Result};
use crate::validation::{dedup_preserving_order, require};

/// A team's next match, seen from that team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextFixture {
    pub fixture_id: FixtureId,
    pub kickoff_at: DateTime<Utc>,
    pub is_home: bool,
    pub opponent_name: String,
    pub opponent_logo: Option<String>,
}

impl NextFixture {
    fn for_team(fixture: &Fixture, team_id: i64) -> Option<Self> {
        let opponent = fixture.opponent_of(team_id)?;
        Some(Self {
            fixture_id: fixture.fixture_id,
            kickoff_at: fixture.kickoff_at,
            is_home: fixture.home.team_id == team_id,
            opponent_name: opponent.name.clone(),
            opponent_logo: opponent.logo.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingRow {
    #[serde(flatten)]
    pub standing: StandingItem,
    pub matches_played: u32,
    pub next_fixture: Option<NextFixture>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueOverview {
    pub league: League,
    pub current_season: Season,
    /// Most recent seasons, newest first
    pub seasons: Vec<Season>,
    pub standings: Vec<StandingRow>,
}

/// Newest season first: start date, then id
fn newest_first(seasons: &mut [Season]) {
    seasons.sort_by_key(|s| (Reverse(s.starting_at), Reverse(s.season_id)));
}

impl FeedService {
    /// Production leagues, alphabetical
    pub async fn leagues(&self) -> Result<Vec<League>> {
        let mut leagues = self.store.leagues().await?;
        leagues.sort_by(|a, b| {
            a.league_name
                .to_lowercase()
                .cmp(&b.league_name.to_lowercase())
                .then_with(|| a.league_id.cmp(&b.league_id))
        });
        Ok(leagues)
    }

    /// Table for a league season with each team's next fixture when known
    #[instrument(skip(self))]
    pub async fn standings(
        &self,
        league_id: Option<LeagueId>,
        season_id: Option<SeasonId>,
    ) -> Result<Vec<StandingRow>> {
        let league_id = require(league_id, "league_id")?;
        let season_id = require(season_id, "season_id")?;

        let rows = self.store.standings(league_id, season_id).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let next_ids: Vec<FixtureId> = dedup_preserving_order(
            &rows.iter().filter_map(|r| r.next_fixture_id).collect::<Vec<_>>(),
        );
        let next_fixtures: HashMap<FixtureId, Fixture> = if next_ids.is_empty() {
            HashMap::new()
        } else {
            self.store
                .fixtures_by_ids(&next_ids)
                .await?
                .into_iter()
                .map(|f| (f.fixture_id, f))
                .collect()
        };
        debug!(
            wanted = next_ids.len(),
            found = next_fixtures.len(),
            "next fixtures resolved"
        );

        let mut table: Vec<StandingRow> = rows
            .into_iter()
            .map(|mut standing| {
                standing.form = Form::from_results(standing.form.results().iter().copied());
                let next_fixture = standing
                    .next_fixture_id
                    .and_then(|id| next_fixtures.get(&id))
                    .and_then(|f| NextFixture::for_team(f, standing.team_id));
                StandingRow {
                    matches_played: standing.matches_played(),
                    standing,
                    next_fixture,
                }
            })
            .collect();
        table.sort_by_key(|row| row.standing.position);

        info!(league_id, season_id, teams = table.len(), "standings");
        Ok(table)
    }

    /// League info, its current season, recent seasons and the current table
    #[instrument(skip(self))]
    pub async fn league_current(
        &self,
        league_id: LeagueId,
        today: NaiveDate,
    ) -> Result<LeagueOverview> {
        let (league, mut seasons) = futures::try_join!(
            self.store.league(league_id),
            self.store.seasons(league_id),
        )?;
        let league =
            league.ok_or_else(|| FeedError::not_found(format!("League {} not found", league_id)))?;

        newest_first(&mut seasons);
        let current_season = seasons
            .iter()
            .find(|s| s.is_current)
            .or_else(|| seasons.iter().find(|s| s.is_current_on(today)))
            .cloned()
            .ok_or_else(|| {
                FeedError::not_found(format!("No current season for league {}", league_id))
            })?;
        seasons.truncate(self.limits.available_seasons);

        let standings = self
            .standings(Some(league_id), Some(current_season.season_id))
            .await?;

        Ok(LeagueOverview {
            league,
            current_season,
            seasons,
            standings,
        })
    }

    /// Upcoming fixtures of a current season, or the last results of a past
    /// one in chronological order
    #[instrument(skip(self, viewer))]
    pub async fn league_fixtures(
        &self,
        league_id: LeagueId,
        season_id: SeasonId,
        viewer: Option<&Viewer>,
        today: NaiveDate,
    ) -> Result<Vec<FixtureCard>> {
        let season = self
            .store
            .season(league_id, season_id)
            .await?
            .ok_or_else(|| {
                FeedError::not_found(format!(
                    "Season {} not found for league {}",
                    season_id, league_id
                ))
            })?;

        let window = if season.is_current_on(today) {
            SeasonWindow::Ahead
        } else {
            SeasonWindow::Behind
        };
        let mut fixtures = self
            .store
            .league_fixtures(league_id, season_id, window, self.limits.league_fixtures)
            .await?;
        if window == SeasonWindow::Behind {
            fixtures.reverse();
        }

        debug!(?window, count = fixtures.len(), "league fixtures");
        self.cards_for_fixtures(fixtures, viewer).await
    }
}
