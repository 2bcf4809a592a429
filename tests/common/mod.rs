#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use matchday::config::LimitsConfig;
use matchday::domain::*;
use matchday::engine::MaskPolicy;
use matchday::{FeedService, MemoryStore};
use std::sync::Arc;

pub const LABEL: &str = "Locked insight";
pub const REASON: &str = "Premium only";

/// Wednesday afternoon inside the 2025/2026 season
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
}

pub fn team(team_id: TeamId, name: &str) -> TeamSide {
    TeamSide {
        team_id,
        name: name.to_string(),
        short_code: None,
        logo: Some(format!("https://img.example/{team_id}.png")),
        score: None,
    }
}

pub fn fixture(fixture_id: FixtureId, league_id: LeagueId, kickoff_at: DateTime<Utc>) -> Fixture {
    Fixture {
        fixture_id,
        league_id,
        league_name: Some(format!("League {league_id}")),
        season_id: Some(2025),
        home: team(fixture_id * 10, &format!("Home {fixture_id}")),
        away: team(fixture_id * 10 + 1, &format!("Away {fixture_id}")),
        kickoff_at,
        minutes_elapsed: None,
        ended_at: None,
    }
}

pub fn finished(mut f: Fixture) -> Fixture {
    f.minutes_elapsed = Some(90);
    f.ended_at = Some(f.kickoff_at + Duration::minutes(110));
    f
}

pub fn prediction(subject: PredictionSubject, prediction_id: i64, pct: f64) -> Prediction {
    Prediction {
        subject,
        combo_id: None,
        prediction_id,
        prediction_type: if subject.is_player() {
            PLAYER_PREDICTION_TYPE.to_string()
        } else {
            FIXTURE_PREDICTION_TYPE.to_string()
        },
        prediction_display_name: format!("Market {prediction_id}"),
        pre_game_prediction: 0.5,
        pre_game_prediction_reasons: vec![format!("form {prediction_id}"), "injuries".to_string()],
        prediction: Some(0.5 + pct),
        prediction_reasons: Some(vec![format!("live {prediction_id}")]),
        pct_change_value: Some(pct),
        pct_change_interval: DEFAULT_PCT_CHANGE_INTERVAL,
        created_at: at(1, 0) + Duration::minutes(prediction_id),
        updated_at: at(1, 0) + Duration::minutes(prediction_id),
        locked: false,
    }
}

pub fn combo_prediction(combo_id: ComboId, fixture_id: FixtureId, id: i64, pct: f64) -> Prediction {
    let mut p = prediction(PredictionSubject::fixture(fixture_id), id, pct);
    p.combo_id = Some(combo_id);
    p
}

pub fn combo(combo_id: ComboId, fixture_ids: Vec<FixtureId>, active: bool) -> SmartCombo {
    SmartCombo {
        combo_id,
        name: None,
        description: Some("Weekend picks".to_string()),
        fixture_ids,
        is_active: active,
        starts_at: at(7, 0),
        expires_at: at(14, 0),
        confidence: 0.72,
        total_odds: 5.4,
        previous_week_combo_accuracy: Some(0.66),
    }
}

pub fn player(player_id: PlayerId, name: &str) -> Player {
    Player {
        player_id,
        display_name: name.to_string(),
        common_name: None,
        position_id: Some(27),
        nationality_id: None,
        team_id: Some(100),
        image_path: None,
    }
}

pub fn stat_line(player_id: PlayerId, season_id: Option<SeasonId>, goals: u32) -> PlayerStatLine {
    PlayerStatLine {
        player_id,
        season_id,
        goals: Some(goals),
        appearances: Some(goals + 10),
        ..Default::default()
    }
}

pub fn watchlist(year: i32, day: u32, player_ids: Vec<PlayerId>) -> WatchlistSnapshot {
    WatchlistSnapshot {
        year,
        day,
        player_ids,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn season(
    league_id: LeagueId,
    season_id: SeasonId,
    start_year: i32,
    is_current: bool,
) -> Season {
    Season {
        league_id,
        season_id,
        season_name: format!("{}/{}", start_year, start_year + 1),
        is_current,
        starting_at: NaiveDate::from_ymd_opt(start_year, 8, 1),
        ending_at: NaiveDate::from_ymd_opt(start_year + 1, 5, 31),
    }
}

pub fn standing(team_id: TeamId, position: u32, next_fixture_id: Option<FixtureId>) -> StandingItem {
    StandingItem {
        league_id: 8,
        season_id: 2025,
        team_id,
        team_name: format!("Team {team_id}"),
        team_logo: None,
        position,
        points: 60 - position as i32 * 3,
        wins: 18 - position,
        draws: 5,
        losses: position,
        goal_difference: 30 - position as i32 * 4,
        form: Form::parse(&["W", "W", "D", "L", "W", "W", "L"]),
        next_fixture_id,
        updated_at: None,
    }
}

pub fn league(league_id: LeagueId, name: &str, is_prod: bool) -> League {
    League {
        league_id,
        league_name: name.to_string(),
        short_code: None,
        country_id: None,
        country_name: None,
        league_type: Some("league".to_string()),
        league_sub_type: None,
        image_path: None,
        is_prod,
    }
}

pub fn service(store: &MemoryStore) -> FeedService {
    FeedService::new(
        Arc::new(store.clone()),
        LimitsConfig::default(),
        MaskPolicy::new(LABEL, REASON),
    )
}
