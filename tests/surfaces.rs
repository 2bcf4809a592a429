mod common;

use chrono::{Duration, Utc};
use common::*;
use matchday::criteria::FixtureFilterParams;
use matchday::domain::*;
use matchday::services::PredictionQuery;
use matchday::{FeedError, MemoryStore};

async fn fixture_store() -> MemoryStore {
    let store = MemoryStore::new();
    // Insertion order differs from any request order used below
    store
        .insert_fixtures([fixture(20, 8, at(11, 15)), fixture(10, 8, at(11, 18))])
        .await;
    store
        .insert_predictions([
            prediction(PredictionSubject::fixture(10), 3, 0.05),
            prediction(PredictionSubject::fixture(10), 1, 0.20),
            prediction(PredictionSubject::fixture(10), 2, 0.10),
            prediction(PredictionSubject::fixture(20), 4, 0.01),
        ])
        .await;
    store
}

// ==================== Fixtures ====================

#[tokio::test]
async fn explicit_ids_follow_request_order_and_drop_missing() {
    let store = fixture_store().await;
    let feed = service(&store);

    let page = feed.fixtures_by_ids("30,10,20", None).await.unwrap();
    let ids: Vec<_> = page.fixtures.iter().map(|c| c.fixture.fixture_id).collect();
    assert_eq!(ids, vec![10, 20]);
    assert!(page.fixture_ids.is_none());
}

#[tokio::test]
async fn free_viewer_sees_only_headline_prediction_text() {
    let store = fixture_store().await;
    let feed = service(&store);

    let page = feed.fixtures_by_ids("10", None).await.unwrap();
    let card = &page.fixtures[0];
    let ids: Vec<_> = card.predictions.iter().map(|p| p.prediction_id).collect();
    // Ranked by pct_change desc
    assert_eq!(ids, vec![1, 2, 3]);

    assert!(!card.predictions[0].locked);
    assert_eq!(card.predictions[0].prediction_display_name, "Market 1");
    for p in &card.predictions[1..] {
        assert!(p.locked);
        assert_eq!(p.prediction_display_name, LABEL);
    }
    // Numbers survive masking
    assert_eq!(card.predictions[2].pct_change_value, Some(0.05));
    assert_eq!(card.predictions[2].prediction, Some(0.5 + 0.05));
}

#[tokio::test]
async fn shared_prediction_id_stays_with_each_fixture() {
    let store = MemoryStore::new();
    store
        .insert_fixtures([fixture(10, 8, at(11, 18)), fixture(20, 8, at(11, 15))])
        .await;
    store
        .insert_predictions([
            prediction(PredictionSubject::fixture(10), 7, 0.30),
            prediction(PredictionSubject::fixture(20), 7, 0.10),
            prediction(PredictionSubject::fixture(20), 8, 0.02),
        ])
        .await;
    let feed = service(&store);

    let page = feed.fixtures_by_ids("10,20", None).await.unwrap();
    assert_eq!(page.fixtures.len(), 2);
    for (card, pct) in page.fixtures.iter().zip([0.30, 0.10]) {
        let headline = &card.predictions[0];
        assert_eq!(headline.prediction_id, 7);
        assert!(!headline.locked);
        assert_eq!(headline.prediction_display_name, "Market 7");
        assert_eq!(headline.pct_change_value, Some(pct));
    }
    assert_eq!(page.fixtures[0].predictions.len(), 1);
    assert_eq!(page.fixtures[1].predictions.len(), 2);
    assert!(page.fixtures[1].predictions[1].locked);
}

#[tokio::test]
async fn premium_viewer_sees_everything() {
    let store = fixture_store().await;
    let feed = service(&store);
    let viewer = Viewer::premium();

    let page = feed.fixtures_by_ids("10", Some(&viewer)).await.unwrap();
    assert!(page.fixtures[0].predictions.iter().all(|p| !p.locked));
}

#[tokio::test]
async fn featured_rejects_too_many_ids() {
    let feed = service(&MemoryStore::new());
    let err = feed
        .featured_fixtures("1,2,3,4,5,6,7", None)
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::Validation(_)));
}

#[tokio::test]
async fn filtered_list_returns_all_ids_but_six_cards() {
    let store = MemoryStore::new();
    store
        .insert_fixtures((1..=8).map(|id| fixture(id, 8, at(11, 10 + id as u32))))
        .await;
    // Outside the default window and in another league
    store.insert_fixtures([fixture(50, 8, at(25, 12))]).await;
    store.insert_fixtures([fixture(60, 9, at(11, 12))]).await;
    let feed = service(&store);

    let params = FixtureFilterParams {
        leagues: Some("8"),
        ..Default::default()
    };
    let page = feed.fixtures(&params, None, now()).await.unwrap();
    assert_eq!(page.fixture_ids, Some((1..=8).collect::<Vec<FixtureId>>()));
    assert_eq!(page.fixtures.len(), 6);

    let params = FixtureFilterParams {
        sort_by: Some("kickoff_desc"),
        ..Default::default()
    };
    let ids = feed.fixture_ids(&params, now()).await.unwrap();
    assert_eq!(ids.first(), Some(&8));
    assert!(ids.contains(&60));
    assert!(!ids.contains(&50));
}

#[tokio::test]
async fn filtered_list_by_status() {
    let store = MemoryStore::new();
    let mut live = fixture(1, 8, at(10, 11));
    live.minutes_elapsed = Some(55);
    store
        .insert_fixtures([live, fixture(2, 8, at(11, 11)), finished(fixture(3, 8, at(10, 1)))])
        .await;
    let feed = service(&store);

    let params = FixtureFilterParams {
        match_type: Some("live"),
        ..Default::default()
    };
    let page = feed.fixtures(&params, None, now()).await.unwrap();
    assert_eq!(page.fixture_ids, Some(vec![1]));
    assert_eq!(page.fixtures[0].fixture.status, FixtureStatus::Live);
    assert_eq!(page.fixtures[0].fixture.minutes_elapsed, Some(55));

    let bad = FixtureFilterParams {
        date_from: Some("2026-03-12"),
        date_to: Some("2026-03-01"),
        ..Default::default()
    };
    assert!(matches!(
        feed.fixtures(&bad, None, now()).await,
        Err(FeedError::Validation(_))
    ));
}

#[tokio::test]
async fn fixture_detail_lookup() {
    let store = MemoryStore::new();
    store
        .insert_fixture_detail(
            FixtureDetailKind::Weather,
            10,
            serde_json::json!({"temperature_c": 11}),
        )
        .await;
    let feed = service(&store);

    let weather = feed.fixture_detail("weather", 10).await.unwrap();
    assert_eq!(weather["temperature_c"], 11);
    assert!(matches!(
        feed.fixture_detail("commentary", 10).await,
        Err(FeedError::NotFound(_))
    ));
    assert!(matches!(
        feed.fixture_detail("lineups", 10).await,
        Err(FeedError::Validation(_))
    ));
}

#[tokio::test]
async fn store_failure_aborts_whole_join() {
    let store = fixture_store().await;
    store.fail_collection("predictions").await;
    let feed = service(&store);

    let err = feed.fixtures_by_ids("10,20", None).await.unwrap_err();
    assert!(matches!(err, FeedError::Dependency(_)));
}

// ==================== Predictions ====================

#[tokio::test]
async fn fixture_predictions_require_an_id_and_sane_limit() {
    let store = fixture_store().await;
    let feed = service(&store);

    assert!(matches!(
        feed.fixture_predictions(None, None, PredictionQuery::default(), None)
            .await,
        Err(FeedError::Validation(_))
    ));

    let query = PredictionQuery {
        limit: Some(501),
        ..Default::default()
    };
    assert!(feed
        .fixture_predictions(Some(10), None, query, None)
        .await
        .is_err());
}

#[tokio::test]
async fn fixture_predictions_sort_and_limit() {
    let store = fixture_store().await;
    let feed = service(&store);
    let viewer = Viewer::premium();

    let query = PredictionQuery {
        sort_by: Some("pct_change"),
        sort_order: Some("asc"),
        limit: Some(2),
    };
    let predictions = feed
        .fixture_predictions(None, Some("10,20"), query, Some(&viewer))
        .await
        .unwrap();
    let ids: Vec<_> = predictions.iter().map(|p| p.prediction_id).collect();
    assert_eq!(ids, vec![4, 3]);
}

#[tokio::test]
async fn player_predictions_fully_masked_for_free_viewers() {
    let store = MemoryStore::new();
    store
        .insert_predictions([
            prediction(PredictionSubject::player(7), 1, 0.3),
            prediction(PredictionSubject::player(7), 2, 0.1),
        ])
        .await;
    let feed = service(&store);
    let viewer = Viewer::free();

    let predictions = feed
        .player_predictions(7, PredictionQuery::default(), Some(&viewer))
        .await
        .unwrap();
    assert_eq!(predictions.len(), 2);
    for p in &predictions {
        assert!(p.locked);
        assert_eq!(p.prediction_display_name, LABEL);
        assert!(p.pre_game_prediction_reasons.iter().all(|r| r == REASON));
        assert_eq!(p.pre_game_prediction, 0.5);
    }
}

#[tokio::test]
async fn combo_predictions_filtered_by_combo() {
    let store = MemoryStore::new();
    store
        .insert_combo_predictions([
            combo_prediction(1, 5, 11, 0.2),
            combo_prediction(2, 5, 12, 0.4),
        ])
        .await;
    let feed = service(&store);

    let predictions = feed
        .combo_predictions(Some(1), None, PredictionQuery::default(), None)
        .await
        .unwrap();
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].combo_id, Some(1));
    assert!(!predictions[0].locked);
}

// ==================== Smart combos ====================

#[tokio::test]
async fn combo_follows_stored_fixture_order() {
    let store = MemoryStore::new();
    store
        .insert_fixtures([
            fixture(3, 8, at(12, 12)),
            fixture(5, 8, at(12, 15)),
            fixture(9, 8, at(12, 18)),
        ])
        .await;
    store
        .insert_combos([combo(1, vec![5, 3, 9], false), combo(2, vec![5, 3, 9], true)])
        .await;
    store
        .insert_combo_predictions([
            combo_prediction(2, 3, 21, 0.1),
            combo_prediction(2, 3, 22, 0.3),
            combo_prediction(2, 9, 23, 0.2),
        ])
        .await;
    let feed = service(&store);

    let view = feed.current_combo(None).await.unwrap();
    assert_eq!(view.combo.combo_id, 2);
    assert_eq!(view.combo.name, "Combo 2");
    let order: Vec<_> = view.fixtures.iter().map(|f| f.fixture_id).collect();
    assert_eq!(order, vec![5, 3, 9]);

    assert!(view.fixtures[0].predictions.is_empty());
    let on_three = &view.fixtures[1].predictions;
    assert_eq!(on_three[0].prediction_id, 22);
    assert!(!on_three[0].locked);
    assert!(on_three[1].locked);
}

#[tokio::test]
async fn combo_keeps_members_without_documents() {
    let store = MemoryStore::new();
    store.insert_fixtures([fixture(3, 8, at(12, 12))]).await;
    store.insert_combos([combo(4, vec![7, 3], true)]).await;
    let feed = service(&store);

    let view = feed.current_combo(None).await.unwrap();
    assert_eq!(view.fixtures.len(), 2);
    assert_eq!(view.fixtures[0].fixture_id, 7);
    assert!(view.fixtures[0].fixture.is_none());
    assert!(view.fixtures[1].fixture.is_some());
}

#[tokio::test]
async fn no_active_combo_is_not_found() {
    let store = MemoryStore::new();
    store.insert_combos([combo(1, vec![1], false)]).await;
    let feed = service(&store);
    assert!(matches!(
        feed.current_combo(None).await,
        Err(FeedError::NotFound(_))
    ));
}

// ==================== Leagues ====================

async fn league_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .insert_leagues([
            league(8, "Premier League", true),
            league(9, "bundesliga", true),
            league(99, "Test League", false),
        ])
        .await;
    store
        .insert_seasons([
            season(8, 2023, 2023, false),
            season(8, 2025, 2025, true),
            season(8, 2024, 2024, false),
        ])
        .await;
    store
        .insert_standings([standing(200, 2, Some(77)), standing(100, 1, Some(404))])
        .await;

    let mut next = fixture(77, 8, at(14, 15));
    next.away = team(200, "Team 200");
    let mut old_a = finished(fixture(81, 8, Utc::now() - Duration::days(700)));
    old_a.season_id = Some(2024);
    let mut old_b = finished(fixture(82, 8, Utc::now() - Duration::days(690)));
    old_b.season_id = Some(2024);
    store
        .insert_fixtures([next, fixture(78, 8, at(13, 15)), old_b, old_a])
        .await;
    store
}

#[tokio::test]
async fn leagues_are_alphabetical_and_prod_only() {
    let feed = service(&league_store().await);
    let names: Vec<_> = feed
        .leagues()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.league_name)
        .collect();
    assert_eq!(names, vec!["bundesliga", "Premier League"]);
}

#[tokio::test]
async fn standings_join_next_fixture_best_effort() {
    let feed = service(&league_store().await);

    let table = feed.standings(Some(8), Some(2025)).await.unwrap();
    let positions: Vec<_> = table.iter().map(|r| r.standing.position).collect();
    assert_eq!(positions, vec![1, 2]);

    // Fixture 404 does not exist
    assert!(table[0].next_fixture.is_none());
    let next = table[1].next_fixture.as_ref().unwrap();
    assert_eq!(next.fixture_id, 77);
    assert!(!next.is_home);
    assert_eq!(next.opponent_name, "Home 77");

    assert_eq!(table[1].standing.form.results().len(), FORM_LENGTH);
    assert!(matches!(
        feed.standings(None, Some(2025)).await,
        Err(FeedError::Validation(_))
    ));
    assert!(feed.standings(Some(8), Some(1999)).await.unwrap().is_empty());
}

#[tokio::test]
async fn league_current_overview() {
    let feed = service(&league_store().await);
    let overview = feed
        .league_current(8, now().date_naive())
        .await
        .unwrap();
    assert_eq!(overview.current_season.season_id, 2025);
    let seasons: Vec<_> = overview.seasons.iter().map(|s| s.season_id).collect();
    assert_eq!(seasons, vec![2025, 2024, 2023]);
    assert_eq!(overview.standings.len(), 2);

    assert!(matches!(
        feed.league_current(404, now().date_naive()).await,
        Err(FeedError::NotFound(_))
    ));
}

#[tokio::test]
async fn league_fixtures_current_and_past_seasons() {
    let feed = service(&league_store().await);
    let today = now().date_naive();

    let upcoming = feed.league_fixtures(8, 2025, None, today).await.unwrap();
    let ids: Vec<_> = upcoming.iter().map(|c| c.fixture.fixture_id).collect();
    assert_eq!(ids, vec![78, 77]);

    let past = feed.league_fixtures(8, 2024, None, today).await.unwrap();
    let ids: Vec<_> = past.iter().map(|c| c.fixture.fixture_id).collect();
    assert_eq!(ids, vec![81, 82]);

    assert!(matches!(
        feed.league_fixtures(8, 1999, None, today).await,
        Err(FeedError::NotFound(_))
    ));
}

// ==================== Players & watchlist ====================

#[tokio::test]
async fn player_profile_and_statistics() {
    let store = MemoryStore::new();
    store.insert_players([player(7, "Striker")]).await;
    store
        .insert_predictions((1..=12).map(|id| prediction(PredictionSubject::player(7), id, 0.1)))
        .await;
    store
        .insert_player_stats([
            stat_line(7, Some(2024), 9),
            stat_line(7, Some(2025), 14),
            stat_line(7, None, 80),
        ])
        .await;
    let feed = service(&store);

    let profile = feed.player(7, None).await.unwrap();
    assert_eq!(profile.predictions.len(), 10);
    assert_eq!(profile.predictions[0].prediction_id, 12);
    assert!(profile.predictions.iter().all(|p| p.locked));

    assert!(matches!(feed.player(8, None).await, Err(FeedError::NotFound(_))));

    let latest = feed.player_statistics(7, None).await.unwrap();
    assert_eq!(latest.season_id, Some(2025));
    assert_eq!(latest.goals, Some(14));
    let older = feed.player_statistics(7, Some(2024)).await.unwrap();
    assert_eq!(older.goals, Some(9));
    assert!(matches!(
        feed.player_statistics(7, Some(2019)).await,
        Err(FeedError::NotFound(_))
    ));
    assert!(matches!(
        feed.player_statistics(8, None).await,
        Err(FeedError::NotFound(_))
    ));
}

#[tokio::test]
async fn watchlist_falls_back_with_warning() {
    let store = MemoryStore::new();
    store.insert_watchlists([watchlist(2024, 10, vec![3, 1, 2])]).await;
    let feed = service(&store);

    let exact = feed
        .watchlist(Some(2024), Some(10), None, None, now())
        .await
        .unwrap();
    assert!(exact.warnings.is_empty());
    assert!(!exact.data.unwrap().is_fallback);

    let stale = feed
        .watchlist(Some(2024), Some(16), None, Some(2), now())
        .await
        .unwrap();
    let view = stale.data.unwrap();
    assert!(view.is_fallback);
    assert_eq!(view.date, "2024-01-10");
    assert_eq!(view.requested_date, "2024-01-16");
    assert_eq!(view.player_ids, vec![3, 1]);
    assert_eq!(stale.warnings.len(), 1);
    assert!(stale.warnings[0].contains("2024-01-16"));
    assert!(stale.warnings[0].contains("2024-01-10"));

    let miss = feed
        .watchlist(Some(2024), Some(5), None, None, now())
        .await
        .unwrap();
    assert!(miss.data.is_none());
    assert_eq!(
        miss.warnings,
        vec!["No watchlist data available for 2024-005 or any previous dates.".to_string()]
    );
}

#[tokio::test]
async fn watchlist_filtered_by_player() {
    let store = MemoryStore::new();
    store
        .insert_watchlists([watchlist(2024, 8, vec![4]), watchlist(2024, 10, vec![3])])
        .await;
    let feed = service(&store);

    let result = feed
        .watchlist(Some(2024), Some(10), Some(4), None, now())
        .await
        .unwrap();
    assert_eq!(result.data.unwrap().day, 8);
    assert_eq!(result.warnings.len(), 1);
}

#[tokio::test]
async fn watchlist_players_keep_snapshot_order() {
    let store = MemoryStore::new();
    let today = DayKey::of(now());
    store
        .insert_watchlists([watchlist(today.year, today.day - 1, vec![30, 10, 20])])
        .await;
    store
        .insert_players([player(10, "Ten"), player(20, "Twenty"), player(30, "Thirty")])
        .await;
    store
        .insert_player_stats([stat_line(10, None, 5), stat_line(30, None, 7), stat_line(30, Some(2025), 2)])
        .await;
    let feed = service(&store);

    let result = feed.watchlist_players(now()).await.unwrap();
    let ids: Vec<_> = result.data.iter().map(|p| p.player.player_id).collect();
    assert_eq!(ids, vec![30, 10, 20]);
    assert_eq!(result.data[0].career.as_ref().and_then(|c| c.goals), Some(7));
    assert!(result.data[2].career.is_none());
    assert_eq!(result.warnings.len(), 1);
}
