//! Normalized query criteria
//!
//! Raw filter and sort parameters are resolved here into typed criteria that the
//! store adapters and the join engine consume. Sort keys are advisory: unknown
//! keys fall back to the surface default instead of failing.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::cmp::Ordering;

use crate::domain::{
    Fixture, FixtureStatus, LeagueId, Prediction, PredictionSortField,
};
use crate::error::{FeedError, Result};
use crate::validation::{parse_id_list, validate_enum};

/// Span of the default fixture window
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Only a case-insensitive `asc` is ascending; anything else is descending
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// Bare `ASC`/`DESC` keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Direction plus null placement: missing values rank lowest, matching
    /// [`SortDirection::apply`] over the in-memory comparators
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC NULLS FIRST",
            Self::Desc => "DESC NULLS LAST",
        }
    }

    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F> SortSpec<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Map a sort key through `allowed`, falling back to `default` for unknown or
/// missing keys.
pub fn resolve_sort<F: Copy>(
    key: Option<&str>,
    order: Option<&str>,
    allowed: &[(&str, F)],
    default: F,
) -> SortSpec<F> {
    let field = key
        .map(str::trim)
        .and_then(|k| allowed.iter().find(|(name, _)| *name == k))
        .map(|(_, field)| *field)
        .unwrap_or(default);
    SortSpec::new(field, SortDirection::parse(order))
}

/// Default ordering of prediction lists: biggest movers first
pub const DEFAULT_PREDICTION_SORT: SortSpec<PredictionSortField> =
    SortSpec {
        field: PredictionSortField::PctChange,
        direction: SortDirection::Desc,
    };

pub fn resolve_prediction_sort(
    sort_by: Option<&str>,
    sort_order: Option<&str>,
) -> SortSpec<PredictionSortField> {
    resolve_sort(
        sort_by,
        sort_order,
        &PredictionSortField::KEYS,
        DEFAULT_PREDICTION_SORT.field,
    )
}

impl SortSpec<PredictionSortField> {
    pub fn compare(&self, a: &Prediction, b: &Prediction) -> Ordering {
        self.direction.apply(a.compare_by(b, self.field))
    }

    pub fn sort(&self, predictions: &mut [Prediction]) {
        predictions.sort_by(|a, b| self.compare(a, b));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureSortField {
    Kickoff,
    League,
}

impl FixtureSortField {
    pub const KEYS: [(&'static str, FixtureSortField); 2] =
        [("kickoff", Self::Kickoff), ("league", Self::League)];
}

pub const DEFAULT_FIXTURE_SORT: SortSpec<FixtureSortField> = SortSpec {
    field: FixtureSortField::Kickoff,
    direction: SortDirection::Asc,
};

/// Resolve a composite fixture sort key such as `kickoff_desc`
pub fn resolve_fixture_sort(raw: Option<&str>) -> SortSpec<FixtureSortField> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return DEFAULT_FIXTURE_SORT;
    };
    let (key, order) = match raw.rsplit_once('_') {
        Some((key, suffix))
            if suffix.eq_ignore_ascii_case("asc") || suffix.eq_ignore_ascii_case("desc") =>
        {
            (key, Some(suffix))
        }
        _ => (raw, None),
    };
    match FixtureSortField::KEYS.iter().find(|(name, _)| *name == key) {
        Some((_, field)) => SortSpec::new(*field, SortDirection::parse(order)),
        None => DEFAULT_FIXTURE_SORT,
    }
}

impl SortSpec<FixtureSortField> {
    pub fn compare(&self, a: &Fixture, b: &Fixture) -> Ordering {
        let primary = match self.field {
            FixtureSortField::Kickoff => a.kickoff_at.cmp(&b.kickoff_at),
            FixtureSortField::League => a
                .league_name
                .cmp(&b.league_name)
                .then_with(|| a.league_id.cmp(&b.league_id)),
        };
        self.direction
            .apply(primary)
            .then_with(|| a.kickoff_at.cmp(&b.kickoff_at))
            .then_with(|| a.fixture_id.cmp(&b.fixture_id))
    }
}

/// Inclusive kickoff window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn parse_bound(raw: &str, field_name: &str, end_of_day: bool) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        FeedError::Validation(format!(
            "{} must be an ISO date (YYYY-MM-DD), got '{}'",
            field_name, raw
        ))
    })?;
    if end_of_day {
        Ok(start_of_day(date) + Duration::days(1) - Duration::milliseconds(1))
    } else {
        Ok(start_of_day(date))
    }
}

/// Resolve the kickoff window
///
/// * neither bound: seven days starting at the beginning of `now`'s UTC day
/// * one bound: the other is derived with the same seven-day span
/// * `start > end` is a validation error
pub fn resolve_date_range(
    date_from: Option<&str>,
    date_to: Option<&str>,
    now: DateTime<Utc>,
) -> Result<DateRange> {
    let span = Duration::days(DEFAULT_WINDOW_DAYS);
    let from = date_from
        .filter(|r| !r.trim().is_empty())
        .map(|r| parse_bound(r, "date_from", false))
        .transpose()?;
    let to = date_to
        .filter(|r| !r.trim().is_empty())
        .map(|r| parse_bound(r, "date_to", true))
        .transpose()?;

    let (start, end) = match (from, to) {
        (Some(start), Some(end)) => (start, end),
        (Some(start), None) => (start, start + span),
        (None, Some(end)) => (end - span, end),
        (None, None) => {
            let start = start_of_day(now.date_naive());
            (start, start + span)
        }
    };

    if start > end {
        return Err(FeedError::Validation(format!(
            "date_from ({}) must not be after date_to ({})",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        )));
    }

    Ok(DateRange { start, end })
}

/// Normalized fixture filter
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureCriteria {
    /// Empty means every league
    pub league_ids: Vec<LeagueId>,
    pub match_type: Option<FixtureStatus>,
    pub sort: SortSpec<FixtureSortField>,
    pub date_range: Option<DateRange>,
    pub limit: usize,
}

impl FixtureCriteria {
    pub fn matches(&self, fixture: &Fixture) -> bool {
        (self.league_ids.is_empty() || self.league_ids.contains(&fixture.league_id))
            && self.match_type.map_or(true, |t| fixture.status() == t)
            && self
                .date_range
                .map_or(true, |range| range.contains(fixture.kickoff_at))
    }
}

const MATCH_TYPES: [(&str, FixtureStatus); 3] = [
    ("live", FixtureStatus::Live),
    ("upcoming", FixtureStatus::Upcoming),
    ("finished", FixtureStatus::Finished),
];

/// Raw filter parameters as they arrive from a query string
#[derive(Debug, Clone, Default)]
pub struct FixtureFilterParams<'a> {
    pub leagues: Option<&'a str>,
    pub match_type: Option<&'a str>,
    pub sort_by: Option<&'a str>,
    pub date_from: Option<&'a str>,
    pub date_to: Option<&'a str>,
}

/// Validate and normalize fixture filters
pub fn resolve_fixture_criteria(
    params: &FixtureFilterParams<'_>,
    now: DateTime<Utc>,
    limit: usize,
) -> Result<FixtureCriteria> {
    let league_ids = match params.leagues.map(str::trim).filter(|l| !l.is_empty()) {
        Some(raw) => parse_id_list(raw, "leagues", None)?,
        None => Vec::new(),
    };
    let match_type = validate_enum(params.match_type, &MATCH_TYPES, "match_type")?;
    let date_range = resolve_date_range(params.date_from, params.date_to, now)?;

    Ok(FixtureCriteria {
        league_ids,
        match_type,
        sort: resolve_fixture_sort(params.sort_by),
        date_range: Some(date_range),
        limit,
    })
}
