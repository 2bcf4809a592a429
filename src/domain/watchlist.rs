use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Calendar-day key. Ordering is year first, then day of year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey {
    pub year: i32,
    pub day: u32,
}

impl DayKey {
    pub fn new(year: i32, day: u32) -> Self {
        Self { year, day }
    }

    pub fn of(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            day: at.ordinal(),
        }
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(self.year, self.day)
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_date() {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            None => write!(f, "{}-{:03}", self.year, self.day),
        }
    }
}

/// Players picked for one day. Produced by an external job, read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistSnapshot {
    pub year: i32,
    pub day: u32,
    pub player_ids: Vec<PlayerId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WatchlistSnapshot {
    pub fn key(&self) -> DayKey {
        DayKey::new(self.year, self.day)
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.player_ids.contains(&player_id)
    }
}
