pub mod combo;
pub mod fixture;
pub mod league;
pub mod player;
pub mod prediction;
pub mod standing;
pub mod viewer;
pub mod watchlist;

pub use combo::*;
pub use fixture::*;
pub use league::*;
pub use player::*;
pub use prediction::*;
pub use standing::*;
pub use viewer::*;
pub use watchlist::*;

pub type FixtureId = i64;
pub type LeagueId = i64;
pub type SeasonId = i64;
pub type TeamId = i64;
pub type PlayerId = i64;
pub type ComboId = i64;
