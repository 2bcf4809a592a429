pub mod combos;
pub mod fixtures;
pub mod leagues;
pub mod players;
pub mod predictions;
pub mod system;

pub use combos::*;
pub use fixtures::*;
pub use leagues::*;
pub use players::*;
pub use predictions::*;
pub use system::*;

use crate::error::Result;
use crate::validation::{parse_optional_int, require};

/// Required integer from a path segment or query value
pub(crate) fn required_id(raw: Option<&str>, field_name: &str) -> Result<i64> {
    require(parse_optional_int(raw, field_name)?, field_name)
}

pub(crate) fn optional_id(raw: Option<&str>, field_name: &str) -> Result<Option<i64>> {
    parse_optional_int(raw, field_name)
}
