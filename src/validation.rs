//! Input validation for raw query parameters
//!
//! Every surface funnels its raw filter values through these functions so that
//! malformed input is rejected with the same `Validation` error before any I/O.
use crate::error::{FeedError, Result};
use std::collections::HashSet;
use std::hash::Hash;

/// Parse a comma-separated list of integer IDs
///
/// Request order is preserved and duplicates are kept; callers that need a set
/// use [`dedup_preserving_order`].
///
/// # Arguments
/// * `raw` - Delimited input, e.g. `"30,10,20"`
/// * `field_name` - Name of the parameter for error messages
/// * `max_count` - Upper bound on the number of IDs, if any
///
/// # Returns
/// * `Ok(ids)` in request order
/// * `Err` on empty input, non-integer tokens, or too many IDs
pub fn parse_id_list(raw: &str, field_name: &str, max_count: Option<usize>) -> Result<Vec<i64>> {
    let mut ids = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let id = token.parse::<i64>().map_err(|_| {
            FeedError::Validation(format!(
                "{} must be comma-separated integers (got '{}')",
                field_name, token
            ))
        })?;
        ids.push(id);
    }

    if ids.is_empty() {
        return Err(FeedError::Validation(format!(
            "{} cannot be empty when provided",
            field_name
        )));
    }

    if let Some(max) = max_count {
        if ids.len() > max {
            return Err(FeedError::Validation(format!(
                "{} accepts at most {} IDs, got {}",
                field_name,
                max,
                ids.len()
            )));
        }
    }

    Ok(ids)
}

/// Drop repeated IDs, keeping the first occurrence
pub fn dedup_preserving_order<T: Copy + Eq + Hash>(ids: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Check an optional value against a closed set
///
/// # Returns
/// * `Ok(None)` when no value was supplied
/// * `Ok(Some(mapped))` when the value is one of `allowed`
/// * `Err` otherwise, listing the accepted values
pub fn validate_enum<T: Copy>(
    value: Option<&str>,
    allowed: &[(&str, T)],
    field_name: &str,
) -> Result<Option<T>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    allowed
        .iter()
        .find(|(key, _)| *key == value)
        .map(|(_, mapped)| Some(*mapped))
        .ok_or_else(|| {
            let names: Vec<&str> = allowed.iter().map(|(k, _)| *k).collect();
            FeedError::Validation(format!(
                "Invalid {} '{}'. Must be one of: {}",
                field_name,
                value,
                names.join(", ")
            ))
        })
}

/// Validate a page size
///
/// # Arguments
/// * `limit` - Requested size, `None` for the default
/// * `default` - Size used when nothing was requested
/// * `max` - Largest accepted size
pub fn validate_limit(limit: Option<i64>, default: usize, max: usize) -> Result<usize> {
    let Some(limit) = limit else {
        return Ok(default);
    };

    if limit < 1 || limit > max as i64 {
        return Err(FeedError::Validation(format!(
            "limit must be between 1 and {}, got {}",
            max, limit
        )));
    }

    Ok(limit as usize)
}

/// Parse an optional integer query parameter. Blank, `null` and `None` mean absent.
pub fn parse_optional_int(value: Option<&str>, field_name: &str) -> Result<Option<i64>> {
    match value.map(str::trim) {
        None | Some("") | Some("null") | Some("None") => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
            FeedError::Validation(format!(
                "Query parameter '{}' must be an integer.",
                field_name
            ))
        }),
    }
}

/// Require a parameter that the transport layer treats as optional
pub fn require<T>(value: Option<T>, field_name: &str) -> Result<T> {
    value.ok_or_else(|| FeedError::Validation(format!("{} is required", field_name)))
}
