//! Senior couple merging
//!
//! Senior couples serve together but appear upstream as two separate
//! records. They are shown as one slide named
//! "Elder {his forename} & Sister {her full name}".
//!
//! A companion must be a different senior of the opposite gender with the
//! same mission, the same home unit and nearly equal serving dates. The scan
//! is quadratic, which is fine for a stake roster.

use crate::error::SyncError;
use crate::models::{Gender, Missionary};
use crate::services::normalizer::MONTH_YEAR_FORMAT;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::info;

/// Maximum distance between two serving bounds that still counts as equal
pub const NEARLY_EQUAL_DAYS: i64 = 32;

/// Merge couple missionaries into one entry
///
/// Order-preserving, first match wins. When the Elder is met first his
/// record survives with the combined name. When the Sister is met first the
/// surviving record is rebuilt from the Elder's fields plus the combined
/// name, so a couple slide always carries the Elder's id and sort name.
///
/// # Errors
/// `SyncError::MalformedDateRange` if two candidate records carry non-empty
/// dates serving strings that differ and are not both `"Mon YYYY - Mon YYYY"`.
pub fn merge_couples(missionaries: Vec<Missionary>) -> Result<Vec<Missionary>, SyncError> {
    let mut result = Vec::with_capacity(missionaries.len());
    // Ids folded into a couple slide as the companion
    let mut consumed: HashSet<i64> = HashSet::new();
    // Ids already heading a couple slide
    let mut survivors: HashSet<i64> = HashSet::new();

    for missionary in &missionaries {
        if consumed.contains(&missionary.id) {
            continue;
        }
        if !missionary.senior {
            result.push(missionary.clone());
            continue;
        }

        match find_companion(missionary, &missionaries, &consumed, &survivors)? {
            Some(companion) => {
                consumed.insert(companion.id);
                survivors.insert(missionary.id);
                let couple = combine(missionary, companion);
                info!(id = couple.id, "Merged couple: {}", couple.name);
                result.push(couple);
            }
            None => result.push(missionary.clone()),
        }
    }

    Ok(result)
}

fn find_companion<'a>(
    missionary: &Missionary,
    all: &'a [Missionary],
    consumed: &HashSet<i64>,
    survivors: &HashSet<i64>,
) -> Result<Option<&'a Missionary>, SyncError> {
    for candidate in all {
        let eligible = candidate.senior
            && candidate != missionary
            && !consumed.contains(&candidate.id)
            && !survivors.contains(&candidate.id)
            && is_opposite_gender(candidate.gender, missionary.gender)
            && candidate.mission == missionary.mission
            && candidate.home_unit == missionary.home_unit;
        if eligible && dates_match(&candidate.dates_serving, &missionary.dates_serving)? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// A record with a missing start or end date has empty dates serving and
/// only matches another empty one.
fn dates_match(first: &str, second: &str) -> Result<bool, SyncError> {
    if first != second && (first.is_empty() || second.is_empty()) {
        return Ok(false);
    }
    dates_serving_nearly_equal(first, second)
}

fn is_opposite_gender(a: Option<Gender>, b: Option<Gender>) -> bool {
    matches!(
        (a, b),
        (Some(Gender::Male), Some(Gender::Female)) | (Some(Gender::Female), Some(Gender::Male))
    )
}

fn combine(missionary: &Missionary, companion: &Missionary) -> Missionary {
    if missionary.gender == Some(Gender::Male) {
        Missionary {
            name: format!("{} & {}", omit_last_name(&missionary.name), companion.name),
            couple: true,
            ..missionary.clone()
        }
    } else {
        Missionary {
            name: format!("{} & {}", omit_last_name(&companion.name), missionary.name),
            couple: true,
            ..companion.clone()
        }
    }
}

/// "Elder John Smith" → "Elder John"
fn omit_last_name(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.split_last() {
        Some((_, rest)) => rest.join(" "),
        None => String::new(),
    }
}

/// Check if two dates serving strings are nearly equal
///
/// Recorded dates for spouses are sometimes a month apart, e.g.
/// "Aug 2023 - Dec 2024" and "Aug 2023 - Jan 2025". Ranges match when one
/// bound is equal and the other is within [`NEARLY_EQUAL_DAYS`].
pub fn dates_serving_nearly_equal(first: &str, second: &str) -> Result<bool, SyncError> {
    if first == second {
        return Ok(true);
    }
    let (start1, end1) = parse_dates_serving(first)?;
    let (start2, end2) = parse_dates_serving(second)?;

    Ok((start1 == start2 && within_tolerance(end1, end2))
        || (end1 == end2 && within_tolerance(start1, start2)))
}

fn within_tolerance(a: NaiveDate, b: NaiveDate) -> bool {
    (a - b).num_days().abs() <= NEARLY_EQUAL_DAYS
}

fn parse_dates_serving(value: &str) -> Result<(NaiveDate, NaiveDate), SyncError> {
    let malformed = || SyncError::MalformedDateRange(value.to_string());

    let bounds: Vec<&str> = value.split(" - ").collect();
    let [start, end] = bounds.as_slice() else {
        return Err(malformed());
    };
    let start = parse_month_year(start).ok_or_else(malformed)?;
    let end = parse_month_year(end).ok_or_else(malformed)?;
    Ok((start, end))
}

/// "Aug 2023" → 2023-08-01
fn parse_month_year(value: &str) -> Option<NaiveDate> {
    let format = format!("%d {}", MONTH_YEAR_FORMAT);
    NaiveDate::parse_from_str(&format!("01 {}", value), &format).ok()
}
