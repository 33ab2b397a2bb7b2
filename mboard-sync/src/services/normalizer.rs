//! Roster record normalization
//!
//! Turns one [`RawRecord`] into a [`Missionary`]. Malformed optional fields
//! (dates, birth date) leave the derived field empty instead of failing, so
//! one bad record never aborts a sync.

use crate::models::{Gender, Missionary, RawRecord};
use crate::services::photo_locator::PhotoLocator;
use chrono::NaiveDate;
use tracing::debug;

/// Compact roster date format, e.g. "20230814"
const ROSTER_DATE_FORMAT: &str = "%Y%m%d";

/// Display format for serving dates, e.g. "Aug 2023"
pub const MONTH_YEAR_FORMAT: &str = "%b %Y";

/// Days per year in the senior age approximation
const DAYS_PER_YEAR: i64 = 365;

/// Builds canonical records from raw roster entries
pub struct Normalizer<'a> {
    photo_locator: &'a PhotoLocator,
    senior_age: i64,
    today: NaiveDate,
}

impl<'a> Normalizer<'a> {
    /// # Arguments
    /// * `photo_locator` - Resolves each record's `image_path`
    /// * `senior_age` - Age above which a missionary without an explicit
    ///   senior flag is treated as senior
    /// * `today` - Reference date for the age computation
    pub fn new(photo_locator: &'a PhotoLocator, senior_age: i64, today: NaiveDate) -> Self {
        Self {
            photo_locator,
            senior_age,
            today,
        }
    }

    /// Create a missionary from a roster record and the photos folder
    pub fn normalize(&self, record: &RawRecord) -> Missionary {
        let sort_name = record.missionary_name.clone().unwrap_or_default();
        let gender = record.gender().and_then(Gender::from_roster);
        let name = display_name(&sort_name, gender);

        let start = record.start_date.as_deref().and_then(format_roster_date);
        let end = record.end_date.as_deref().and_then(format_roster_date);
        let dates_serving = match (start, end) {
            (Some(start), Some(end)) => format!("{} - {}", start, end),
            _ => String::new(),
        };

        let id = record.missionary_individual_id.unwrap_or(0);

        Missionary {
            id,
            name,
            sort_name,
            gender,
            couple: false,
            senior: self.is_senior(record),
            mission: record.mission_name.clone().unwrap_or_default(),
            dates_serving,
            home_unit: record.missionary_home_unit_name.clone().unwrap_or_default(),
            image_path: self.photo_locator.find_photo(id),
            photo_url: String::new(),
        }
    }

    /// The roster's senior flag is sometimes missing (or false for couples);
    /// fall back to an age check on the birth date.
    fn is_senior(&self, record: &RawRecord) -> bool {
        if record.senior_missionary == Some(true) {
            return true;
        }
        match record.birth_date().and_then(parse_roster_date) {
            Some(birth_date) => age_in_years(birth_date, self.today) > self.senior_age,
            None => false,
        }
    }
}

/// "Surname, Forename" → "Elder Forename Surname"
///
/// No honorific when gender is unknown.
pub fn display_name(sort_name: &str, gender: Option<Gender>) -> String {
    let mut parts: Vec<&str> = sort_name.split(", ").collect();
    parts.reverse();
    let name = parts.join(" ");
    match gender {
        Some(gender) => format!("{} {}", gender.title(), name),
        None => name,
    }
}

fn parse_roster_date(value: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, ROSTER_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            debug!("Ignoring malformed roster date {:?}: {}", value, e);
            None
        }
    }
}

/// "20230814" → "Aug 2023"
pub fn format_roster_date(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    parse_roster_date(value).map(|date| date.format(MONTH_YEAR_FORMAT).to_string())
}

/// Whole 365-day years between `birth_date` and `today`
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - birth_date).num_days().div_euclid(DAYS_PER_YEAR)
}
