//! Download configuration defaults

use chrono::{Datelike, NaiveDate};

/// Administrative unit queried when none is configured
pub const DEFAULT_UNIT_CODE: &str = "2";

/// Whole calendar years covered by the default window, before the current one
pub const DEFAULT_YEARS_BACK: u32 = 5;

/// Default download window ending on `today`.
///
/// Starts on January 1st of `today.year() - years_back`, so the five-year
/// default covers five full years plus the current year to date. Returns
/// `None` only when the start year is outside chrono's range.
pub fn default_window(today: NaiveDate, years_back: u32) -> Option<(NaiveDate, NaiveDate)> {
    let year = today.year().checked_sub(i32::try_from(years_back).ok()?)?;
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    Some((start, today))
}
