use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use chrono_tz::Tz;

/// Canonical timezone for accrual dates.
/// Accrual months are calendar months; this is the single timezone used to
/// decide which calendar month "now" falls into.
pub const DEFAULT_ACCRUAL_TZ: Tz = chrono_tz::UTC;

/// Converts a UTC instant to an accrual date in the given timezone.
pub fn accrual_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Convenience function that uses the default accrual timezone.
pub fn accrual_date_today() -> NaiveDate {
    accrual_date_from_utc(Utc::now(), DEFAULT_ACCRUAL_TZ)
}

/// Normalizes a date to the first day of its calendar month.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .expect("first of an existing month is a valid date")
}

/// Adds (or subtracts, for negative `months`) whole calendar months.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.expect("month arithmetic stays within chrono's date range")
}

/// Signed number of whole calendar months from `earlier` to `later`,
/// ignoring the day component.
pub fn months_between(later: NaiveDate, earlier: NaiveDate) -> i32 {
    (later.year() - earlier.year()) * 12 + later.month() as i32 - earlier.month() as i32
}
