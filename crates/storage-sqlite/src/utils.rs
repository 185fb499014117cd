//! Conversion helpers between SQLite TEXT columns and domain types.
//!
//! Money is stored as decimal strings and dates/timestamps as ISO-8601
//! strings. Reads are lenient: a malformed stored value is logged and mapped
//! to a neutral fallback instead of poisoning the whole row.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

pub fn parse_decimal_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e) => {
            log::error!("Failed to parse {} '{}' as Decimal: {}", field_name, value_str, e);
            Decimal::ZERO
        }
    }
}

pub fn parse_date_tolerant(value_str: &str, field_name: &str) -> NaiveDate {
    match NaiveDate::parse_from_str(value_str, DATE_FORMAT) {
        Ok(d) => d,
        Err(e) => {
            log::error!("Failed to parse {} '{}' as date: {}", field_name, value_str, e);
            NaiveDate::default()
        }
    }
}

pub fn parse_datetime_tolerant(value_str: &str, field_name: &str) -> NaiveDateTime {
    match NaiveDateTime::parse_from_str(value_str, DATETIME_FORMAT) {
        Ok(dt) => dt,
        Err(e) => {
            log::error!(
                "Failed to parse {} '{}' as datetime: {}",
                field_name,
                value_str,
                e
            );
            NaiveDateTime::default()
        }
    }
}
