use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Current local timestamp, ISO 8601, as stored in the Timestamp cells.
pub fn now_stamp() -> String {
    chrono::Local::now().to_rfc3339()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Like [`parse_date`] but mapped onto the application error type.
pub fn parse_date_req(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// True when `date` falls inside the calendar month `month`/`year`.
/// Month filtering is by calendar month, never a 30-day window.
pub fn in_month(date: NaiveDate, month: u32, year: i32) -> bool {
    date.month() == month && date.year() == year
}

/// Inclusive day-granularity window check.
pub fn in_window(date: NaiveDate, from: NaiveDate, to: NaiveDate) -> bool {
    date >= from && date <= to
}

/// Day part of an RFC 3339 timestamp cell ("2024-03-05T09:30:00+02:00").
/// The date prefix is enough; the offset never moves the calendar day as
/// stored, so no full datetime parse is needed.
pub fn stamp_date(stamp: &str) -> Option<NaiveDate> {
    parse_date(stamp.get(..10)?)
}

pub fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

/// (first, last) day of a calendar month.
pub fn month_window(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let last = month_last_day(year, month)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;
    let d1 = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;
    let d2 = NaiveDate::from_ymd_opt(year, month, last)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;
    Ok((d1, d2))
}
