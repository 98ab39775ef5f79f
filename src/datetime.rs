//! NNTP date stamp handling (RFC 3977 §7.1, §7.3, §7.4)
//!
//! NEWGROUPS and NEWNEWS take a `YYYYMMDD HHMMSS` stamp; DATE replies with a
//! bare 14-digit `YYYYMMDDHHMMSS`. The client always emits four-digit years.
//! Pre-RFC servers may still produce two-digit years, which parse with the
//! conventional window: years below 70 map to 20yy, 70-99 to 19yy.

use crate::error::{DataError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Format the date half of a NEWGROUPS/NEWNEWS argument pair (`YYYYMMDD`).
pub fn format_date(stamp: &NaiveDateTime) -> String {
    format!(
        "{:04}{:02}{:02}",
        stamp.year(),
        stamp.month(),
        stamp.day()
    )
}

/// Format the time half of a NEWGROUPS/NEWNEWS argument pair (`HHMMSS`).
pub fn format_time(stamp: &NaiveDateTime) -> String {
    format!(
        "{:02}{:02}{:02}",
        stamp.hour(),
        stamp.minute(),
        stamp.second()
    )
}

/// Format a full 14-digit `YYYYMMDDHHMMSS` stamp as produced by DATE.
pub fn format_timestamp(stamp: &NaiveDateTime) -> String {
    format!("{}{}", format_date(stamp), format_time(stamp))
}

fn digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Apply the two-digit year window: <70 becomes 20yy, 70-99 becomes 19yy.
fn widen_year(yy: i32) -> i32 {
    if yy < 70 { 2000 + yy } else { 1900 + yy }
}

/// Parse a server-produced date field, either `YYYYMMDD` or legacy `YYMMDD`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    if !digits(s) || (s.len() != 6 && s.len() != 8) {
        return Err(DataError::BadDate(s.to_string()).into());
    }

    let (year, rest) = if s.len() == 8 {
        // Unwraps are safe: all-digit substrings of checked length
        (s[..4].parse::<i32>().unwrap(), &s[4..])
    } else {
        (widen_year(s[..2].parse::<i32>().unwrap()), &s[2..])
    };
    let month: u32 = rest[..2].parse().unwrap();
    let day: u32 = rest[2..4].parse().unwrap();

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DataError::BadDate(s.to_string()).into())
}

/// Parse an `HHMMSS` time field.
pub fn parse_time(s: &str) -> Result<(u32, u32, u32)> {
    if !digits(s) || s.len() != 6 {
        return Err(DataError::BadDate(s.to_string()).into());
    }
    let hour: u32 = s[..2].parse().unwrap();
    let minute: u32 = s[2..4].parse().unwrap();
    let second: u32 = s[4..6].parse().unwrap();
    if hour > 23 || minute > 59 || second > 59 {
        return Err(DataError::BadDate(s.to_string()).into());
    }
    Ok((hour, minute, second))
}

/// Parse the DATE reply argument: exactly 14 digits, `YYYYMMDDHHMMSS`.
/// Any deviation, including a shortened or padded stamp, is a data error.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    if !digits(s) || s.len() != 14 {
        return Err(DataError::BadDate(s.to_string()).into());
    }

    let date = parse_date(&s[..8])?;
    let (hour, minute, second) = parse_time(&s[8..])?;
    date.and_hms_opt(hour, minute, second)
        .ok_or_else(|| DataError::BadDate(s.to_string()).into())
}
