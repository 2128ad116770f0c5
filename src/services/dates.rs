//! Conversions between calendar dates and the strings the form and the
//! reservation service exchange. Only calendar fields are used, never an
//! instant, so results do not depend on the host timezone.

use chrono::NaiveDate;

use crate::errors::FormatError;

/// Canonical `YYYY-MM-DD`, the key format of the blocked-dates map.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Inverse of [`format_date`].
pub fn parse_local_date(s: &str) -> Result<NaiveDate, FormatError> {
    let [year, month, day] = split_fields(s, '-', "YYYY-MM-DD")?;
    build_date(s, year, month, day, "YYYY-MM-DD")
}

/// `DD.MM.YYYY`, the picker format sent as `fecha`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn parse_display_date(s: &str) -> Result<NaiveDate, FormatError> {
    let [day, month, year] = split_fields(s, '.', "DD.MM.YYYY")?;
    build_date(s, year, month, day, "DD.MM.YYYY")
}

fn split_fields<'a>(
    s: &'a str,
    sep: char,
    expected: &'static str,
) -> Result<[&'a str; 3], FormatError> {
    let parts: Vec<&str> = s.split(sep).collect();
    match parts.as_slice() {
        [a, b, c] if [a, b, c].iter().all(|p| is_digits(p)) => Ok([*a, *b, *c]),
        _ => Err(format_error(s, expected)),
    }
}

fn build_date(
    input: &str,
    year: &str,
    month: &str,
    day: &str,
    expected: &'static str,
) -> Result<NaiveDate, FormatError> {
    let year: i32 = year.parse().map_err(|_| format_error(input, expected))?;
    let month: u32 = month.parse().map_err(|_| format_error(input, expected))?;
    let day: u32 = day.parse().map_err(|_| format_error(input, expected))?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| format_error(input, expected))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn format_error(input: &str, expected: &'static str) -> FormatError {
    FormatError {
        input: input.to_string(),
        expected,
    }
}
