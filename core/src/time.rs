use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder the time-clock export writes for "no value".
pub const PLACEHOLDER: &str = "-";

static CLOCK_DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("valid duration pattern"));

static US_SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2,4})$").expect("valid slash date pattern"));

static YEAR_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}[-/]").expect("valid year-first pattern"));

static DASHED_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})-(\d{1,2})-(\d{2,4})").expect("valid dashed date pattern"));

const YEAR_FIRST_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const DATE_FORMATS: &[&str] = &[
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%a %b %d %Y",
    "%A, %B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Converts an `H:MM` or `H:MM:SS` clock duration into decimal hours.
///
/// Anything else, including the `-` placeholder, is worth zero hours.
pub fn parse_clock_duration(input: &str) -> f64 {
    let Some(caps) = CLOCK_DURATION.captures(input.trim()) else {
        return 0.0;
    };
    let part = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    part(1) + part(2) / 60.0 + part(3) / 3600.0
}

/// Renders decimal hours as `HH:MM`, rounded to the nearest minute.
pub fn format_duration(hours: f64) -> String {
    if !hours.is_finite() || hours < 0.0 {
        return "0:00".to_string();
    }
    let total_minutes = (hours * 60.0).round() as i64;
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Best-effort date parser for the "Date" column of an export.
///
/// Returns `None` for the placeholder, blank text and anything unparseable;
/// callers skip the row in that case.
pub fn parse_observed_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() || input == PLACEHOLDER {
        return None;
    }
    parse_generic_date(input).or_else(|| parse_dashed_date(input))
}

fn parse_generic_date(input: &str) -> Option<NaiveDate> {
    if let Some(caps) = US_SLASH_DATE.captures(input) {
        return month_day_year(&caps[1], &caps[2], &caps[3]);
    }
    // %Y accepts any digit count, so "01-02-25" would otherwise land in year 1.
    if YEAR_FIRST.is_match(input) {
        if let Some(date) = YEAR_FIRST_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        {
            return Some(date);
        }
        if let Some(dt) = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        {
            return Some(dt.date());
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(dt.date_naive());
        }
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

fn parse_dashed_date(input: &str) -> Option<NaiveDate> {
    DASHED_DATE
        .captures(input)
        .and_then(|caps| month_day_year(&caps[1], &caps[2], &caps[3]))
}

fn month_day_year(month: &str, day: &str, year: &str) -> Option<NaiveDate> {
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    let mut year: i32 = year.parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
