//! Relative date formatting for inbox rows
//!
//! Pure functions that can be tested without a clock: callers pass "now".

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt::Display;

/// Milliseconds in the fixed 24-hour day used for bucketing
const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Which display band a message date falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    /// Same elapsed day (or in the future): show the time of day
    Today,
    Yesterday,
    /// 2 to 6 elapsed days
    DaysAgo(i64),
    /// 7 to 13 elapsed days
    LastWeek,
    /// 14 or more elapsed days: show month and day
    Older,
}

impl DateBucket {
    /// Bucket a whole-day difference.
    ///
    /// Negative differences (dates in the future) land in `Today`.
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d <= 0 => DateBucket::Today,
            1 => DateBucket::Yesterday,
            d if d < 7 => DateBucket::DaysAgo(d),
            d if d < 14 => DateBucket::LastWeek,
            _ => DateBucket::Older,
        }
    }
}

/// Format a raw `Date` header relative to the local clock
pub fn format_email_date(raw: &str) -> String {
    format_relative_date(raw, &Local::now())
}

/// Format a raw `Date` header relative to `now`
///
/// Times and month names are rendered in `now`'s timezone. Input that can't
/// be parsed as a date is returned unchanged.
pub fn format_relative_date<Tz>(raw: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(date) = parse_date(raw) else {
        return raw.to_string();
    };
    let local = date.with_timezone(&now.timezone());

    match DateBucket::from_days(elapsed_days(&date, now)) {
        DateBucket::Today => local.format("%-I:%M %p").to_string(),
        DateBucket::Yesterday => "Yesterday".to_string(),
        DateBucket::DaysAgo(days) => format!("{} days ago", days),
        DateBucket::LastWeek => "1 week ago".to_string(),
        DateBucket::Older => local.format("%b %-d").to_string(),
    }
}

/// Whole elapsed days between `date` and `now`, floored.
///
/// This is elapsed-time bucketing, not calendar days: 23h59m ago is still 0.
pub fn elapsed_days<Tz: TimeZone, Tz2: TimeZone>(date: &DateTime<Tz>, now: &DateTime<Tz2>) -> i64 {
    (now.timestamp_millis() - date.timestamp_millis()).div_euclid(MS_PER_DAY)
}

/// Parse a message date.
///
/// Accepts RFC 2822 (with an optional trailing comment like `(UTC)`, a
/// `UTC` zone name, or a one-digit hour), RFC 3339, and bare
/// `YYYY-MM-DD[ HH:MM:SS]` taken as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let s = strip_comment(raw.trim());
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(s) {
        return Some(date);
    }
    if let Some(relaxed) = relax_rfc2822(s)
        && let Ok(date) = DateTime::parse_from_rfc2822(&relaxed)
    {
        return Some(date);
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Rewrite forms mail clients send but RFC 2822 parsing rejects:
/// a trailing `UTC` zone and a one-digit hour. `None` if nothing changed.
fn relax_rfc2822(s: &str) -> Option<String> {
    let mut tokens: Vec<String> = s.split_whitespace().map(str::to_string).collect();
    let mut changed = false;

    if let Some(last) = tokens.last_mut()
        && last.eq_ignore_ascii_case("UTC")
    {
        *last = "+0000".to_string();
        changed = true;
    }

    for token in tokens.iter_mut() {
        if let Some((hour, rest)) = token.split_once(':')
            && hour.len() == 1
            && hour.chars().all(|c| c.is_ascii_digit())
        {
            *token = format!("0{}:{}", hour, rest);
            changed = true;
        }
    }

    changed.then(|| tokens.join(" "))
}

/// Drop a trailing `(...)` comment, as in `+0000 (UTC)`
fn strip_comment(s: &str) -> &str {
    if s.ends_with(')')
        && let Some(open) = s.rfind('(')
    {
        return s[..open].trim_end();
    }
    s
}
