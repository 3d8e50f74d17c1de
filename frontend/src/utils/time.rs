use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

pub fn today_in(tz: Tz) -> NaiveDate {
    now_in(tz).date_naive()
}

/// Strict `YYYY-MM-DD`, the format `<input type="date">` produces.
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Accepts a bare date or any timestamp [`parse_flexible_timestamp`] accepts,
/// keeping the UTC calendar date.
pub fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    parse_date_input(value).or_else(|| parse_flexible_timestamp(value).map(|ts| ts.date_naive()))
}

pub fn parse_flexible_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    parse_date_input(value)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

pub fn format_clock_time(ts: DateTime<Utc>, tz: Tz) -> String {
    ts.with_timezone(&tz).format("%H:%M").to_string()
}
