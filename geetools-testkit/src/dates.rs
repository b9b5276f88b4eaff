//! Calendar arithmetic on millisecond timestamps

use time::format_description::well_known::Rfc3339;
use time::{Month, OffsetDateTime};

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

fn fixed_unit(unit: &str) -> Option<i64> {
    match unit {
        "second" => Some(SECOND),
        "minute" => Some(MINUTE),
        "hour" => Some(HOUR),
        "day" => Some(DAY),
        "week" => Some(WEEK),
        _ => None,
    }
}

fn months_per_unit(unit: &str) -> Option<i32> {
    match unit {
        "month" => Some(1),
        "year" => Some(12),
        _ => None,
    }
}

pub fn to_datetime(millis: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000).ok()
}

fn to_millis(dt: OffsetDateTime) -> i64 {
    (dt.unix_timestamp_nanos() / 1_000_000) as i64
}

/// RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS` (UTC) and `YYYY-MM-DD`
pub fn parse(text: &str) -> Option<i64> {
    if let Ok(dt) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(to_millis(dt));
    }
    if let Ok(dt) = OffsetDateTime::parse(&format!("{}Z", text), &Rfc3339) {
        return Some(to_millis(dt));
    }
    let mut parts = text.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let date = time::Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()?;
    Some(to_millis(date.midnight().assume_utc()))
}

fn add_months(dt: OffsetDateTime, months: i32) -> Option<OffsetDateTime> {
    let index = dt.year() * 12 + (dt.month() as i32 - 1) + months;
    let year = index.div_euclid(12);
    let month = Month::try_from((index.rem_euclid(12) + 1) as u8).ok()?;
    let day = dt.day().min(time::util::days_in_year_month(year, month));
    let date = time::Date::from_calendar_date(year, month, day).ok()?;
    Some(dt.replace_date(date))
}

/// `millis` moved by `delta` units; fractional months and years use the
/// length of the month reached
pub fn advance(millis: i64, delta: f64, unit: &str) -> Option<i64> {
    if let Some(size) = fixed_unit(unit) {
        return Some(millis + (delta * size as f64).round() as i64);
    }
    let months = delta * months_per_unit(unit)? as f64;
    let whole = months.trunc();
    let moved = add_months(to_datetime(millis)?, whole as i32)?;
    let month_len = to_millis(add_months(moved, months.signum() as i32)?) - to_millis(moved);
    Some(to_millis(moved) + ((months - whole).abs() * month_len as f64).round() as i64)
}

/// Fractional number of `unit`s from `start` to `end`
pub fn difference(end: i64, start: i64, unit: &str) -> Option<f64> {
    if let Some(size) = fixed_unit(unit) {
        return Some((end - start) as f64 / size as f64);
    }
    let per_unit = months_per_unit(unit)?;
    let (from, to, sign) = if end >= start { (start, end, 1.0) } else { (end, start, -1.0) };
    let from_dt = to_datetime(from)?;
    let to_dt = to_datetime(to)?;
    let mut months = (to_dt.year() - from_dt.year()) * 12 + (to_dt.month() as i32 - from_dt.month() as i32);
    let mut anchor = add_months(from_dt, months)?;
    if anchor > to_dt {
        months -= 1;
        anchor = add_months(from_dt, months)?;
    }
    let next = add_months(from_dt, months + 1)?;
    let fraction = (to - to_millis(anchor)) as f64 / (to_millis(next) - to_millis(anchor)) as f64;
    Some(sign * (months as f64 + fraction) / per_unit as f64)
}

/// Calendar field in UTC
pub fn field(millis: i64, unit: &str) -> Option<i64> {
    let dt = to_datetime(millis)?;
    Some(match unit {
        "year" => dt.year() as i64,
        "month" => dt.month() as i64,
        "week" => dt.iso_week() as i64,
        "day" => dt.day() as i64,
        "hour" => dt.hour() as i64,
        "minute" => dt.minute() as i64,
        "second" => dt.second() as i64,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse("1970-01-02"), Some(DAY));
        assert_eq!(parse("1970-01-01T00:01:00"), Some(MINUTE));
        assert_eq!(parse("1970-01-01T01:00:00Z"), Some(HOUR));
        assert_eq!(parse("not a date"), None);
    }

    #[test]
    fn test_month_arithmetic_clamps_day() {
        let jan31 = parse("2020-01-31").unwrap();
        assert_eq!(advance(jan31, 1.0, "month"), parse("2020-02-29"));
        assert_eq!(difference(parse("2021-01-01").unwrap(), parse("2020-01-01").unwrap(), "year"), Some(1.0));
    }

    #[test]
    fn test_fixed_units() {
        let d = parse("2020-01-01").unwrap();
        assert_eq!(difference(d, 0, "day"), Some(18262.0));
        assert_eq!(advance(0, 18262.0, "day"), Some(d));
        assert_eq!(field(d, "year"), Some(2020));
    }
}
