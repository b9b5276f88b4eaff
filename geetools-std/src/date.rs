//! Date helpers
//!
//! Epoch arithmetic is expressed with `Date.difference` and `Date.advance`
//! against `Date(0)`, the service's epoch. Converting to a local
//! [`OffsetDateTime`] is the one helper that needs an evaluator.

use geetools_core::Evaluate;
use geetools_plugin::prelude::*;
use time::error::ComponentRange;
use time::OffsetDateTime;

/// Units accepted by [`unit_since_epoch`] and [`from_epoch`]
pub const EPOCH_UNITS: [&str; 7] = ["year", "month", "week", "day", "hour", "minute", "second"];

#[derive(Debug, thiserror::Error)]
pub enum DatetimeError<E: std::error::Error + 'static> {
    #[error("evaluation failed: {0}")]
    Evaluation(#[source] E),

    #[error("expected a millisecond timestamp, got {0}")]
    NotATimestamp(serde_json::Value),

    #[error("timestamp out of range: {0}")]
    OutOfRange(#[from] ComponentRange),
}

fn validate_unit(func: &str, unit: &str) -> Result<(), GeeError> {
    if EPOCH_UNITS.contains(&unit) {
        return Ok(());
    }
    Err(GeeError::invalid_argument(func, format!("unknown unit '{}'", unit))
        .with_suggestion(format!("Use one of: {}", EPOCH_UNITS.join(", "))))
}

/// Whole `unit`s elapsed since 1970-01-01T00:00:00Z
pub fn unit_since_epoch(date: &Date, unit: &str) -> Result<EeNumber, GeeError> {
    validate_unit("unitSinceEpoch", unit)?;
    Ok(date.difference(Date::new(0), unit).to_int())
}

/// Date `number` `unit`s after the epoch
pub fn from_epoch(number: impl Into<Value>, unit: &str) -> Result<Date, GeeError> {
    validate_unit("fromEpoch", unit)?;
    Ok(Date::new(0).advance(number, unit))
}

/// 1 when the date falls in a leap year, 0 otherwise
pub fn is_leap(date: &Date) -> EeNumber {
    let year = date.get("year");
    let every_fourth = year.modulo(4).eq(0);
    let not_century = year.modulo(100).neq(0);
    let fourth_century = year.modulo(400).eq(0);
    every_fourth.and(not_century.or(fourth_century)).to_int()
}

/// Evaluate the date and convert it to a UTC [`OffsetDateTime`]
pub fn to_datetime<E: Evaluate>(date: &Date, evaluator: &E) -> Result<OffsetDateTime, DatetimeError<E::Error>>
where
    E::Error: 'static,
{
    let millis = evaluator.get_info(&date.millis()).map_err(DatetimeError::Evaluation)?;
    match millis.as_i64() {
        Some(millis) => Ok(millis_to_datetime(millis)?),
        None => Err(DatetimeError::NotATimestamp(millis)),
    }
}

/// UTC datetime of a millisecond timestamp, computed locally
pub fn millis_to_datetime(millis: i64) -> Result<OffsetDateTime, ComponentRange> {
    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
}

// ============================================================================
// Extension methods
// ============================================================================

pub struct UnitSinceEpoch;
pub struct FromEpoch;
pub struct IsLeap;

static UNIT_SINCE_EPOCH_ARGS: [ArgMeta; 1] = [ArgMeta::optional("unit", "Text", "year, month, week, day, hour, minute or second", "\"day\"")];
static UNIT_SINCE_EPOCH_EXAMPLES: [&str; 2] = ["date.geetools.unitSinceEpoch()", "date.geetools.unitSinceEpoch(\"year\")"];
static UNIT_SINCE_EPOCH_RELATED: [&str; 1] = ["fromEpoch"];

static FROM_EPOCH_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("number", "Number", "Units since the epoch"),
    ArgMeta::optional("unit", "Text", "year, month, week, day, hour, minute or second", "\"day\""),
];
static FROM_EPOCH_EXAMPLES: [&str; 1] = ["Date.geetools.fromEpoch(18262)"];
static FROM_EPOCH_RELATED: [&str; 1] = ["unitSinceEpoch"];

static IS_LEAP_ARGS: [ArgMeta; 0] = [];
static IS_LEAP_EXAMPLES: [&str; 1] = ["date.geetools.isLeap()"];
static IS_LEAP_RELATED: [&str; 0] = [];

impl ExtensionMethod for UnitSinceEpoch {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "unitSinceEpoch",
            kind: Kind::Date,
            description: "Whole units elapsed since 1970-01-01",
            usage: "unitSinceEpoch(unit?)",
            args: &UNIT_SINCE_EPOCH_ARGS,
            returns: "Number",
            examples: &UNIT_SINCE_EPOCH_EXAMPLES,
            is_static: false,
            related: &UNIT_SINCE_EPOCH_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("unitSinceEpoch", args, 1)?;
        let unit = optional_text(args, 0, "unitSinceEpoch", "unit")?.unwrap_or_else(|| "day".to_string());
        unit_since_epoch(&Date::from_value(this.clone()), &unit).map(Proxy::into_value)
    }
}

impl ExtensionMethod for FromEpoch {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "fromEpoch",
            kind: Kind::Date,
            description: "Date a number of units after 1970-01-01",
            usage: "fromEpoch(number, unit?)",
            args: &FROM_EPOCH_ARGS,
            returns: "Date",
            examples: &FROM_EPOCH_EXAMPLES,
            is_static: true,
            related: &FROM_EPOCH_RELATED,
        }
    }

    fn call(&self, _this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("fromEpoch", args, 2)?;
        let number = require_value(args, 0, "fromEpoch", "number")?.clone();
        let unit = optional_text(args, 1, "fromEpoch", "unit")?.unwrap_or_else(|| "day".to_string());
        from_epoch(number, &unit).map(Proxy::into_value)
    }
}

impl ExtensionMethod for IsLeap {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "isLeap",
            kind: Kind::Date,
            description: "1 if the date's year is a leap year, else 0",
            usage: "isLeap()",
            args: &IS_LEAP_ARGS,
            returns: "Number",
            examples: &IS_LEAP_EXAMPLES,
            is_static: false,
            related: &IS_LEAP_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("isLeap", args, 0)?;
        Ok(is_leap(&Date::from_value(this.clone())).into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_testkit::fixtures;
    use serde_json::json;
    use time::Month;

    #[test]
    fn test_unit_since_epoch() {
        let ev = fixtures::evaluator();
        let date = Date::new("2020-01-01");
        assert_eq!(ev.get_info(&unit_since_epoch(&date, "day").unwrap()).unwrap(), json!(18262));
        assert_eq!(ev.get_info(&unit_since_epoch(&date, "year").unwrap()).unwrap(), json!(50));
    }

    #[test]
    fn test_unknown_unit() {
        let err = unit_since_epoch(&Date::new(0), "fortnight").unwrap_err();
        assert_eq!(err.code, codes::INVALID_ARGUMENT);
        assert!(from_epoch(1, "decade").is_err());
    }

    #[test]
    fn test_from_epoch_inverts_unit_since_epoch() {
        let ev = fixtures::evaluator();
        let date = from_epoch(18262, "day").unwrap();
        assert_eq!(ev.get_info(&unit_since_epoch(&date, "day").unwrap()).unwrap(), json!(18262));
        assert_eq!(ev.get_info(&date.get("year")).unwrap(), json!(2020));
    }

    #[test]
    fn test_is_leap() {
        let ev = fixtures::evaluator();
        for (day, expected) in [("2020-03-01", 1), ("2023-03-01", 0), ("2000-03-01", 1), ("2100-03-01", 0)] {
            assert_eq!(ev.get_info(&is_leap(&Date::new(day))).unwrap(), json!(expected), "{}", day);
        }
    }

    #[test]
    fn test_to_datetime() {
        let ev = fixtures::evaluator();
        let dt = to_datetime(&Date::new("2020-01-01"), &ev).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2020, Month::January, 1));
    }

    #[test]
    fn test_to_datetime_reports_evaluation_failure() {
        let ev = fixtures::evaluator();
        let bad = Date::new("not a date");
        assert!(matches!(to_datetime(&bad, &ev), Err(DatetimeError::Evaluation(_))));
    }

    #[test]
    fn test_millis_to_datetime() {
        let dt = millis_to_datetime(fixtures::S2_TIME_START).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2020, Month::January, 1));
    }

    #[test]
    fn test_from_epoch_is_static() {
        let date = FromEpoch.call(&Value::Null, &[Value::from(10)]).unwrap();
        assert_eq!(date.function_name(), Some("Date.advance"));
    }
}
