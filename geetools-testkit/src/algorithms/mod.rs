//! Algorithm implementations, grouped by the object they operate on

pub(crate) mod collection;
pub(crate) mod geometry;
pub(crate) mod image;
pub(crate) mod list;
pub(crate) mod primitives;

use crate::data::Data;
use geetools_core::Number;

/// Number result, kept integral when it has no fractional part
pub(crate) fn num(value: f64) -> Data {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Data::Number(Number::Int(value as i64))
    } else {
        Data::Number(Number::Float(value))
    }
}

pub(crate) fn boolean(value: bool) -> Data {
    Data::Bool(value)
}

/// Text rendering used by `String` and `List.join`
pub(crate) fn display(data: &Data) -> Option<String> {
    match data {
        Data::Text(s) => Some(s.clone()),
        Data::Number(n) => Some(n.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::List(items) => items
            .iter()
            .map(display)
            .collect::<Option<Vec<_>>>()
            .map(|parts| format!("[{}]", parts.join(","))),
        _ => None,
    }
}
