//! Remote numbers, strings, dictionaries and dates

use super::{call, proxy_type, Computed, EeList};
use crate::{Kind, Value};

proxy_type!(EeNumber, Some(Kind::Number));
proxy_type!(EeString, Some(Kind::String));
proxy_type!(Dictionary, Some(Kind::Dictionary));
proxy_type!(Date, Some(Kind::Date));

macro_rules! binary_ops {
    ($($method:ident => $function:literal),* $(,)?) => {
        $(
            pub fn $method(&self, right: impl Into<Value>) -> EeNumber {
                call($function, [("left", self.0.clone()), ("right", right.into())])
            }
        )*
    };
}

impl EeNumber {
    pub fn new(value: impl Into<Value>) -> EeNumber {
        EeNumber(value.into())
    }

    binary_ops! {
        add => "Number.add",
        subtract => "Number.subtract",
        multiply => "Number.multiply",
        divide => "Number.divide",
        pow => "Number.pow",
        modulo => "Number.mod",
        eq => "Number.eq",
        neq => "Number.neq",
        gt => "Number.gt",
        lt => "Number.lt",
        and => "Number.and",
        or => "Number.or",
    }

    pub fn to_int(&self) -> EeNumber {
        call("Number.toInt", [("input", self.0.clone())])
    }

    /// Java-style format pattern, e.g. `"%d"`
    pub fn format(&self, pattern: &str) -> EeString {
        call("Number.format", [("number", self.0.clone()), ("pattern", Value::from(pattern))])
    }
}

impl EeString {
    pub fn new(value: impl Into<Value>) -> EeString {
        EeString(value.into())
    }

    /// Server-side string conversion of a number or string
    pub fn from_object(input: impl Into<Value>) -> EeString {
        call("String", [("input", input.into())])
    }

    pub fn cat(&self, other: impl Into<Value>) -> EeString {
        call("String.cat", [("string1", self.0.clone()), ("string2", other.into())])
    }

    pub fn equals(&self, target: impl Into<Value>) -> Computed {
        call("String.equals", [("reference", self.0.clone()), ("target", target.into())])
    }

    /// Regex replacement; `flags` follows JavaScript (`"g"` for all matches)
    pub fn replace(&self, regex: impl Into<Value>, replacement: impl Into<Value>, flags: &str) -> EeString {
        call(
            "String.replace",
            [
                ("input", self.0.clone()),
                ("regex", regex.into()),
                ("replacement", replacement.into()),
                ("flags", Value::from(flags)),
            ],
        )
    }
}

impl Dictionary {
    pub fn new(value: impl Into<Value>) -> Dictionary {
        Dictionary(value.into())
    }

    pub fn from_lists(keys: impl Into<Value>, values: impl Into<Value>) -> Dictionary {
        call("Dictionary.fromLists", [("keys", keys.into()), ("values", values.into())])
    }

    pub fn keys(&self) -> EeList {
        call("Dictionary.keys", [("dictionary", self.0.clone())])
    }

    /// Values for `keys`, in that order
    pub fn values(&self, keys: impl Into<Value>) -> EeList {
        call("Dictionary.values", [("dictionary", self.0.clone()), ("keys", keys.into())])
    }

    pub fn get(&self, key: impl Into<Value>) -> Computed {
        call("Dictionary.get", [("dictionary", self.0.clone()), ("key", key.into())])
    }

    pub fn get_or(&self, key: impl Into<Value>, default: impl Into<Value>) -> Computed {
        call(
            "Dictionary.get",
            [("dictionary", self.0.clone()), ("key", key.into()), ("defaultValue", default.into())],
        )
    }

    pub fn contains(&self, key: impl Into<Value>) -> Computed {
        call("Dictionary.contains", [("dictionary", self.0.clone()), ("key", key.into())])
    }

    /// Sub-dictionary restricted to `keys`
    pub fn select(&self, keys: impl Into<Value>) -> Dictionary {
        call("Dictionary.select", [("dictionary", self.0.clone()), ("selectors", keys.into())])
    }

    pub fn set(&self, key: impl Into<Value>, value: impl Into<Value>) -> Dictionary {
        call(
            "Dictionary.set",
            [("dictionary", self.0.clone()), ("key", key.into()), ("value", value.into())],
        )
    }
}

impl Date {
    /// From milliseconds since epoch or an ISO string
    pub fn new(value: impl Into<Value>) -> Date {
        call("Date", [("value", value.into())])
    }

    pub fn millis(&self) -> EeNumber {
        call("Date.millis", [("input", self.0.clone())])
    }

    /// Elapsed `unit`s from `start` to this date, fractional
    pub fn difference(&self, start: impl Into<Value>, unit: &str) -> EeNumber {
        call(
            "Date.difference",
            [("date", self.0.clone()), ("start", start.into()), ("unit", Value::from(unit))],
        )
    }

    pub fn advance(&self, delta: impl Into<Value>, unit: &str) -> Date {
        call(
            "Date.advance",
            [("date", self.0.clone()), ("delta", delta.into()), ("unit", Value::from(unit))],
        )
    }

    /// Calendar field, e.g. `"year"`
    pub fn get(&self, unit: &str) -> EeNumber {
        call("Date.get", [("date", self.0.clone()), ("unit", Value::from(unit))])
    }
}
