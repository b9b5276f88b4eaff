//! Argument extraction for extension methods
//!
//! Dynamic calls pass positional `Value`s. Literal arguments (names, counts,
//! option maps) are checked here so that a bad call fails immediately
//! rather than when the graph is evaluated remotely.

use geetools_core::{GeeError, Number, Value};
use std::collections::BTreeMap;

/// Fail when more than `max` arguments were passed
pub fn check_arity(func: &str, args: &[Value], max: usize) -> Result<(), GeeError> {
    if args.len() > max {
        return Err(GeeError::arg_count(func, max, args.len()));
    }
    Ok(())
}

fn present(args: &[Value], index: usize) -> Option<&Value> {
    args.get(index).filter(|v| !v.is_null())
}

/// Required literal text
pub fn require_text(args: &[Value], index: usize, func: &str, arg: &str) -> Result<String, GeeError> {
    optional_text(args, index, func, arg)?
        .ok_or_else(|| GeeError::arg_type(func, arg, "Text", "Null"))
}

/// Optional literal text (missing or null gives `None`)
pub fn optional_text(args: &[Value], index: usize, func: &str, arg: &str) -> Result<Option<String>, GeeError> {
    match present(args, index) {
        None => Ok(None),
        Some(Value::Text(s)) => Ok(Some(s.clone())),
        Some(other) => Err(GeeError::arg_type(func, arg, "Text", other.type_name())),
    }
}

/// Required literal list of text
pub fn require_text_list(args: &[Value], index: usize, func: &str, arg: &str) -> Result<Vec<String>, GeeError> {
    optional_text_list(args, index, func, arg)?
        .ok_or_else(|| GeeError::arg_type(func, arg, "List<Text>", "Null"))
}

/// Optional literal list of text; a single text is accepted as a one-element list
pub fn optional_text_list(args: &[Value], index: usize, func: &str, arg: &str) -> Result<Option<Vec<String>>, GeeError> {
    match present(args, index) {
        None => Ok(None),
        Some(Value::Text(s)) => Ok(Some(vec![s.clone()])),
        Some(Value::List(items)) => items
            .iter()
            .map(|item| match item {
                Value::Text(s) => Ok(s.clone()),
                other => Err(GeeError::arg_type(func, arg, "List<Text>", &format!("List<{}>", other.type_name()))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(GeeError::arg_type(func, arg, "List<Text>", other.type_name())),
    }
}

/// Optional literal number
pub fn optional_number(args: &[Value], index: usize, func: &str, arg: &str) -> Result<Option<Number>, GeeError> {
    match present(args, index) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(*n)),
        Some(other) => Err(GeeError::arg_type(func, arg, "Number", other.type_name())),
    }
}

/// Optional literal integer
pub fn optional_int(args: &[Value], index: usize, func: &str, arg: &str) -> Result<Option<i64>, GeeError> {
    match optional_number(args, index, func, arg)? {
        None => Ok(None),
        Some(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| GeeError::invalid_argument(func, format!("{} must be an integer, got {}", arg, n))),
    }
}

/// Optional literal list of numbers
pub fn optional_number_list(args: &[Value], index: usize, func: &str, arg: &str) -> Result<Option<Vec<Number>>, GeeError> {
    match present(args, index) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(vec![*n])),
        Some(Value::List(items)) => items
            .iter()
            .map(|item| {
                item.as_number().ok_or_else(|| {
                    GeeError::arg_type(func, arg, "List<Number>", &format!("List<{}>", item.type_name()))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(GeeError::arg_type(func, arg, "List<Number>", other.type_name())),
    }
}

/// Required literal mapping of text to text
pub fn require_text_map(args: &[Value], index: usize, func: &str, arg: &str) -> Result<BTreeMap<String, String>, GeeError> {
    match present(args, index) {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| match v {
                Value::Text(s) => Ok((k.clone(), s.clone())),
                other => Err(GeeError::arg_type(func, arg, "Object<Text>", &format!("Object<{}>", other.type_name()))),
            })
            .collect(),
        Some(other) => Err(GeeError::arg_type(func, arg, "Object", other.type_name())),
        None => Err(GeeError::arg_type(func, arg, "Object", "Null")),
    }
}

/// Required argument of any shape (literal or computed)
pub fn require_value<'a>(args: &'a [Value], index: usize, func: &str, arg: &str) -> Result<&'a Value, GeeError> {
    present(args, index).ok_or_else(|| GeeError::arg_type(func, arg, "Value", "Null"))
}

/// Optional argument of any shape
pub fn optional_value(args: &[Value], index: usize) -> Option<&Value> {
    present(args, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_text_list_accepts_single_text() {
        let args = vec![Value::from("B1")];
        assert_eq!(optional_text_list(&args, 0, "f", "bands").unwrap(), Some(vec!["B1".to_string()]));
    }

    #[test]
    fn test_optional_text_list_rejects_numbers() {
        let args = vec![Value::List(vec![Value::from(1)])];
        let err = optional_text_list(&args, 0, "f", "bands").unwrap_err();
        assert_eq!(err.code, "ARG_TYPE");
    }

    #[test]
    fn test_missing_and_null_are_none() {
        let args = vec![Value::Null];
        assert_eq!(optional_text(&args, 0, "f", "x").unwrap(), None);
        assert_eq!(optional_text(&args, 3, "f", "x").unwrap(), None);
    }

    #[test]
    fn test_optional_int_rejects_fractions() {
        let args = vec![Value::from(1.5)];
        assert!(optional_int(&args, 0, "f", "start").is_err());
        let args = vec![Value::from(2.0)];
        assert_eq!(optional_int(&args, 0, "f", "start").unwrap(), Some(2));
    }

    #[test]
    fn test_check_arity() {
        assert!(check_arity("f", &[Value::Null], 1).is_ok());
        assert!(check_arity("f", &[Value::Null, Value::Null], 1).is_err());
    }
}
