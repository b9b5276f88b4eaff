//! Common validation for image helpers

use geetools_core::{GeeError, Value};
use std::collections::HashSet;

/// Band names must be non-empty
pub fn validate_names(func: &str, arg: &str, names: &[&str]) -> Result<(), GeeError> {
    if let Some(pos) = names.iter().position(|n| n.is_empty()) {
        return Err(GeeError::invalid_argument(
            func,
            format!("{}[{}] is an empty band name", arg, pos),
        ));
    }
    Ok(())
}

/// Band names must be non-empty and pairwise distinct
pub fn validate_unique_names(func: &str, arg: &str, names: &[&str]) -> Result<(), GeeError> {
    validate_names(func, arg, names)?;
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(*name) {
            return Err(GeeError::invalid_argument(
                func,
                format!("{} contains '{}' more than once", arg, name),
            ));
        }
    }
    Ok(())
}

pub fn validate_text(func: &str, arg: &str, text: &str) -> Result<(), GeeError> {
    if text.is_empty() {
        return Err(GeeError::empty_input(func, arg));
    }
    Ok(())
}

/// Strictly positive, finite scale or size
pub fn validate_positive(func: &str, arg: &str, value: f64) -> Result<(), GeeError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GeeError::invalid_argument(
            func,
            format!("{} must be a positive number, got {}", arg, value),
        ));
    }
    Ok(())
}

pub fn text_list(names: &[&str]) -> Value {
    Value::from(names)
}

/// Borrow owned names as `&str`
pub fn as_strs(names: &[String]) -> Vec<&str> {
    names.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_unique_names() {
        assert!(validate_unique_names("f", "names", &["a", "b"]).is_ok());
        let err = validate_unique_names("f", "names", &["a", "a"]).unwrap_err();
        assert!(err.message.contains("'a' more than once"));
        assert!(validate_unique_names("f", "names", &["a", ""]).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("f", "scale", 10.0).is_ok());
        assert!(validate_positive("f", "scale", 0.0).is_err());
        assert!(validate_positive("f", "scale", f64::NAN).is_err());
    }
}
