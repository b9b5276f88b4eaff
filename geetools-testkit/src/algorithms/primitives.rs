//! `Number.*`, `String.*`, `Dictionary.*`, `Date.*` and `Algorithms.*`

use super::{boolean, display, num};
use crate::args::Args;
use crate::data::{same, Data};
use crate::dates;
use crate::error::EvalError;
use geetools_core::Number;
use regex::RegexBuilder;
use std::collections::BTreeMap;

pub(crate) fn call(args: &mut Args) -> Result<Data, EvalError> {
    let name = args.function();
    if name.starts_with("Number.") {
        return number(args);
    }
    Ok(match name {
        "String" => {
            let input = args.take("input");
            Data::Text(display(&input).ok_or_else(|| args.fail(format!("cannot convert a {}", input.type_name())))?)
        }
        "String.cat" => {
            let mut first = args.text("string1")?;
            first.push_str(&args.text("string2")?);
            Data::Text(first)
        }
        "String.equals" => {
            let reference = args.text("reference")?;
            boolean(args.take("target") == Data::Text(reference))
        }
        "String.replace" => {
            let input = args.text("input")?;
            let pattern = args.text("regex")?;
            let replacement = args.text("replacement")?;
            let flags = args.optional_text("flags")?.unwrap_or_default();
            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(flags.contains('i'))
                .build()
                .map_err(|e| args.fail(format!("invalid regex '{}': {}", pattern, e)))?;
            let out = if flags.contains('g') {
                regex.replace_all(&input, replacement.as_str())
            } else {
                regex.replace(&input, replacement.as_str())
            };
            Data::Text(out.into_owned())
        }
        "Dictionary.fromLists" => {
            let keys = args.list("keys")?;
            let values = args.list("values")?;
            if keys.len() != values.len() {
                return Err(args.fail(format!("{} keys but {} values", keys.len(), values.len())));
            }
            let mut dict = BTreeMap::new();
            for (key, value) in keys.into_iter().zip(values) {
                let key = display(&key).ok_or_else(|| args.fail("keys must be strings"))?;
                dict.insert(key, value);
            }
            Data::Dict(dict)
        }
        "Dictionary.keys" => Data::List(args.dict("dictionary")?.into_keys().map(Data::Text).collect()),
        "Dictionary.values" => {
            let dict = args.dict("dictionary")?;
            match args.optional_list("keys")? {
                None => Data::List(dict.into_values().collect()),
                Some(keys) => Data::List(
                    keys.iter()
                        .map(|key| lookup(args, &dict, key))
                        .collect::<Result<_, _>>()?,
                ),
            }
        }
        "Dictionary.get" => {
            let dict = args.dict("dictionary")?;
            let key = args.take("key");
            match args.take("defaultValue") {
                Data::Null => lookup(args, &dict, &key)?,
                default => display(&key).and_then(|k| dict.get(&k).cloned()).unwrap_or(default),
            }
        }
        "Dictionary.contains" => {
            let dict = args.dict("dictionary")?;
            let key = args.text("key")?;
            boolean(dict.contains_key(&key))
        }
        "Dictionary.select" => {
            let dict = args.dict("dictionary")?;
            let keys = args.names("selectors")?;
            let mut out = BTreeMap::new();
            for key in keys {
                let value = lookup(args, &dict, &Data::Text(key.clone()))?;
                out.insert(key, value);
            }
            Data::Dict(out)
        }
        "Dictionary.set" => {
            let mut dict = args.dict("dictionary")?;
            let key = args.text("key")?;
            dict.insert(key, args.take("value"));
            Data::Dict(dict)
        }
        "Date" => Data::Date(args.date("value")?),
        "Date.millis" => num(args.date("input")? as f64),
        "Date.difference" => {
            let date = args.date("date")?;
            let start = args.date("start")?;
            let unit = args.text("unit")?;
            num(dates::difference(date, start, &unit).ok_or_else(|| args.fail(format!("unknown unit '{}'", unit)))?)
        }
        "Date.advance" => {
            let date = args.date("date")?;
            let delta = args.float("delta")?;
            let unit = args.text("unit")?;
            Data::Date(dates::advance(date, delta, &unit).ok_or_else(|| args.fail(format!("unknown unit '{}'", unit)))?)
        }
        "Date.get" => {
            let date = args.date("date")?;
            let unit = args.text("unit")?;
            num(dates::field(date, &unit).ok_or_else(|| args.fail(format!("unknown unit '{}'", unit)))? as f64)
        }
        "Algorithms.IsEqual" => {
            let left = args.take("left");
            boolean(same(&left, &args.take("right")))
        }
        other => return Err(EvalError::Unsupported(other.to_string())),
    })
}

fn lookup(args: &Args, dict: &BTreeMap<String, Data>, key: &Data) -> Result<Data, EvalError> {
    display(key)
        .and_then(|k| dict.get(&k).cloned())
        .ok_or_else(|| args.fail(format!("dictionary does not contain key {:?}", display(key).unwrap_or_default())))
}

fn number(args: &mut Args) -> Result<Data, EvalError> {
    let name = args.function();
    match name {
        "Number.toInt" => return Ok(num(args.float("input")?.trunc())),
        "Number.format" => {
            let number = args.number("number")?;
            let pattern = args.optional_text("pattern")?.unwrap_or_else(|| "%s".to_string());
            return format(number, &pattern).map(Data::Text).ok_or_else(|| args.fail(format!("unsupported pattern '{}'", pattern)));
        }
        _ => {}
    }

    let left = args.number("left")?;
    let right = args.number("right")?;
    let (a, b) = (left.as_f64(), right.as_f64());
    let truth = |x: bool| num(if x { 1.0 } else { 0.0 });

    Ok(match name {
        "Number.add" => num(a + b),
        "Number.subtract" => num(a - b),
        "Number.multiply" => num(a * b),
        "Number.divide" if b == 0.0 => num(0.0),
        "Number.divide" => num(a / b),
        "Number.pow" => num(a.powf(b)),
        "Number.mod" if b == 0.0 => num(0.0),
        "Number.mod" => num(a % b),
        "Number.eq" => truth(a == b),
        "Number.neq" => truth(a != b),
        "Number.gt" => truth(a > b),
        "Number.lt" => truth(a < b),
        "Number.and" => truth(a != 0.0 && b != 0.0),
        "Number.or" => truth(a != 0.0 || b != 0.0),
        other => return Err(EvalError::Unsupported(other.to_string())),
    })
}

/// `%d`, `%s`, `%f` and `%.Nf` conversions, `%%` for a literal percent
fn format(number: Number, pattern: &str) -> Option<String> {
    let mut out = String::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let mut precision = None;
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut digits = String::new();
            while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                digits.push(*d);
                chars.next();
            }
            precision = Some(digits.parse::<usize>().ok()?);
        }
        match chars.next()? {
            'd' => out.push_str(&(number.as_f64().trunc() as i64).to_string()),
            's' => out.push_str(&number.to_string()),
            'f' => out.push_str(&format!("{:.*}", precision.unwrap_or(6), number.as_f64())),
            '%' => out.push('%'),
            _ => return None,
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_patterns() {
        assert_eq!(format(Number::Int(3), "%d").as_deref(), Some("3"));
        assert_eq!(format(Number::Float(3.14159), "%.2f").as_deref(), Some("3.14"));
        assert_eq!(format(Number::Int(7), "id_%d%%").as_deref(), Some("id_7%"));
        assert_eq!(format(Number::Int(7), "%x"), None);
    }

    #[test]
    fn test_mod_and_divide_by_zero() {
        let mut args = Args::new(
            "Number.divide",
            [("left".to_string(), num(4.0)), ("right".to_string(), num(0.0))].into_iter().collect(),
        );
        assert_eq!(call(&mut args).unwrap(), num(0.0));
        let mut args = Args::new(
            "Number.mod",
            [("left".to_string(), num(-7.0)), ("right".to_string(), num(3.0))].into_iter().collect(),
        );
        assert_eq!(call(&mut args).unwrap(), num(-1.0));
    }
}
