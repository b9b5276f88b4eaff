//! `List.*`

use super::{boolean, display, num};
use crate::args::Args;
use crate::data::{compare, same, Data};
use crate::error::EvalError;
use crate::eval::LocalEvaluator;

/// Resolve a possibly negative index against `len`, clamped to `0..=len`
fn clamp(index: i64, len: usize) -> usize {
    let len = len as i64;
    let index = if index < 0 { len + index } else { index };
    index.clamp(0, len) as usize
}

pub(crate) fn call(ev: &LocalEvaluator, args: &mut Args) -> Result<Data, EvalError> {
    Ok(match args.function() {
        "List.sequence" => {
            let start = args.float("start")?;
            let end = args.optional_number("end")?.map(|n| n.as_f64());
            let step = args.optional_number("step")?.map_or(1.0, |n| n.as_f64());
            let end = match (end, args.optional_int("count")?) {
                (Some(end), _) => end,
                (None, Some(count)) => start + step * (count - 1) as f64,
                (None, None) => return Err(args.fail("either 'end' or 'count' is required")),
            };
            if step == 0.0 {
                return Err(args.fail("step must not be 0"));
            }
            let mut out = Vec::new();
            let mut x = start;
            while (step > 0.0 && x <= end) || (step < 0.0 && x >= end) {
                out.push(num(x));
                x += step;
            }
            Data::List(out)
        }
        "List.size" => num(args.list("list")?.len() as f64),
        "List.get" => {
            let list = args.list("list")?;
            let index = args.int("index")?;
            let resolved = if index < 0 { list.len() as i64 + index } else { index };
            list.into_iter()
                .nth(usize::try_from(resolved).unwrap_or(usize::MAX))
                .ok_or_else(|| args.fail(format!("index {} out of bounds", index)))?
        }
        "List.slice" => {
            let list = args.list("list")?;
            let start = clamp(args.int("start")?, list.len());
            let end = args.optional_int("end")?.map_or(list.len(), |e| clamp(e, list.len()));
            Data::List(if start < end { list[start..end].to_vec() } else { vec![] })
        }
        "List.add" => {
            let mut list = args.list("list")?;
            list.push(args.take("element"));
            Data::List(list)
        }
        "List.cat" => {
            let mut list = args.list("list")?;
            list.extend(args.list("other")?);
            Data::List(list)
        }
        "List.contains" => {
            let element = args.take("element");
            boolean(args.list("list")?.iter().any(|x| same(x, &element)))
        }
        "List.removeAll" => {
            let other = args.list("other")?;
            let list = args.list("list")?;
            Data::List(list.into_iter().filter(|x| !other.iter().any(|o| same(x, o))).collect())
        }
        "List.replace" => {
            let old = args.take("oldval");
            let new = args.take("newval");
            let mut list = args.list("list")?;
            if let Some(pos) = list.iter().position(|x| same(x, &old)) {
                list[pos] = new;
            }
            Data::List(list)
        }
        "List.splice" => {
            let mut list = args.list("list")?;
            let start = clamp(args.int("start")?, list.len());
            let count = args.int("count")?.max(0) as usize;
            let end = (start + count).min(list.len());
            let insert = args.optional_list("other")?.unwrap_or_default();
            list.splice(start..end, insert);
            Data::List(list)
        }
        "List.distinct" => {
            let mut out: Vec<Data> = Vec::new();
            for item in args.list("list")? {
                if !out.iter().any(|x| same(x, &item)) {
                    out.push(item);
                }
            }
            Data::List(out)
        }
        "List.sort" => {
            let mut list = args.list("list")?;
            list.sort_by(compare);
            Data::List(list)
        }
        "List.zip" => {
            let list = args.list("list")?;
            let other = args.list("other")?;
            Data::List(list.into_iter().zip(other).map(|(a, b)| Data::List(vec![a, b])).collect())
        }
        "List.join" => {
            let separator = args.optional_text("separator")?.unwrap_or_else(|| ", ".to_string());
            let parts = args
                .list("list")?
                .iter()
                .map(|item| display(item).ok_or_else(|| args.fail(format!("cannot join a {}", item.type_name()))))
                .collect::<Result<Vec<_>, _>>()?;
            Data::Text(parts.join(&separator))
        }
        "List.map" => {
            let list = args.list("list")?;
            let closure = args.closure("baseAlgorithm")?;
            let drop_nulls = args.bool("dropNulls")?;
            Data::List(ev.map(list, &closure, drop_nulls)?)
        }
        "List.iterate" => {
            let list = args.list("list")?;
            let closure = args.closure("function")?;
            let first = args.take("first");
            ev.iterate(list, &closure, first)?
        }
        other => return Err(EvalError::Unsupported(other.to_string())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_core::{algorithms::if_, EeList, EeNumber, Evaluate, Proxy, Value};
    use serde_json::json;

    #[test]
    fn test_negative_get_and_slice() {
        let ev = LocalEvaluator::new();
        let list = EeList::new(vec!["a", "b", "c"]);
        assert_eq!(ev.evaluate(list.get(-1).value()).unwrap(), json!("c"));
        assert_eq!(ev.get_info(&list.slice(0, -1)).unwrap(), json!(["a", "b"]));
        assert!(ev.evaluate(list.get(5).value()).is_err());
    }

    #[test]
    fn test_sequence_is_inclusive() {
        let ev = LocalEvaluator::new();
        assert_eq!(ev.get_info(&EeList::sequence(1, 3)).unwrap(), json!([1, 2, 3]));
        assert_eq!(ev.get_info(&EeList::sequence(0, -1)).unwrap(), json!([]));
    }

    #[test]
    fn test_map_drop_nulls() {
        let ev = LocalEvaluator::new();
        let list = EeList::new(vec![1.0, 2.5, 3.0]).map_drop_nulls(|x| if_(EeNumber::new(x.clone()).gt(2), x, Value::Null));
        assert_eq!(ev.get_info(&list).unwrap(), json!([2.5, 3]));
    }
}
