//! Dictionary helpers

use geetools_plugin::prelude::*;

/// Dictionary from a list of `[key, value]` pairs; keys are converted to
/// strings
pub fn from_pairs(pairs: impl Into<Value>) -> Dictionary {
    let pairs = EeList::new(pairs);
    let keys = pairs.map(|pair| EeString::from_object(pair.cast::<EeList>().get(0)));
    let values = pairs.map(|pair| pair.cast::<EeList>().get(1));
    Dictionary::from_lists(keys, values)
}

/// Same entries, keys in ascending order
pub fn sort(dictionary: &Dictionary) -> Dictionary {
    let keys = dictionary.keys().sort();
    Dictionary::from_lists(&keys, dictionary.values(&keys))
}

/// Values for `keys`, in that order. Evaluation fails on a missing key.
pub fn get_many(dictionary: &Dictionary, keys: impl Into<Value>) -> EeList {
    EeList::new(keys).map(|key| dictionary.get(key))
}

// ============================================================================
// Extension methods
// ============================================================================

pub struct FromPairs;
pub struct Sort;
pub struct GetMany;

static FROM_PAIRS_ARGS: [ArgMeta; 1] = [ArgMeta::required("list", "List<List>", "[key, value] pairs")];
static FROM_PAIRS_EXAMPLES: [&str; 1] = ["Dictionary.geetools.fromPairs([[\"a\", 1], [\"b\", 2]])"];
static FROM_PAIRS_RELATED: [&str; 1] = ["getMany"];

static SORT_ARGS: [ArgMeta; 0] = [];
static SORT_EXAMPLES: [&str; 1] = ["dictionary.geetools.sort()"];
static SORT_RELATED: [&str; 0] = [];

static GET_MANY_ARGS: [ArgMeta; 1] = [ArgMeta::required("list", "List<Text>", "Keys to look up")];
static GET_MANY_EXAMPLES: [&str; 1] = ["dictionary.geetools.getMany([\"a\", \"b\"])"];
static GET_MANY_RELATED: [&str; 1] = ["fromPairs"];

impl ExtensionMethod for FromPairs {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "fromPairs",
            kind: Kind::Dictionary,
            description: "Dictionary from [key, value] pairs",
            usage: "fromPairs(list)",
            args: &FROM_PAIRS_ARGS,
            returns: "Dictionary",
            examples: &FROM_PAIRS_EXAMPLES,
            is_static: true,
            related: &FROM_PAIRS_RELATED,
        }
    }

    fn call(&self, _this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("fromPairs", args, 1)?;
        let pairs = require_value(args, 0, "fromPairs", "list")?;
        if let Some(bad) = pairs.as_list().into_iter().flatten().find(|p| p.as_list().is_some_and(|p| p.len() != 2)) {
            return Err(GeeError::invalid_argument(
                "fromPairs",
                format!("pairs need exactly two elements, got {}", bad.as_list().map_or(0, <[Value]>::len)),
            ));
        }
        Ok(from_pairs(pairs.clone()).into_value())
    }
}

impl ExtensionMethod for Sort {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "sort",
            kind: Kind::Dictionary,
            description: "Same entries with keys in ascending order",
            usage: "sort()",
            args: &SORT_ARGS,
            returns: "Dictionary",
            examples: &SORT_EXAMPLES,
            is_static: false,
            related: &SORT_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("sort", args, 0)?;
        Ok(sort(&Dictionary::new(this.clone())).into_value())
    }
}

impl ExtensionMethod for GetMany {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "getMany",
            kind: Kind::Dictionary,
            description: "Values of several keys",
            usage: "getMany(list)",
            args: &GET_MANY_ARGS,
            returns: "List",
            examples: &GET_MANY_EXAMPLES,
            is_static: false,
            related: &GET_MANY_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("getMany", args, 1)?;
        let keys = require_value(args, 0, "getMany", "list")?.clone();
        Ok(get_many(&Dictionary::new(this.clone()), keys).into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_core::Evaluate;
    use geetools_testkit::fixtures;
    use serde_json::json;

    fn dict(json: serde_json::Value) -> Dictionary {
        Dictionary::new(Value::from_json(&json))
    }

    #[test]
    fn test_from_pairs() {
        let ev = fixtures::evaluator();
        let pairs = Value::from_json(&json!([["a", 1], ["b", 2], [3, "c"]]));
        assert_eq!(ev.get_info(&from_pairs(pairs)).unwrap(), json!({"a": 1, "b": 2, "3": "c"}));
    }

    #[test]
    fn test_from_pairs_rejects_bad_pairs() {
        let pairs = Value::from_json(&json!([["a", 1], ["b"]]));
        let err = FromPairs.call(&Value::Null, &[pairs]).unwrap_err();
        assert_eq!(err.code, codes::INVALID_ARGUMENT);
    }

    #[test]
    fn test_sort() {
        let ev = fixtures::evaluator();
        let sorted = sort(&dict(json!({"b": 2, "c": 3, "a": 1})));
        assert_eq!(ev.get_info(&sorted.keys()).unwrap(), json!(["a", "b", "c"]));
    }

    #[test]
    fn test_get_many() {
        let ev = fixtures::evaluator();
        let values = get_many(&dict(json!({"a": 1, "b": 2, "c": 3})), vec!["c", "a"]);
        assert_eq!(ev.get_info(&values).unwrap(), json!([3, 1]));
    }

    #[test]
    fn test_get_many_missing_key_fails_on_evaluation() {
        let ev = fixtures::evaluator();
        let values = get_many(&dict(json!({"a": 1})), vec!["z"]);
        assert!(ev.get_info(&values).is_err());
    }
}
