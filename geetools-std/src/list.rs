//! Set-like list helpers

use geetools_plugin::prelude::*;

/// Elements in exactly one of the two lists: `list - other` then
/// `other - list`
pub fn complement(list: &EeList, other: &EeList) -> EeList {
    list.remove_all(other).cat(other.remove_all(list))
}

/// Elements of `list` also present in `other`, in `list` order
pub fn intersection(list: &EeList, other: &EeList) -> EeList {
    list.remove_all(list.remove_all(other))
}

/// Distinct elements of both lists
pub fn union(list: &EeList, other: &EeList) -> EeList {
    list.cat(other).distinct()
}

/// List without the element at `index`
pub fn delete(list: &EeList, index: impl Into<Value>) -> EeList {
    list.splice(index, 1)
}

/// Replace the first occurrence of every key of `replace` with its value
pub fn replace_many(list: &EeList, replace: &Dictionary) -> EeList {
    let replaced = replace.keys().iterate(
        |key, acc| EeList::new(acc).replace(key.clone(), replace.get(key)),
        list,
    );
    replaced.cast()
}

/// Every element converted with the `String` algorithm
pub fn to_strings(list: &EeList) -> EeList {
    list.map(|item| EeString::from_object(item))
}

/// Elements as strings, joined by `separator`
pub fn join(list: &EeList, separator: &str) -> EeString {
    to_strings(list).join(separator)
}

// ============================================================================
// Extension methods
// ============================================================================

pub struct Complement;
pub struct Intersection;
pub struct Union;
pub struct Delete;
pub struct ReplaceMany;
pub struct ToStrings;
pub struct Join;

static OTHER_ARGS: [ArgMeta; 1] = [ArgMeta::required("other", "List", "Second list")];
static SET_RELATED: [&str; 3] = ["complement", "intersection", "union"];

static COMPLEMENT_EXAMPLES: [&str; 1] = ["list.geetools.complement([2, 3])"];
static INTERSECTION_EXAMPLES: [&str; 1] = ["list.geetools.intersection([2, 3])"];
static UNION_EXAMPLES: [&str; 1] = ["list.geetools.union([2, 3])"];

static DELETE_ARGS: [ArgMeta; 1] = [ArgMeta::required("index", "Integer", "Position to remove")];
static DELETE_EXAMPLES: [&str; 1] = ["list.geetools.delete(0)"];
static DELETE_RELATED: [&str; 1] = ["replaceMany"];

static REPLACE_MANY_ARGS: [ArgMeta; 1] = [ArgMeta::required("replace", "Dictionary", "Old value to new value")];
static REPLACE_MANY_EXAMPLES: [&str; 1] = ["list.geetools.replaceMany({\"a\": \"A\"})"];
static REPLACE_MANY_RELATED: [&str; 1] = ["delete"];

static TO_STRINGS_ARGS: [ArgMeta; 0] = [];
static TO_STRINGS_EXAMPLES: [&str; 1] = ["list.geetools.toStrings()"];
static TO_STRINGS_RELATED: [&str; 1] = ["join"];

static JOIN_ARGS: [ArgMeta; 1] = [ArgMeta::optional("separator", "Text", "Text between elements", "\", \"")];
static JOIN_EXAMPLES: [&str; 2] = ["list.geetools.join()", "list.geetools.join(\"-\")"];
static JOIN_RELATED: [&str; 1] = ["toStrings"];

fn other_list(args: &[Value], func: &str) -> Result<EeList, GeeError> {
    check_arity(func, args, 1)?;
    Ok(EeList::new(require_value(args, 0, func, "other")?.clone()))
}

fn set_meta(name: &'static str, description: &'static str, usage: &'static str, examples: &'static [&'static str]) -> MethodMeta {
    MethodMeta {
        name,
        kind: Kind::List,
        description,
        usage,
        args: &OTHER_ARGS,
        returns: "List",
        examples,
        is_static: false,
        related: &SET_RELATED,
    }
}

impl ExtensionMethod for Complement {
    fn meta(&self) -> MethodMeta {
        set_meta("complement", "Elements in only one of the two lists", "complement(other)", &COMPLEMENT_EXAMPLES)
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        let other = other_list(args, "complement")?;
        Ok(complement(&EeList::new(this.clone()), &other).into_value())
    }
}

impl ExtensionMethod for Intersection {
    fn meta(&self) -> MethodMeta {
        set_meta("intersection", "Elements present in both lists", "intersection(other)", &INTERSECTION_EXAMPLES)
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        let other = other_list(args, "intersection")?;
        Ok(intersection(&EeList::new(this.clone()), &other).into_value())
    }
}

impl ExtensionMethod for Union {
    fn meta(&self) -> MethodMeta {
        set_meta("union", "Distinct elements of both lists", "union(other)", &UNION_EXAMPLES)
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        let other = other_list(args, "union")?;
        Ok(union(&EeList::new(this.clone()), &other).into_value())
    }
}

impl ExtensionMethod for Delete {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "delete",
            kind: Kind::List,
            description: "Remove the element at an index",
            usage: "delete(index)",
            args: &DELETE_ARGS,
            returns: "List",
            examples: &DELETE_EXAMPLES,
            is_static: false,
            related: &DELETE_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("delete", args, 1)?;
        let index = require_value(args, 0, "delete", "index")?.clone();
        Ok(delete(&EeList::new(this.clone()), index).into_value())
    }
}

impl ExtensionMethod for ReplaceMany {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "replaceMany",
            kind: Kind::List,
            description: "Replace several values at once",
            usage: "replaceMany(replace)",
            args: &REPLACE_MANY_ARGS,
            returns: "List",
            examples: &REPLACE_MANY_EXAMPLES,
            is_static: false,
            related: &REPLACE_MANY_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("replaceMany", args, 1)?;
        let replace = Dictionary::new(require_value(args, 0, "replaceMany", "replace")?.clone());
        Ok(replace_many(&EeList::new(this.clone()), &replace).into_value())
    }
}

impl ExtensionMethod for ToStrings {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "toStrings",
            kind: Kind::List,
            description: "Convert every element to a string",
            usage: "toStrings()",
            args: &TO_STRINGS_ARGS,
            returns: "List",
            examples: &TO_STRINGS_EXAMPLES,
            is_static: false,
            related: &TO_STRINGS_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("toStrings", args, 0)?;
        Ok(to_strings(&EeList::new(this.clone())).into_value())
    }
}

impl ExtensionMethod for Join {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "join",
            kind: Kind::List,
            description: "Join the elements as strings",
            usage: "join(separator?)",
            args: &JOIN_ARGS,
            returns: "String",
            examples: &JOIN_EXAMPLES,
            is_static: false,
            related: &JOIN_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("join", args, 1)?;
        let separator = optional_text(args, 0, "join", "separator")?.unwrap_or_else(|| ", ".to_string());
        Ok(join(&EeList::new(this.clone()), &separator).into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_core::Evaluate;
    use geetools_testkit::fixtures;
    use serde_json::json;

    fn list(items: &[i64]) -> EeList {
        EeList::new(Value::List(items.iter().map(|&i| Value::from(i)).collect()))
    }

    fn info<P: Proxy>(handle: &P) -> serde_json::Value {
        fixtures::evaluator().get_info(handle).unwrap()
    }

    #[test]
    fn test_set_operations() {
        let (a, b) = (list(&[1, 2, 3, 4]), list(&[3, 4, 5]));
        assert_eq!(info(&complement(&a, &b)), json!([1, 2, 5]));
        assert_eq!(info(&intersection(&a, &b)), json!([3, 4]));
        assert_eq!(info(&union(&a, &b)), json!([1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_intersection_with_disjoint_list_is_empty() {
        assert_eq!(info(&intersection(&list(&[1, 2]), &list(&[3]))), json!([]));
    }

    #[test]
    fn test_delete() {
        assert_eq!(info(&delete(&list(&[1, 2, 3]), 1)), json!([1, 3]));
    }

    #[test]
    fn test_replace_many() {
        let names = EeList::new(vec!["a", "b", "c"]);
        let replace = Dictionary::new(Value::from_json(&json!({"a": "A", "c": "C"})));
        assert_eq!(info(&replace_many(&names, &replace)), json!(["A", "b", "C"]));
    }

    #[test]
    fn test_to_strings_and_join() {
        let mixed = EeList::new(Value::List(vec![Value::from(1), Value::from("x"), Value::from(2.5)]));
        assert_eq!(info(&to_strings(&mixed)), json!(["1", "x", "2.5"]));
        assert_eq!(info(&join(&mixed, "-")), json!("1-x-2.5"));
    }

    #[test]
    fn test_dynamic_join_default_separator() {
        let joined = Join.call(list(&[1, 2]).value(), &[]).unwrap();
        assert_eq!(fixtures::evaluator().evaluate(&joined).unwrap(), json!("1, 2"));
    }
}
