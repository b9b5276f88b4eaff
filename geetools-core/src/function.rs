//! Capturing Rust closures as remote function definitions
//!
//! The closure is run once with placeholder arguments to count the function
//! definitions nested inside its body, then again with the final argument
//! names `_MAPPING_VAR_<depth>_<index>`. Nested closures therefore never
//! shadow the arguments of the closure enclosing them, and the same closure
//! always produces the same graph.

use crate::value::{FunctionDef, Value};

const PLACEHOLDER: &str = "__placeholder__";

fn names(depth: usize, arity: usize) -> Vec<String> {
    (0..arity).map(|i| format!("_MAPPING_VAR_{}_{}", depth, i)).collect()
}

fn define<F>(arity: usize, body: F) -> Value
where
    F: Fn(&[Value]) -> Value,
{
    let placeholders: Vec<Value> = (0..arity)
        .map(|i| Value::argument(format!("{}{}", PLACEHOLDER, i)))
        .collect();
    let depth = body(&placeholders).function_count();

    let params = names(depth, arity);
    let args: Vec<Value> = params.iter().map(Value::argument).collect();
    Value::Function(FunctionDef {
        params,
        body: Box::new(body(&args)),
    })
}

/// One-argument function, as used by `map`
pub fn unary<F>(f: F) -> Value
where
    F: Fn(Value) -> Value,
{
    define(1, |args| f(args[0].clone()))
}

/// Two-argument function, as used by `iterate` (element, accumulator)
pub fn binary<F>(f: F) -> Value
where
    F: Fn(Value, Value) -> Value,
{
    define(2, |args| f(args[0].clone(), args[1].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_names_first_level() {
        let func = unary(|x| Value::invoke("Number.add", [("left", x), ("right", Value::from(1))]));
        match func {
            Value::Function(def) => {
                assert_eq!(def.params, vec!["_MAPPING_VAR_0_0".to_string()]);
                assert_eq!(def.body.arg("left"), Some(&Value::argument("_MAPPING_VAR_0_0")));
            }
            other => panic!("expected function, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_nested_functions_get_distinct_names() {
        let outer = unary(|x| {
            let inner = unary(|y| Value::invoke("List.add", [("list", y), ("element", x.clone())]));
            Value::invoke("List.map", [("list", Value::List(vec![])), ("baseAlgorithm", inner)])
        });
        let Value::Function(def) = outer else { panic!("expected function") };
        assert_eq!(def.params, vec!["_MAPPING_VAR_1_0".to_string()]);

        let Some(Value::Function(inner)) = def.body.arg("baseAlgorithm") else {
            panic!("expected nested function")
        };
        assert_eq!(inner.params, vec!["_MAPPING_VAR_0_0".to_string()]);
        assert_eq!(inner.body.arg("element"), Some(&Value::argument("_MAPPING_VAR_1_0")));
    }

    #[test]
    fn test_binary_is_deterministic() {
        let build = || binary(|a, b| Value::List(vec![a, b]));
        assert_eq!(build(), build());
    }
}
