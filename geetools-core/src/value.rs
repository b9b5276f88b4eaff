//! Expression values
//!
//! A `Value` is one node of a remote expression graph. Literals carry small
//! local data (names, numbers, option maps); invocations, argument references
//! and function definitions describe computation that only the remote
//! service performs. Values are immutable; builders always return new nodes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Numeric literal, kept as an integer whenever the caller supplied one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    /// Integer view; floats only qualify when they have no fractional part
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(*i),
            Number::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            Number::Float(_) => None,
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Int(n as i64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::Float(n)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Call of a named remote algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub function: String,
    pub args: BTreeMap<String, Value>,
}

/// Remote lambda: parameter names plus a body referring to them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub params: Vec<String>,
    pub body: Box<Value>,
}

/// Expression graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
    Invocation(Invocation),
    Argument(String),
    Function(FunctionDef),
}

impl Value {
    /// Build an invocation node. Null arguments are omitted, which the
    /// service treats the same as an unset optional argument.
    pub fn invoke<'a, I>(function: &str, args: I) -> Value
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let args = args
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Value::Invocation(Invocation {
            function: function.to_string(),
            args,
        })
    }

    pub fn argument(name: impl Into<String>) -> Value {
        Value::Argument(name.into())
    }

    // ========== Safe Accessors (never panic) ==========

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_invocation(&self) -> Option<&Invocation> {
        match self {
            Value::Invocation(i) => Some(i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the invoked algorithm, if this node is an invocation
    pub fn function_name(&self) -> Option<&str> {
        self.as_invocation().map(|i| i.function.as_str())
    }

    /// Argument of an invocation node
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.as_invocation().and_then(|i| i.args.get(name))
    }

    /// True when the node and all its children are local data
    pub fn is_literal(&self) -> bool {
        match self {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Text(_) => true,
            Value::List(items) => items.iter().all(Value::is_literal),
            Value::Object(map) => map.values().all(Value::is_literal),
            Value::Invocation(_) | Value::Argument(_) | Value::Function(_) => false,
        }
    }

    /// Number of function definitions in this subtree
    pub fn function_count(&self) -> usize {
        match self {
            Value::List(items) => items.iter().map(Value::function_count).sum(),
            Value::Object(map) => map.values().map(Value::function_count).sum(),
            Value::Invocation(inv) => inv.args.values().map(Value::function_count).sum(),
            Value::Function(def) => 1 + def.body.function_count(),
            _ => 0,
        }
    }

    /// Type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::Text(_) => "Text",
            Value::List(_) => "List",
            Value::Object(_) => "Object",
            Value::Invocation(_) => "Invocation",
            Value::Argument(_) => "Argument",
            Value::Function(_) => "Function",
        }
    }

    // ========== JSON bridge for literals ==========

    /// Plain JSON for literal nodes; `None` when the node needs the service
    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value as Json;
        match self {
            Value::Null => Some(Json::Null),
            Value::Bool(b) => Some(Json::Bool(*b)),
            Value::Number(Number::Int(i)) => Some(Json::from(*i)),
            Value::Number(Number::Float(f)) => serde_json::Number::from_f64(*f).map(Json::Number),
            Value::Text(s) => Some(Json::String(s.clone())),
            Value::List(items) => items
                .iter()
                .map(Value::to_json)
                .collect::<Option<Vec<_>>>()
                .map(Json::Array),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| v.to_json().map(|j| (k.clone(), j)))
                .collect::<Option<serde_json::Map<_, _>>>()
                .map(Json::Object),
            Value::Invocation(_) | Value::Argument(_) | Value::Function(_) => None,
        }
    }

    pub fn from_json(json: &serde_json::Value) -> Value {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Number(Number::Int(i)),
                None => Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Json::String(s) => Value::Text(s.clone()),
            Json::Array(items) => Value::List(items.iter().map(Value::from_json).collect()),
            Json::Object(map) => Value::Object(
                map.iter().map(|(k, v)| (k.clone(), Value::from_json(v))).collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Value::Object(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
            Value::Invocation(inv) => write!(f, "{}(…)", inv.function),
            Value::Argument(name) => write!(f, "${}", name),
            Value::Function(def) => write!(f, "λ({})", def.params.join(", ")),
        }
    }
}

// From implementations for convenience
impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Int(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::Int(n as i64))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(Number::Int(n as i64))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::Float(n))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(Value::from).collect())
    }
}

impl From<&[&str]> for Value {
    fn from(items: &[&str]) -> Self {
        Value::List(items.iter().map(|s| Value::from(*s)).collect())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items.into_iter().map(Value::Text).collect())
    }
}

impl From<&[String]> for Value {
    fn from(items: &[String]) -> Self {
        Value::List(items.iter().map(Value::from).collect())
    }
}

impl From<Vec<f64>> for Value {
    fn from(items: Vec<f64>) -> Self {
        Value::List(items.into_iter().map(Value::from).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}
