//! Expression encoding
//!
//! Turns a `Value` graph into the service's REST expression format: a flat
//! table of value nodes keyed by id plus the id of the result. Literals are
//! inlined as constants; invocations, function definitions and containers
//! holding computed values are hoisted into the table, and structurally
//! identical nodes share one id.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Serialized expression graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub result: String,
    pub values: BTreeMap<String, ValueNode>,
}

/// One entry of the expression table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueNode {
    ConstantValue(serde_json::Value),
    ArgumentReference(String),
    ValueReference(String),
    ArrayValue {
        values: Vec<ValueNode>,
    },
    DictionaryValue {
        values: BTreeMap<String, ValueNode>,
    },
    #[serde(rename_all = "camelCase")]
    FunctionDefinitionValue {
        argument_names: Vec<String>,
        body: String,
    },
    #[serde(rename_all = "camelCase")]
    FunctionInvocationValue {
        function_name: String,
        arguments: BTreeMap<String, ValueNode>,
    },
}

#[derive(Default)]
struct Encoder {
    values: BTreeMap<String, ValueNode>,
    seen: HashMap<String, String>,
}

impl Encoder {
    fn node(&mut self, value: &Value) -> ValueNode {
        if let Some(json) = value.to_json() {
            return ValueNode::ConstantValue(json);
        }
        match value {
            Value::Argument(name) => ValueNode::ArgumentReference(name.clone()),
            Value::List(items) => {
                let values = items.iter().map(|v| self.node(v)).collect();
                self.hoist(ValueNode::ArrayValue { values })
            }
            Value::Object(map) => {
                let values = map.iter().map(|(k, v)| (k.clone(), self.node(v))).collect();
                self.hoist(ValueNode::DictionaryValue { values })
            }
            Value::Invocation(inv) => {
                let arguments = inv.args.iter().map(|(k, v)| (k.clone(), self.node(v))).collect();
                self.hoist(ValueNode::FunctionInvocationValue {
                    function_name: inv.function.clone(),
                    arguments,
                })
            }
            Value::Function(def) => {
                let body = self.node(&def.body);
                let body = self.id_of(body);
                self.hoist(ValueNode::FunctionDefinitionValue {
                    argument_names: def.params.clone(),
                    body,
                })
            }
            // Non-finite floats have no JSON form
            _ => ValueNode::ConstantValue(serde_json::Value::Null),
        }
    }

    /// Store a node in the table and return a reference to it
    fn hoist(&mut self, node: ValueNode) -> ValueNode {
        let key = serde_json::to_string(&node).unwrap_or_default();
        if let Some(id) = self.seen.get(&key) {
            return ValueNode::ValueReference(id.clone());
        }
        let id = self.values.len().to_string();
        self.values.insert(id.clone(), node);
        self.seen.insert(key, id.clone());
        ValueNode::ValueReference(id)
    }

    fn id_of(&mut self, node: ValueNode) -> String {
        match node {
            ValueNode::ValueReference(id) => id,
            other => match self.hoist(other) {
                ValueNode::ValueReference(id) => id,
                _ => unreachable!("hoist always returns a reference"),
            },
        }
    }
}

/// Encode a graph into the REST expression format
pub fn encode(value: &Value) -> Expression {
    let mut encoder = Encoder::default();
    let root = encoder.node(value);
    let result = encoder.id_of(root);
    Expression {
        result,
        values: encoder.values,
    }
}

impl Expression {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(id: &str) -> Value {
        Value::invoke("Image.load", [("id", Value::from(id))])
    }

    #[test]
    fn test_constant_root() {
        let expr = encode(&Value::from(42));
        assert_eq!(expr.result, "0");
        assert_eq!(expr.values["0"], ValueNode::ConstantValue(json!(42)));
    }

    #[test]
    fn test_invocation_inlines_constants() {
        let expr = encode(&load("a/b"));
        assert_eq!(
            expr.to_json(),
            json!({
                "result": "0",
                "values": {
                    "0": {"functionInvocationValue": {
                        "functionName": "Image.load",
                        "arguments": {"id": {"constantValue": "a/b"}}
                    }}
                }
            })
        );
    }

    #[test]
    fn test_shared_subgraph_is_deduplicated() {
        let image = load("a/b");
        let both = Value::invoke(
            "Image.addBands",
            [("dstImg", image.clone()), ("srcImg", image)],
        );
        let expr = encode(&both);
        assert_eq!(expr.values.len(), 2);
        let root = &expr.values[&expr.result];
        let ValueNode::FunctionInvocationValue { arguments, .. } = root else {
            panic!("root should be an invocation")
        };
        assert_eq!(arguments["dstImg"], arguments["srcImg"]);
    }

    #[test]
    fn test_function_definition_body_is_an_id() {
        let func = crate::function::unary(|x| x);
        let expr = encode(&func);
        let ValueNode::FunctionDefinitionValue { argument_names, body } = &expr.values[&expr.result]
        else {
            panic!("root should be a function definition")
        };
        assert_eq!(argument_names, &vec!["_MAPPING_VAR_0_0".to_string()]);
        assert_eq!(
            expr.values[body],
            ValueNode::ArgumentReference("_MAPPING_VAR_0_0".to_string())
        );
    }

    #[test]
    fn test_array_with_computed_items_is_hoisted() {
        let list = Value::List(vec![load("x"), Value::from(1)]);
        let expr = encode(&list);
        let ValueNode::ArrayValue { values } = &expr.values[&expr.result] else {
            panic!("root should be an array")
        };
        assert_eq!(values[1], ValueNode::ConstantValue(json!(1)));
        assert!(matches!(values[0], ValueNode::ValueReference(_)));
    }
}
