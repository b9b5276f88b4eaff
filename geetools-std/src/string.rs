//! String helpers

use geetools_plugin::prelude::*;

/// Replace every `{key}` placeholder of `template` with the string form of
/// `vars[key]`. Placeholders without a key are left in place.
pub fn format(template: &EeString, vars: &Dictionary) -> EeString {
    let formatted = vars.keys().iterate(
        |key, acc| {
            let pattern = EeString::new("\\{").cat(key.clone()).cat("\\}");
            EeString::new(acc).replace(pattern, EeString::from_object(vars.get(key)), "g")
        },
        template,
    );
    formatted.cast()
}

// ============================================================================
// Extension methods
// ============================================================================

pub struct Format;

static FORMAT_ARGS: [ArgMeta; 1] = [ArgMeta::required("vars", "Dictionary", "Placeholder values")];
static FORMAT_EXAMPLES: [&str; 1] = ["string.geetools.format({\"name\": \"B1\"})"];
static FORMAT_RELATED: [&str; 0] = [];

impl ExtensionMethod for Format {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "format",
            kind: Kind::String,
            description: "Fill {key} placeholders from a dictionary",
            usage: "format(vars)",
            args: &FORMAT_ARGS,
            returns: "String",
            examples: &FORMAT_EXAMPLES,
            is_static: false,
            related: &FORMAT_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("format", args, 1)?;
        let vars = Dictionary::new(require_value(args, 0, "format", "vars")?.clone());
        Ok(format(&EeString::new(this.clone()), &vars).into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_core::Evaluate;
    use geetools_testkit::fixtures;
    use serde_json::json;

    #[test]
    fn test_format_placeholders() {
        let ev = fixtures::evaluator();
        let template = EeString::new("{greet}, {name}! {greet} again, {n} times {missing}");
        let vars = Dictionary::new(Value::from_json(&json!({"greet": "Hello", "name": "world", "n": 3})));
        assert_eq!(
            ev.get_info(&format(&template, &vars)).unwrap(),
            json!("Hello, world! Hello again, 3 times {missing}")
        );
    }

    #[test]
    fn test_format_with_empty_dictionary() {
        let ev = fixtures::evaluator();
        let template = EeString::new("{x}");
        let vars = Dictionary::new(Value::from_json(&json!({})));
        assert_eq!(ev.get_info(&format(&template, &vars)).unwrap(), json!("{x}"));
    }
}
