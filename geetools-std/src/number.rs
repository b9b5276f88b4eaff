//! Number helpers

use geetools_plugin::prelude::*;

/// Beyond this many decimals the scaled value no longer fits an integer
const MAX_DECIMALS: i64 = 15;

/// Drop every decimal after the `decimals`-th, rounding toward zero
pub fn truncate(number: &EeNumber, decimals: i64) -> Result<EeNumber, GeeError> {
    if !(0..=MAX_DECIMALS).contains(&decimals) {
        return Err(GeeError::invalid_argument(
            "truncate",
            format!("decimals must be between 0 and {}, got {}", MAX_DECIMALS, decimals),
        ));
    }
    let factor = 10_i64.pow(decimals as u32);
    Ok(number.multiply(factor).to_int().divide(factor))
}

// ============================================================================
// Extension methods
// ============================================================================

pub struct Truncate;

static TRUNCATE_ARGS: [ArgMeta; 1] = [ArgMeta::optional("decimals", "Integer", "Decimals to keep", "2")];
static TRUNCATE_EXAMPLES: [&str; 2] = ["number.geetools.truncate()", "number.geetools.truncate(4)"];
static TRUNCATE_RELATED: [&str; 0] = [];

impl ExtensionMethod for Truncate {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "truncate",
            kind: Kind::Number,
            description: "Truncate to a number of decimals",
            usage: "truncate(decimals?)",
            args: &TRUNCATE_ARGS,
            returns: "Number",
            examples: &TRUNCATE_EXAMPLES,
            is_static: false,
            related: &TRUNCATE_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("truncate", args, 1)?;
        let decimals = optional_int(args, 0, "truncate", "decimals")?.unwrap_or(2);
        truncate(&EeNumber::new(this.clone()), decimals).map(Proxy::into_value)
    }
}
