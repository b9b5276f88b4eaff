//! Untyped results, filters, reducers and control-flow algorithms

use super::{call, proxy_type};
use crate::Value;

proxy_type!(
    /// Result of an algorithm whose kind is only known to the caller
    /// (`List.get`, `Collection.iterate`, `Algorithms.If`, ...)
    Computed,
    None
);

proxy_type!(Filter, None);
proxy_type!(Reducer, None);

impl Filter {
    /// Property `field` equals `value`
    pub fn eq(field: &str, value: impl Into<Value>) -> Filter {
        call("Filter.equals", [("leftField", Value::from(field)), ("rightValue", value.into())])
    }

    /// Property `field` differs from `value`
    pub fn neq(field: &str, value: impl Into<Value>) -> Filter {
        call("Filter.notEquals", [("leftField", Value::from(field)), ("rightValue", value.into())])
    }
}

impl Reducer {
    pub fn first() -> Reducer {
        call("Reducer.first", [] as [(&str, Value); 0])
    }

    pub fn min() -> Reducer {
        call("Reducer.min", [] as [(&str, Value); 0])
    }
}

/// Server-side control flow
pub mod algorithms {
    use super::super::call;
    use super::Computed;
    use crate::Value;

    /// `true_case` when `condition` holds, otherwise `false_case`
    pub fn if_(
        condition: impl Into<Value>,
        true_case: impl Into<Value>,
        false_case: impl Into<Value>,
    ) -> Computed {
        call(
            "Algorithms.If",
            [
                ("condition", condition.into()),
                ("trueCase", true_case.into()),
                ("falseCase", false_case.into()),
            ],
        )
    }

    pub fn is_equal(left: impl Into<Value>, right: impl Into<Value>) -> Computed {
        call("Algorithms.IsEqual", [("left", left.into()), ("right", right.into())])
    }
}
