//! Remote lists

use super::{call, proxy_type, Computed, EeNumber, EeString, Proxy};
use crate::function;
use crate::{Kind, Value};

proxy_type!(EeList, Some(Kind::List));

impl EeList {
    /// Wrap a literal or computed list
    pub fn new(items: impl Into<Value>) -> EeList {
        EeList(items.into())
    }

    /// Integers from `start` to `end`, both included
    pub fn sequence(start: impl Into<Value>, end: impl Into<Value>) -> EeList {
        call("List.sequence", [("start", start.into()), ("end", end.into())])
    }

    pub fn size(&self) -> EeNumber {
        call("List.size", [("list", self.0.clone())])
    }

    /// Element at `index`; negative indices count from the end
    pub fn get(&self, index: impl Into<Value>) -> Computed {
        call("List.get", [("list", self.0.clone()), ("index", index.into())])
    }

    pub fn slice(&self, start: impl Into<Value>, end: impl Into<Value>) -> EeList {
        call(
            "List.slice",
            [("list", self.0.clone()), ("start", start.into()), ("end", end.into())],
        )
    }

    pub fn add(&self, element: impl Into<Value>) -> EeList {
        call("List.add", [("list", self.0.clone()), ("element", element.into())])
    }

    pub fn cat(&self, other: impl Into<Value>) -> EeList {
        call("List.cat", [("list", self.0.clone()), ("other", other.into())])
    }

    pub fn contains(&self, element: impl Into<Value>) -> Computed {
        call("List.contains", [("list", self.0.clone()), ("element", element.into())])
    }

    pub fn remove_all(&self, other: impl Into<Value>) -> EeList {
        call("List.removeAll", [("list", self.0.clone()), ("other", other.into())])
    }

    pub fn replace(&self, old: impl Into<Value>, new: impl Into<Value>) -> EeList {
        call(
            "List.replace",
            [("list", self.0.clone()), ("oldval", old.into()), ("newval", new.into())],
        )
    }

    /// Remove `count` elements starting at `start`
    pub fn splice(&self, start: impl Into<Value>, count: impl Into<Value>) -> EeList {
        call(
            "List.splice",
            [("list", self.0.clone()), ("start", start.into()), ("count", count.into())],
        )
    }

    pub fn distinct(&self) -> EeList {
        call("List.distinct", [("list", self.0.clone())])
    }

    pub fn sort(&self) -> EeList {
        call("List.sort", [("list", self.0.clone())])
    }

    /// Pairs `[self[i], other[i]]`, truncated to the shorter list
    pub fn zip(&self, other: impl Into<Value>) -> EeList {
        call("List.zip", [("list", self.0.clone()), ("other", other.into())])
    }

    pub fn join(&self, separator: impl Into<Value>) -> EeString {
        call("List.join", [("list", self.0.clone()), ("separator", separator.into())])
    }

    /// Apply `f` to every element
    pub fn map<F, R>(&self, f: F) -> EeList
    where
        F: Fn(Computed) -> R,
        R: Into<Value>,
    {
        let func = function::unary(|x| f(Computed::from_value(x)).into());
        call("List.map", [("list", self.0.clone()), ("baseAlgorithm", func)])
    }

    /// Like [`EeList::map`], dropping elements for which `f` returns null
    pub fn map_drop_nulls<F, R>(&self, f: F) -> EeList
    where
        F: Fn(Computed) -> R,
        R: Into<Value>,
    {
        let func = function::unary(|x| f(Computed::from_value(x)).into());
        call(
            "List.map",
            [
                ("list", self.0.clone()),
                ("baseAlgorithm", func),
                ("dropNulls", Value::Bool(true)),
            ],
        )
    }

    /// Left fold: `f(element, accumulator)` starting from `first`
    pub fn iterate<F, R>(&self, f: F, first: impl Into<Value>) -> Computed
    where
        F: Fn(Computed, Computed) -> R,
        R: Into<Value>,
    {
        let func = function::binary(|x, acc| f(Computed::from_value(x), Computed::from_value(acc)).into());
        call(
            "List.iterate",
            [("list", self.0.clone()), ("function", func), ("first", first.into())],
        )
    }
}
