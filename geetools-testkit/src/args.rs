//! Typed access to evaluated invocation arguments

use crate::data::{Closure, CollectionData, Data, FeatureData, FilterData, ImageData};
use crate::error::EvalError;
use crate::geom::Geom;
use geetools_core::Number;
use std::collections::BTreeMap;

/// Arguments of one invocation. Omitted arguments read as null.
pub struct Args<'a> {
    function: &'a str,
    values: BTreeMap<String, Data>,
}

macro_rules! typed {
    ($name:ident, $optional:ident, $variant:ident, $ty:ty, $expected:literal) => {
        pub fn $name(&mut self, arg: &str) -> Result<$ty, EvalError> {
            match self.take(arg) {
                Data::$variant(value) => Ok(value),
                other => Err(self.mismatch(arg, $expected, &other)),
            }
        }

        #[allow(dead_code)]
        pub fn $optional(&mut self, arg: &str) -> Result<Option<$ty>, EvalError> {
            match self.take(arg) {
                Data::Null => Ok(None),
                Data::$variant(value) => Ok(Some(value)),
                other => Err(self.mismatch(arg, $expected, &other)),
            }
        }
    };
}

impl<'a> Args<'a> {
    pub fn new(function: &'a str, values: BTreeMap<String, Data>) -> Self {
        Self { function, values }
    }

    pub fn function(&self) -> &'a str {
        self.function
    }

    pub fn take(&mut self, arg: &str) -> Data {
        self.values.remove(arg).unwrap_or_default()
    }

    fn mismatch(&self, arg: &str, expected: &'static str, got: &Data) -> EvalError {
        EvalError::ArgType {
            function: self.function.to_string(),
            arg: arg.to_string(),
            expected,
            got: got.type_name(),
        }
    }

    pub fn fail(&self, message: impl Into<String>) -> EvalError {
        EvalError::failed(self.function, message)
    }

    typed!(number, optional_number, Number, Number, "a Number");
    typed!(text, optional_text, Text, String, "a String");
    typed!(list, optional_list, List, Vec<Data>, "a List");
    typed!(dict, optional_dict, Dict, BTreeMap<String, Data>, "a Dictionary");
    typed!(image, optional_image, Image, ImageData, "an Image");
    typed!(feature, optional_feature, Feature, FeatureData, "a Feature");
    typed!(collection, optional_collection, Collection, CollectionData, "a Collection");
    typed!(geometry, optional_geometry, Geometry, Geom, "a Geometry");
    typed!(projection, optional_projection, Projection, f64, "a Projection");
    typed!(filter, optional_filter, Filter, FilterData, "a Filter");
    typed!(closure, optional_closure, Closure, Closure, "a Function");

    pub fn float(&mut self, arg: &str) -> Result<f64, EvalError> {
        self.number(arg).map(|n| n.as_f64())
    }

    pub fn int(&mut self, arg: &str) -> Result<i64, EvalError> {
        let n = self.number(arg)?;
        Ok(n.as_i64().unwrap_or(n.as_f64().trunc() as i64))
    }

    pub fn optional_int(&mut self, arg: &str) -> Result<Option<i64>, EvalError> {
        Ok(self
            .optional_number(arg)?
            .map(|n| n.as_i64().unwrap_or(n.as_f64().trunc() as i64)))
    }

    pub fn bool(&mut self, arg: &str) -> Result<bool, EvalError> {
        Ok(self.take(arg).is_truthy())
    }

    /// Dates, millisecond timestamps and ISO strings
    pub fn date(&mut self, arg: &str) -> Result<i64, EvalError> {
        match self.take(arg) {
            Data::Date(millis) => Ok(millis),
            Data::Number(n) => Ok(n.as_f64() as i64),
            Data::Text(s) => crate::dates::parse(&s).ok_or_else(|| self.fail(format!("cannot parse date '{}'", s))),
            other => Err(self.mismatch(arg, "a Date", &other)),
        }
    }

    /// Elements of a list or of a collection
    pub fn elements(&mut self, arg: &str) -> Result<Vec<Data>, EvalError> {
        match self.take(arg) {
            Data::List(items) => Ok(items),
            Data::Collection(c) => Ok(c.elements),
            other => Err(self.mismatch(arg, "a List or Collection", &other)),
        }
    }

    /// Text or list of texts
    pub fn names(&mut self, arg: &str) -> Result<Vec<String>, EvalError> {
        match self.take(arg) {
            Data::Text(s) => Ok(vec![s]),
            Data::List(items) => items
                .into_iter()
                .map(|item| match item {
                    Data::Text(s) => Ok(s),
                    other => Err(self.mismatch(arg, "a List of Strings", &other)),
                })
                .collect(),
            other => Err(self.mismatch(arg, "a List of Strings", &other)),
        }
    }
}
