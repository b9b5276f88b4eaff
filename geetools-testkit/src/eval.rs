//! Local evaluator
//!
//! Interprets expression graphs against an in-memory image catalog.

use crate::algorithms;
use crate::args::Args;
use crate::data::{Closure, Data, ImageData};
use crate::error::EvalError;
use crate::fixtures::ImageFixture;
use geetools_core::{Evaluate, Invocation, Value};
use std::collections::BTreeMap;

/// Arguments of the functions being applied, by name
pub(crate) type Env = BTreeMap<String, Data>;

/// In-memory evaluator for the algorithms geetools helpers emit
#[derive(Debug, Clone, Default)]
pub struct LocalEvaluator {
    catalog: BTreeMap<String, ImageData>,
}

impl LocalEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `image` loadable as `Image.load(id)`
    pub fn with_image(mut self, id: &str, image: ImageFixture) -> Self {
        self.catalog.insert(id.to_string(), image.build());
        self
    }

    pub(crate) fn asset(&self, id: &str) -> Result<ImageData, EvalError> {
        self.catalog
            .get(id)
            .cloned()
            .ok_or_else(|| EvalError::UnknownAsset(id.to_string()))
    }

    pub(crate) fn eval(&self, value: &Value, env: &Env) -> Result<Data, EvalError> {
        Ok(match value {
            Value::Null => Data::Null,
            Value::Bool(b) => Data::Bool(*b),
            Value::Number(n) => Data::Number(*n),
            Value::Text(s) => Data::Text(s.clone()),
            Value::List(items) => Data::List(
                items
                    .iter()
                    .map(|item| self.eval(item, env))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => Data::Dict(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), self.eval(v, env)?)))
                    .collect::<Result<_, EvalError>>()?,
            ),
            Value::Argument(name) => env
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::Unbound(name.clone()))?,
            Value::Function(def) => Data::Closure(Closure {
                def: def.clone(),
                env: env.clone(),
            }),
            Value::Invocation(inv) => self.invoke(inv, env)?,
        })
    }

    fn invoke(&self, inv: &Invocation, env: &Env) -> Result<Data, EvalError> {
        let name = inv.function.as_str();
        tracing::trace!(function = name, "local evaluation");

        // Only the chosen branch is evaluated
        if name == "Algorithms.If" {
            let condition = match inv.args.get("condition") {
                Some(value) => self.eval(value, env)?,
                None => Data::Null,
            };
            let branch = if condition.is_truthy() { "trueCase" } else { "falseCase" };
            return match inv.args.get(branch) {
                Some(value) => self.eval(value, env),
                None => Ok(Data::Null),
            };
        }

        let values = inv
            .args
            .iter()
            .map(|(k, v)| Ok((k.clone(), self.eval(v, env)?)))
            .collect::<Result<BTreeMap<_, _>, EvalError>>()?;
        let mut args = Args::new(name, values);

        match name.split('.').next().unwrap_or(name) {
            "List" => algorithms::list::call(self, &mut args),
            "Number" | "String" | "Dictionary" | "Date" | "Algorithms" => algorithms::primitives::call(&mut args),
            "Image" | "ImageCollection" | "Projection" | "Reducer" => algorithms::image::call(self, &mut args),
            "Collection" | "Element" | "Feature" | "Filter" => algorithms::collection::call(self, &mut args),
            "GeometryConstructors" | "Geometry" => algorithms::geometry::call(&mut args),
            _ => Err(EvalError::Unsupported(name.to_string())),
        }
    }

    /// Call a remote function with positional arguments
    pub(crate) fn apply(&self, closure: &Closure, args: Vec<Data>) -> Result<Data, EvalError> {
        if closure.def.params.len() != args.len() {
            return Err(EvalError::failed(
                "function",
                format!("expects {} arguments, got {}", closure.def.params.len(), args.len()),
            ));
        }
        let mut env = closure.env.clone();
        env.extend(closure.def.params.iter().cloned().zip(args));
        self.eval(&closure.def.body, &env)
    }

    /// `map` shared by lists and collections
    pub(crate) fn map(&self, items: Vec<Data>, closure: &Closure, drop_nulls: bool) -> Result<Vec<Data>, EvalError> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let mapped = self.apply(closure, vec![item])?;
            if !(drop_nulls && mapped == Data::Null) {
                out.push(mapped);
            }
        }
        Ok(out)
    }

    /// Left fold shared by lists and collections
    pub(crate) fn iterate(&self, items: Vec<Data>, closure: &Closure, first: Data) -> Result<Data, EvalError> {
        items
            .into_iter()
            .try_fold(first, |acc, item| self.apply(closure, vec![item, acc]))
    }
}

impl Evaluate for LocalEvaluator {
    type Error = EvalError;

    fn evaluate(&self, value: &Value) -> Result<serde_json::Value, EvalError> {
        self.eval(value, &Env::new())?.to_json()
    }
}
