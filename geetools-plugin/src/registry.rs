//! Extension Registry
//!
//! Bundles of methods are attached to proxy kinds, once, at startup. After
//! that the registry is only read: lookups, dispatch and help.

use crate::{ExtensionMethod, MethodMeta};
use geetools_core::{GeeError, Kind, Proxy, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;

/// Named group of methods
#[derive(Clone)]
pub struct Bundle {
    name: String,
    methods: HashMap<String, Arc<dyn ExtensionMethod>>,
}

impl Bundle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: HashMap::new(),
        }
    }

    /// Add a method; a later method with the same name replaces the earlier one
    pub fn with_method<M: ExtensionMethod + 'static>(mut self, m: M) -> Self {
        let name = m.meta().name.to_string();
        self.methods.insert(name, Arc::new(m));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn get(&self, method: &str) -> Option<&dyn ExtensionMethod> {
        self.methods.get(method).map(|m| m.as_ref())
    }

    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Central extension registry
#[derive(Default)]
pub struct ExtensionRegistry {
    bundles: HashMap<Kind, HashMap<String, Bundle>>,
}

/// A bundle looked up on a kind, ready for calls
pub struct BoundBundle<'a> {
    kind: Kind,
    bundle: &'a Bundle,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `bundle` to `kind`.
    ///
    /// A bundle name can be attached to a kind only once; a second attempt
    /// fails with `DUPLICATE_BUNDLE` and leaves the first one in place.
    /// Every method must declare `kind` as its receiver kind.
    pub fn register(&mut self, kind: Kind, bundle: Bundle) -> Result<(), GeeError> {
        for method in bundle.methods.values() {
            let meta = method.meta();
            if meta.kind != kind {
                return Err(GeeError::internal(format!(
                    "method '{}' targets {} but bundle '{}' is being attached to {}",
                    meta.name, meta.kind, bundle.name, kind
                ))
                .on_kind(kind.name())
                .in_method(meta.name));
            }
        }

        let slot = self.bundles.entry(kind).or_default();
        if slot.contains_key(&bundle.name) {
            return Err(GeeError::duplicate_bundle(kind.name(), &bundle.name));
        }
        tracing::debug!(kind = %kind, bundle = %bundle.name, methods = bundle.len(), "registered extension bundle");
        slot.insert(bundle.name.clone(), bundle);
        Ok(())
    }

    /// Like [`register`](Self::register), with the kind given by name
    pub fn register_named(&mut self, kind: &str, bundle: Bundle) -> Result<(), GeeError> {
        let kind = Kind::from_str(kind)?;
        self.register(kind, bundle)
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_bundle(mut self, kind: Kind, bundle: Bundle) -> Result<Self, GeeError> {
        self.register(kind, bundle)?;
        Ok(self)
    }

    pub fn bundle(&self, kind: Kind, name: &str) -> Option<&Bundle> {
        self.bundles.get(&kind).and_then(|b| b.get(name))
    }

    /// Kinds carrying at least one bundle
    pub fn kinds(&self) -> Vec<Kind> {
        let mut kinds: Vec<Kind> = self.bundles.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn bind(&self, kind: Kind, bundle: &str) -> Result<BoundBundle<'_>, GeeError> {
        self.bundle(kind, bundle)
            .map(|bundle| BoundBundle { kind, bundle })
            .ok_or_else(|| GeeError::unknown_bundle(kind.name(), bundle))
    }

    /// `kind.<bundle>.<method>(args)` on the receiver node `this`
    pub fn call(&self, kind: Kind, bundle: &str, method: &str, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        self.bind(kind, bundle)?.call(method, this, args)
    }

    /// `handle.<bundle>.<method>(args)`, the kind taken from the handle
    pub fn dispatch<P: Proxy>(&self, handle: &P, bundle: &str, method: &str, args: &[Value]) -> Result<Value, GeeError> {
        let kind = P::KIND.ok_or_else(|| {
            GeeError::type_error("a handle with an extension kind", std::any::type_name::<P>())
                .in_method(method)
        })?;
        self.call(kind, bundle, method, handle.value(), args)
    }

    // ========== Help ==========

    /// Metadata for one method, or the method list of a kind
    pub fn help(&self, kind: Kind, method: Option<&str>) -> Result<serde_json::Value, GeeError> {
        match method {
            Some(name) => {
                let meta = self
                    .bundles
                    .get(&kind)
                    .into_iter()
                    .flat_map(|bundles| bundles.values())
                    .find_map(|b| b.get(name))
                    .map(|m| m.meta())
                    .ok_or_else(|| GeeError::unknown_method(kind.name(), "*", name))?;
                serde_json::to_value(meta).map_err(|e| GeeError::internal(e.to_string()))
            }
            None => {
                let bundles: BTreeMap<&str, Vec<&str>> = self
                    .bundles
                    .get(&kind)
                    .into_iter()
                    .flat_map(|bundles| bundles.values())
                    .map(|b| (b.name(), b.method_names()))
                    .collect();
                Ok(serde_json::json!({
                    "kind": kind.name(),
                    "bundles": bundles,
                    "usage": "Call help(kind, 'method') for detailed help.",
                }))
            }
        }
    }

    /// Metadata of every method attached to `kind`, sorted by name
    pub fn list_methods(&self, kind: Kind) -> Vec<MethodMeta> {
        let mut metas: Vec<MethodMeta> = self
            .bundles
            .get(&kind)
            .into_iter()
            .flat_map(|bundles| bundles.values())
            .flat_map(|b| b.methods.values().map(|m| m.meta()))
            .collect();
        metas.sort_by_key(|m| m.name);
        metas
    }
}

impl BoundBundle<'_> {
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn call(&self, method: &str, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        let Some(m) = self.bundle.get(method) else {
            let similar = find_similar(method, self.bundle.methods.keys());
            let mut err = GeeError::unknown_method(self.kind.name(), &self.bundle.name, method);
            if !similar.is_empty() {
                let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
                err = err.with_suggestion(format!("Similar: {}.", suggestions.join(", ")));
            }
            return Err(err);
        };

        let meta = m.meta();
        if !meta.is_static && this.is_null() {
            return Err(GeeError::arg_type(meta.name, "self", self.kind.name(), "Null")
                .on_kind(self.kind.name()));
        }
        tracing::trace!(kind = %self.kind, bundle = %self.bundle.name, method, args = args.len(), "dispatch");
        m.call(this, args)
            .map_err(|e| e.on_kind(self.kind.name()))
    }
}

/// Method names similar to `name`, best first
fn find_similar<'a>(name: &str, candidates: impl Iterator<Item = &'a String>) -> Vec<String> {
    let query = name.to_lowercase();
    let mut matches: Vec<(String, usize)> = candidates
        .filter_map(|candidate| {
            let score = similarity_score(&query, &candidate.to_lowercase());
            (score > 0).then(|| (candidate.clone(), score))
        })
        .collect();

    matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    matches.into_iter().map(|(name, _)| name).collect()
}

/// Similarity between two lowercase names; 0 means unrelated
fn similarity_score(query: &str, candidate: &str) -> usize {
    let mut score = 0;

    if candidate.starts_with(query) {
        score += 100;
    } else if candidate.contains(query) {
        score += 50;
    } else if query.contains(candidate) {
        score += 30;
    }

    let query_chars: HashSet<char> = query.chars().collect();
    let candidate_chars: HashSet<char> = candidate.chars().collect();
    let common = query_chars.intersection(&candidate_chars).count();
    let distinct = query_chars.union(&candidate_chars).count().max(1);
    // Require most characters to be shared before counting overlap at all
    if common * 2 > distinct {
        score += common * 2;
        let len_diff = query.len().abs_diff(candidate.len());
        if len_diff < 5 {
            score += 5 - len_diff;
        }
    }

    score
}
