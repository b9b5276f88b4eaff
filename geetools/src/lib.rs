//! geetools - chainable helpers over remote expression graphs
//!
//! Helpers are reachable two ways:
//! - typed accessors: `image.geetools().add_suffix("_x", None)?`
//! - the process-wide registry: `registry().dispatch(&image, "geetools", "addSuffix", &args)`
//!
//! Both build the same graph. Nothing is evaluated until the caller hands a
//! handle to an [`Evaluate`] implementation.

mod accessors;
mod settings;

pub mod tools;

pub use accessors::{
    DateAccessor, DateExt, DictionaryAccessor, DictionaryExt, FeatureCollectionAccessor, FeatureCollectionExt,
    GeometryAccessor, GeometryExt, ImageAccessor, ImageExt, ListAccessor, ListExt, NumberAccessor, NumberExt,
    StringAccessor, StringExt,
};
pub use settings::{configure, settings, DeprecationPolicy, ParsePolicyError, Settings};

pub use geetools_core::{
    codes, encode, Computed, Date, Dictionary, EeList, EeNumber, EeString, Evaluate, Feature, FeatureCollection,
    Filter, GeeError, Geometry, Image, ImageCollection, Kind, Number, Projection, Proxy, Reducer, Severity, Value,
};
pub use geetools_image::KeepProperties;
pub use geetools_plugin::{Bundle, ExtensionMethod, ExtensionRegistry, MethodMeta};
pub use geetools_std::DatetimeError;

use std::sync::OnceLock;

/// Name of the bundle every helper is registered under
pub const BUNDLE: &str = "geetools";

static REGISTRY: OnceLock<Result<ExtensionRegistry, GeeError>> = OnceLock::new();

/// Attach the helper bundles to `registry`
pub fn load_standard_bundles(registry: ExtensionRegistry) -> Result<ExtensionRegistry, GeeError> {
    registry
        .with_bundle(Kind::Image, geetools_image::load_image_bundle(Bundle::new(BUNDLE)))?
        .with_bundle(Kind::FeatureCollection, geetools_features::load_feature_collection_bundle(Bundle::new(BUNDLE)))?
        .with_bundle(Kind::Geometry, geetools_features::load_geometry_bundle(Bundle::new(BUNDLE)))?
        .with_bundle(Kind::Date, geetools_std::load_date_bundle(Bundle::new(BUNDLE)))?
        .with_bundle(Kind::List, geetools_std::load_list_bundle(Bundle::new(BUNDLE)))?
        .with_bundle(Kind::Number, geetools_std::load_number_bundle(Bundle::new(BUNDLE)))?
        .with_bundle(Kind::String, geetools_std::load_string_bundle(Bundle::new(BUNDLE)))?
        .with_bundle(Kind::Dictionary, geetools_std::load_dictionary_bundle(Bundle::new(BUNDLE)))
}

/// Fresh registry with every helper bundle
pub fn standard_registry() -> Result<ExtensionRegistry, GeeError> {
    load_standard_bundles(ExtensionRegistry::new())
}

/// Populate the process-wide registry. Later calls return the same table.
pub fn initialize() -> Result<&'static ExtensionRegistry, GeeError> {
    REGISTRY
        .get_or_init(|| {
            let registry = standard_registry();
            if let Ok(registry) = &registry {
                tracing::debug!(kinds = registry.kinds().len(), "initialized extension registry");
            }
            registry
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// The process-wide registry, initialized on first use.
///
/// # Panics
///
/// When the bundles cannot be registered. That is a broken build, not a
/// runtime condition.
pub fn registry() -> &'static ExtensionRegistry {
    match initialize() {
        Ok(registry) => registry,
        Err(e) => panic!("geetools registry failed to initialize: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_kinds() {
        let registry = standard_registry().unwrap();
        assert_eq!(
            registry.kinds(),
            vec![
                Kind::Image,
                Kind::FeatureCollection,
                Kind::Geometry,
                Kind::Date,
                Kind::List,
                Kind::Number,
                Kind::String,
                Kind::Dictionary,
            ]
        );
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let first = initialize().unwrap() as *const ExtensionRegistry;
        let second = initialize().unwrap() as *const ExtensionRegistry;
        assert_eq!(first, second);
        assert!(std::ptr::eq(registry(), initialize().unwrap()));
    }

    #[test]
    fn test_loading_twice_is_a_duplicate() {
        let err = load_standard_bundles(standard_registry().unwrap()).err().unwrap();
        assert_eq!(err.code, codes::DUPLICATE_BUNDLE);
    }
}
