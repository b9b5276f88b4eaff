//! geetools Feature Collection and Geometry Helpers
//!
//! Ids and enumeration, property options, geometry merging and cleaning on
//! feature collections; type filtering and explosion on geometries.

pub mod collection;
pub mod geometry;

pub use collection::{add_id, clean, enumerate_property, enumerate_simple, list_options, merge_geometries};
pub use geometry::{keep_type, to_feature_collection};

use geetools_plugin::Bundle;

/// Load feature collection methods into a bundle
pub fn load_feature_collection_bundle(bundle: Bundle) -> Bundle {
    bundle
        // Numbering (3 methods)
        .with_method(collection::AddId)
        .with_method(collection::EnumerateProperty)
        .with_method(collection::EnumerateSimple)

        // Properties (1 method)
        .with_method(collection::ListOptions)

        // Geometry (2 methods)
        .with_method(collection::MergeGeometries)
        .with_method(collection::Clean)
}

/// Load geometry methods into a bundle
pub fn load_geometry_bundle(bundle: Bundle) -> Bundle {
    bundle
        .with_method(geometry::KeepType)
        .with_method(geometry::ToFeatureCollection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_core::Kind;
    use geetools_plugin::ExtensionRegistry;

    #[test]
    fn test_bundles_register() {
        let registry = ExtensionRegistry::new()
            .with_bundle(Kind::FeatureCollection, load_feature_collection_bundle(Bundle::new("geetools")))
            .unwrap()
            .with_bundle(Kind::Geometry, load_geometry_bundle(Bundle::new("geetools")))
            .unwrap();
        assert_eq!(registry.bundle(Kind::FeatureCollection, "geetools").unwrap().len(), 6);
        assert_eq!(registry.bundle(Kind::Geometry, "geetools").unwrap().len(), 2);
    }
}
