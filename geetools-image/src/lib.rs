//! geetools Image Helpers
//!
//! Band renaming and merging, pixel values, constant images, grids and
//! per-feature clipping. Every helper returns a new handle; nothing is
//! evaluated here.

mod helpers;

pub mod bands;
pub mod spatial;
pub mod values;

pub use bands::{add_prefix, add_suffix, merge, remove, rename};
pub use spatial::{clip_on_collection, to_grid, KeepProperties};
pub use values::{add_date, full, get_values, min_scale};

use geetools_plugin::Bundle;

/// Load image methods into a bundle
pub fn load_image_bundle(bundle: Bundle) -> Bundle {
    bundle
        // Bands (5 methods)
        .with_method(bands::AddPrefix)
        .with_method(bands::AddSuffix)
        .with_method(bands::Rename)
        .with_method(bands::Remove)
        .with_method(bands::Merge)

        // Values (4 methods)
        .with_method(values::GetValues)
        .with_method(values::MinScale)
        .with_method(values::Full)
        .with_method(values::AddDate)

        // Spatial (2 methods)
        .with_method(spatial::ToGrid)
        .with_method(spatial::ClipOnCollection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_core::Kind;
    use geetools_plugin::ExtensionRegistry;

    #[test]
    fn test_bundle_registers_on_image() {
        let bundle = load_image_bundle(Bundle::new("geetools"));
        assert_eq!(bundle.len(), 11);
        let registry = ExtensionRegistry::new().with_bundle(Kind::Image, bundle).unwrap();
        assert!(registry.bundle(Kind::Image, "geetools").unwrap().get("clipOnCollection").is_some());
    }
}
