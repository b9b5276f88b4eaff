//! Typed accessors: `handle.geetools().method(..)`
//!
//! Each extension trait hands out an accessor borrowing the handle. The
//! accessor methods carry the registry's method names in snake case and
//! call the same helpers the registry dispatches to.

use geetools_core::{
    Date, Dictionary, EeList, EeNumber, EeString, Evaluate, FeatureCollection, GeeError, Geometry, Image, Number,
    Value,
};
use geetools_image::KeepProperties;
use geetools_std::{dictionary, list, number, string, DatetimeError};
use std::collections::BTreeMap;
use time::OffsetDateTime;

macro_rules! accessor {
    ($(#[$meta:meta])* $ext:ident, $accessor:ident, $handle:ty) => {
        $(#[$meta])*
        pub trait $ext {
            fn geetools(&self) -> $accessor<'_>;
        }

        impl $ext for $handle {
            fn geetools(&self) -> $accessor<'_> {
                $accessor(self)
            }
        }

        #[derive(Debug, Clone, Copy)]
        pub struct $accessor<'a>(&'a $handle);
    };
}

accessor!(
    /// `image.geetools()`
    ImageExt, ImageAccessor, Image
);
accessor!(
    /// `collection.geetools()`
    FeatureCollectionExt, FeatureCollectionAccessor, FeatureCollection
);
accessor!(GeometryExt, GeometryAccessor, Geometry);
accessor!(DateExt, DateAccessor, Date);
accessor!(ListExt, ListAccessor, EeList);
accessor!(NumberExt, NumberAccessor, EeNumber);
accessor!(StringExt, StringAccessor, EeString);
accessor!(DictionaryExt, DictionaryAccessor, Dictionary);

impl ImageAccessor<'_> {
    /// Constant image, `Image.geetools.full`
    pub fn full(values: Option<&[Number]>, names: Option<&[&str]>) -> Result<Image, GeeError> {
        geetools_image::full(values, names)
    }

    pub fn add_prefix(&self, prefix: &str, bands: Option<&[&str]>) -> Result<Image, GeeError> {
        geetools_image::add_prefix(self.0, prefix, bands)
    }

    pub fn add_suffix(&self, suffix: &str, bands: Option<&[&str]>) -> Result<Image, GeeError> {
        geetools_image::add_suffix(self.0, suffix, bands)
    }

    pub fn rename(&self, names: &BTreeMap<String, String>) -> Result<Image, GeeError> {
        geetools_image::rename(self.0, names)
    }

    pub fn remove(&self, bands: &[&str]) -> Result<Image, GeeError> {
        geetools_image::remove(self.0, bands)
    }

    pub fn merge(&self, images: &[Image]) -> Image {
        geetools_image::merge(self.0, images)
    }

    pub fn get_values(&self, geometry: &Geometry, scale: Option<f64>) -> Result<Dictionary, GeeError> {
        geetools_image::get_values(self.0, geometry, scale)
    }

    pub fn min_scale(&self) -> EeNumber {
        geetools_image::min_scale(self.0)
    }

    pub fn add_date(&self) -> Image {
        geetools_image::add_date(self.0)
    }

    pub fn to_grid(&self, size: Option<f64>, band: Option<&str>, geometry: Option<&Geometry>) -> Result<FeatureCollection, GeeError> {
        geetools_image::to_grid(self.0, size, band, geometry)
    }

    pub fn clip_on_collection(&self, collection: &FeatureCollection, keep: &KeepProperties) -> FeatureCollection {
        geetools_image::clip_on_collection(self.0, collection, keep)
    }
}

impl FeatureCollectionAccessor<'_> {
    pub fn add_id(&self, name: &str, start: i64) -> Result<FeatureCollection, GeeError> {
        geetools_features::add_id(self.0, name, start)
    }

    pub fn enumerate_property(&self, name: &str) -> Result<FeatureCollection, GeeError> {
        geetools_features::enumerate_property(self.0, name)
    }

    pub fn enumerate_simple(&self, name: &str) -> Result<FeatureCollection, GeeError> {
        geetools_features::enumerate_simple(self.0, name)
    }

    pub fn list_options(&self, property: &str) -> Result<EeList, GeeError> {
        geetools_features::list_options(self.0, property)
    }

    pub fn merge_geometries(&self) -> Geometry {
        geetools_features::merge_geometries(self.0)
    }

    pub fn clean(&self) -> FeatureCollection {
        geetools_features::clean(self.0)
    }
}

impl GeometryAccessor<'_> {
    pub fn keep_type(&self, geometry_type: &str) -> Result<Geometry, GeeError> {
        geetools_features::keep_type(self.0, geometry_type)
    }

    pub fn to_feature_collection(&self, properties: Option<&Dictionary>) -> FeatureCollection {
        geetools_features::to_feature_collection(self.0, properties)
    }
}

impl DateAccessor<'_> {
    /// `Date.geetools.fromEpoch`
    pub fn from_epoch(number: impl Into<Value>, unit: &str) -> Result<Date, GeeError> {
        geetools_std::from_epoch(number, unit)
    }

    pub fn unit_since_epoch(&self, unit: &str) -> Result<EeNumber, GeeError> {
        geetools_std::unit_since_epoch(self.0, unit)
    }

    pub fn is_leap(&self) -> EeNumber {
        geetools_std::is_leap(self.0)
    }

    /// Evaluate with `evaluator` and convert to a UTC datetime
    pub fn to_datetime<E: Evaluate>(&self, evaluator: &E) -> Result<OffsetDateTime, DatetimeError<E::Error>>
    where
        E::Error: 'static,
    {
        geetools_std::to_datetime(self.0, evaluator)
    }
}

impl ListAccessor<'_> {
    pub fn complement(&self, other: &EeList) -> EeList {
        list::complement(self.0, other)
    }

    pub fn intersection(&self, other: &EeList) -> EeList {
        list::intersection(self.0, other)
    }

    pub fn union(&self, other: &EeList) -> EeList {
        list::union(self.0, other)
    }

    pub fn delete(&self, index: impl Into<Value>) -> EeList {
        list::delete(self.0, index)
    }

    pub fn replace_many(&self, replace: &Dictionary) -> EeList {
        list::replace_many(self.0, replace)
    }

    pub fn to_strings(&self) -> EeList {
        list::to_strings(self.0)
    }

    pub fn join(&self, separator: &str) -> EeString {
        list::join(self.0, separator)
    }
}

impl NumberAccessor<'_> {
    pub fn truncate(&self, decimals: i64) -> Result<EeNumber, GeeError> {
        number::truncate(self.0, decimals)
    }
}

impl StringAccessor<'_> {
    pub fn format(&self, vars: &Dictionary) -> EeString {
        string::format(self.0, vars)
    }
}

impl DictionaryAccessor<'_> {
    /// `Dictionary.geetools.fromPairs`
    pub fn from_pairs(pairs: impl Into<Value>) -> Dictionary {
        dictionary::from_pairs(pairs)
    }

    pub fn sort(&self) -> Dictionary {
        dictionary::sort(self.0)
    }

    pub fn get_many(&self, keys: impl Into<Value>) -> EeList {
        dictionary::get_many(self.0, keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{registry, BUNDLE};
    use geetools_core::Proxy;

    #[test]
    fn test_accessor_matches_dispatch() {
        let image = Image::load("COPERNICUS/S2");
        let typed = image.geetools().add_suffix("_x", None).unwrap();
        let dynamic = registry().dispatch(&image, BUNDLE, "addSuffix", &[Value::from("_x")]).unwrap();
        assert_eq!(typed.into_value(), dynamic);
    }

    #[test]
    fn test_static_accessors() {
        let image = ImageAccessor::full(None, None).unwrap();
        let dynamic = registry().call(geetools_core::Kind::Image, BUNDLE, "full", &Value::Null, &[]).unwrap();
        assert_eq!(image.into_value(), dynamic);
        let date = DateAccessor::from_epoch(1, "day").unwrap();
        assert_eq!(date.value().function_name(), Some("Date.advance"));
    }
}
