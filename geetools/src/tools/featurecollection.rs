//! Legacy feature collection functions

use super::deprecation::notice;
use crate::accessors::FeatureCollectionExt;
use geetools_core::{EeList, FeatureCollection, GeeError, Geometry};

#[deprecated(since = "1.0.0", note = "use collection.geetools().add_id")]
pub fn add_id(collection: &FeatureCollection, name: &str, start: i64) -> Result<FeatureCollection, GeeError> {
    notice("tools::featurecollection::add_id")?;
    collection.geetools().add_id(name, start)
}

#[deprecated(since = "1.0.0", note = "use collection.geetools().clean")]
pub fn clean(collection: &FeatureCollection) -> Result<FeatureCollection, GeeError> {
    notice("tools::featurecollection::clean")?;
    Ok(collection.geetools().clean())
}

#[deprecated(since = "1.0.0", note = "use collection.geetools().enumerate_property")]
pub fn enumerate_property(collection: &FeatureCollection, name: &str) -> Result<FeatureCollection, GeeError> {
    notice("tools::featurecollection::enumerate_property")?;
    collection.geetools().enumerate_property(name)
}

#[deprecated(since = "1.0.0", note = "use collection.geetools().enumerate_simple")]
pub fn enumerate_simple(collection: &FeatureCollection, name: &str) -> Result<FeatureCollection, GeeError> {
    notice("tools::featurecollection::enumerate_simple")?;
    collection.geetools().enumerate_simple(name)
}

#[deprecated(since = "1.0.0", note = "use collection.geetools().list_options")]
pub fn list_options(collection: &FeatureCollection, property: &str) -> Result<EeList, GeeError> {
    notice("tools::featurecollection::list_options")?;
    collection.geetools().list_options(property)
}

#[deprecated(since = "1.0.0", note = "use collection.geetools().merge_geometries")]
pub fn merge_geometries(collection: &FeatureCollection) -> Result<Geometry, GeeError> {
    notice("tools::featurecollection::merge_geometries")?;
    Ok(collection.geetools().merge_geometries())
}
