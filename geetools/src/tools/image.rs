//! Legacy image functions

use super::deprecation::notice;
use crate::accessors::{ImageAccessor, ImageExt};
use geetools_core::{Dictionary, EeNumber, FeatureCollection, GeeError, Geometry, Image, Number};
use geetools_image::KeepProperties;
use std::collections::BTreeMap;

/// First image merged with the bands of the others
fn merge_all(legacy: &str, images: &[Image]) -> Result<Image, GeeError> {
    notice(legacy)?;
    match images {
        [] => Err(GeeError::empty_input(legacy, "images")),
        [first, rest @ ..] => Ok(first.geetools().merge(rest)),
    }
}

#[deprecated(since = "1.0.0", note = "use image.geetools().add_suffix")]
pub fn add_suffix(image: &Image, suffix: &str, bands: Option<&[&str]>) -> Result<Image, GeeError> {
    notice("tools::image::add_suffix")?;
    image.geetools().add_suffix(suffix, bands)
}

#[deprecated(since = "1.0.0", note = "use image.geetools().add_prefix")]
pub fn add_prefix(image: &Image, prefix: &str, bands: Option<&[&str]>) -> Result<Image, GeeError> {
    notice("tools::image::add_prefix")?;
    image.geetools().add_prefix(prefix, bands)
}

#[deprecated(since = "1.0.0", note = "use image.geetools().get_values")]
pub fn get_value(image: &Image, geometry: &Geometry, scale: Option<f64>) -> Result<Dictionary, GeeError> {
    notice("tools::image::get_value")?;
    image.geetools().get_values(geometry, scale)
}

#[deprecated(since = "1.0.0", note = "use image.geetools().min_scale")]
pub fn minscale(image: &Image) -> Result<EeNumber, GeeError> {
    notice("tools::image::minscale")?;
    Ok(image.geetools().min_scale())
}

#[deprecated(since = "1.0.0", note = "use image.geetools().merge")]
pub fn add_multi_bands(images: &[Image]) -> Result<Image, GeeError> {
    merge_all("tools::image::add_multi_bands", images)
}

#[deprecated(since = "1.0.0", note = "use image.geetools().merge")]
pub fn mix_bands(images: &[Image]) -> Result<Image, GeeError> {
    merge_all("tools::image::mix_bands", images)
}

#[deprecated(since = "1.0.0", note = "use image.geetools().rename")]
pub fn rename_dict(image: &Image, names: &BTreeMap<String, String>) -> Result<Image, GeeError> {
    notice("tools::image::rename_dict")?;
    image.geetools().rename(names)
}

#[deprecated(since = "1.0.0", note = "use image.geetools().remove")]
pub fn remove_bands(image: &Image, bands: &[&str]) -> Result<Image, GeeError> {
    notice("tools::image::remove_bands")?;
    image.geetools().remove(bands)
}

#[deprecated(since = "1.0.0", note = "use image.geetools().to_grid")]
pub fn to_grid(image: &Image, size: Option<f64>, band: Option<&str>, geometry: Option<&Geometry>) -> Result<FeatureCollection, GeeError> {
    notice("tools::image::to_grid")?;
    image.geetools().to_grid(size, band, geometry)
}

#[deprecated(since = "1.0.0", note = "use image.geetools().clip_on_collection")]
pub fn clip_to_collection(image: &Image, collection: &FeatureCollection, keep: &KeepProperties) -> Result<FeatureCollection, GeeError> {
    notice("tools::image::clip_to_collection")?;
    Ok(image.geetools().clip_on_collection(collection, keep))
}

/// Single-band constant image, `value` defaulting to 0
#[deprecated(since = "1.0.0", note = "use ImageAccessor::full")]
pub fn empty(value: Option<Number>, names: Option<&[&str]>) -> Result<Image, GeeError> {
    notice("tools::image::empty")?;
    let value = [value.unwrap_or(Number::Int(0))];
    ImageAccessor::full(Some(&value), names)
}
