//! Images, image collections and projections

use super::{call, proxy_type, Computed, Date, Dictionary, EeList, EeNumber, Geometry, Proxy, Reducer};
use crate::{Kind, Value};

proxy_type!(Image, Some(Kind::Image));
proxy_type!(ImageCollection, Some(Kind::ImageCollection));
proxy_type!(Projection, None);

impl Image {
    /// Stored asset by id
    pub fn load(id: &str) -> Image {
        call("Image.load", [("id", Value::from(id))])
    }

    /// One band per value, named `constant`, `constant_1`, ...
    pub fn constant(value: impl Into<Value>) -> Image {
        call("Image.constant", [("value", value.into())])
    }

    pub fn band_names(&self) -> EeList {
        call("Image.bandNames", [("image", self.0.clone())])
    }

    /// Bands matching `selectors`, in selector order
    pub fn select(&self, selectors: impl Into<Value>) -> Image {
        call("Image.select", [("input", self.0.clone()), ("bandSelectors", selectors.into())])
    }

    pub fn rename(&self, names: impl Into<Value>) -> Image {
        call("Image.rename", [("input", self.0.clone()), ("names", names.into())])
    }

    pub fn add_bands(&self, src: impl Into<Value>) -> Image {
        call("Image.addBands", [("dstImg", self.0.clone()), ("srcImg", src.into())])
    }

    pub fn reduce_region(&self, reducer: Reducer, geometry: impl Into<Value>, scale: impl Into<Value>) -> Dictionary {
        call(
            "Image.reduceRegion",
            [
                ("image", self.0.clone()),
                ("reducer", reducer.into_value()),
                ("geometry", geometry.into()),
                ("scale", scale.into()),
            ],
        )
    }

    pub fn clip(&self, geometry: impl Into<Value>) -> Image {
        call("Image.clip", [("input", self.0.clone()), ("geometry", geometry.into())])
    }

    /// Projection of the first band
    pub fn projection(&self) -> Projection {
        call("Image.projection", [("image", self.0.clone())])
    }

    /// Footprint
    pub fn geometry(&self) -> Geometry {
        call("Image.geometry", [("feature", self.0.clone())])
    }

    /// Acquisition time (`system:time_start`)
    pub fn date(&self) -> Date {
        call("Image.date", [("image", self.0.clone())])
    }

    pub fn get(&self, property: impl Into<Value>) -> Computed {
        call("Element.get", [("object", self.0.clone()), ("property", property.into())])
    }

    pub fn set(&self, key: impl Into<Value>, value: impl Into<Value>) -> Image {
        call("Element.set", [("object", self.0.clone()), ("key", key.into()), ("value", value.into())])
    }

    /// Copy properties of `source`; all of them when `properties` is null
    pub fn copy_properties(&self, source: impl Into<Value>, properties: impl Into<Value>) -> Image {
        call(
            "Element.copyProperties",
            [
                ("destination", self.0.clone()),
                ("source", source.into()),
                ("properties", properties.into()),
            ],
        )
    }
}

impl ImageCollection {
    pub fn from_images(images: impl Into<Value>) -> ImageCollection {
        call("ImageCollection.fromImages", [("images", images.into())])
    }

    /// All bands of all images in one image, prefixed with the image index
    pub fn to_bands(&self) -> Image {
        call("ImageCollection.toBands", [("collection", self.0.clone())])
    }

    pub fn size(&self) -> EeNumber {
        call("Collection.size", [("collection", self.0.clone())])
    }

    pub fn first(&self) -> Image {
        call("Collection.first", [("collection", self.0.clone())])
    }
}

impl Projection {
    /// Linear size of a pixel, in meters
    pub fn nominal_scale(&self) -> EeNumber {
        call("Projection.nominalScale", [("proj", self.0.clone())])
    }

    /// Pixels grown by `x` and `y`
    pub fn scale(&self, x: impl Into<Value>, y: impl Into<Value>) -> Projection {
        call("Projection.scale", [("projection", self.0.clone()), ("x", x.into()), ("y", y.into())])
    }
}
