//! Proxy kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KindError {
    #[error("Unknown proxy kind: {0}")]
    Unknown(String),
}

/// Kind of server-side object a handle refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    Image,
    ImageCollection,
    Feature,
    FeatureCollection,
    Geometry,
    Date,
    List,
    Number,
    String,
    Dictionary,
}

impl Kind {
    pub const ALL: [Kind; 10] = [
        Kind::Image,
        Kind::ImageCollection,
        Kind::Feature,
        Kind::FeatureCollection,
        Kind::Geometry,
        Kind::Date,
        Kind::List,
        Kind::Number,
        Kind::String,
        Kind::Dictionary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Image => "Image",
            Kind::ImageCollection => "ImageCollection",
            Kind::Feature => "Feature",
            Kind::FeatureCollection => "FeatureCollection",
            Kind::Geometry => "Geometry",
            Kind::Date => "Date",
            Kind::List => "List",
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::Dictionary => "Dictionary",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = KindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| KindError::Unknown(s.to_string()))
    }
}
