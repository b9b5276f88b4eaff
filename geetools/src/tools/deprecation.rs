//! Legacy name table and the notice every legacy function emits

use crate::settings::{settings, DeprecationPolicy};
use geetools_core::GeeError;

/// Version that replaced the flat functions with accessors
pub const SINCE: &str = "1.0.0";

/// Tracing target of deprecation notices
pub const TARGET: &str = "geetools::deprecated";

/// One legacy function and what replaces it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyEntry {
    pub legacy: &'static str,
    pub replacement: &'static str,
    pub since: &'static str,
}

const fn entry(legacy: &'static str, replacement: &'static str) -> LegacyEntry {
    LegacyEntry { legacy, replacement, since: SINCE }
}

pub static LEGACY_TABLE: [LegacyEntry; 21] = [
    entry("tools::image::add_suffix", "image.geetools().add_suffix"),
    entry("tools::image::add_prefix", "image.geetools().add_prefix"),
    entry("tools::image::get_value", "image.geetools().get_values"),
    entry("tools::image::minscale", "image.geetools().min_scale"),
    entry("tools::image::add_multi_bands", "image.geetools().merge"),
    entry("tools::image::mix_bands", "image.geetools().merge"),
    entry("tools::image::rename_dict", "image.geetools().rename"),
    entry("tools::image::remove_bands", "image.geetools().remove"),
    entry("tools::image::to_grid", "image.geetools().to_grid"),
    entry("tools::image::clip_to_collection", "image.geetools().clip_on_collection"),
    entry("tools::image::empty", "ImageAccessor::full"),
    entry("tools::featurecollection::add_id", "collection.geetools().add_id"),
    entry("tools::featurecollection::clean", "collection.geetools().clean"),
    entry("tools::featurecollection::enumerate_property", "collection.geetools().enumerate_property"),
    entry("tools::featurecollection::enumerate_simple", "collection.geetools().enumerate_simple"),
    entry("tools::featurecollection::list_options", "collection.geetools().list_options"),
    entry("tools::featurecollection::merge_geometries", "collection.geetools().merge_geometries"),
    entry("tools::date::to_datetime", "date.geetools().to_datetime"),
    entry("tools::date::millis_to_datetime", "OffsetDateTime::from_unix_timestamp_nanos"),
    entry("tools::date::unit_since_epoch", "date.geetools().unit_since_epoch"),
    entry("tools::date::make_date_band", "image.geetools().add_date"),
];

pub fn lookup(legacy: &str) -> Option<&'static LegacyEntry> {
    LEGACY_TABLE.iter().find(|e| e.legacy == legacy)
}

/// Apply the configured policy to a call of `legacy`
pub(crate) fn notice(legacy: &str) -> Result<(), GeeError> {
    let entry = lookup(legacy).ok_or_else(|| GeeError::internal(format!("'{}' is not a legacy function", legacy)))?;
    apply(entry, settings().deprecations)
}

pub(crate) fn apply(entry: &LegacyEntry, policy: DeprecationPolicy) -> Result<(), GeeError> {
    match policy {
        DeprecationPolicy::Silent => Ok(()),
        DeprecationPolicy::Warn => {
            tracing::warn!(
                target: TARGET,
                legacy = entry.legacy,
                replacement = entry.replacement,
                since = entry.since,
                "{} is deprecated since {}, use {} instead",
                entry.legacy,
                entry.since,
                entry.replacement
            );
            Ok(())
        }
        DeprecationPolicy::Deny => Err(GeeError::deprecated(entry.legacy, entry.replacement, entry.since)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_names_are_unique() {
        let names: HashSet<&str> = LEGACY_TABLE.iter().map(|e| e.legacy).collect();
        assert_eq!(names.len(), LEGACY_TABLE.len());
    }

    #[test]
    fn test_apply_policies() {
        let entry = lookup("tools::image::add_suffix").unwrap();
        assert!(apply(entry, DeprecationPolicy::Silent).is_ok());
        assert!(apply(entry, DeprecationPolicy::Warn).is_ok());
        let err = apply(entry, DeprecationPolicy::Deny).unwrap_err();
        assert_eq!(err.code, geetools_core::codes::DEPRECATED);
        assert!(err.suggestion.unwrap().contains("add_suffix"));
    }

    #[test]
    fn test_date_band_is_a_date_tool() {
        let entry = lookup("tools::date::make_date_band").unwrap();
        assert_eq!(entry.replacement, "image.geetools().add_date");
        assert!(lookup("tools::image::make_date_band").is_none());
    }

    #[test]
    fn test_unknown_legacy_name() {
        assert!(lookup("tools::image::nope").is_none());
        assert!(notice("tools::image::nope").is_err());
    }
}
