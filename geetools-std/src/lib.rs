//! geetools Standard Helpers
//!
//! Helpers on the service's basic kinds: dates, lists, numbers, strings and
//! dictionaries.

pub mod date;
pub mod dictionary;
pub mod list;
pub mod number;
pub mod string;

pub use date::{from_epoch, is_leap, millis_to_datetime, to_datetime, unit_since_epoch, DatetimeError};

use geetools_plugin::Bundle;

/// Load date methods into a bundle
pub fn load_date_bundle(bundle: Bundle) -> Bundle {
    bundle
        .with_method(date::UnitSinceEpoch)
        .with_method(date::FromEpoch)
        .with_method(date::IsLeap)
}

/// Load list methods into a bundle
pub fn load_list_bundle(bundle: Bundle) -> Bundle {
    bundle
        // Sets (3 methods)
        .with_method(list::Complement)
        .with_method(list::Intersection)
        .with_method(list::Union)

        // Editing (2 methods)
        .with_method(list::Delete)
        .with_method(list::ReplaceMany)

        // Strings (2 methods)
        .with_method(list::ToStrings)
        .with_method(list::Join)
}

pub fn load_number_bundle(bundle: Bundle) -> Bundle {
    bundle.with_method(number::Truncate)
}

pub fn load_string_bundle(bundle: Bundle) -> Bundle {
    bundle.with_method(string::Format)
}

/// Load dictionary methods into a bundle
pub fn load_dictionary_bundle(bundle: Bundle) -> Bundle {
    bundle
        .with_method(dictionary::FromPairs)
        .with_method(dictionary::Sort)
        .with_method(dictionary::GetMany)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_sizes() {
        assert_eq!(load_date_bundle(Bundle::new("geetools")).len(), 3);
        assert_eq!(load_list_bundle(Bundle::new("geetools")).len(), 7);
        assert_eq!(load_number_bundle(Bundle::new("geetools")).len(), 1);
        assert_eq!(load_string_bundle(Bundle::new("geetools")).len(), 1);
        assert_eq!(load_dictionary_bundle(Bundle::new("geetools")).len(), 3);
    }
}
