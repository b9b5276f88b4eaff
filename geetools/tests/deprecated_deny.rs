//! With the deny policy legacy functions fail instead of warning.
//!
//! Settings are process-wide, so this binary holds a single test.
#![allow(deprecated)]

use geetools::{codes, configure, settings, tools, DeprecationPolicy, ImageExt, Settings};
use geetools_testkit::fixtures;

#[test]
fn deny_policy_rejects_legacy_calls() {
    configure(Settings { deprecations: DeprecationPolicy::Deny }).unwrap();
    assert_eq!(settings().deprecations, DeprecationPolicy::Deny);

    let image = fixtures::s2_image();
    let err = tools::image::add_suffix(&image, "_x", None).unwrap_err();
    assert_eq!(err.code, codes::DEPRECATED);
    assert!(err.suggestion.unwrap().contains("image.geetools().add_suffix"));

    let err = tools::date::millis_to_datetime(0).unwrap_err();
    assert_eq!(err.code, codes::DEPRECATED);

    // accessors are unaffected
    assert!(image.geetools().add_suffix("_x", None).is_ok());

    assert!(configure(Settings::default()).is_err());
}
