//! Legacy functions warn and then build the same graph as the accessors
#![allow(deprecated)]

use geetools::tools::{self, LEGACY_TABLE, TARGET};
use geetools::{DateExt, FeatureCollectionExt, ImageExt, Proxy};
use geetools_testkit::fixtures;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

/// Run `f` with a subscriber that records formatted events
fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, captured.text())
}

#[test]
fn legacy_add_suffix_warns_once() {
    let image = fixtures::s2_image();
    let (legacy, logs) = capture(|| tools::image::add_suffix(&image, "_x", None).unwrap());
    assert_eq!(legacy.into_value(), image.geetools().add_suffix("_x", None).unwrap().into_value());

    let warnings: Vec<&str> = logs.lines().filter(|l| l.contains(TARGET)).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("WARN"));
    assert!(warnings[0].contains("tools::image::add_suffix"));
    assert!(warnings[0].contains("image.geetools().add_suffix"));
    assert!(warnings[0].contains("1.0.0"));
}

#[test]
fn legacy_image_functions_match_accessors() {
    let image = fixtures::s2_image();
    let fc = fixtures::vatican_features();
    let (pairs, logs) = capture(|| {
        vec![
            (
                tools::image::remove_bands(&image, &["B1"]).unwrap().into_value(),
                image.geetools().remove(&["B1"]).unwrap().into_value(),
            ),
            (
                tools::image::minscale(&image).unwrap().into_value(),
                image.geetools().min_scale().into_value(),
            ),
            (
                tools::date::make_date_band(&image).unwrap().into_value(),
                image.geetools().add_date().into_value(),
            ),
            (
                tools::image::add_multi_bands(&[image.clone(), image.clone()]).unwrap().into_value(),
                image.geetools().merge(&[image.clone()]).into_value(),
            ),
        ]
    });
    for (legacy, modern) in pairs {
        assert_eq!(legacy, modern);
    }
    assert_eq!(logs.lines().filter(|l| l.contains(TARGET)).count(), 4);

    let (legacy, _) = capture(|| tools::featurecollection::add_id(&fc, "id", 1).unwrap());
    assert_eq!(legacy.into_value(), fc.geetools().add_id("id", 1).unwrap().into_value());
}

#[test]
fn legacy_mix_bands_needs_an_image() {
    let (result, _) = capture(|| tools::image::mix_bands(&[]));
    assert_eq!(result.unwrap_err().code, geetools::codes::EMPTY_INPUT);
}

#[test]
fn legacy_empty_is_a_constant_image() {
    let ev = fixtures::evaluator();
    let (image, _) = capture(|| tools::image::empty(None, Some(&["zero"])).unwrap());
    let values = image.geetools().get_values(&fixtures::vatican(), None).unwrap();
    assert_eq!(
        geetools::Evaluate::get_info(&ev, &values).unwrap(),
        serde_json::json!({"zero": 0})
    );
}

#[test]
fn legacy_date_functions() {
    let ev = fixtures::evaluator();
    let date = geetools::Date::new("2020-01-01");
    let (days, _) = capture(|| tools::date::unit_since_epoch(&date, "day").unwrap());
    assert_eq!(days.into_value(), date.geetools().unit_since_epoch("day").unwrap().into_value());

    let (dt, logs) = capture(|| tools::date::millis_to_datetime(86_400_000).unwrap());
    assert_eq!(dt.unix_timestamp(), 86_400);
    assert!(logs.contains("OffsetDateTime::from_unix_timestamp_nanos"));

    let (err, _) = capture(|| tools::date::millis_to_datetime(i64::MAX).unwrap_err());
    assert_eq!(err.code, geetools::codes::INVALID_ARGUMENT);

    let (dt, _) = capture(|| tools::date::to_datetime(&date, &ev).unwrap());
    assert_eq!(dt.year(), 2020);
}

#[test]
fn every_legacy_entry_is_versioned() {
    for entry in LEGACY_TABLE.iter() {
        assert!(entry.legacy.starts_with("tools::"));
        assert_eq!(entry.since, tools::SINCE);
        assert_eq!(tools::lookup(entry.legacy), Some(entry));
    }
}
