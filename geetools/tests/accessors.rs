//! Helper behaviour through the typed accessors, checked with the in-memory
//! evaluator

use geetools::{
    registry, DateExt, DictionaryExt, Evaluate, FeatureCollectionExt, GeometryExt, Image, ImageAccessor, ImageExt,
    KeepProperties, Kind, ListExt, Number, NumberExt, Proxy, StringExt, Value, BUNDLE,
};
use geetools::{Date, Dictionary, EeList, EeNumber, EeString, Geometry};
use geetools_testkit::fixtures;
use serde_json::json;
use std::collections::BTreeMap;

fn band_names(image: &Image) -> serde_json::Value {
    fixtures::evaluator().get_info(&image.band_names()).unwrap()
}

#[test]
fn remove_keeps_the_other_bands_in_order() {
    let image = fixtures::s2_image().geetools().remove(&["B2"]).unwrap();
    assert_eq!(band_names(&image), json!(["B1", "B3"]));
}

#[test]
fn prefix_then_strip_recovers_names() {
    let prefixed = fixtures::s2_image().geetools().add_prefix("pre_", None).unwrap();
    assert_eq!(band_names(&prefixed), json!(["pre_B1", "pre_B2", "pre_B3"]));
    let stripped = prefixed.band_names().map(|name| EeString::new(name).replace("^pre_", "", ""));
    assert_eq!(fixtures::evaluator().get_info(&stripped).unwrap(), json!(["B1", "B2", "B3"]));
}

#[test]
fn merge_numbers_repeated_names() {
    let image = fixtures::s2_image().select(vec!["B1", "B2"]);
    let once = image.geetools().merge(&[image.clone()]);
    assert_eq!(band_names(&once), json!(["B1", "B2", "B1_1", "B2_1"]));
    let twice = image.geetools().merge(&[image.clone(), image.clone()]);
    assert_eq!(band_names(&twice), json!(["B1", "B2", "B1_1", "B2_1", "B1_2", "B2_2"]));
}

#[test]
fn rename_with_mapping() {
    let mapping: BTreeMap<String, String> = [("B1", "newB1"), ("B2", "newB2")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let image = fixtures::s2_image().geetools().rename(&mapping).unwrap();
    assert_eq!(band_names(&image), json!(["newB1", "newB2", "B3"]));
}

#[test]
fn full_then_get_values() {
    let values = [Number::Int(1), Number::Int(2), Number::Int(3)];
    let image = ImageAccessor::full(Some(&values), Some(&["a", "b", "c"])).unwrap();
    let sampled = image.geetools().get_values(&fixtures::vatican(), None).unwrap();
    assert_eq!(fixtures::evaluator().get_info(&sampled).unwrap(), json!({"a": 1, "b": 2, "c": 3}));
}

#[test]
fn get_values_omits_bands_outside_footprint() {
    let sampled = fixtures::partial_image().geetools().get_values(&fixtures::vatican(), Some(30.0)).unwrap();
    assert_eq!(fixtures::evaluator().get_info(&sampled).unwrap(), json!({"near": 1}));
}

#[test]
fn clip_on_collection_properties() {
    let ev = fixtures::evaluator();
    let image = fixtures::s2_image();
    let fc = fixtures::vatican_features();

    let all = ev.get_info(&image.geetools().clip_on_collection(&fc, &KeepProperties::All)).unwrap();
    assert_eq!(all["features"][0]["properties"]["name"], json!("north"));

    let none = ev.get_info(&image.geetools().clip_on_collection(&fc, &KeepProperties::Nothing)).unwrap();
    for feature in none["features"].as_array().unwrap() {
        assert!(feature["properties"].get("name").is_none());
    }
}

#[test]
fn clip_on_collection_flag_through_registry() {
    let ev = fixtures::evaluator();
    let image = fixtures::s2_image();
    let fc = fixtures::vatican_features();
    let all = image.geetools().clip_on_collection(&fc, &KeepProperties::All).into_value();
    let nothing = image.geetools().clip_on_collection(&fc, &KeepProperties::Nothing).into_value();

    let flagged = registry()
        .dispatch(&image, BUNDLE, "clipOnCollection", &[fc.clone().into_value(), Value::from(1)])
        .unwrap();
    assert_eq!(flagged, all);
    let info = ev.evaluate(&flagged).unwrap();
    assert_eq!(info["features"][1]["properties"]["value"], json!(2));

    let zero = registry()
        .dispatch(&image, BUNDLE, "clipOnCollection", &[fc.into_value(), Value::from(0)])
        .unwrap();
    assert_eq!(zero, nothing);
}

#[test]
fn add_id_numbers_in_order() {
    let ev = fixtures::evaluator();
    let fc = fixtures::vatican_features().geetools().add_id("id", 1).unwrap();
    let ids = fc.to_list(fc.size()).map(|f| f.cast::<geetools::Feature>().get("id"));
    assert_eq!(ev.get_info(&ids).unwrap(), json!([1, 2]));
}

#[test]
fn clean_then_merge_geometries() {
    let ev = fixtures::evaluator();
    let cleaned = fixtures::mixed_features().geetools().clean();
    assert_eq!(ev.get_info(&cleaned.size()).unwrap(), json!(3));
    let merged = cleaned.geetools().merge_geometries();
    assert_eq!(ev.get_info(&merged.geometries().size()).unwrap(), json!(3));
}

#[test]
fn geometry_accessors() {
    let ev = fixtures::evaluator();
    let multi = Geometry::multi(Value::List(vec![
        Geometry::point(0.0, 0.0).into(),
        Geometry::rectangle(1.0, 1.0, 2.0, 2.0).into(),
    ]));
    let polygons = multi.geetools().keep_type("Polygon").unwrap();
    assert_eq!(ev.get_info(&polygons.geometries().size()).unwrap(), json!(1));
    let fc = multi.geetools().to_feature_collection(None);
    assert_eq!(ev.get_info(&fc.size()).unwrap(), json!(2));
}

#[test]
fn date_accessors() {
    let ev = fixtures::evaluator();
    let date = Date::new("2020-01-01");
    assert_eq!(ev.get_info(&date.geetools().unit_since_epoch("day").unwrap()).unwrap(), json!(18262));
    assert_eq!(ev.get_info(&date.geetools().is_leap()).unwrap(), json!(1));
    let dt = date.geetools().to_datetime(&ev).unwrap();
    assert_eq!(dt.year(), 2020);
}

#[test]
fn list_number_string_dictionary_accessors() {
    let ev = fixtures::evaluator();
    let list = EeList::new(vec!["a", "b", "c"]);
    let other = EeList::new(vec!["b", "d"]);
    assert_eq!(ev.get_info(&list.geetools().intersection(&other)).unwrap(), json!(["b"]));
    assert_eq!(ev.get_info(&list.geetools().delete(0)).unwrap(), json!(["b", "c"]));

    let truncated = EeNumber::new(1.987).geetools().truncate(1).unwrap();
    assert_eq!(ev.get_info(&truncated).unwrap(), json!(1.9));

    let vars = Dictionary::new(Value::from_json(&json!({"band": "B4"})));
    let text = EeString::new("band {band}").geetools().format(&vars);
    assert_eq!(ev.get_info(&text).unwrap(), json!("band B4"));

    let dict = Dictionary::new(Value::from_json(&json!({"x": 1, "y": 2})));
    assert_eq!(ev.get_info(&dict.geetools().get_many(vec!["y"])).unwrap(), json!([2]));
}

#[test]
fn accessors_and_registry_build_the_same_graph() {
    let image = fixtures::s2_image();
    let typed = image.geetools().add_suffix("_s", Some(&["B1"])).unwrap();
    let dynamic = registry()
        .dispatch(&image, BUNDLE, "addSuffix", &[Value::from("_s"), Value::from(vec!["B1"])])
        .unwrap();
    assert_eq!(typed.into_value(), dynamic);

    let fc = fixtures::vatican_features();
    let typed = fc.geetools().enumerate_simple("ENUM").unwrap();
    let dynamic = registry().dispatch(&fc, BUNDLE, "enumerateSimple", &[]).unwrap();
    assert_eq!(typed.into_value(), dynamic);
}

#[test]
fn registry_help_lists_every_kind() {
    for kind in registry().kinds() {
        let help = registry().help(kind, None).unwrap();
        assert_eq!(help["kind"], json!(kind.name()));
        assert!(!registry().list_methods(kind).is_empty());
    }
    let meta = registry().help(Kind::Image, Some("clipOnCollection")).unwrap();
    assert_eq!(meta["returns"], json!("FeatureCollection"));
}

#[test]
fn registry_suggests_similar_methods() {
    let image = fixtures::s2_image();
    let err = registry().dispatch(&image, BUNDLE, "addSufix", &[Value::from("_x")]).unwrap_err();
    assert_eq!(err.code, geetools::codes::UNKNOWN_METHOD);
    assert!(err.suggestion.unwrap().contains("addSuffix"));
}
