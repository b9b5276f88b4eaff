//! Band naming: prefixes, suffixes, renaming, removal and merging

use crate::helpers::{as_strs, text_list, validate_names, validate_text, validate_unique_names};
use geetools_plugin::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Helpers
// ============================================================================

fn affix(func: &str, image: &Image, text: &str, bands: Option<&[&str]>, prefix: bool) -> Result<Image, GeeError> {
    validate_text(func, if prefix { "prefix" } else { "suffix" }, text)?;
    let subset = match bands {
        Some([]) => return Err(GeeError::empty_input(func, "bands").with_suggestion("Omit 'bands' to rename every band")),
        Some(bands) => {
            validate_names(func, "bands", bands)?;
            Some(EeList::new(text_list(bands)))
        }
        None => None,
    };

    let apply = |band: Computed| -> EeString {
        if prefix {
            EeString::new(text).cat(band)
        } else {
            EeString::new(band).cat(text)
        }
    };
    let names = image.band_names().map(|band| -> Value {
        match &subset {
            Some(subset) => algorithms::if_(subset.contains(band.clone()), apply(band.clone()), band).into(),
            None => apply(band).into(),
        }
    });
    Ok(image.rename(names))
}

/// Append `suffix` to every band, or only to `bands`
pub fn add_suffix(image: &Image, suffix: &str, bands: Option<&[&str]>) -> Result<Image, GeeError> {
    affix("addSuffix", image, suffix, bands, false)
}

/// Prepend `prefix` to every band, or only to `bands`
pub fn add_prefix(image: &Image, prefix: &str, bands: Option<&[&str]>) -> Result<Image, GeeError> {
    affix("addPrefix", image, prefix, bands, true)
}

/// Rename bands from an `old -> new` mapping; other bands keep their name
/// and position.
///
/// The old names are selected explicitly, so a name that is not a band of
/// the image makes the evaluation fail instead of being ignored.
pub fn rename(image: &Image, names: &BTreeMap<String, String>) -> Result<Image, GeeError> {
    if names.is_empty() {
        return Err(GeeError::empty_input("rename", "names"));
    }
    let old: Vec<&str> = names.keys().map(String::as_str).collect();
    let new: Vec<&str> = names.values().map(String::as_str).collect();
    validate_names("rename", "names", &old)?;
    validate_unique_names("rename", "names", &new)?;

    let mapping = Dictionary::new(Value::Object(
        names.iter().map(|(k, v)| (k.clone(), Value::from(v))).collect(),
    ));
    let all = image.band_names();
    let requested = image.select(text_list(&old));
    let others = image.select(all.remove_all(text_list(&old)));
    let new_names = all.map(|band| mapping.get_or(band.clone(), band));

    Ok(requested.add_bands(others).select(all).rename(new_names))
}

/// Drop `bands`; the remaining bands keep their order. Dropping every band
/// yields an image without bands.
pub fn remove(image: &Image, bands: &[&str]) -> Result<Image, GeeError> {
    validate_names("remove", "bands", bands)?;
    Ok(image.select(image.band_names().remove_all(text_list(bands))))
}

/// Concatenate the bands of `image` and `images`, in argument order.
///
/// A name already emitted gets the smallest free suffix `_k`, so the k-th
/// repeat of a name becomes `<name>_k` unless that name is taken too.
pub fn merge(image: &Image, images: &[Image]) -> Image {
    let all = EeList::new(Value::List(
        std::iter::once(image).chain(images).map(Value::from).collect(),
    ));

    let names = EeList::new(all.iterate(
        |img, acc| EeList::new(acc).cat(img.cast::<Image>().band_names()),
        Value::List(vec![]),
    ));

    // n names never need a suffix past _n
    let suffixes = EeList::sequence(1, names.size()).map(|k| EeString::new("_").cat(EeNumber::new(k).format("%d")));

    let unique = names.iterate(
        |name, acc| {
            let emitted = EeList::new(acc);
            let name = EeString::new(name);
            let free = suffixes.map(|suffix| name.cat(suffix)).remove_all(emitted.clone()).get(0);
            emitted.add(algorithms::if_(emitted.contains(name.clone()), free, name.clone()))
        },
        Value::List(vec![]),
    );

    ImageCollection::from_images(all).to_bands().rename(unique)
}

// ============================================================================
// Extension methods
// ============================================================================

pub struct AddSuffix;
pub struct AddPrefix;
pub struct Rename;
pub struct Remove;
pub struct Merge;

static ADD_SUFFIX_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("suffix", "Text", "Text appended to band names"),
    ArgMeta::optional("bands", "List<Text>", "Bands to rename", "all bands"),
];
static ADD_SUFFIX_EXAMPLES: [&str; 2] = ["image.geetools.addSuffix(\"_x\")", "image.geetools.addSuffix(\"_x\", [\"B1\"])"];
static ADD_SUFFIX_RELATED: [&str; 2] = ["addPrefix", "rename"];

static ADD_PREFIX_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("prefix", "Text", "Text prepended to band names"),
    ArgMeta::optional("bands", "List<Text>", "Bands to rename", "all bands"),
];
static ADD_PREFIX_EXAMPLES: [&str; 1] = ["image.geetools.addPrefix(\"s2_\")"];
static ADD_PREFIX_RELATED: [&str; 2] = ["addSuffix", "rename"];

static RENAME_ARGS: [ArgMeta; 1] = [ArgMeta::required("names", "Object<Text>", "Mapping old name → new name")];
static RENAME_EXAMPLES: [&str; 1] = ["image.geetools.rename({\"B1\": \"blue\"})"];
static RENAME_RELATED: [&str; 2] = ["addPrefix", "addSuffix"];

static REMOVE_ARGS: [ArgMeta; 1] = [ArgMeta::required("bands", "List<Text>", "Bands to drop")];
static REMOVE_EXAMPLES: [&str; 1] = ["image.geetools.remove([\"B1\", \"B2\"])"];
static REMOVE_RELATED: [&str; 1] = ["rename"];

static MERGE_ARGS: [ArgMeta; 1] = [ArgMeta::required("images", "List<Image>", "Images whose bands are appended")];
static MERGE_EXAMPLES: [&str; 1] = ["image.geetools.merge([other, another])"];
static MERGE_RELATED: [&str; 1] = ["addSuffix"];

fn affix_call(func: &str, this: &Value, args: &[Value], prefix: bool) -> Result<Value, GeeError> {
    check_arity(func, args, 2)?;
    let text = require_text(args, 0, func, if prefix { "prefix" } else { "suffix" })?;
    let bands = optional_text_list(args, 1, func, "bands")?;
    let bands = bands.as_deref().map(as_strs);
    let image = Image::from_value(this.clone());
    affix(func, &image, &text, bands.as_deref(), prefix).map(Proxy::into_value)
}

impl ExtensionMethod for AddSuffix {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "addSuffix",
            kind: Kind::Image,
            description: "Append a suffix to all or some band names",
            usage: "addSuffix(suffix, bands?)",
            args: &ADD_SUFFIX_ARGS,
            returns: "Image",
            examples: &ADD_SUFFIX_EXAMPLES,
            is_static: false,
            related: &ADD_SUFFIX_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        affix_call("addSuffix", this, args, false)
    }
}

impl ExtensionMethod for AddPrefix {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "addPrefix",
            kind: Kind::Image,
            description: "Prepend a prefix to all or some band names",
            usage: "addPrefix(prefix, bands?)",
            args: &ADD_PREFIX_ARGS,
            returns: "Image",
            examples: &ADD_PREFIX_EXAMPLES,
            is_static: false,
            related: &ADD_PREFIX_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        affix_call("addPrefix", this, args, true)
    }
}

impl ExtensionMethod for Rename {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "rename",
            kind: Kind::Image,
            description: "Rename bands from an old → new mapping",
            usage: "rename(names)",
            args: &RENAME_ARGS,
            returns: "Image",
            examples: &RENAME_EXAMPLES,
            is_static: false,
            related: &RENAME_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("rename", args, 1)?;
        let names = require_text_map(args, 0, "rename", "names")?;
        rename(&Image::from_value(this.clone()), &names).map(Proxy::into_value)
    }
}

impl ExtensionMethod for Remove {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "remove",
            kind: Kind::Image,
            description: "Drop bands, keeping the order of the others",
            usage: "remove(bands)",
            args: &REMOVE_ARGS,
            returns: "Image",
            examples: &REMOVE_EXAMPLES,
            is_static: false,
            related: &REMOVE_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("remove", args, 1)?;
        let bands = require_text_list(args, 0, "remove", "bands")?;
        remove(&Image::from_value(this.clone()), &as_strs(&bands)).map(Proxy::into_value)
    }
}

impl ExtensionMethod for Merge {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "merge",
            kind: Kind::Image,
            description: "Concatenate bands of several images, suffixing repeated names",
            usage: "merge(images)",
            args: &MERGE_ARGS,
            returns: "Image",
            examples: &MERGE_EXAMPLES,
            is_static: false,
            related: &MERGE_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("merge", args, 1)?;
        let images = match require_value(args, 0, "merge", "images")? {
            Value::List(items) => items.iter().cloned().map(Image::from_value).collect::<Vec<_>>(),
            other => return Err(GeeError::arg_type("merge", "images", "List<Image>", other.type_name())),
        };
        Ok(merge(&Image::from_value(this.clone()), &images).into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_core::Evaluate;
    use geetools_testkit::fixtures;
    use serde_json::json;

    fn names(image: &Image) -> serde_json::Value {
        fixtures::evaluator().get_info(&image.band_names()).unwrap()
    }

    #[test]
    fn test_add_suffix_to_all() {
        let image = add_suffix(&fixtures::s2_image(), "_suffix", None).unwrap();
        assert_eq!(names(&image), json!(["B1_suffix", "B2_suffix", "B3_suffix"]));
    }

    #[test]
    fn test_add_suffix_to_selected() {
        let image = add_suffix(&fixtures::s2_image(), "_suffix", Some(&["B1", "B2"])).unwrap();
        assert_eq!(names(&image), json!(["B1_suffix", "B2_suffix", "B3"]));
    }

    #[test]
    fn test_add_prefix_then_strip_recovers_names() {
        let image = add_prefix(&fixtures::s2_image(), "prefix_", None).unwrap();
        let prefixed = names(&image);
        let stripped: Vec<String> = prefixed
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n.as_str().unwrap().strip_prefix("prefix_").unwrap().to_string())
            .collect();
        assert_eq!(stripped, vec!["B1", "B2", "B3"]);
    }

    #[test]
    fn test_add_prefix_rejects_empty_subset() {
        let err = add_prefix(&fixtures::s2_image(), "p_", Some(&[])).unwrap_err();
        assert_eq!(err.code, codes::EMPTY_INPUT);
    }

    #[test]
    fn test_rename_dict() {
        let mapping: BTreeMap<String, String> =
            [("B1", "newB1"), ("B2", "newB2")].iter().map(|(a, b)| (a.to_string(), b.to_string())).collect();
        let image = rename(&fixtures::s2_image(), &mapping).unwrap();
        assert_eq!(names(&image), json!(["newB1", "newB2", "B3"]));
    }

    #[test]
    fn test_rename_missing_band_fails_on_evaluation() {
        let mapping: BTreeMap<String, String> = [("B9".to_string(), "x".to_string())].into_iter().collect();
        let image = rename(&fixtures::s2_image(), &mapping).unwrap();
        assert!(fixtures::evaluator().get_info(&image.band_names()).is_err());
    }

    #[test]
    fn test_rename_rejects_duplicate_targets() {
        let mapping: BTreeMap<String, String> =
            [("B1", "x"), ("B2", "x")].iter().map(|(a, b)| (a.to_string(), b.to_string())).collect();
        let err = rename(&fixtures::s2_image(), &mapping).unwrap_err();
        assert_eq!(err.code, codes::INVALID_ARGUMENT);
    }

    #[test]
    fn test_remove_keeps_order() {
        let image = remove(&fixtures::s2_image(), &["B1", "B2"]).unwrap();
        assert_eq!(names(&image), json!(["B3"]));
        let image = remove(&fixtures::s2_image(), &["B2"]).unwrap();
        assert_eq!(names(&image), json!(["B1", "B3"]));
    }

    #[test]
    fn test_remove_everything_gives_empty_image() {
        let image = remove(&fixtures::s2_image(), &["B1", "B2", "B3"]).unwrap();
        assert_eq!(names(&image), json!([]));
    }

    #[test]
    fn test_merge_suffixes_repeats() {
        let image = fixtures::s2_image().select(vec!["B1", "B2"]);
        let merged = merge(&image, &[image.clone(), image.clone()]);
        assert_eq!(names(&merged), json!(["B1", "B2", "B1_1", "B2_1", "B1_2", "B2_2"]));
    }

    #[test]
    fn test_self_merge() {
        let image = fixtures::s2_image();
        let merged = merge(&image, &[image.clone()]);
        assert_eq!(names(&merged), json!(["B1", "B2", "B3", "B1_1", "B2_1", "B3_1"]));
    }

    #[test]
    fn test_merge_skips_names_already_taken() {
        let s2 = fixtures::s2_image();
        let image = s2.select(vec!["B1", "B2"]).rename(vec!["B1", "B1_1"]);
        let merged = merge(&image, &[s2.select(vec!["B1"])]);
        assert_eq!(names(&merged), json!(["B1", "B1_1", "B1_2"]));

        let twice = merge(&image, &[s2.select(vec!["B1"]), s2.select(vec!["B2"]).rename(vec!["B1_1"])]);
        assert_eq!(names(&twice), json!(["B1", "B1_1", "B1_2", "B1_1_1"]));
    }

    #[test]
    fn test_merge_distinct_names_untouched() {
        let a = fixtures::s2_image().select(vec!["B1"]);
        let b = fixtures::s2_image().select(vec!["B2"]);
        assert_eq!(names(&merge(&a, &[b])), json!(["B1", "B2"]));
    }

    #[test]
    fn test_method_dispatch_matches_function() {
        let image = fixtures::s2_image();
        let args = [Value::from("_x"), Value::from(vec!["B1"])];
        let via_method = AddSuffix.call(image.value(), &args).unwrap();
        let direct = add_suffix(&image, "_x", Some(&["B1"])).unwrap();
        assert_eq!(via_method, direct.into_value());
    }

    #[test]
    fn test_merge_method_requires_list() {
        let err = Merge.call(fixtures::s2_image().value(), &[Value::from("x")]).unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);
    }
}
