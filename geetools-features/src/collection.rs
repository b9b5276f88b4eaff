//! Feature collection helpers: ids, enumeration, options, geometry merging

use geetools_plugin::prelude::*;

fn validate_name(func: &str, arg: &str, name: &str) -> Result<(), GeeError> {
    if name.is_empty() {
        return Err(GeeError::empty_input(func, arg));
    }
    Ok(())
}

fn features(collection: &FeatureCollection) -> EeList {
    collection.to_list(collection.size())
}

/// Number the features `start, start + 1, ...` in iteration order under
/// property `name`
pub fn add_id(collection: &FeatureCollection, name: &str, start: i64) -> Result<FeatureCollection, GeeError> {
    validate_name("addId", "name", name)?;
    let numbered = features(collection).iterate(
        |feature, acc| {
            let acc = EeList::new(acc);
            let id = EeNumber::new(start).add(acc.size());
            acc.add(feature.cast::<Feature>().set(name, id))
        },
        Value::List(vec![]),
    );
    Ok(FeatureCollection::new(numbered))
}

/// 0-based position under property `name`, pairing each feature with its
/// index
pub fn enumerate_property(collection: &FeatureCollection, name: &str) -> Result<FeatureCollection, GeeError> {
    validate_name("enumerateProperty", "name", name)?;
    let list = features(collection);
    let pairs = EeList::sequence(0, list.size().subtract(1)).zip(list);
    let enumerated = pairs.map(|pair| {
        let pair = pair.cast::<EeList>();
        pair.get(1).cast::<Feature>().set(name, pair.get(0))
    });
    Ok(FeatureCollection::new(enumerated))
}

/// 0-based position under property `name`, looked up by index. The
/// collection's own properties are kept. Positions follow the current
/// iteration order, so they change if the collection is reordered.
pub fn enumerate_simple(collection: &FeatureCollection, name: &str) -> Result<FeatureCollection, GeeError> {
    validate_name("enumerateSimple", "name", name)?;
    let list = features(collection);
    let enumerated = EeList::sequence(0, collection.size().subtract(1)).map(|n| {
        list.get(n.clone())
            .cast::<Feature>()
            .set(name, EeNumber::new(n).to_int())
    });
    Ok(FeatureCollection::new(enumerated).copy_properties(collection))
}

/// Distinct values of `property` across the collection
pub fn list_options(collection: &FeatureCollection, property: &str) -> Result<EeList, GeeError> {
    validate_name("listOptions", "property", property)?;
    let values = collection.iterate(
        |feature, acc| EeList::new(acc).add(feature.cast::<Feature>().get(property)),
        Value::List(vec![]),
    );
    Ok(EeList::new(values).distinct())
}

/// Union of all feature geometries, dissolved step by step. Evaluating the
/// result of an empty collection fails.
pub fn merge_geometries(collection: &FeatureCollection) -> Geometry {
    let list = features(collection);
    let first = list.get(0).cast::<Feature>();
    let merged = list.slice(1, Value::Null).iterate(
        |feature, acc| {
            Geometry::new(acc)
                .union(&feature.cast::<Feature>().geometry())
                .dissolve()
        },
        first.geometry(),
    );
    merged.cast()
}

/// Split features whose geometry is a `GeometryCollection` into one feature
/// per inner geometry, copying the properties. Other features pass through
/// first, then the split ones. Every feature gets a `GTYPE` property with
/// its original geometry type.
pub fn clean(collection: &FeatureCollection) -> FeatureCollection {
    let typed = collection.map(|feature| {
        let feature = feature.cast::<Feature>();
        feature.set("GTYPE", feature.geometry().geometry_type())
    });
    let multi = typed.filter(Filter::eq("GTYPE", "GeometryCollection"));
    let single = typed.filter(Filter::neq("GTYPE", "GeometryCollection"));

    let exploded = multi.iterate(
        |feature, acc| {
            let feature = feature.cast::<Feature>();
            let parts = feature
                .geometry()
                .geometries()
                .map(|part| Feature::new(part, Value::Null).copy_properties(&feature, Value::Null));
            acc.cast::<FeatureCollection>().merge(&FeatureCollection::new(parts))
        },
        FeatureCollection::new(Value::List(vec![])),
    );
    single.merge(&exploded.cast())
}

// ============================================================================
// Extension methods
// ============================================================================

pub struct AddId;
pub struct EnumerateProperty;
pub struct EnumerateSimple;
pub struct ListOptions;
pub struct MergeGeometries;
pub struct Clean;

static ADD_ID_ARGS: [ArgMeta; 2] = [
    ArgMeta::optional("name", "Text", "Property receiving the id", "\"id\""),
    ArgMeta::optional("start", "Integer", "First id", "1"),
];
static ADD_ID_EXAMPLES: [&str; 2] = ["fc.geetools.addId()", "fc.geetools.addId(\"fid\", 0)"];
static ADD_ID_RELATED: [&str; 2] = ["enumerateProperty", "enumerateSimple"];

static ENUMERATE_PROPERTY_ARGS: [ArgMeta; 1] =
    [ArgMeta::optional("name", "Text", "Property receiving the index", "\"enumeration\"")];
static ENUMERATE_PROPERTY_EXAMPLES: [&str; 1] = ["fc.geetools.enumerateProperty()"];
static ENUMERATE_PROPERTY_RELATED: [&str; 2] = ["addId", "enumerateSimple"];

static ENUMERATE_SIMPLE_ARGS: [ArgMeta; 1] =
    [ArgMeta::optional("name", "Text", "Property receiving the index", "\"ENUM\"")];
static ENUMERATE_SIMPLE_EXAMPLES: [&str; 1] = ["fc.geetools.enumerateSimple(\"pos\")"];
static ENUMERATE_SIMPLE_RELATED: [&str; 2] = ["addId", "enumerateProperty"];

static LIST_OPTIONS_ARGS: [ArgMeta; 1] = [ArgMeta::required("property", "Text", "Property to collect")];
static LIST_OPTIONS_EXAMPLES: [&str; 1] = ["fc.geetools.listOptions(\"landcover\")"];
static LIST_OPTIONS_RELATED: [&str; 0] = [];

static MERGE_GEOMETRIES_ARGS: [ArgMeta; 0] = [];
static MERGE_GEOMETRIES_EXAMPLES: [&str; 1] = ["fc.geetools.mergeGeometries()"];
static MERGE_GEOMETRIES_RELATED: [&str; 1] = ["clean"];

static CLEAN_ARGS: [ArgMeta; 0] = [];
static CLEAN_EXAMPLES: [&str; 1] = ["fc.geetools.clean()"];
static CLEAN_RELATED: [&str; 1] = ["mergeGeometries"];

fn receiver(this: &Value) -> FeatureCollection {
    FeatureCollection::from_value(this.clone())
}

impl ExtensionMethod for AddId {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "addId",
            kind: Kind::FeatureCollection,
            description: "Number features from a start value in iteration order",
            usage: "addId(name?, start?)",
            args: &ADD_ID_ARGS,
            returns: "FeatureCollection",
            examples: &ADD_ID_EXAMPLES,
            is_static: false,
            related: &ADD_ID_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("addId", args, 2)?;
        let name = optional_text(args, 0, "addId", "name")?.unwrap_or_else(|| "id".to_string());
        let start = optional_int(args, 1, "addId", "start")?.unwrap_or(1);
        add_id(&receiver(this), &name, start).map(Proxy::into_value)
    }
}

impl ExtensionMethod for EnumerateProperty {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "enumerateProperty",
            kind: Kind::FeatureCollection,
            description: "Store each feature's 0-based position in a property",
            usage: "enumerateProperty(name?)",
            args: &ENUMERATE_PROPERTY_ARGS,
            returns: "FeatureCollection",
            examples: &ENUMERATE_PROPERTY_EXAMPLES,
            is_static: false,
            related: &ENUMERATE_PROPERTY_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("enumerateProperty", args, 1)?;
        let name = optional_text(args, 0, "enumerateProperty", "name")?.unwrap_or_else(|| "enumeration".to_string());
        enumerate_property(&receiver(this), &name).map(Proxy::into_value)
    }
}

impl ExtensionMethod for EnumerateSimple {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "enumerateSimple",
            kind: Kind::FeatureCollection,
            description: "Store each feature's 0-based position, keeping collection properties",
            usage: "enumerateSimple(name?)",
            args: &ENUMERATE_SIMPLE_ARGS,
            returns: "FeatureCollection",
            examples: &ENUMERATE_SIMPLE_EXAMPLES,
            is_static: false,
            related: &ENUMERATE_SIMPLE_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("enumerateSimple", args, 1)?;
        let name = optional_text(args, 0, "enumerateSimple", "name")?.unwrap_or_else(|| "ENUM".to_string());
        enumerate_simple(&receiver(this), &name).map(Proxy::into_value)
    }
}

impl ExtensionMethod for ListOptions {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "listOptions",
            kind: Kind::FeatureCollection,
            description: "Distinct values of a property",
            usage: "listOptions(property)",
            args: &LIST_OPTIONS_ARGS,
            returns: "List",
            examples: &LIST_OPTIONS_EXAMPLES,
            is_static: false,
            related: &LIST_OPTIONS_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("listOptions", args, 1)?;
        let property = require_text(args, 0, "listOptions", "property")?;
        list_options(&receiver(this), &property).map(Proxy::into_value)
    }
}

impl ExtensionMethod for MergeGeometries {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "mergeGeometries",
            kind: Kind::FeatureCollection,
            description: "Union of all feature geometries",
            usage: "mergeGeometries()",
            args: &MERGE_GEOMETRIES_ARGS,
            returns: "Geometry",
            examples: &MERGE_GEOMETRIES_EXAMPLES,
            is_static: false,
            related: &MERGE_GEOMETRIES_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("mergeGeometries", args, 0)?;
        Ok(merge_geometries(&receiver(this)).into_value())
    }
}

impl ExtensionMethod for Clean {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "clean",
            kind: Kind::FeatureCollection,
            description: "Split geometry collections into one feature per geometry",
            usage: "clean()",
            args: &CLEAN_ARGS,
            returns: "FeatureCollection",
            examples: &CLEAN_EXAMPLES,
            is_static: false,
            related: &CLEAN_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("clean", args, 0)?;
        Ok(clean(&receiver(this)).into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_core::Evaluate;
    use geetools_testkit::fixtures;
    use serde_json::json;

    fn property(fc: &FeatureCollection, name: &str) -> serde_json::Value {
        let values = fc.to_list(fc.size()).map(|f| f.cast::<Feature>().get(name));
        fixtures::evaluator().get_info(&values).unwrap()
    }

    #[test]
    fn test_add_id_defaults() {
        let fc = add_id(&fixtures::vatican_features(), "id", 1).unwrap();
        assert_eq!(property(&fc, "id"), json!([1, 2]));
        assert_eq!(property(&fc, "name"), json!(["north", "south"]));
    }

    #[test]
    fn test_add_id_custom_start() {
        let fc = add_id(&fixtures::vatican_features(), "fid", 10).unwrap();
        assert_eq!(property(&fc, "fid"), json!([10, 11]));
    }

    #[test]
    fn test_add_id_on_empty_collection() {
        let empty = FeatureCollection::new(Value::List(vec![]));
        let fc = add_id(&empty, "id", 1).unwrap();
        assert_eq!(fixtures::evaluator().get_info(&fc.size()).unwrap(), json!(0));
    }

    #[test]
    fn test_add_id_rejects_empty_name() {
        let err = add_id(&fixtures::vatican_features(), "", 1).unwrap_err();
        assert_eq!(err.code, codes::EMPTY_INPUT);
    }

    #[test]
    fn test_enumerate_property() {
        let fc = enumerate_property(&fixtures::vatican_features(), "enumeration").unwrap();
        assert_eq!(property(&fc, "enumeration"), json!([0, 1]));
    }

    #[test]
    fn test_enumerate_simple_keeps_collection_properties() {
        let source = fixtures::vatican_features().set("origin", "fixture");
        let fc = enumerate_simple(&source, "ENUM").unwrap();
        assert_eq!(property(&fc, "ENUM"), json!([0, 1]));
        assert_eq!(fixtures::evaluator().get_info(&fc.get("origin")).unwrap(), json!("fixture"));
    }

    #[test]
    fn test_list_options() {
        let fc = fixtures::vatican_features();
        let doubled = fc.merge(&fc);
        let options = list_options(&doubled, "name").unwrap();
        assert_eq!(fixtures::evaluator().get_info(&options).unwrap(), json!(["north", "south"]));
    }

    #[test]
    fn test_merge_geometries_keeps_disjoint_parts() {
        let ev = fixtures::evaluator();
        let merged = merge_geometries(&fixtures::vatican_features());
        assert_eq!(ev.get_info(&merged.geometry_type()).unwrap(), json!("GeometryCollection"));
        assert_eq!(ev.get_info(&merged.geometries().size()).unwrap(), json!(2));
    }

    #[test]
    fn test_merge_geometries_dissolves_overlaps() {
        let ev = fixtures::evaluator();
        let fc = FeatureCollection::new(Value::List(vec![
            Feature::new(Geometry::rectangle(0.0, 0.0, 2.0, 2.0), Value::Null).into(),
            Feature::new(Geometry::rectangle(1.0, 1.0, 3.0, 3.0), Value::Null).into(),
            Feature::new(Geometry::rectangle(2.5, 2.5, 4.0, 4.0), Value::Null).into(),
        ]));
        let merged = merge_geometries(&fc);
        assert_eq!(ev.get_info(&merged.geometry_type()).unwrap(), json!("Polygon"));
    }

    #[test]
    fn test_merge_geometries_of_empty_collection_fails_on_evaluation() {
        let empty = FeatureCollection::new(Value::List(vec![]));
        assert!(fixtures::evaluator().get_info(&merge_geometries(&empty)).is_err());
    }

    #[test]
    fn test_clean_explodes_geometry_collections() {
        let fc = clean(&fixtures::mixed_features());
        assert_eq!(property(&fc, "kind"), json!(["single", "multi", "multi"]));
        assert_eq!(property(&fc, "GTYPE"), json!(["Point", "GeometryCollection", "GeometryCollection"]));
        let types = fc.to_list(10).map(|f| f.cast::<Feature>().geometry().geometry_type());
        assert_eq!(fixtures::evaluator().get_info(&types).unwrap(), json!(["Point", "Point", "Point"]));
    }

    #[test]
    fn test_dynamic_add_id_defaults() {
        let fc = fixtures::vatican_features();
        let via_method = AddId.call(fc.value(), &[]).unwrap();
        assert_eq!(via_method, add_id(&fc, "id", 1).unwrap().into_value());
    }
}
