//! Extension method traits

use geetools_core::{GeeError, Kind, Value};
use serde::Serialize;

/// Metadata about a method argument
#[derive(Debug, Clone, Serialize)]
pub struct ArgMeta {
    pub name: &'static str,
    pub typ: &'static str,
    pub description: &'static str,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl ArgMeta {
    pub const fn required(name: &'static str, typ: &'static str, description: &'static str) -> Self {
        Self { name, typ, description, optional: false, default: None }
    }

    pub const fn optional(name: &'static str, typ: &'static str, description: &'static str, default: &'static str) -> Self {
        Self { name, typ, description, optional: true, default: Some(default) }
    }
}

/// Metadata for an extension method
#[derive(Debug, Clone, Serialize)]
pub struct MethodMeta {
    /// Name as exposed in the bundle, e.g. `addSuffix`
    pub name: &'static str,
    /// Kind the method attaches to
    pub kind: Kind,
    pub description: &'static str,
    pub usage: &'static str,
    pub args: &'static [ArgMeta],
    pub returns: &'static str,
    pub examples: &'static [&'static str],
    /// Called on the kind itself rather than on a handle (`Image.geetools.full`)
    pub is_static: bool,
    pub related: &'static [&'static str],
}

/// Helper method attached to a proxy kind.
///
/// `this` is the receiver's expression node (null for static methods);
/// `args` are the positional arguments. Implementations validate literal
/// arguments and return the new node, never evaluating anything.
pub trait ExtensionMethod: Send + Sync {
    fn meta(&self) -> MethodMeta;
    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError>;
}
