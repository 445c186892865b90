//! Structured objects as returned by a cluster API.
//!
//! An [`Object`] is a loosely-typed manifest: type information, identity
//! metadata and the remaining document body. Objects fetched through typed
//! clients usually arrive without `apiVersion`/`kind`; those carry a
//! `type_key` instead and get their kind from a
//! [`KindResolver`](crate::scheme::KindResolver) at print time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// `apiVersion` + `kind`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMeta {
    #[serde(rename = "apiVersion", default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

impl TypeMeta {
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
        }
    }
}

/// Identity metadata (`metadata:` block).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    /// Anything else the server sent (uid, resourceVersion, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ObjectMeta {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A single structured object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Object {
    #[serde(flatten)]
    pub types: Option<TypeMeta>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,

    /// Registry key for kind resolution. Never serialized.
    #[serde(skip)]
    pub type_key: Option<String>,

    /// Document body (`spec`, `status`, `data`, ...).
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl Object {
    /// An object that already knows its kind.
    pub fn new(
        api_version: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            types: Some(TypeMeta::new(api_version, kind)),
            metadata: Some(ObjectMeta::named(name)),
            ..Self::default()
        }
    }

    /// An object whose kind must be looked up under `type_key`.
    pub fn untyped(type_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: Some(ObjectMeta::named(name)),
            type_key: Some(type_key.into()),
            ..Self::default()
        }
    }

    /// Parse an object from API server JSON.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        let mut obj: Self = serde_json::from_slice(bytes)?;
        // An absent apiVersion/kind pair deserializes as an empty TypeMeta.
        if obj
            .types
            .as_ref()
            .is_some_and(|t| t.kind.is_empty() && t.api_version.is_empty())
        {
            obj.types = None;
        }
        Ok(obj)
    }

    pub fn with_type_key(mut self, type_key: impl Into<String>) -> Self {
        self.type_key = Some(type_key.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.metadata.get_or_insert_with(ObjectMeta::default).namespace = Some(namespace.into());
        self
    }

    /// Set a top-level body field such as `spec` or `status`.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.body.insert(key.into(), value);
        self
    }

    /// The kind, if the object carries one.
    pub fn kind(&self) -> Option<&str> {
        self.types
            .as_ref()
            .map(|t| t.kind.as_str())
            .filter(|k| !k.is_empty())
    }

    /// `metadata.name`, if present and non-empty.
    pub fn name(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .filter(|n| !n.is_empty())
    }

    /// True when the object already carries a usable kind and must not be
    /// re-resolved through a registry.
    pub fn is_pre_resolved(&self) -> bool {
        self.kind().is_some()
    }

    /// A short label for error messages.
    pub(crate) fn describe(&self) -> String {
        match (self.name(), self.type_key.as_deref()) {
            (Some(name), _) => name.to_string(),
            (None, Some(key)) => format!("<unnamed {}>", key),
            (None, None) => "<unnamed object>".to_string(),
        }
    }
}

/// Borrowed view of an object with resolved type information, in the field
/// order the YAML output uses.
#[derive(Serialize)]
pub(crate) struct Rendered<'a> {
    #[serde(flatten)]
    pub types: &'a TypeMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a ObjectMeta>,
    #[serde(flatten)]
    pub body: &'a Map<String, Value>,
}

impl<'a> Rendered<'a> {
    pub(crate) fn new(obj: &'a Object, types: &'a TypeMeta) -> Self {
        Self {
            types,
            metadata: obj.metadata.as_ref(),
            body: &obj.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_with_types() {
        let obj = Object::from_json(
            br#"{"apiVersion":"v1","kind":"Pod","metadata":{"name":"web-1","uid":"abc"},"spec":{"nodeName":"n1"}}"#,
        )
        .unwrap();

        assert_eq!(obj.kind(), Some("Pod"));
        assert_eq!(obj.name(), Some("web-1"));
        assert!(obj.is_pre_resolved());
        assert_eq!(obj.body["spec"]["nodeName"], "n1");
        assert_eq!(obj.metadata.unwrap().extra["uid"], "abc");
    }

    #[test]
    fn test_from_json_without_types() {
        let obj = Object::from_json(br#"{"metadata":{"name":"web-1"},"spec":{}}"#).unwrap();
        assert!(obj.types.is_none());
        assert!(!obj.is_pre_resolved());
    }

    #[test]
    fn test_empty_name_is_no_name() {
        let obj = Object::new("v1", "Pod", "");
        assert_eq!(obj.name(), None);
    }

    #[test]
    fn test_rendered_field_order() {
        let obj = Object::untyped("core/v1.Service", "api")
            .with_namespace("default")
            .with_field("spec", json!({"port": 80}));
        let types = TypeMeta::new("v1", "Service");

        let yaml = serde_yaml::to_string(&Rendered::new(&obj, &types)).unwrap();

        assert!(yaml.starts_with("apiVersion: v1\nkind: Service\nmetadata:\n"));
        assert!(yaml.contains("  name: api\n"));
        assert!(yaml.contains("  namespace: default\n"));
        assert!(yaml.contains("spec:\n  port: 80\n"));
        assert!(!yaml.contains("core/v1.Service"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(Object::untyped("k", "n").describe(), "n");
        let mut anon = Object::untyped("v1.Thing", "");
        assert_eq!(anon.describe(), "<unnamed v1.Thing>");
        anon.type_key = None;
        assert_eq!(anon.describe(), "<unnamed object>");
    }
}
