//! Kind resolution for objects that arrive without type information.

use std::collections::HashMap;

use crate::error::ResolveError;
use crate::object::TypeMeta;

/// Maps a type key to its `apiVersion`/`kind`.
///
/// Only consulted for objects that are not pre-resolved.
pub trait KindResolver {
    fn resolve(&self, type_key: &str) -> Result<TypeMeta, ResolveError>;
}

impl<R: KindResolver + ?Sized> KindResolver for &R {
    fn resolve(&self, type_key: &str) -> Result<TypeMeta, ResolveError> {
        (**self).resolve(type_key)
    }
}

impl<R: KindResolver + ?Sized> KindResolver for Box<R> {
    fn resolve(&self, type_key: &str) -> Result<TypeMeta, ResolveError> {
        (**self).resolve(type_key)
    }
}

/// In-memory type registry.
///
/// ```
/// use kdiag_bundle::scheme::{KindResolver, Scheme};
///
/// let scheme = Scheme::new().with("core/v1.Pod", "v1", "Pod");
/// assert_eq!(scheme.resolve("core/v1.Pod").unwrap().kind, "Pod");
/// assert!(scheme.resolve("core/v1.Widget").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    types: HashMap<String, TypeMeta>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        type_key: impl Into<String>,
        api_version: impl Into<String>,
        kind: impl Into<String>,
    ) {
        self.types
            .insert(type_key.into(), TypeMeta::new(api_version, kind));
    }

    pub fn with(
        mut self,
        type_key: impl Into<String>,
        api_version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        self.register(type_key, api_version, kind);
        self
    }

    pub fn is_registered(&self, type_key: &str) -> bool {
        self.types.contains_key(type_key)
    }
}

impl KindResolver for Scheme {
    fn resolve(&self, type_key: &str) -> Result<TypeMeta, ResolveError> {
        self.types
            .get(type_key)
            .cloned()
            .ok_or_else(|| ResolveError::NotRegistered {
                type_key: type_key.to_string(),
            })
    }
}
