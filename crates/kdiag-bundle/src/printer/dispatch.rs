//! Placement rules for structured objects.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::{PrintError, PrintResult, ResolveError};
use crate::fs::Fs;
use crate::object::{Object, Rendered, TypeMeta};
use crate::placement::Placement;
use crate::scheme::KindResolver;

use super::bytes;

/// Type information for `obj`: its own if pre-resolved, otherwise looked up
/// through the resolver. Never yields an empty kind.
pub(crate) fn resolve_types<'a>(
    obj: &'a Object,
    resolver: &dyn KindResolver,
) -> PrintResult<Cow<'a, TypeMeta>> {
    if let Some(types) = obj.types.as_ref().filter(|_| obj.is_pre_resolved()) {
        return Ok(Cow::Borrowed(types));
    }

    let lookup = match obj.type_key.as_deref() {
        None => Err(ResolveError::Untyped),
        Some(key) => resolver.resolve(key).and_then(|types| {
            if types.kind.is_empty() {
                Err(ResolveError::EmptyKind {
                    type_key: key.to_string(),
                })
            } else {
                Ok(types)
            }
        }),
    };

    lookup
        .map(Cow::Owned)
        .map_err(|source| PrintError::KindResolution {
            object: obj.describe(),
            source,
        })
}

/// `{parent}/{kind}_{name}/{name}.yaml`
pub(crate) fn print_nested(
    fs: &dyn Fs,
    resolver: &dyn KindResolver,
    dir_mode: u32,
    obj: &Object,
    parent: &Path,
) -> PrintResult<PathBuf> {
    let types = resolve_types(obj, resolver)?;
    let name = obj.name().ok_or_else(|| PrintError::MissingIdentity {
        kind: types.kind.clone(),
    })?;
    let placement = Placement::nested(parent, &types.kind, name);
    bytes::write_yaml(fs, dir_mode, &placement, &Rendered::new(obj, &types))
}

/// `{parent}/{kind}.yaml`
pub(crate) fn print_flat(
    fs: &dyn Fs,
    resolver: &dyn KindResolver,
    dir_mode: u32,
    obj: &Object,
    parent: &Path,
) -> PrintResult<PathBuf> {
    let types = resolve_types(obj, resolver)?;
    let placement = Placement::flat(parent, &types.kind);
    bytes::write_yaml(fs, dir_mode, &placement, &Rendered::new(obj, &types))
}
