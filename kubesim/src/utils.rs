use resources::{
    objects::{KubeObject, ResourceKind},
    store::ResourceStore,
};

use crate::error::CommandError;

/// Resolve the single object a `describe` or `delete` refers to.
///
/// Without `-n`, a name present in several namespaces is rejected instead of
/// silently picking the first one.
pub fn lookup(
    store: &ResourceStore,
    kind: ResourceKind,
    name: &str,
    namespace: Option<&str>,
) -> Result<KubeObject, CommandError> {
    if namespace.is_none() {
        let namespaces = store.matching_namespaces(kind, name);
        if namespaces.len() > 1 {
            tracing::warn!(%kind, name, ?namespaces, "Name is ambiguous across namespaces");
            return Err(CommandError::AmbiguousName {
                kind,
                name: name.to_owned(),
                namespaces,
            });
        }
    }
    store
        .find(kind, name, namespace)
        .ok_or_else(|| CommandError::NotFound {
            kind,
            name: name.to_owned(),
        })
}
