use resources::{
    objects::{Object, ResourceKind},
    store::ResourceStore,
};

use crate::table::render_table;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    /// Kind of resource
    pub kind: ResourceKind,
    /// Name of resource
    pub name: Option<String>,
    /// Namespace to list from, all namespaces if unset
    pub namespace: Option<String>,
}

impl Arg {
    pub fn handle(&self, store: &ResourceStore) -> String {
        let objects = store.list(self.kind, self.namespace.as_deref(), self.name.as_deref());
        if objects.is_empty() {
            return match self.namespace {
                Some(ref namespace) if self.kind.is_namespaced() => {
                    format!("No resources found in {} namespace.", namespace)
                },
                _ => "No resources found.".to_string(),
            };
        }
        let rows: Vec<Vec<String>> = objects.iter().map(Object::row).collect();
        render_table(self.kind.headers(), &rows)
    }
}
