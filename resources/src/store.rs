use anyhow::Result;
use thiserror::Error;

use crate::{
    objects::{DaemonSet, Deployment, KubeObject, Namespace, Object, Pod, ResourceKind},
    provider::{ClusterSnapshot, StateProvider},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{} \"{name}\" not found", .kind.qualified_plural())]
    NotFound { kind: ResourceKind, name: String },
}

/// Outcome of a successful [`ResourceStore::delete`].
#[derive(Debug, Clone, PartialEq)]
pub struct Deletion {
    pub object: KubeObject,
    /// Dependent objects removed along with a namespace.
    pub cascaded: usize,
}

/// The session's view of the cluster.
///
/// Every collection keeps insertion order. Objects are never changed in place,
/// deletion is the only mutation.
#[derive(Debug, Default, Clone)]
pub struct ResourceStore {
    namespaces: Vec<Namespace>,
    pods: Vec<Pod>,
    deployments: Vec<Deployment>,
    daemon_sets: Vec<DaemonSet>,
    /// Namespace scope chosen in the table view.
    selected_namespace: Option<String>,
}

impl From<ClusterSnapshot> for ResourceStore {
    fn from(snapshot: ClusterSnapshot) -> Self {
        ResourceStore {
            namespaces: snapshot.namespaces,
            pods: snapshot.pods,
            deployments: snapshot.deployments,
            daemon_sets: snapshot.daemon_sets,
            selected_namespace: None,
        }
    }
}

impl ResourceStore {
    pub fn from_provider(provider: &dyn StateProvider) -> Result<Self> {
        let store = ResourceStore::from(provider.initial_state()?);
        tracing::debug!(
            namespaces = store.namespaces.len(),
            pods = store.pods.len(),
            deployments = store.deployments.len(),
            daemon_sets = store.daemon_sets.len(),
            "Resource store loaded"
        );
        Ok(store)
    }

    /// Objects of `kind`, optionally restricted to a namespace and an exact name.
    /// The namespace filter does not apply to namespaces themselves.
    pub fn list(
        &self,
        kind: ResourceKind,
        namespace: Option<&str>,
        name: Option<&str>,
    ) -> Vec<KubeObject> {
        tracing::debug!(%kind, ?namespace, ?name, "list");
        match kind {
            ResourceKind::Namespaces => select(&self.namespaces, name, namespace),
            ResourceKind::Pods => select(&self.pods, name, namespace),
            ResourceKind::Deployments => select(&self.deployments, name, namespace),
            ResourceKind::DaemonSets => select(&self.daemon_sets, name, namespace),
        }
    }

    /// First object in store order matching `name` (and `namespace` if given).
    pub fn find(
        &self,
        kind: ResourceKind,
        name: &str,
        namespace: Option<&str>,
    ) -> Option<KubeObject> {
        match kind {
            ResourceKind::Namespaces => first(&self.namespaces, name, namespace),
            ResourceKind::Pods => first(&self.pods, name, namespace),
            ResourceKind::Deployments => first(&self.deployments, name, namespace),
            ResourceKind::DaemonSets => first(&self.daemon_sets, name, namespace),
        }
    }

    /// Namespaces holding an object of `kind` called `name`, in store order.
    /// Always empty for namespaces.
    pub fn matching_namespaces(&self, kind: ResourceKind, name: &str) -> Vec<String> {
        self.list(kind, None, Some(name))
            .iter()
            .filter_map(|object| object.namespace().map(str::to_owned))
            .collect()
    }

    /// Remove the object [`ResourceStore::find`] resolves to.
    ///
    /// Deleting a namespace also deletes every pod, deployment and daemonset in it,
    /// and drops the namespace scope if it pointed there.
    pub fn delete(
        &mut self,
        kind: ResourceKind,
        name: &str,
        namespace: Option<&str>,
    ) -> Result<Deletion, StoreError> {
        let object = self
            .find(kind, name, namespace)
            .ok_or_else(|| StoreError::NotFound {
                kind,
                name: name.to_owned(),
            })?;
        let key = object.namespace();
        let cascaded = match kind {
            ResourceKind::Namespaces => {
                remove(&mut self.namespaces, name, key);
                self.cascade(name)
            },
            ResourceKind::Pods => {
                remove(&mut self.pods, name, key);
                0
            },
            ResourceKind::Deployments => {
                remove(&mut self.deployments, name, key);
                0
            },
            ResourceKind::DaemonSets => {
                remove(&mut self.daemon_sets, name, key);
                0
            },
        };
        tracing::info!(%kind, name, namespace = ?key, cascaded, "Deleted");
        Ok(Deletion { object, cascaded })
    }

    fn cascade(&mut self, namespace: &str) -> usize {
        let before = self.pods.len() + self.deployments.len() + self.daemon_sets.len();
        self.pods.retain(|pod| pod.namespace != namespace);
        self.deployments.retain(|deploy| deploy.namespace != namespace);
        self.daemon_sets.retain(|ds| ds.namespace != namespace);
        if self.selected_namespace.as_deref() == Some(namespace) {
            tracing::debug!(namespace, "Selected namespace deleted, clearing scope");
            self.selected_namespace = None;
        }
        before - (self.pods.len() + self.deployments.len() + self.daemon_sets.len())
    }

    /// Scope the table view to one namespace.
    pub fn select_namespace(&mut self, name: &str) -> Result<(), StoreError> {
        if first(&self.namespaces, name, None).is_none() {
            return Err(StoreError::NotFound {
                kind: ResourceKind::Namespaces,
                name: name.to_owned(),
            });
        }
        self.selected_namespace = Some(name.to_owned());
        Ok(())
    }

    pub fn selected_namespace(&self) -> Option<&str> {
        self.selected_namespace.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected_namespace = None;
    }

    /// Objects of `kind` within the selected namespace scope, if any.
    pub fn list_selected(&self, kind: ResourceKind) -> Vec<KubeObject> {
        self.list(kind, self.selected_namespace(), None)
    }

    pub fn count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Namespaces => self.namespaces.len(),
            ResourceKind::Pods => self.pods.len(),
            ResourceKind::Deployments => self.deployments.len(),
            ResourceKind::DaemonSets => self.daemon_sets.len(),
        }
    }

    /// Number of pods reporting an error.
    pub fn error_count(&self) -> usize {
        self.pods.iter().filter(|pod| pod.error.is_some()).count()
    }
}

fn matches<T: Object>(object: &T, name: Option<&str>, namespace: Option<&str>) -> bool {
    let name_matches = name.map_or(true, |name| object.name() == name);
    let namespace_matches = match (namespace, object.namespace()) {
        (Some(filter), Some(namespace)) => filter == namespace,
        _ => true,
    };
    name_matches && namespace_matches
}

fn select<T>(objects: &[T], name: Option<&str>, namespace: Option<&str>) -> Vec<KubeObject>
where
    T: Object + Clone + Into<KubeObject>,
{
    objects
        .iter()
        .filter(|object| matches(*object, name, namespace))
        .cloned()
        .map(Into::into)
        .collect()
}

fn first<T>(objects: &[T], name: &str, namespace: Option<&str>) -> Option<KubeObject>
where
    T: Object + Clone + Into<KubeObject>,
{
    objects
        .iter()
        .find(|object| matches(*object, Some(name), namespace))
        .cloned()
        .map(Into::into)
}

/// Remove the first object with this key, keeping the order of the rest.
fn remove<T: Object>(objects: &mut Vec<T>, name: &str, namespace: Option<&str>) {
    if let Some(index) = objects
        .iter()
        .position(|object| object.name() == name && object.namespace() == namespace)
    {
        objects.remove(index);
    }
}
