use resources::{
    objects::{Object, ResourceKind},
    store::ResourceStore,
};

use crate::{error::CommandError, utils::lookup};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    /// Kind of resource
    pub kind: ResourceKind,
    /// Name of resource
    pub name: String,
    /// Namespace the resource lives in
    pub namespace: Option<String>,
}

impl Arg {
    pub fn handle(&self, store: &mut ResourceStore) -> Result<String, CommandError> {
        let object = lookup(store, self.kind, &self.name, self.namespace.as_deref())?;
        // remove exactly what the lookup resolved to
        store.delete(self.kind, object.name(), object.namespace())?;
        Ok(format!(
            "{} \"{}\" deleted",
            self.kind.qualified_singular(),
            self.name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn arg(kind: ResourceKind, name: &str, namespace: Option<&str>) -> Arg {
        Arg {
            kind,
            name: name.to_string(),
            namespace: namespace.map(str::to_owned),
        }
    }

    #[test]
    fn confirmations_use_api_names() {
        let mut store = testing::store();
        assert_eq!(
            arg(ResourceKind::Deployments, "web-deployment-1", None).handle(&mut store),
            Ok("deployment.apps \"web-deployment-1\" deleted".to_string())
        );
        assert_eq!(
            arg(ResourceKind::DaemonSets, "fluentd", None).handle(&mut store),
            Ok("daemonset.apps \"fluentd\" deleted".to_string())
        );
        assert_eq!(
            arg(ResourceKind::Pods, "cache-service-2000-300", None).handle(&mut store),
            Ok("pod \"cache-service-2000-300\" deleted".to_string())
        );
        assert_eq!(
            arg(ResourceKind::Namespaces, "staging", None).handle(&mut store),
            Ok("namespace \"staging\" deleted".to_string())
        );
    }

    #[test]
    fn deletes_in_the_given_namespace_only() {
        let mut store = testing::store();
        arg(ResourceKind::Pods, "web-server-1234-567", Some("staging"))
            .handle(&mut store)
            .unwrap();
        assert!(store
            .find(ResourceKind::Pods, "web-server-1234-567", Some("staging"))
            .is_none());
        assert!(store
            .find(ResourceKind::Pods, "web-server-1234-567", Some("default"))
            .is_some());
    }

    #[test]
    fn second_delete_is_not_found() {
        let mut store = testing::store();
        let delete = arg(ResourceKind::DaemonSets, "fluentd", None);
        delete.handle(&mut store).unwrap();
        assert_eq!(
            delete.handle(&mut store),
            Err(CommandError::NotFound {
                kind: ResourceKind::DaemonSets,
                name: "fluentd".to_string()
            })
        );
    }

    #[test]
    fn ambiguous_name_deletes_nothing() {
        let mut store = testing::store();
        let result = arg(ResourceKind::Pods, "web-server-1234-567", None).handle(&mut store);
        assert!(matches!(result, Err(CommandError::AmbiguousName { .. })));
        assert_eq!(store.count(ResourceKind::Pods), 3);
    }
}
