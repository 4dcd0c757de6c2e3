//! Small fixed clusters for unit tests.

use resources::{
    objects::{
        Age, DaemonSet, Deployment, Namespace, NamespacePhase, Pod, PodErrorType, PodStatus,
        ReadyCount,
    },
    provider::ClusterSnapshot,
    store::ResourceStore,
};

pub fn namespace(name: &str) -> Namespace {
    Namespace {
        name: name.to_string(),
        status: NamespacePhase::Active,
        age: Age::new(12, 4, 0),
    }
}

pub fn pod(name: &str, namespace: &str) -> Pod {
    Pod {
        name: name.to_string(),
        namespace: namespace.to_string(),
        status: PodStatus::Running,
        ready: ReadyCount::new(2, 2),
        restarts: 0,
        age: Age::new(0, 5, 12),
        node: Some("node-1".to_string()),
        error: None,
        error_message: None,
    }
}

pub fn failing_pod(name: &str, namespace: &str) -> Pod {
    Pod {
        status: PodStatus::Failed,
        ready: ReadyCount::new(0, 2),
        restarts: 4,
        error: Some(PodErrorType::OomKilled),
        error_message: Some(PodErrorType::OomKilled.message().to_string()),
        ..pod(name, namespace)
    }
}

pub fn deployment(name: &str, namespace: &str) -> Deployment {
    Deployment {
        name: name.to_string(),
        namespace: namespace.to_string(),
        ready: ReadyCount::new(1, 3),
        up_to_date: 2,
        available: 1,
        age: Age::new(4, 1, 0),
    }
}

pub fn daemon_set(name: &str, namespace: &str) -> DaemonSet {
    DaemonSet {
        name: name.to_string(),
        namespace: namespace.to_string(),
        desired: 3,
        current: 3,
        ready: 2,
        up_to_date: 3,
        available: 2,
        age: Age::new(0, 0, 40),
    }
}

/// `default` holds two pods and a deployment, `staging` repeats the pod name
/// `web-server-1234-567` and runs the only daemonset.
pub fn store() -> ResourceStore {
    ResourceStore::from(ClusterSnapshot {
        namespaces: vec![namespace("default"), namespace("staging")],
        pods: vec![
            pod("web-server-1234-567", "default"),
            failing_pod("cache-service-2000-300", "default"),
            pod("web-server-1234-567", "staging"),
        ],
        deployments: vec![deployment("web-deployment-1", "default")],
        daemon_sets: vec![daemon_set("fluentd", "staging")],
    })
}
