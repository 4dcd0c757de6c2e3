//! Demo cluster generator.
//!
//! Produces a plausible, partly broken cluster: about half of the pods carry an
//! error, deployments are mid-rollout and daemonsets are not fully ready.

use std::collections::HashSet;

use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    objects::{
        Age, DaemonSet, Deployment, Namespace, NamespacePhase, Pod, PodErrorType, PodStatus,
        ReadyCount,
    },
    provider::{ClusterSnapshot, StateProvider},
};

const NAMESPACES: [&str; 6] = [
    "default",
    "kube-system",
    "production",
    "staging",
    "monitoring",
    "logging",
];

const POD_NAMES: [&str; 15] = [
    "web-server",
    "api-gateway",
    "auth-service",
    "database-proxy",
    "cache-service",
    "worker-pool",
    "scheduler",
    "notifier",
    "analytics",
    "frontend",
    "backend-api",
    "message-queue",
    "file-storage",
    "search-engine",
    "load-balancer",
];

const DEPLOYMENT_NAMES: [&str; 6] = [
    "web-deployment",
    "api-deployment",
    "auth-deployment",
    "worker-deployment",
    "frontend-deployment",
    "backend-deployment",
];

const DAEMON_SET_NAMES: [&str; 4] = ["fluentd", "node-exporter", "log-collector", "network-proxy"];

const POD_ERRORS: [PodErrorType; 8] = [
    PodErrorType::OomKilled,
    PodErrorType::CpuThrottled,
    PodErrorType::ImagePullBackOff,
    PodErrorType::ErrImagePull,
    PodErrorType::Unschedulable,
    PodErrorType::CrashLoopBackOff,
    PodErrorType::ContainerCreating,
    PodErrorType::InitError,
];

/// Every simulated node runs one daemon pod.
const NODE_COUNT: u32 = 3;
const CONTAINERS_PER_POD: u32 = 2;

/// Random cluster, reproducible when seeded.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCluster {
    seed: Option<u64>,
}

impl RandomCluster {
    pub fn new(seed: Option<u64>) -> Self {
        RandomCluster { seed }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl StateProvider for RandomCluster {
    fn initial_state(&self) -> Result<ClusterSnapshot> {
        let mut rng = self.rng();
        let snapshot = ClusterSnapshot {
            namespaces: generate_namespaces(&mut rng),
            pods: generate_pods(&mut rng),
            deployments: generate_deployments(&mut rng),
            daemon_sets: generate_daemon_sets(&mut rng),
        };
        tracing::debug!(seed = ?self.seed, pods = snapshot.pods.len(), "Generated cluster");
        Ok(snapshot)
    }
}

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn random_age<R: Rng>(rng: &mut R) -> Age {
    Age::new(
        rng.gen_range(0..=30),
        rng.gen_range(0..=23),
        rng.gen_range(0..=59),
    )
}

/// Draw names until one is unused within the namespace.
fn unique_name<R: Rng>(
    rng: &mut R,
    taken: &mut HashSet<String>,
    mut draw: impl FnMut(&mut R) -> String,
) -> String {
    loop {
        let name = draw(rng);
        if taken.insert(name.clone()) {
            return name;
        }
    }
}

fn generate_namespaces<R: Rng>(rng: &mut R) -> Vec<Namespace> {
    NAMESPACES
        .iter()
        .map(|name| Namespace {
            name: name.to_string(),
            status: NamespacePhase::Active,
            age: random_age(rng),
        })
        .collect()
}

fn generate_pods<R: Rng>(rng: &mut R) -> Vec<Pod> {
    let mut pods = vec![];
    for namespace in NAMESPACES {
        let mut taken = HashSet::new();
        for _ in 0..rng.gen_range(3..=8) {
            let name = unique_name(rng, &mut taken, |rng| {
                format!(
                    "{}-{}-{}",
                    pick(rng, &POD_NAMES),
                    rng.gen_range(1000..=9999),
                    rng.gen_range(100..=999)
                )
            });
            pods.push(generate_pod(rng, name, namespace));
        }
    }
    pods
}

fn generate_pod<R: Rng>(rng: &mut R, name: String, namespace: &str) -> Pod {
    let error = if rng.gen_bool(0.5) {
        Some(POD_ERRORS[rng.gen_range(0..POD_ERRORS.len())])
    } else {
        None
    };

    let (status, restarts) = match error {
        Some(PodErrorType::OomKilled) => (PodStatus::Failed, rng.gen_range(3..=15)),
        Some(PodErrorType::CpuThrottled) => (PodStatus::Running, 0),
        Some(PodErrorType::ImagePullBackOff | PodErrorType::ErrImagePull) => {
            (PodStatus::Pending, 0)
        },
        Some(PodErrorType::Unschedulable | PodErrorType::ContainerCreating) => {
            (PodStatus::Pending, 0)
        },
        Some(PodErrorType::CrashLoopBackOff) => {
            (PodStatus::CrashLoopBackOff, rng.gen_range(5..=20))
        },
        Some(PodErrorType::InitError) => (PodStatus::Pending, rng.gen_range(1..=5)),
        None if rng.gen_bool(0.2) => (PodStatus::Running, rng.gen_range(0..=2)),
        None => (PodStatus::Running, 0),
    };

    let ready = match (status, error) {
        (PodStatus::Running, None) => rng.gen_range(1..=CONTAINERS_PER_POD),
        (PodStatus::Running, Some(PodErrorType::CpuThrottled)) => CONTAINERS_PER_POD,
        _ => 0,
    };

    Pod {
        name,
        namespace: namespace.to_string(),
        status,
        ready: ReadyCount::new(ready, CONTAINERS_PER_POD),
        restarts,
        age: random_age(rng),
        node: Some(format!("node-{}", rng.gen_range(1..=NODE_COUNT))),
        error,
        error_message: error.map(|e| e.message().to_string()),
    }
}

fn generate_deployments<R: Rng>(rng: &mut R) -> Vec<Deployment> {
    let mut deployments = vec![];
    for namespace in NAMESPACES {
        let mut taken = HashSet::new();
        for _ in 0..rng.gen_range(1..=3) {
            let name = unique_name(rng, &mut taken, |rng| {
                format!("{}-{}", pick(rng, &DEPLOYMENT_NAMES), rng.gen_range(1..=5))
            });
            let replicas = rng.gen_range(2..=5);
            let up_to_date = rng.gen_range(0..=replicas);
            let available = rng.gen_range(0..=up_to_date);
            deployments.push(Deployment {
                name,
                namespace: namespace.to_string(),
                ready: ReadyCount::new(available, replicas),
                up_to_date,
                available,
                age: random_age(rng),
            });
        }
    }
    deployments
}

fn generate_daemon_sets<R: Rng>(rng: &mut R) -> Vec<DaemonSet> {
    let mut daemon_sets = vec![];
    for namespace in NAMESPACES {
        if !rng.gen_bool(0.4) {
            continue;
        }
        let current = rng.gen_range(2..=NODE_COUNT);
        let ready = rng.gen_range(1..=current);
        daemon_sets.push(DaemonSet {
            name: pick(rng, &DAEMON_SET_NAMES).to_string(),
            namespace: namespace.to_string(),
            desired: NODE_COUNT,
            current,
            ready,
            up_to_date: current,
            available: ready,
            age: random_age(rng),
        });
    }
    daemon_sets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = RandomCluster::new(Some(7)).initial_state().unwrap();
        let b = RandomCluster::new(Some(7)).initial_state().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generated_clusters_are_consistent() {
        for seed in 0..32 {
            let snapshot = RandomCluster::new(Some(seed)).initial_state().unwrap();
            snapshot.validate().unwrap();

            assert_eq!(snapshot.namespaces.len(), NAMESPACES.len());
            for namespace in NAMESPACES {
                let pods = snapshot
                    .pods
                    .iter()
                    .filter(|p| p.namespace == namespace)
                    .count();
                assert!((3..=8).contains(&pods));
                let deployments = snapshot
                    .deployments
                    .iter()
                    .filter(|d| d.namespace == namespace)
                    .count();
                assert!((1..=3).contains(&deployments));
            }
            for pod in &snapshot.pods {
                assert_eq!(pod.error.is_some(), pod.error_message.is_some());
                if pod.error.is_none() {
                    assert_eq!(pod.status, PodStatus::Running);
                    assert!(pod.ready.ready >= 1);
                }
            }
            for ds in &snapshot.daemon_sets {
                assert_eq!(ds.desired, NODE_COUNT);
                assert!(DAEMON_SET_NAMES.contains(&ds.name.as_str()));
            }
        }
    }

    #[test]
    fn error_kind_drives_pod_state() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let pod = generate_pod(&mut rng, "web-server-1000-100".to_string(), "default");
            match pod.error {
                Some(PodErrorType::OomKilled) => {
                    assert_eq!(pod.status, PodStatus::Failed);
                    assert!((3..=15).contains(&pod.restarts));
                },
                Some(PodErrorType::CpuThrottled) => {
                    assert_eq!(pod.status, PodStatus::Running);
                    assert!(pod.ready.is_complete());
                },
                Some(PodErrorType::CrashLoopBackOff) => {
                    assert_eq!(pod.status, PodStatus::CrashLoopBackOff);
                    assert!((5..=20).contains(&pod.restarts));
                },
                Some(_) => {
                    assert_eq!(pod.status, PodStatus::Pending);
                    assert_eq!(pod.ready.ready, 0);
                },
                None => assert!(pod.restarts <= 2),
            }
        }
    }
}
