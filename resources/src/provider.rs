use std::{collections::HashSet, fs::File, path::PathBuf};

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::objects::{DaemonSet, Deployment, Namespace, Object, Pod};

/// Source of the cluster state a session starts from.
pub trait StateProvider {
    fn initial_state(&self) -> Result<ClusterSnapshot>;
}

/// The four collections a store is built from.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterSnapshot {
    pub namespaces: Vec<Namespace>,
    pub pods: Vec<Pod>,
    pub deployments: Vec<Deployment>,
    pub daemon_sets: Vec<DaemonSet>,
}

impl ClusterSnapshot {
    /// Check the counting invariants between the fields of every object.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for namespace in &self.namespaces {
            if !seen.insert(namespace.name.as_str()) {
                bail!("namespace {} is defined more than once", namespace.name);
            }
        }
        unique_keys(&self.pods)?;
        unique_keys(&self.deployments)?;
        unique_keys(&self.daemon_sets)?;
        for pod in &self.pods {
            ensure!(
                pod.ready.ready <= pod.ready.total,
                "pod {}/{}: ready {} exceeds container count",
                pod.namespace,
                pod.name,
                pod.ready
            );
            ensure!(
                pod.error_message.is_none() || pod.error.is_some(),
                "pod {}/{}: error message without an error",
                pod.namespace,
                pod.name
            );
        }
        for deploy in &self.deployments {
            ensure!(
                deploy.available <= deploy.up_to_date && deploy.up_to_date <= deploy.replicas(),
                "deployment {}/{}: expected available ({}) <= up-to-date ({}) <= replicas ({})",
                deploy.namespace,
                deploy.name,
                deploy.available,
                deploy.up_to_date,
                deploy.replicas()
            );
        }
        for ds in &self.daemon_sets {
            ensure!(
                ds.desired >= ds.current
                    && ds.current >= ds.up_to_date
                    && ds.up_to_date >= ds.ready
                    && ds.ready >= ds.available,
                "daemonset {}/{}: expected desired ({}) >= current ({}) >= up-to-date ({}) >= ready ({}) >= available ({})",
                ds.namespace,
                ds.name,
                ds.desired,
                ds.current,
                ds.up_to_date,
                ds.ready,
                ds.available
            );
        }
        Ok(())
    }
}

fn unique_keys<T: Object>(objects: &[T]) -> Result<()> {
    let mut seen = HashSet::new();
    for object in objects {
        if !seen.insert((object.namespace(), object.name())) {
            bail!(
                "{} {}/{} is defined more than once",
                object.kind().singular(),
                object.namespace().unwrap_or_default(),
                object.name()
            );
        }
    }
    Ok(())
}

impl StateProvider for ClusterSnapshot {
    fn initial_state(&self) -> Result<ClusterSnapshot> {
        Ok(self.clone())
    }
}

/// A snapshot stored as YAML.
#[derive(Debug, Clone)]
pub struct FixtureFile {
    path: PathBuf,
}

impl FixtureFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FixtureFile { path: path.into() }
    }
}

impl StateProvider for FixtureFile {
    fn initial_state(&self) -> Result<ClusterSnapshot> {
        let path = self.path.as_path();
        let file =
            File::open(path).with_context(|| format!("Failed to open file {}", path.display()))?;
        let snapshot: ClusterSnapshot = serde_yaml::from_reader(file)
            .with_context(|| format!("Failed to parse file {}", path.display()))?;
        snapshot
            .validate()
            .with_context(|| format!("Invalid cluster snapshot in {}", path.display()))?;
        tracing::info!(path = %path.display(), "Loaded cluster fixture");
        Ok(snapshot)
    }
}
