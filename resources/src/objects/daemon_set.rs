use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Age, Object, ResourceKind, NONE};

/// DaemonSet runs one copy of a pod on every eligible node.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSet {
    pub name: String,
    pub namespace: String,
    /// Nodes that should be running the daemon pod.
    pub desired: u32,
    /// Nodes running at least one daemon pod.
    pub current: u32,
    /// Nodes whose daemon pod is ready.
    pub ready: u32,
    /// Nodes running the updated daemon pod.
    pub up_to_date: u32,
    /// Nodes whose daemon pod has been ready for at least minReadySeconds.
    pub available: u32,
    pub age: Age,
}

impl Object for DaemonSet {
    fn kind(&self) -> ResourceKind {
        ResourceKind::DaemonSets
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> Option<&str> {
        Some(&self.namespace)
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.to_owned(),
            self.desired.to_string(),
            self.current.to_string(),
            self.ready.to_string(),
            self.up_to_date.to_string(),
            self.available.to_string(),
            self.age.to_string(),
        ]
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>, _now: NaiveDateTime) -> fmt::Result {
        writeln!(f, "{:<15} {}", "Name:", self.name)?;
        writeln!(f, "{:<15} {}", "Namespace:", self.namespace)?;
        writeln!(f, "{:<15} app={}", "Selector:", self.name)?;
        writeln!(f, "{:<15} {}", "Node-Selector:", NONE)?;
        writeln!(f, "{:<15} app={}", "Labels:", self.name)?;
        writeln!(f, "{:<15} {}", "Annotations:", NONE)?;
        writeln!(f, "{:<15} {}", "Age:", self.age)?;
        writeln!(f, "Desired Number of Nodes Scheduled: {}", self.desired)?;
        writeln!(f, "Current Number of Nodes Scheduled: {}", self.current)?;
        writeln!(
            f,
            "Number of Nodes Scheduled with Up-to-date Pods: {}",
            self.up_to_date
        )?;
        writeln!(f, "Number of Nodes Scheduled with Ready Pods: {}", self.ready)?;
        writeln!(f, "Number of Nodes Misscheduled: 0")?;
        writeln!(
            f,
            "{:<15} {} Running / {} Waiting / 0 Succeeded / 0 Failed",
            "Pods Status:",
            self.ready,
            self.current.saturating_sub(self.ready)
        )
    }
}
