use std::fmt::{self, Write};

use chrono::NaiveDateTime;
use indenter::indented;
use serde::{Deserialize, Serialize};

use super::{app_label, condition, Age, Object, ReadyCount, ResourceKind, NONE};

/// Deployment keeps a set of identical pods rolled out at the desired revision.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub name: String,
    pub namespace: String,
    /// Available replicas over desired replicas.
    pub ready: ReadyCount,
    /// Replicas running the latest pod template.
    pub up_to_date: u32,
    /// Replicas ready for at least minReadySeconds.
    pub available: u32,
    pub age: Age,
}

impl Deployment {
    /// Desired number of pods.
    pub fn replicas(&self) -> u32 {
        self.ready.total
    }
}

impl Object for Deployment {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Deployments
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
            self.ready.to_string(),
            self.up_to_date.to_string(),
            self.available.to_string(),
            self.age.to_string(),
        ]
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>, now: NaiveDateTime) -> fmt::Result {
        let app = app_label(&self.name);
        let replicas = self.replicas();

        writeln!(f, "{:<23} {}", "Name:", self.name)?;
        writeln!(f, "{:<23} {}", "Namespace:", self.namespace)?;
        writeln!(
            f,
            "{:<23} {}",
            "CreationTimestamp:",
            self.age.start_time(now)
        )?;
        writeln!(f, "{:<23} app={}", "Labels:", app)?;
        writeln!(
            f,
            "{:<23} deployment.kubernetes.io/revision: 1",
            "Annotations:"
        )?;
        writeln!(f, "{:<23} app={}", "Selector:", app)?;
        writeln!(
            f,
            "{:<23} {} desired | {} updated | {} total | {} available | {} unavailable",
            "Replicas:",
            replicas,
            self.up_to_date,
            replicas,
            self.available,
            replicas.saturating_sub(self.available)
        )?;
        writeln!(f, "{:<23} RollingUpdate", "StrategyType:")?;
        writeln!(f, "{:<23} 0", "MinReadySeconds:")?;
        writeln!(
            f,
            "{:<23} 25% max unavailable, 25% max surge",
            "RollingUpdateStrategy:"
        )?;

        writeln!(f, "Pod Template:")?;
        {
            let mut template = indented(f).with_str("  ");
            writeln!(template, "Labels:  app={}", app)?;
            writeln!(template, "Containers:")?;
            writeln!(template, " {}:", app)?;
            writeln!(template, "  {:<13} {}:latest", "Image:", app)?;
            writeln!(template, "  {:<13} {}", "Port:", NONE)?;
            writeln!(template, "  {:<13} {}", "Environment:", NONE)?;
            writeln!(template, "  {:<13} {}", "Mounts:", NONE)?;
            writeln!(template, "{:<15} {}", "Volumes:", NONE)?;
        }

        let (available, available_reason) = if self.available >= replicas {
            (true, "MinimumReplicasAvailable")
        } else {
            (false, "MinimumReplicasUnavailable")
        };
        let progressing_reason = if self.up_to_date >= replicas {
            "NewReplicaSetAvailable"
        } else {
            "ReplicaSetUpdated"
        };
        writeln!(f, "Conditions:")?;
        let mut conditions = indented(f).with_str("  ");
        writeln!(conditions, "{:<14} {:<7} {}", "Type", "Status", "Reason")?;
        writeln!(
            conditions,
            "{:<14} {:<7} {}",
            "Available",
            condition(available),
            available_reason
        )?;
        writeln!(
            conditions,
            "{:<14} {:<7} {}",
            "Progressing", "True", progressing_reason
        )
    }
}
