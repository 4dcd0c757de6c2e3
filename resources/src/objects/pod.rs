use std::fmt::{self, Write};

use chrono::NaiveDateTime;
use indenter::indented;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{
    app_label, condition, Age, Fingerprint, Object, ReadyCount, ResourceKind,
    NONE,
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub name: String,
    pub namespace: String,
    pub status: PodStatus,
    /// Ready containers over containers in the pod.
    pub ready: ReadyCount,
    #[serde(default)]
    pub restarts: u32,
    pub age: Age,
    /// Node the pod is bound to. Empty if not yet scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    /// What keeps the pod from being healthy, if anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<PodErrorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Pod {
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&format!("{}/{}", self.namespace, self.name))
    }

    fn status_cell(&self) -> String {
        match self.error {
            Some(_) => format!("{} ⚠", self.status),
            None => self.status.to_string(),
        }
    }
}

impl Object for Pod {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Pods
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
            self.status_cell(),
            self.restarts.to_string(),
            self.age.to_string(),
            self.node.to_owned().unwrap_or_else(|| "-".to_string()),
        ]
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>, now: NaiveDateTime) -> fmt::Result {
        let app = app_label(&self.name);
        let image = format!("{}:latest", app);
        let fingerprint = self.fingerprint();
        let ready = condition(self.ready.is_complete());

        writeln!(f, "{:<13} {}", "Name:", self.name)?;
        writeln!(f, "{:<13} {}", "Namespace:", self.namespace)?;
        writeln!(f, "{:<13} {}", "Priority:", 0)?;
        writeln!(f, "{:<13} {}", "Node:", self.node.as_deref().unwrap_or(NONE))?;
        writeln!(
            f,
            "{:<13} {}",
            "Start Time:",
            self.age.start_time(now)
        )?;
        writeln!(f, "{:<13} app={}", "Labels:", app)?;
        writeln!(f, "{:<13} {}", "Annotations:", NONE)?;
        writeln!(f, "{:<13} {}", "Status:", self.status)?;
        writeln!(f, "{:<13} {}", "IP:", fingerprint.pod_ip())?;

        writeln!(f, "Containers:")?;
        writeln!(indented(f).with_str("  "), "{}:", app)?;
        {
            let mut container = indented(f).with_str("    ");
            writeln!(container, "{:<15} docker://{}", "Container ID:", fingerprint.hex())?;
            writeln!(container, "{:<15} {}", "Image:", image)?;
            writeln!(
                container,
                "{:<15} docker-pullable://{}@sha256:{}",
                "Image ID:",
                app,
                Fingerprint::of(&image).hex()
            )?;
            writeln!(container, "{:<15} {}", "Port:", NONE)?;
            writeln!(container, "{:<15} {}", "Host Port:", NONE)?;
            writeln!(container, "{:<15} {}", "State:", self.status.container_state())?;
            writeln!(container, "{:<15} {}", "Ready:", ready)?;
            writeln!(container, "{:<15} {}", "Restart Count:", self.restarts)?;
            writeln!(container, "{:<15} {}", "Environment:", NONE)?;
            writeln!(container, "{:<15} {}", "Mounts:", NONE)?;
        }

        writeln!(f, "Conditions:")?;
        {
            let mut conditions = indented(f).with_str("  ");
            writeln!(conditions, "{:<17} {}", "Type", "Status")?;
            writeln!(conditions, "{:<17} {}", "Initialized", "True")?;
            writeln!(conditions, "{:<17} {}", "Ready", ready)?;
            writeln!(conditions, "{:<17} {}", "ContainersReady", ready)?;
            writeln!(conditions, "{:<17} {}", "PodScheduled", "True")?;
        }

        if let Some(error) = self.error {
            writeln!(f, "Events:")?;
            let mut events = indented(f).with_str("  ");
            writeln!(events, "{:<8} {:<15} {}", "Type", "Reason", "Message")?;
            writeln!(
                events,
                "{:<8} {:<15} {}",
                "Warning",
                error,
                self.error_message.as_deref().unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum PodStatus {
    /// At least one container is still running, or is in the process of starting or restarting.
    Running,
    /// Accepted, but one or more containers has not been set up and made ready to run.
    Pending,
    /// All containers have terminated and at least one of them in failure.
    Failed,
    /// All containers have terminated in success and will not be restarted.
    Succeeded,
    /// The state of the pod could not be obtained.
    Unknown,
    CrashLoopBackOff,
    ImagePullBackOff,
    ErrImagePull,
    #[strum(serialize = "OOMKilled")]
    #[serde(rename = "OOMKilled")]
    OomKilled,
    #[strum(serialize = "CPUThrottled")]
    #[serde(rename = "CPUThrottled")]
    CpuThrottled,
}

impl PodStatus {
    pub fn container_state(&self) -> &'static str {
        match self {
            PodStatus::Running => "Running",
            _ => "Waiting",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum PodErrorType {
    #[strum(serialize = "OOMKilled")]
    #[serde(rename = "OOMKilled")]
    OomKilled,
    #[strum(serialize = "CPUThrottled")]
    #[serde(rename = "CPUThrottled")]
    CpuThrottled,
    ImagePullBackOff,
    ErrImagePull,
    Unschedulable,
    CrashLoopBackOff,
    ContainerCreating,
    #[strum(serialize = "Init:Error")]
    #[serde(rename = "Init:Error")]
    InitError,
}

impl PodErrorType {
    /// The event message the cluster reports alongside this error.
    pub fn message(&self) -> &'static str {
        match self {
            PodErrorType::OomKilled => "Container killed due to memory limit",
            PodErrorType::CpuThrottled => "CPU throttling detected",
            PodErrorType::ImagePullBackOff => {
                "Back-off pulling image \"registry.example.com/image:v1.0\""
            },
            PodErrorType::ErrImagePull => {
                "Failed to pull image \"registry.example.com/image:v1.0\": network timeout"
            },
            PodErrorType::Unschedulable => "0/3 nodes are available: insufficient cpu, memory",
            PodErrorType::CrashLoopBackOff => "Back-off restarting failed container",
            PodErrorType::ContainerCreating => "Container is being created",
            PodErrorType::InitError => "Init container failed with exit code 1",
        }
    }
}
