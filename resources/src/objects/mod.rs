use std::{collections::HashMap, fmt, str::FromStr};

use chrono::{Duration, NaiveDateTime};
use enum_dispatch::enum_dispatch;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use thiserror::Error;

pub use self::{
    daemon_set::DaemonSet,
    deployment::Deployment,
    namespace::{Namespace, NamespacePhase},
    pod::{Pod, PodErrorType, PodStatus},
};

pub mod daemon_set;
pub mod deployment;
pub mod namespace;
pub mod pod;

/// Placeholder printed for absent optional fields.
pub(crate) const UNKNOWN: &str = "<unknown>";

pub const NONE: &str = "<none>";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Namespaces,
    Pods,
    Deployments,
    DaemonSets,
}

lazy_static! {
    static ref ALIASES: HashMap<&'static str, ResourceKind> = HashMap::from([
        ("namespaces", ResourceKind::Namespaces),
        ("namespace", ResourceKind::Namespaces),
        ("ns", ResourceKind::Namespaces),
        ("pods", ResourceKind::Pods),
        ("pod", ResourceKind::Pods),
        ("po", ResourceKind::Pods),
        ("deployments", ResourceKind::Deployments),
        ("deployment", ResourceKind::Deployments),
        ("deploy", ResourceKind::Deployments),
        ("daemonsets", ResourceKind::DaemonSets),
        ("daemonset", ResourceKind::DaemonSets),
        ("ds", ResourceKind::DaemonSets),
    ]);
}

impl ResourceKind {
    /// Resolve a resource word as typed on the command line.
    /// Aliases are matched case-insensitively.
    pub fn from_alias(alias: &str) -> Option<Self> {
        ALIASES.get(alias.to_lowercase().as_str()).copied()
    }

    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Namespaces => "namespaces",
            ResourceKind::Pods => "pods",
            ResourceKind::Deployments => "deployments",
            ResourceKind::DaemonSets => "daemonsets",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Namespaces => "namespace",
            ResourceKind::Pods => "pod",
            ResourceKind::Deployments => "deployment",
            ResourceKind::DaemonSets => "daemonset",
        }
    }

    /// API group suffix used when the server names the resource.
    pub fn group_suffix(&self) -> &'static str {
        match self {
            ResourceKind::Deployments | ResourceKind::DaemonSets => ".apps",
            _ => "",
        }
    }

    /// e.g. `deployments.apps`
    pub fn qualified_plural(&self) -> String {
        format!("{}{}", self.plural(), self.group_suffix())
    }

    /// e.g. `deployment.apps`
    pub fn qualified_singular(&self) -> String {
        format!("{}{}", self.singular(), self.group_suffix())
    }

    pub fn is_namespaced(&self) -> bool {
        !matches!(self, ResourceKind::Namespaces)
    }

    /// Column headers of the table view, in display order.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Namespaces => &["NAME", "STATUS", "AGE"],
            ResourceKind::Pods => &["NAME", "READY", "STATUS", "RESTARTS", "AGE", "NODE"],
            ResourceKind::Deployments => &["NAME", "READY", "UP-TO-DATE", "AVAILABLE", "AGE"],
            ResourceKind::DaemonSets => &[
                "NAME",
                "DESIRED",
                "CURRENT",
                "READY",
                "UP-TO-DATE",
                "AVAILABLE",
                "AGE",
            ],
        }
    }
}

#[enum_dispatch]
pub trait Object {
    fn kind(&self) -> ResourceKind;

    fn name(&self) -> &str;

    /// Namespace the object lives in, `None` for cluster-scoped objects.
    fn namespace(&self) -> Option<&str>;

    /// Cells of the table view, matching [`ResourceKind::headers`].
    fn row(&self) -> Vec<String>;

    /// Write the detailed report shown by `describe`.
    /// `now` anchors the timestamps derived from the object's age.
    fn describe(&self, f: &mut fmt::Formatter<'_>, now: NaiveDateTime) -> fmt::Result;
}

#[enum_dispatch(Object)]
#[derive(Debug, Clone, PartialEq)]
pub enum KubeObject {
    Namespace,
    Pod,
    Deployment,
    DaemonSet,
}

impl KubeObject {
    pub fn description(&self, now: NaiveDateTime) -> Description<'_> {
        Description { object: self, now }
    }
}

/// Display adapter over [`Object::describe`].
pub struct Description<'a> {
    object: &'a KubeObject,
    now: NaiveDateTime,
}

impl fmt::Display for Description<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.object.describe(f, self.now)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid ready count {0:?}, expected \"<ready>/<total>\" with ready <= total")]
    Ready(String),
    #[error("invalid age {0:?}, expected a combination of <n>d, <n>h and <n>m")]
    Age(String),
}

/// Ready containers over total containers, written as `x/y`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReadyCount {
    pub ready: u32,
    pub total: u32,
}

impl ReadyCount {
    pub fn new(ready: u32, total: u32) -> Self {
        ReadyCount { ready, total }
    }

    pub fn is_complete(&self) -> bool {
        self.ready == self.total
    }
}

impl fmt::Display for ReadyCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ready, self.total)
    }
}

impl FromStr for ReadyCount {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Ready(s.to_owned());
        let (ready, total) = s.split_once('/').ok_or_else(invalid)?;
        let ready = ready.trim().parse::<u32>().map_err(|_| invalid())?;
        let total = total.trim().parse::<u32>().map_err(|_| invalid())?;
        if ready > total {
            return Err(invalid());
        }
        Ok(ReadyCount { ready, total })
    }
}

impl TryFrom<String> for ReadyCount {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReadyCount> for String {
    fn from(count: ReadyCount) -> Self {
        count.to_string()
    }
}

/// Time since creation, written the way kubectl abbreviates it:
/// `3d4h`, `5h12m` or `7m`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Age(Duration);

impl Age {
    pub fn new(days: i64, hours: i64, minutes: i64) -> Self {
        Age(Duration::days(days) + Duration::hours(hours) + Duration::minutes(minutes))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    /// Point in time the object was created, seen from `now`.
    /// `None` if that lies before the earliest representable date.
    pub fn created_at(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        now.checked_sub_signed(self.0)
    }

    /// [`Age::created_at`] as shown in describe output.
    pub(crate) fn start_time(&self, now: NaiveDateTime) -> String {
        self.created_at(now)
            .map_or_else(|| UNKNOWN.to_string(), format_timestamp)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.0.num_days();
        let hours = self.0.num_hours() % 24;
        let minutes = self.0.num_minutes() % 60;
        if days > 0 {
            write!(f, "{}d{}h", days, hours)
        } else if hours > 0 {
            write!(f, "{}h{}m", hours, minutes)
        } else {
            write!(f, "{}m", minutes)
        }
    }
}

impl FromStr for Age {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Age(s.to_owned());
        let mut total = Duration::zero();
        let mut digits = String::new();
        for c in s.trim().chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let value = digits.parse::<i64>().map_err(|_| invalid())?;
            let part = match c {
                'd' => Duration::try_days(value),
                'h' => Duration::try_hours(value),
                'm' => Duration::try_minutes(value),
                _ => return Err(invalid()),
            };
            total = part
                .and_then(|part| total.checked_add(&part))
                .ok_or_else(invalid)?;
            digits.clear();
        }
        if !digits.is_empty() || s.trim().is_empty() {
            return Err(invalid());
        }
        Ok(Age(total))
    }
}

impl TryFrom<String> for Age {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Age> for String {
    fn from(age: Age) -> Self {
        age.to_string()
    }
}

/// `app` label derived from an object name: its first dash-separated segment.
pub(crate) fn app_label(name: &str) -> &str {
    name.split('-').next().unwrap_or(name)
}

pub(crate) fn format_timestamp(time: NaiveDateTime) -> String {
    time.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

pub(crate) fn condition(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Stable digest of an identity string, the source of every synthetic
/// identifier in describe output (pod IPs, container IDs, image digests).
pub(crate) struct Fingerprint(blake3::Hash);

impl Fingerprint {
    pub(crate) fn of(identity: &str) -> Self {
        Fingerprint(blake3::hash(identity.as_bytes()))
    }

    pub(crate) fn hex(&self) -> String {
        self.0.to_hex().to_string()
    }

    pub(crate) fn pod_ip(&self) -> String {
        let bytes = self.0.as_bytes();
        format!("10.244.{}.{}", bytes[0], bytes[1])
    }
}
