use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::Display;

use super::{Age, Object, ResourceKind, NONE};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub name: String,
    pub status: NamespacePhase,
    pub age: Age,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display)]
pub enum NamespacePhase {
    Active,
    Terminating,
}

impl Object for Namespace {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Namespaces
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> Option<&str> {
        None
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.to_owned(),
            self.status.to_string(),
            self.age.to_string(),
        ]
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>, _now: NaiveDateTime) -> fmt::Result {
        writeln!(f, "{:<13} {}", "Name:", self.name)?;
        writeln!(f, "{:<13} {}", "Labels:", NONE)?;
        writeln!(f, "{:<13} {}", "Annotations:", NONE)?;
        writeln!(f, "{:<13} {}", "Status:", self.status)?;
        writeln!(f, "{:<13} {}", "Age:", self.age)?;
        writeln!(f, "No resource quota.")?;
        writeln!(f, "No resource limits.")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::objects::KubeObject;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    #[test]
    fn describe() {
        let ns = KubeObject::from(Namespace {
            name: "kube-system".to_string(),
            status: NamespacePhase::Active,
            age: Age::new(0, 0, 42),
        });
        assert_eq!(ns.namespace(), None);
        assert_eq!(ns.row(), vec!["kube-system", "Active", "42m"]);
        let text = ns.description(now()).to_string();
        assert_eq!(
            text,
            "Name:         kube-system\n\
             Labels:       <none>\n\
             Annotations:  <none>\n\
             Status:       Active\n\
             Age:          42m\n\
             No resource quota.\n\
             No resource limits.\n"
        );
    }
}
