use resources::{objects::ResourceKind, store::StoreError};
use thiserror::Error;

use crate::command::Verb;

/// Everything a console line can fail with.
/// The `Display` text is exactly what the user sees.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Command not found: {0}. Type \"help\" for available commands.")]
    UnknownCommand(String),
    #[error("Error: unknown kubectl command \"{0}\". Use \"help\" for available commands.")]
    UnknownVerb(String),
    #[error("Error: unknown resource type \"{0}\".")]
    UnknownResource(String),
    #[error("Error: resource type is required for {0} command.")]
    MissingResource(Verb),
    #[error("Error: resource name is required for {0} command.")]
    MissingName(Verb),
    #[error("Error from server (NotFound): {} \"{name}\" not found", .kind.qualified_plural())]
    NotFound { kind: ResourceKind, name: String },
    #[error(
        "Error: {} \"{name}\" exists in multiple namespaces ({}); use -n <namespace> to select one.",
        .kind.qualified_plural(),
        .namespaces.join(", ")
    )]
    AmbiguousName {
        kind: ResourceKind,
        name: String,
        namespaces: Vec<String>,
    },
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, name } => CommandError::NotFound { kind, name },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            CommandError::UnknownCommand("ls -la".to_string()).to_string(),
            "Command not found: ls -la. Type \"help\" for available commands."
        );
        assert_eq!(
            CommandError::UnknownResource("svc".to_string()).to_string(),
            "Error: unknown resource type \"svc\"."
        );
        assert_eq!(
            CommandError::MissingName(Verb::Describe).to_string(),
            "Error: resource name is required for describe command."
        );
        assert_eq!(
            CommandError::NotFound {
                kind: ResourceKind::Deployments,
                name: "web".to_string()
            }
            .to_string(),
            "Error from server (NotFound): deployments.apps \"web\" not found"
        );
        assert_eq!(
            CommandError::AmbiguousName {
                kind: ResourceKind::Pods,
                name: "web".to_string(),
                namespaces: vec!["default".to_string(), "staging".to_string()],
            }
            .to_string(),
            "Error: pods \"web\" exists in multiple namespaces (default, staging); \
             use -n <namespace> to select one."
        );
    }
}
