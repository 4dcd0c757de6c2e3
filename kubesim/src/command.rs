use std::str::FromStr;

use resources::objects::ResourceKind;
use strum::{Display, EnumString};

use crate::{apply, delete, describe, error::CommandError, get};

const PROGRAM_PREFIX: &str = "kubectl ";
const NAMESPACE_FLAG: &str = "-n";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Verb {
    Get,
    Describe,
    Delete,
    Apply,
}

/// A console line that parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Help,
    Kubectl(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Display one or many resources
    Get(get::Arg),
    /// Show details of a specific resource
    Describe(describe::Arg),
    /// Delete a resource by name
    Delete(delete::Arg),
    /// Apply a configuration (simulated)
    Apply(apply::Arg),
}

/// Parse one console line.
///
/// `-n <namespace>` is taken out of the token stream first, wherever it appears;
/// verb, resource and name are then read positionally from what is left.
pub fn parse(line: &str) -> Result<Input, CommandError> {
    let line = line.trim();
    if line == "help" || line == "?" {
        return Ok(Input::Help);
    }
    let rest = line
        .strip_prefix(PROGRAM_PREFIX)
        .ok_or_else(|| CommandError::UnknownCommand(line.to_owned()))?;

    let mut tokens: Vec<&str> = rest.split_whitespace().collect();
    let namespace = take_namespace(&mut tokens);
    let mut positional = tokens.into_iter();
    let verb = positional.next().unwrap_or_default();
    let verb = Verb::from_str(verb).map_err(|_| CommandError::UnknownVerb(verb.to_owned()))?;
    tracing::debug!(%verb, ?namespace, "Parsed kubectl command");

    resolve(verb, positional.collect(), namespace).map(Input::Kubectl)
}

fn take_namespace(tokens: &mut Vec<&str>) -> Option<String> {
    let index = tokens.iter().position(|token| *token == NAMESPACE_FLAG)?;
    let namespace = tokens.get(index + 1)?.to_string();
    tokens.drain(index..=index + 1);
    Some(namespace)
}

/// Turn positional tokens into a command. Missing names are reported before
/// unknown resource types.
fn resolve(
    verb: Verb,
    args: Vec<&str>,
    namespace: Option<String>,
) -> Result<Command, CommandError> {
    let resource = args.first().copied();
    let name = args.get(1).map(|name| name.to_string());
    match verb {
        Verb::Get => Ok(Command::Get(get::Arg {
            kind: resolve_kind(verb, resource)?,
            name,
            namespace,
        })),
        Verb::Describe => {
            let name = name.ok_or(CommandError::MissingName(verb))?;
            Ok(Command::Describe(describe::Arg {
                kind: resolve_kind(verb, resource)?,
                name,
                namespace,
            }))
        },
        Verb::Delete => {
            let name = name.ok_or(CommandError::MissingName(verb))?;
            Ok(Command::Delete(delete::Arg {
                kind: resolve_kind(verb, resource)?,
                name,
                namespace,
            }))
        },
        Verb::Apply => Ok(Command::Apply(apply::Arg {
            args: args.iter().map(|arg| arg.to_string()).collect(),
        })),
    }
}

fn resolve_kind(verb: Verb, resource: Option<&str>) -> Result<ResourceKind, CommandError> {
    let resource = resource.ok_or(CommandError::MissingResource(verb))?;
    ResourceKind::from_alias(resource)
        .ok_or_else(|| CommandError::UnknownResource(resource.to_owned()))
}
