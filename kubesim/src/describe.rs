use chrono::NaiveDateTime;
use resources::{objects::ResourceKind, store::ResourceStore};

use crate::{error::CommandError, utils::lookup};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    /// Kind of resource
    pub kind: ResourceKind,
    /// Name of resource
    pub name: String,
    /// Namespace the resource lives in
    pub namespace: Option<String>,
}

impl Arg {
    pub fn handle(&self, store: &ResourceStore, now: NaiveDateTime) -> Result<String, CommandError> {
        let object = lookup(store, self.kind, &self.name, self.namespace.as_deref())?;
        Ok(object.description(now).to_string().trim_end().to_owned())
    }
}
