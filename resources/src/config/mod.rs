use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    generator::RandomCluster,
    provider::{FixtureFile, StateProvider},
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Log level of the simulator crates.
    /// One of trace, debug, info, warn, error. Defaults to warn.
    pub log_level: String,
    /// Seed for the random cluster generator.
    /// A fresh cluster is drawn every session if unset.
    pub seed: Option<u64>,
    /// YAML snapshot to load instead of generating a cluster.
    pub fixture: Option<PathBuf>,
    /// Colour errors and echoed commands. Default to true.
    pub color: bool,
    /// Prompt printed before every input line.
    pub prompt: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            log_level: "warn".to_string(),
            seed: None,
            fixture: None,
            color: true,
            prompt: "$ ".to_string(),
        }
    }
}

impl SimConfig {
    /// Where the session's initial cluster comes from.
    /// A fixture wins over the generator.
    pub fn provider(&self) -> Box<dyn StateProvider> {
        match self.fixture {
            Some(ref path) => Box::new(FixtureFile::new(path)),
            None => Box::new(RandomCluster::new(self.seed)),
        }
    }
}
