pub const APPLY_NOTICE: &str = "Note: This is a mock cluster. Apply command is simulated.\n\
In a real cluster, this would apply the configuration from the specified file.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    /// Everything after the verb, usually `-f <file>`
    pub args: Vec<String>,
}

impl Arg {
    /// The cluster is never modified.
    pub fn handle(&self) -> String {
        tracing::debug!(args = ?self.args, "Simulated apply");
        APPLY_NOTICE.to_string()
    }
}
