use chrono::{DateTime, Local, NaiveDateTime, Utc};
use resources::store::ResourceStore;
use strum::Display;

use crate::{
    command::{self, Command, Input},
    error::CommandError,
    help::USAGE,
};

pub const BANNER: &str =
    "Kubernetes terminal ready. Type \"kubectl\" commands or \"help\" for usage.";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    /// An echoed input line
    Command,
    Output,
    Error,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub kind: EntryKind,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

/// Append-only record of a session.
#[derive(Debug, Default)]
pub struct OutputLog {
    entries: Vec<Entry>,
}

impl OutputLog {
    fn push(&mut self, kind: EntryKind, content: impl Into<String>) {
        self.entries.push(Entry {
            kind,
            content: content.into(),
            timestamp: Local::now(),
        });
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries appended after the first `n`.
    pub fn entries_since(&self, n: usize) -> &[Entry] {
        self.entries.get(n..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A console session over one resource store.
pub struct Console {
    store: ResourceStore,
    log: OutputLog,
    /// Reference point for timestamps shown by `describe`.
    started_at: NaiveDateTime,
}

impl Console {
    pub fn new(store: ResourceStore) -> Self {
        Self::with_start_time(store, Utc::now().naive_utc())
    }

    pub fn with_start_time(store: ResourceStore, started_at: NaiveDateTime) -> Self {
        let mut log = OutputLog::default();
        log.push(EntryKind::Output, BANNER);
        Console {
            store,
            log,
            started_at,
        }
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Direct access for the table view, e.g. scoping it to a namespace.
    pub fn store_mut(&mut self) -> &mut ResourceStore {
        &mut self.store
    }

    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    /// Echo `line` into the log, run it and log the result.
    /// Blank lines are ignored.
    pub fn submit_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.log.push(EntryKind::Command, line);
        match self.run(line) {
            Ok(output) => self.log.push(EntryKind::Output, output),
            Err(err) => {
                tracing::debug!(line, error = %err, "Command failed");
                self.log.push(EntryKind::Error, err.to_string());
            },
        }
    }

    fn run(&mut self, line: &str) -> Result<String, CommandError> {
        match command::parse(line)? {
            Input::Help => Ok(USAGE.to_string()),
            Input::Kubectl(command) => self.execute(&command),
        }
    }

    fn execute(&mut self, command: &Command) -> Result<String, CommandError> {
        match command {
            Command::Get(arg) => Ok(arg.handle(&self.store)),
            Command::Describe(arg) => arg.handle(&self.store, self.started_at),
            Command::Delete(arg) => arg.handle(&mut self.store),
            Command::Apply(arg) => Ok(arg.handle()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use resources::{objects::ResourceKind, provider::ClusterSnapshot};

    use super::*;
    use crate::{apply::APPLY_NOTICE, testing};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn console() -> Console {
        Console::with_start_time(testing::store(), start())
    }

    /// Submit a line and return what it appended.
    fn submit(console: &mut Console, line: &str) -> Vec<(EntryKind, String)> {
        let before = console.log().len();
        console.submit_line(line);
        console
            .log()
            .entries_since(before)
            .iter()
            .map(|entry| (entry.kind, entry.content.clone()))
            .collect()
    }

    fn last_output(console: &mut Console, line: &str) -> (EntryKind, String) {
        let mut appended = submit(console, line);
        assert_eq!(appended.len(), 2, "{:?}", appended);
        assert_eq!(appended[0], (EntryKind::Command, line.trim().to_string()));
        appended.remove(1)
    }

    #[test]
    fn starts_with_banner() {
        let console = console();
        assert_eq!(console.log().len(), 1);
        assert_eq!(console.log().entries()[0].content, BANNER);
        assert_eq!(console.log().entries()[0].kind, EntryKind::Output);
    }

    #[test]
    fn entries_are_stamped_in_order() {
        let mut console = console();
        console.submit_line("kubectl get pods");
        console.submit_line("kubectl get nodes");
        let stamps: Vec<_> = console
            .log()
            .entries()
            .iter()
            .map(|entry| entry.timestamp)
            .collect();
        assert_eq!(stamps.len(), 5);
        assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let mut console = console();
        assert!(submit(&mut console, "").is_empty());
        assert!(submit(&mut console, "   \t ").is_empty());
        assert_eq!(console.log().len(), 1);
    }

    #[test]
    fn unknown_command() {
        let mut console = console();
        assert_eq!(
            last_output(&mut console, "ls -la"),
            (
                EntryKind::Error,
                "Command not found: ls -la. Type \"help\" for available commands.".to_string()
            )
        );
    }

    #[test]
    fn help_and_apply() {
        let mut console = console();
        assert_eq!(
            last_output(&mut console, "help"),
            (EntryKind::Output, USAGE.to_string())
        );
        assert_eq!(
            last_output(&mut console, "?"),
            (EntryKind::Output, USAGE.to_string())
        );
        assert_eq!(
            last_output(&mut console, "kubectl apply -f deploy.yaml"),
            (EntryKind::Output, APPLY_NOTICE.to_string())
        );
        assert_eq!(console.store().count(ResourceKind::Pods), 3);
    }

    #[test]
    fn deleting_a_namespace_empties_it() {
        let store = ResourceStore::from(ClusterSnapshot {
            namespaces: vec![testing::namespace("default")],
            pods: vec![
                testing::pod("web-server-1234-567", "default"),
                testing::failing_pod("cache-service-2000-300", "default"),
            ],
            ..Default::default()
        });
        let mut console = Console::with_start_time(store, start());
        assert_eq!(
            last_output(&mut console, "kubectl delete ns default"),
            (EntryKind::Output, "namespace \"default\" deleted".to_string())
        );
        assert_eq!(
            last_output(&mut console, "kubectl get pods -n default"),
            (
                EntryKind::Output,
                "No resources found in default namespace.".to_string()
            )
        );
        assert_eq!(console.store().count(ResourceKind::Pods), 0);
    }

    #[test]
    fn deleted_namespace_disappears() {
        let mut console = console();
        assert_eq!(
            last_output(&mut console, "kubectl delete ns staging"),
            (EntryKind::Output, "namespace \"staging\" deleted".to_string())
        );
        let (kind, output) = last_output(&mut console, "kubectl get namespaces");
        assert_eq!(kind, EntryKind::Output);
        assert!(output.contains("default"));
        assert!(!output.contains("staging"));
        assert_eq!(
            last_output(&mut console, "kubectl get ds"),
            (EntryKind::Output, "No resources found.".to_string())
        );
        // the pod of the same name in default survives
        let (_, output) = last_output(&mut console, "kubectl describe pod web-server-1234-567");
        assert!(output.contains("Namespace:    default\n"));
    }

    #[test]
    fn describe_missing_pod() {
        let mut console = console();
        assert_eq!(
            last_output(&mut console, "kubectl describe pod does-not-exist"),
            (
                EntryKind::Error,
                "Error from server (NotFound): pods \"does-not-exist\" not found".to_string()
            )
        );
    }

    #[test]
    fn parse_errors_are_logged() {
        let mut console = console();
        assert_eq!(
            last_output(&mut console, "kubectl get services"),
            (
                EntryKind::Error,
                "Error: unknown resource type \"services\".".to_string()
            )
        );
        assert_eq!(
            last_output(&mut console, "kubectl delete pod"),
            (
                EntryKind::Error,
                "Error: resource name is required for delete command.".to_string()
            )
        );
    }

    #[test]
    fn ambiguous_delete_keeps_store() {
        let mut console = console();
        let (kind, output) = last_output(&mut console, "kubectl delete pod web-server-1234-567");
        assert_eq!(kind, EntryKind::Error);
        assert!(output.contains("default, staging"));
        assert_eq!(console.store().count(ResourceKind::Pods), 3);

        let (kind, _) = last_output(
            &mut console,
            "kubectl -n staging delete pod web-server-1234-567",
        );
        assert_eq!(kind, EntryKind::Output);
        assert_eq!(console.store().count(ResourceKind::Pods), 2);
    }

    #[test]
    fn every_line_adds_two_entries() {
        let mut console = console();
        for line in [
            "kubectl get pods",
            "kubectl get po -n default",
            "kubectl describe deploy web-deployment-1",
            "kubectl describe ds fluentd -n default",
            "kubectl frobnicate",
            "help",
        ] {
            assert_eq!(submit(&mut console, line).len(), 2, "{}", line);
        }
        assert_eq!(console.log().len(), 1 + 6 * 2);
    }

    #[test]
    fn selection_is_dropped_with_its_namespace() {
        let mut console = console();
        console.store_mut().select_namespace("staging").unwrap();
        assert_eq!(console.store().list_selected(ResourceKind::Pods).len(), 1);
        console.submit_line("kubectl delete namespace staging");
        assert_eq!(console.store().selected_namespace(), None);
        assert_eq!(console.store().list_selected(ResourceKind::Pods).len(), 2);
    }
}
