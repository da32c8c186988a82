use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tokio::sync::mpsc;
use uuid::Uuid;

/// The roles that contribute entries to a pipeline's step log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AgentRole {
    #[strum(serialize = "Agent Alpha")]
    #[serde(rename = "Agent Alpha")]
    Alpha,
    #[strum(serialize = "Agent Beta")]
    #[serde(rename = "Agent Beta")]
    Beta,
    #[strum(serialize = "Agent Gamma")]
    #[serde(rename = "Agent Gamma")]
    Gamma,
    #[strum(serialize = "System")]
    #[serde(rename = "System")]
    System,
}

/// A single immutable entry in the step log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub id: Uuid,
    pub agent: AgentRole,
    pub action: String,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl StepRecord {
    fn new(agent: AgentRole, action: &str, content: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent,
            action: action.to_string(),
            content: content.to_string(),
            timestamp: Local::now(),
        }
    }

    /// Capture time as shown to a reader, e.g. `14:03:27`
    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    /// One-line header: `14:03:27 — Agent Alpha [uploaded]`
    pub fn header(&self) -> String {
        format!("{} — {} [{}]", self.display_time(), self.agent, self.action)
    }
}

/// Append-only record of what a pipeline run has done so far.
///
/// Entries are kept in insertion order and are never edited. Observers that
/// need to follow a run while it is suspended on a network call can
/// [`subscribe`](StepLog::subscribe) and receive each record as it lands.
#[derive(Debug, Default)]
pub struct StepLog {
    records: Vec<StepRecord>,
    subscribers: Vec<mpsc::UnboundedSender<StepRecord>>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a step and return a copy of the stored entry
    pub fn append(&mut self, agent: AgentRole, action: &str, content: &str) -> StepRecord {
        let record = StepRecord::new(agent, action, content);
        self.records.push(record.clone());

        // Receivers that have gone away are dropped from the list
        self.subscribers
            .retain(|subscriber| subscriber.send(record.clone()).is_ok());

        record
    }

    /// Forget all entries. Subscribers stay attached across resets.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    pub fn snapshot(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<StepRecord> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn test_append_preserves_order() {
        let mut log = StepLog::new();
        log.append(AgentRole::Alpha, "generated strategy", "one");
        log.append(AgentRole::Beta, "retrieved strategy", "two");
        log.append(AgentRole::Gamma, "execution timeline", "three");

        let contents: Vec<&str> = log.snapshot().iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
        assert_eq!(log.snapshot()[1].agent, AgentRole::Beta);
        assert_eq!(log.snapshot()[1].action, "retrieved strategy");
    }

    #[test]
    fn test_append_returns_stored_record() {
        let mut log = StepLog::new();
        let record = log.append(AgentRole::System, "error", "boom");
        assert_eq!(log.snapshot(), &[record]);
    }

    #[test]
    fn test_identifiers_are_unique() {
        let mut log = StepLog::new();
        for i in 0..100 {
            log.append(AgentRole::Alpha, "step", &i.to_string());
        }
        let ids: HashSet<Uuid> = log.snapshot().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_reset_empties_snapshot() {
        let mut log = StepLog::new();
        assert!(log.is_empty());
        log.append(AgentRole::Alpha, "generated strategy", "plan");
        log.append(AgentRole::Alpha, "uploaded", "CID: abc");
        log.reset();
        assert!(log.snapshot().is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_subscribers_receive_appends() {
        let mut log = StepLog::new();
        let mut rx = log.subscribe();

        log.append(AgentRole::Alpha, "generated strategy", "plan");
        log.reset();
        log.append(AgentRole::Beta, "retrieved strategy", "plan");

        assert_eq!(rx.try_recv().unwrap().agent, AgentRole::Alpha);
        assert_eq!(rx.try_recv().unwrap().agent, AgentRole::Beta);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut log = StepLog::new();
        let rx = log.subscribe();
        drop(rx);
        log.append(AgentRole::Alpha, "generated strategy", "plan");
        assert!(log.subscribers.is_empty());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(AgentRole::Alpha.to_string(), "Agent Alpha");
        assert_eq!(AgentRole::System.to_string(), "System");
        assert_eq!(AgentRole::from_str("Agent Gamma").unwrap(), AgentRole::Gamma);
        assert_eq!(
            serde_json::to_value(AgentRole::Beta).unwrap(),
            serde_json::json!("Agent Beta")
        );
    }

    #[test]
    fn test_header_format() {
        let mut log = StepLog::new();
        let record = log.append(AgentRole::Gamma, "execution timeline", "days");
        let header = record.header();
        assert!(header.ends_with("— Agent Gamma [execution timeline]"));
        assert_eq!(record.display_time().len(), 8);
    }
}
