//! Append-only activity log.
//!
//! The log is a plain sink: it never formats messages and never drops
//! entries. Callers decide what to say and when.

use crate::task::LogId;
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub log_id: LogId,
    pub log_message: String,
    pub log_author: String,
    /// Milliseconds since the Unix epoch, as a decimal string.
    pub log_timestamp: String,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, author: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            log_id: LogId::generate(),
            log_message: message.into(),
            log_author: author.into(),
            log_timestamp: clock.utc().timestamp_millis().to_string(),
        }
    }

    /// Parses the timestamp back into a date, for display.
    pub fn logged_at(&self) -> Option<DateTime<Utc>> {
        let millis = self.log_timestamp.parse::<i64>().ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: LogEntry) {
        trace!(log_id = %entry.log_id, message = %entry.log_message, "log append");
        self.entries.push(entry);
    }

    /// Entries oldest first, in append order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn iter_newest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
