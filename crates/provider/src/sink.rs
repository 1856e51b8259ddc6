/// Host collaborator surface.
///
/// The pipeline is purely a producer: it pushes progress, messages and
/// lifecycle notifications into a [`MessageSink`] and knows nothing about
/// how the host displays or persists them.

use chrono::{DateTime, Utc};

use crate::parser::LogMessage;

/// Kind of a progress report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressKind {
    /// One unit of forward progress; never batched.
    Incremental,
}

/// Progress record emitted once per accepted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadProgress {
    pub kind: ProgressKind,
    /// Units covered by this report; always 1 for incremental reports.
    pub units: u64,
    /// Running count of accepted entries, this one included.
    pub entries_read: u64,
    /// Running count of lines read so far.
    pub lines_read: u64,
}

impl ReadProgress {
    pub fn incremental(entries_read: u64, lines_read: u64) -> Self {
        Self {
            kind: ProgressKind::Incremental,
            units: 1,
            entries_read,
            lines_read,
        }
    }
}

/// Receiver for everything a file read produces.
///
/// `append_messages` is called exactly once per read, on every exit path;
/// `processing_finished` follows it, also exactly once.
pub trait MessageSink: Send + Sync {
    /// A file read is about to begin.
    fn processing_started(&self, file_name: &str, started_at: DateTime<Utc>);

    /// One entry was accepted.
    fn report_progress(&self, progress: ReadProgress);

    /// Deliver a single out-of-band message (the synthetic failure record).
    fn append_message(&self, message: &LogMessage, display_name: &str);

    /// Deliver the full result sequence for the file.
    fn append_messages(&self, messages: &[LogMessage], file_name: &str);

    /// The read finished, successfully or not.
    fn processing_finished(
        &self,
        file_name: &str,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    );
}
