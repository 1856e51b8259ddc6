/// File read pipeline.
///
/// One sequential async pass per file: open → read lines → decode each →
/// accumulate canonical messages, reporting incremental progress per
/// accepted entry. Per-line decode failures never abort the file; only an
/// open or read I/O error does, and even then the accumulated messages are
/// still delivered, with one synthetic Critical record inserted at the
/// front describing the failure.
///
/// The entry point never returns an error: failures are represented as
/// data in the result sequence. Delivery (`append_messages`) and the
/// finish notification fire exactly once on every exit path: normal end
/// of stream, cancellation, or I/O failure.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::{wrappers::LinesStream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::parser::context::flatten_contexts;
use crate::parser::entry::{decode_line, DecodedLine, LineOutcome};
use crate::parser::markup::strip_markup;
use crate::parser::metrics::DecodeMetrics;
use crate::parser::model::{LogMessage, MessageClass, Severity};
use crate::sink::{MessageSink, ReadProgress};

/// Reads diagnostic log files into canonical message sequences.
///
/// Each `read` call owns its result and counters exclusively; the decode
/// metrics accumulate across calls and may be shared with observers.
pub struct LogFileReader {
    metrics: Arc<DecodeMetrics>,
}

impl LogFileReader {
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(DecodeMetrics::new()),
        }
    }

    /// Cumulative decode counters for this reader.
    pub fn metrics(&self) -> Arc<DecodeMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Read one file into a sequence of canonical messages.
    ///
    /// Always returns the result sequence; file-level failure is
    /// represented by a synthetic Critical message at position 0. The full
    /// sequence is delivered to the sink exactly once, followed by exactly
    /// one finish notification, on every exit path.
    pub async fn read(
        &self,
        path: impl AsRef<Path>,
        cancel: CancellationToken,
        sink: &dyn MessageSink,
    ) -> Vec<LogMessage> {
        let path = path.as_ref();
        let file_name = path.to_string_lossy().into_owned();
        let started_at = Utc::now();
        sink.processing_started(&file_name, started_at);
        debug!(file = %file_name, "starting file read");

        let mut result = Vec::new();

        // Other processes may still be appending to the file; the open is a
        // plain shared read.
        match File::open(path).await {
            Ok(file) => {
                if let Err(err) = self
                    .read_lines(file, &file_name, &cancel, sink, &mut result)
                    .await
                {
                    self.fail(&file_name, &err, sink, &mut result);
                }
            }
            Err(err) => self.fail(&file_name, &err, sink, &mut result),
        }

        sink.append_messages(&result, &file_name);
        sink.processing_finished(&file_name, started_at, Utc::now());
        debug!(file = %file_name, messages = result.len(), "finished file read");
        result
    }

    /// The Reading phase: sequential line loop with a cooperative
    /// cancellation check between reads. Cancellation is a normal end of
    /// stream; a read error propagates to the caller as file-fatal.
    async fn read_lines(
        &self,
        file: File,
        file_name: &str,
        cancel: &CancellationToken,
        sink: &dyn MessageSink,
        result: &mut Vec<LogMessage>,
    ) -> std::io::Result<()> {
        let mut lines = LinesStream::new(BufReader::new(file).lines());
        let mut lines_read: u64 = 0;
        let mut entries_read: u64 = 0;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(file = %file_name, lines = lines_read, "read cancelled");
                    break;
                }
                next = lines.next() => next,
            };

            let line = match next {
                Some(line) => line?,
                None => break,
            };
            lines_read += 1;
            self.metrics.record_line();

            let sanitized = strip_markup(&line);
            match decode_line(&sanitized) {
                Ok(LineOutcome::Record(decoded)) => {
                    entries_read += 1;
                    self.metrics.record_accepted();
                    result.push(to_message(&sanitized, file_name, decoded));
                    sink.report_progress(ReadProgress::incremental(entries_read, lines_read));
                }
                Ok(LineOutcome::Malformed) => self.metrics.record_malformed(),
                Ok(LineOutcome::Gated) => self.metrics.record_gated(),
                Err(err) => {
                    self.metrics.record_undecodable();
                    warn!(
                        file = %file_name,
                        line = lines_read,
                        error = %err,
                        "skipping undecodable entry"
                    );
                }
            }
        }

        Ok(())
    }

    /// File-level failure: synthesize one Critical record, deliver it
    /// out-of-band under the `short-name (full-path)` display convention,
    /// and put it ahead of whatever was accumulated.
    fn fail(
        &self,
        file_name: &str,
        err: &std::io::Error,
        sink: &dyn MessageSink,
        result: &mut Vec<LogMessage>,
    ) {
        error!(file = %file_name, error = %err, "file read failed");

        let failure = synthetic_failure(file_name, err);
        let short = Path::new(file_name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        let display_name = if short == file_name {
            short
        } else {
            format!("{short} ({file_name})")
        };
        sink.append_message(&failure, &display_name);
        result.insert(0, failure);
    }
}

impl Default for LogFileReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Map an accepted line onto the canonical message shape, flattening its
/// contexts into the property map.
fn to_message(sanitized: &str, file_name: &str, decoded: DecodedLine) -> LogMessage {
    let DecodedLine {
        entry,
        severity,
        timestamp,
    } = decoded;

    let mut properties = HashMap::new();
    if let Some(contexts) = &entry.contexts {
        flatten_contexts(contexts, &mut properties);
    }

    LogMessage {
        text: entry.message.unwrap_or_default(),
        severity,
        raw: sanitized.to_string(),
        timestamp,
        thread_id: entry.thread_id,
        module: entry.module,
        properties,
        file_name: file_name.to_string(),
        class: MessageClass::General,
    }
}

/// The record injected at position 0 when the file itself cannot be read.
fn synthetic_failure(file_name: &str, err: &std::io::Error) -> LogMessage {
    LogMessage {
        text: format!("Error occurred processing file {file_name}. Reason: {err}"),
        severity: Severity::Critical,
        raw: String::new(),
        timestamp: Utc::now(),
        thread_id: 0,
        module: process_name(),
        properties: HashMap::new(),
        file_name: file_name.to_string(),
        class: MessageClass::General,
    }
}

/// Name of the running process, as the module of synthetic records.
fn process_name() -> Option<String> {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
}
