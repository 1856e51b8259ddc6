/// Wire record decoding.
///
/// Each line of a BestHTTP diagnostic log carries (after markup removal and
/// prefix stripping) one JSON object with short field names: `t` (binary
/// timestamp), `tid` (thread id), `div` (module), `msg` (message text),
/// `stack` (stack trace), `ctx` (nested context maps), `ex` (exception
/// infos), `ll` (severity token) and `bh` (channel gate). A record is only
/// relevant when `bh > 0`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::markup::locate_payload;
use super::model::{DecodeError, Severity};
use super::timestamp;

/// One decoded payload object, field names as they appear on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogEntry {
    /// Binary date-time encoding of the log instant.
    #[serde(rename = "t", default)]
    pub timestamp_binary: i64,
    /// Producer thread id.
    #[serde(rename = "tid", default)]
    pub thread_id: i64,
    /// Module (subsystem) name.
    #[serde(rename = "div", default)]
    pub module: Option<String>,
    /// Message text.
    #[serde(rename = "msg", default)]
    pub message: Option<String>,
    /// Stack trace captured at the log site.
    #[serde(rename = "stack", default)]
    pub stack: Option<String>,
    /// Nested string-keyed context maps, flattened onto the canonical
    /// message's properties.
    #[serde(rename = "ctx", default)]
    pub contexts: Option<Vec<serde_json::Map<String, Value>>>,
    /// Exceptions attached to the entry. Parsed but not consumed downstream.
    #[serde(rename = "ex", default)]
    pub exceptions: Option<Vec<ExceptionInfo>>,
    /// Source severity vocabulary token.
    #[serde(rename = "ll", default)]
    pub severity_token: Option<String>,
    /// Channel gate: the record belongs to the relevant log channel only
    /// when this is greater than zero.
    #[serde(rename = "bh", default)]
    pub gate: i64,
}

/// Exception attached to a log entry.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ExceptionInfo {
    #[serde(default)]
    pub stack: Option<String>,
    #[serde(rename = "msg", default)]
    pub message: Option<String>,
}

/// A line that survived all decode tiers.
#[derive(Debug, Clone)]
pub struct DecodedLine {
    pub entry: LogEntry,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of decoding one sanitized line.
///
/// Both `Malformed` and `Gated` are silent skips; they are kept apart so
/// the pipeline can count them separately.
#[derive(Debug)]
pub enum LineOutcome {
    /// The line carries a record.
    Record(DecodedLine),
    /// The payload is not a JSON object of the expected shape.
    Malformed,
    /// The payload parses but fails the `bh > 0` channel gate.
    Gated,
}

/// Decode one sanitized line, applying the per-line tiers.
///
/// - `Ok(Malformed | Gated)`: the line carries no record and is skipped
///   silently.
/// - `Err(_)`: the payload is a well-formed gated record whose severity
///   token the decoder does not know. Skipped with a diagnostic.
/// - `Ok(Record(_))`: accepted.
pub fn decode_line(sanitized: &str) -> Result<LineOutcome, DecodeError> {
    let payload = locate_payload(sanitized);

    let entry: LogEntry = match serde_json::from_str(payload) {
        Ok(entry) => entry,
        Err(_) => return Ok(LineOutcome::Malformed),
    };

    if entry.gate <= 0 {
        return Ok(LineOutcome::Gated);
    }

    let severity = Severity::from_token(entry.severity_token.as_deref().unwrap_or(""))?;
    let timestamp = timestamp::from_binary(entry.timestamp_binary);

    Ok(LineOutcome::Record(DecodedLine {
        entry,
        severity,
        timestamp,
    }))
}
