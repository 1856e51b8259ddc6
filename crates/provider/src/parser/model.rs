use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Canonical severity scale every decoded entry is mapped onto.
///
/// Ordered from least to most severe so that callers can threshold with
/// ordinary comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Verbose,
    Information,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Map a wire severity token onto the canonical scale.
    ///
    /// The table is exact-match and closed: any other token, including an
    /// empty one, is a decode error for the entry. Callers surface this as
    /// a per-line diagnostic, not as a silent skip.
    pub fn from_token(token: &str) -> Result<Self, DecodeError> {
        match token {
            "All" => Ok(Severity::Verbose),
            "Verbose" => Ok(Severity::Verbose),
            "Information" => Ok(Severity::Information),
            "Warning" => Ok(Severity::Warning),
            "Error" => Ok(Severity::Error),
            "Exception" => Ok(Severity::Critical),
            other => Err(DecodeError::UnknownSeverity(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Verbose => "verbose",
            Severity::Information => "information",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log class a message is filed under by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageClass {
    #[default]
    General,
}

/// Per-line decode failure that warrants a diagnostic.
///
/// These never abort the file: the offending line is skipped, a warning is
/// logged, and reading continues.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unknown severity token: {0:?}")]
    UnknownSeverity(String),
}

/// The normalized output unit delivered to the host viewer.
///
/// Owned by the result sequence for the whole file. Immutable once appended;
/// the property map is only written during context flattening immediately
/// after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogMessage {
    /// Free-text message body.
    pub text: String,
    /// Canonical severity.
    pub severity: Severity,
    /// The line this message was decoded from, markup removed.
    pub raw: String,
    /// Instant decoded from the entry's binary timestamp.
    pub timestamp: DateTime<Utc>,
    /// Producer thread id.
    pub thread_id: i64,
    /// Module (subsystem) name, when the entry carried one.
    pub module: Option<String>,
    /// Flattened context properties. Keys are unique; a later write for the
    /// same key replaces the earlier one.
    pub properties: HashMap<String, String>,
    /// Name of the source file this message belongs to.
    pub file_name: String,
    /// Viewer log class.
    pub class: MessageClass,
}
