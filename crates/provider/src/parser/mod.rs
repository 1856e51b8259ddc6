/// Line-to-record decode pipeline.
///
/// Converts one raw diagnostic-log line into at most one canonical viewer
/// message, in fixed stages:
///
/// - `markup.rs`: color-markup stripping and JSON payload location
/// - `timestamp.rs`: binary date-time decoding
/// - `entry.rs`: wire record parsing and the per-line skip/accept tiers
/// - `model.rs`: severity scale, canonical message, decode errors
/// - `context.rs`: nested context flattening into dotted property keys
/// - `metrics.rs`: decode counters
///
/// # Failure tiers
///
/// A line that is not a well-formed gated record skips silently; a
/// well-formed gated record the decoder cannot map skips with a
/// diagnostic; only file-level I/O failure (handled by the reader) affects
/// anything beyond its own line.

pub mod context;
pub mod entry;
pub mod markup;
pub mod metrics;
pub mod model;
pub mod timestamp;

// Re-export commonly used types
pub use entry::{decode_line, DecodedLine, LineOutcome, LogEntry};
pub use markup::strip_markup;
pub use model::{DecodeError, LogMessage, MessageClass, Severity};
