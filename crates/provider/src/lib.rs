// Module structure for the BestHTTP diagnostic log provider.

// Decode pipeline
pub mod parser;

// Host-facing surface
pub mod reader;
pub mod sink;

// Re-export commonly used types
pub use parser::{DecodeError, LogMessage, MessageClass, Severity};
pub use reader::LogFileReader;
pub use sink::{MessageSink, ProgressKind, ReadProgress};
