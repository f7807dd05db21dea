use std::fmt::{self, Display};

use crate::types::LogRecord;

/// Failure reported by a [`LogSink`]. Never propagated past the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError(String);

impl SinkError {
    #[inline]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for SinkError {}

/// Destination for reported occurrences.
pub trait LogSink: Send + Sync {
    fn write(&self, record: &LogRecord) -> Result<(), SinkError>;
}

impl<S: LogSink + ?Sized> LogSink for std::sync::Arc<S> {
    fn write(&self, record: &LogRecord) -> Result<(), SinkError> {
        (**self).write(record)
    }
}

/// Emits each record as a `tracing` error event.
///
/// The log context is attached as a JSON string so it survives any subscriber
/// format unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, record: &LogRecord) -> Result<(), SinkError> {
        let context =
            serde_json::to_string(&record.context).map_err(|e| SinkError::new(e.to_string()))?;

        tracing::error!(
            identifier = %record.id,
            category = %record.category,
            status = record.status,
            kind = %record.kind,
            context = %context,
            "{}",
            record.message
        );
        Ok(())
    }
}
