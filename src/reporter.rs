//! Structured logging of reportable occurrences.

use std::sync::Arc;

use crate::traits::{ContextSource, LogSink, TracingSink};
use crate::types::{CorrelationId, ErrorClassification, ErrorOccurrence, LogContext, LogRecord};

/// Writes a [`LogRecord`] for every reportable occurrence.
///
/// Reporting never fails outward: context lookups degrade field by field and
/// sink failures are logged locally and dropped.
#[derive(Clone)]
pub struct ErrorReporter {
    sink: Arc<dyn LogSink>,
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(TracingSink)
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter").finish_non_exhaustive()
    }
}

impl ErrorReporter {
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self { sink: Arc::new(sink) }
    }

    pub fn with_shared_sink(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Reports `occurrence` if `class` is reportable, under the given id.
    ///
    /// Returns whether a record was handed to the sink successfully.
    pub fn report(
        &self,
        occurrence: &ErrorOccurrence,
        class: ErrorClassification,
        id: &CorrelationId,
        source: &dyn ContextSource,
    ) -> bool {
        if !class.reportable {
            tracing::debug!(
                kind = %occurrence.kind(),
                category = %class.category,
                "skipping report of expected error"
            );
            return false;
        }

        let record = LogRecord {
            id: id.clone(),
            category: class.category,
            status: class.status.as_u16(),
            kind: occurrence.kind().to_string(),
            message: occurrence.message().to_owned(),
            context: LogContext::gather(source, occurrence, id.clone()),
        };

        match self.sink.write(&record) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(identifier = %record.id, error = %err, "failed to write error report");
                false
            },
        }
    }
}
