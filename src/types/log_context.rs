//! Structured metadata attached to a reported occurrence.

use serde::Serialize;

use crate::traits::{ContextError, ContextSource};
use crate::types::{Category, CorrelationId, ErrorOccurrence};

/// Per-occurrence logging context.
///
/// Built once per report call and dropped when it returns. Every field but the
/// correlation id is optional: a lookup that fails leaves its field empty
/// without affecting the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogContext {
    #[serde(rename = "user", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "email", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "identifier")]
    pub correlation_id: CorrelationId,
}

impl LogContext {
    /// A context carrying only the correlation id.
    #[inline]
    pub fn bare(correlation_id: CorrelationId) -> Self {
        Self { user_id: None, user_email: None, url: None, correlation_id }
    }

    /// Gathers each field from `source` independently.
    ///
    /// When the source does not know the request url, the url captured in the
    /// occurrence's request snapshot is used instead.
    pub fn gather(
        source: &dyn ContextSource,
        occurrence: &ErrorOccurrence,
        correlation_id: CorrelationId,
    ) -> Self {
        let url = field("url", source.request_url())
            .or_else(|| occurrence.request().url.clone());

        Self {
            user_id: field("user", source.user_id()),
            user_email: field("email", source.user_email()),
            url,
            correlation_id,
        }
    }
}

fn field(name: &'static str, lookup: Result<Option<String>, ContextError>) -> Option<String> {
    match lookup {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(field = name, error = %err, "dropping log context field");
            None
        },
    }
}

/// The record handed to a [`LogSink`](crate::traits::LogSink).
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub id: CorrelationId,
    pub category: Category,
    pub status: u16,
    pub kind: String,
    pub message: String,
    pub context: LogContext,
}
