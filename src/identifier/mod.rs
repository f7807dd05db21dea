//! Correlation ids for error occurrences.
//!
//! An id is a 64-bit FNV-1a fingerprint of the occurrence's kind, message and
//! top trace frame (the first one), rendered as 16 hex characters. Under the default
//! [`IdentifierStrategy::PerOccurrence`] the fingerprint is also salted with the
//! occurrence's timestamp and sequence number, so two identical failures get
//! different ids while the same occurrence always gets the same one.
//!
//! # Examples
//!
//! ```
//! use faultline::{ErrorIdentifier, ErrorKind, ErrorOccurrence, IdentifierStrategy};
//!
//! let identifier = ErrorIdentifier::new(IdentifierStrategy::ContentAddressed);
//! let first = ErrorOccurrence::new(ErrorKind::other("db"), "connection refused");
//! let retry = ErrorOccurrence::new(ErrorKind::other("db"), "connection refused");
//!
//! assert_eq!(identifier.identify(&first), identifier.identify(&retry));
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{CorrelationId, ErrorOccurrence};

mod fingerprint;

pub use fingerprint::{FingerprintConfig, FingerprintError};

/// Whether ids are unique per occurrence or shared by identical failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierStrategy {
    /// Salted with timestamp and sequence number.
    #[default]
    PerOccurrence,
    /// Kind, message and top frame only; retries of the same failure share an id.
    ContentAddressed,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorIdentifier {
    strategy: IdentifierStrategy,
}

impl ErrorIdentifier {
    #[inline]
    pub const fn new(strategy: IdentifierStrategy) -> Self {
        Self { strategy }
    }

    #[inline]
    pub const fn strategy(&self) -> IdentifierStrategy {
        self.strategy
    }

    /// Derives the id for `occurrence`. Never fails.
    ///
    /// When an input cannot be extracted the placeholder id is returned and a
    /// warning is logged.
    pub fn identify(&self, occurrence: &ErrorOccurrence) -> CorrelationId {
        let salted = self.strategy == IdentifierStrategy::PerOccurrence;
        match FingerprintConfig::new(occurrence).include_time(salted).compute() {
            Ok(fingerprint) => CorrelationId::from_fingerprint(fingerprint),
            Err(err) => {
                tracing::warn!(
                    kind = %occurrence.kind(),
                    error = %err,
                    "could not fingerprint error occurrence, using placeholder id"
                );
                CorrelationId::placeholder()
            },
        }
    }
}
