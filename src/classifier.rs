//! Mapping from error kinds to status, reportability and category.
//!
//! The built-in table separates expected, caller-caused failures (rendered but
//! never logged) from unexpected system failures (always logged). Callers can
//! register further tags, or override built-in ones, with [`ErrorPolicy`]
//! values.
//!
//! # Examples
//!
//! ```
//! use faultline::{Category, ErrorClassifier, ErrorKind, ErrorOccurrence, ErrorPolicy};
//! use http::StatusCode;
//!
//! let classifier = ErrorClassifier::new().register(
//!     "rate_limited",
//!     ErrorPolicy::quiet(StatusCode::TOO_MANY_REQUESTS, Category::HttpGeneric),
//! );
//!
//! let occurrence = ErrorOccurrence::new(ErrorKind::other("rate_limited"), "slow down");
//! let class = classifier.classify(&occurrence);
//! assert_eq!(class.status, StatusCode::TOO_MANY_REQUESTS);
//! assert!(!class.reportable);
//! ```

use std::collections::HashMap;

use http::StatusCode;

use crate::types::{Category, ErrorClassification, ErrorKind, ErrorOccurrence, ErrorPolicy};

/// Classifies occurrences. `classify` is pure and total.
#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier {
    policies: HashMap<String, ErrorPolicy>,
}

impl ErrorClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a policy for a kind tag. Registered policies take precedence
    /// over the built-in table.
    ///
    /// All [`ErrorKind::HttpStatus`] kinds share the `http_status` tag, so a
    /// policy registered for it sets reportability and category only; the
    /// status always stays the occurrence's own code.
    pub fn register(mut self, tag: impl Into<String>, policy: ErrorPolicy) -> Self {
        self.policies.insert(tag.into(), policy);
        self
    }

    pub fn register_all<I, T>(mut self, policies: I) -> Self
    where
        I: IntoIterator<Item = (T, ErrorPolicy)>,
        T: Into<String>,
    {
        self.policies.extend(policies.into_iter().map(|(tag, policy)| (tag.into(), policy)));
        self
    }

    /// Stops reporting occurrences of `kind` while keeping their status and
    /// category.
    pub fn dont_report(mut self, kind: &ErrorKind) -> Self {
        let current = self
            .policies
            .get(kind.tag())
            .copied()
            .unwrap_or_else(|| builtin(kind).into());
        self.policies.insert(kind.tag().to_owned(), ErrorPolicy { reportable: false, ..current });
        self
    }

    /// The registered policy for `tag`, if any.
    pub fn policy(&self, tag: &str) -> Option<&ErrorPolicy> {
        self.policies.get(tag)
    }

    pub fn classify(&self, occurrence: &ErrorOccurrence) -> ErrorClassification {
        let kind = occurrence.kind();
        match (self.policies.get(kind.tag()), kind) {
            (Some(policy), ErrorKind::HttpStatus(code)) => {
                ErrorClassification { status: *code, ..policy.classification() }
            },
            (Some(policy), _) => policy.classification(),
            (None, _) => builtin(kind),
        }
    }
}

fn builtin(kind: &ErrorKind) -> ErrorClassification {
    let quiet = |status, category| ErrorClassification::new(status, false, category);
    match kind {
        ErrorKind::AuthenticationFailure => quiet(StatusCode::UNAUTHORIZED, Category::Authentication),
        ErrorKind::AuthorizationFailure => quiet(StatusCode::FORBIDDEN, Category::Authorization),
        ErrorKind::HttpStatus(code) => quiet(*code, Category::HttpGeneric),
        ErrorKind::ResourceNotFound => quiet(StatusCode::NOT_FOUND, Category::NotFound),
        ErrorKind::SessionTokenMismatch => quiet(page_expired(), Category::TokenMismatch),
        ErrorKind::ValidationFailure => {
            quiet(StatusCode::UNPROCESSABLE_ENTITY, Category::Validation)
        },
        ErrorKind::Other(_) => ErrorClassification::unhandled(),
    }
}

/// 419 has no registered reason phrase, so there is no associated constant.
fn page_expired() -> StatusCode {
    StatusCode::from_u16(419).unwrap_or(StatusCode::BAD_REQUEST)
}
