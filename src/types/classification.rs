use std::fmt::{self, Display};

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Broad category of an error, driving both reporting and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Authentication,
    Authorization,
    Validation,
    NotFound,
    TokenMismatch,
    HttpGeneric,
    Unhandled,
}

impl Category {
    /// Whether errors of this category are caused by the caller rather than
    /// the system.
    ///
    /// User-caused errors are rendered with a clean message and never logged
    /// as system failures.
    #[inline]
    pub const fn is_user_caused(self) -> bool {
        matches!(
            self,
            Self::Authentication
                | Self::Authorization
                | Self::Validation
                | Self::TokenMismatch
                | Self::NotFound
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::TokenMismatch => "token_mismatch",
            Self::HttpGeneric => "http_generic",
            Self::Unhandled => "unhandled",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying an occurrence. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorClassification {
    pub status: StatusCode,
    pub reportable: bool,
    pub category: Category,
}

impl ErrorClassification {
    #[inline]
    pub const fn new(status: StatusCode, reportable: bool, category: Category) -> Self {
        Self { status, reportable, category }
    }

    /// Classification used for anything no policy matches.
    #[inline]
    pub const fn unhandled() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, true, Category::Unhandled)
    }
}

/// A registered kind-to-classification mapping.
///
/// Policies are plain data, so they can come from configuration as well as
/// from code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPolicy {
    #[serde(with = "status_code")]
    pub status: StatusCode,
    pub reportable: bool,
    pub category: Category,
}

impl ErrorPolicy {
    #[inline]
    pub const fn new(status: StatusCode, reportable: bool, category: Category) -> Self {
        Self { status, reportable, category }
    }

    /// An expected, caller-caused failure that is rendered but not logged.
    #[inline]
    pub const fn quiet(status: StatusCode, category: Category) -> Self {
        Self::new(status, false, category)
    }

    #[inline]
    pub const fn classification(self) -> ErrorClassification {
        ErrorClassification::new(self.status, self.reportable, self.category)
    }
}

impl From<ErrorPolicy> for ErrorClassification {
    fn from(policy: ErrorPolicy) -> Self {
        policy.classification()
    }
}

impl From<ErrorClassification> for ErrorPolicy {
    fn from(class: ErrorClassification) -> Self {
        Self::new(class.status, class.reportable, class.category)
    }
}

mod status_code {
    use http::StatusCode;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(status.as_u16())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StatusCode, D::Error> {
        let code = u16::deserialize(deserializer)?;
        StatusCode::from_u16(code).map_err(D::Error::custom)
    }
}
