use std::fmt::{self, Display, Write};

use serde::{Serialize, Serializer};

const PLACEHOLDER: &str = "unidentified";

/// Opaque token joining a rendered error page to its log record.
///
/// Normally the 16-character hex form of a 64-bit fingerprint; the fixed
/// [`placeholder`](CorrelationId::placeholder) is used when no fingerprint
/// could be computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Builds an id from a raw fingerprint.
    pub fn from_fingerprint(fingerprint: u64) -> Self {
        let mut id = String::with_capacity(16);
        let _ = write!(id, "{:016x}", fingerprint);
        Self(id)
    }

    #[inline]
    pub fn placeholder() -> Self {
        Self(PLACEHOLDER.to_owned())
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CorrelationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
