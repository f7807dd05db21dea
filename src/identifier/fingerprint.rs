use std::fmt::{self, Display, Write};
use std::time::{SystemTimeError, UNIX_EPOCH};

use crate::types::ErrorOccurrence;

/// An input of the fingerprint could not be extracted from the occurrence.
#[derive(Debug)]
pub enum FingerprintError {
    /// The occurrence timestamp lies before the Unix epoch.
    Timestamp(SystemTimeError),
    /// A `Display` implementation failed while being hashed.
    Format(fmt::Error),
}

impl Display for FingerprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp(err) => write!(f, "occurrence timestamp is unusable: {err}"),
            Self::Format(_) => f.write_str("failed to format fingerprint input"),
        }
    }
}

impl std::error::Error for FingerprintError {}

impl From<fmt::Error> for FingerprintError {
    fn from(err: fmt::Error) -> Self {
        Self::Format(err)
    }
}

/// Configuration builder for customizing fingerprint generation.
pub struct FingerprintConfig<'a> {
    pub(crate) occurrence: &'a ErrorOccurrence,
    pub(crate) include_kind: bool,
    pub(crate) include_message: bool,
    pub(crate) include_top_frame: bool,
    pub(crate) include_time: bool,
}

impl<'a> FingerprintConfig<'a> {
    pub fn new(occurrence: &'a ErrorOccurrence) -> Self {
        Self {
            occurrence,
            include_kind: true,
            include_message: true,
            include_top_frame: true,
            include_time: false,
        }
    }

    /// Whether to include the error kind, status code included (default: true).
    #[must_use]
    pub fn include_kind(mut self, include: bool) -> Self {
        self.include_kind = include;
        self
    }

    /// Whether to include the error message (default: true).
    #[must_use]
    pub fn include_message(mut self, include: bool) -> Self {
        self.include_message = include;
        self
    }

    /// Whether to include the top trace frame, the first in the trace (default: true).
    #[must_use]
    pub fn include_top_frame(mut self, include: bool) -> Self {
        self.include_top_frame = include;
        self
    }

    /// Whether to salt with the occurrence's timestamp and sequence number
    /// (default: false).
    #[must_use]
    pub fn include_time(mut self, include: bool) -> Self {
        self.include_time = include;
        self
    }

    /// Computes the fingerprint using the configured options.
    pub fn compute(&self) -> Result<u64, FingerprintError> {
        const FNV_OFFSET: u64 = 0xcbf29ce484222325;
        let mut hash = FNV_OFFSET;

        if self.include_kind {
            hash_bytes(&mut hash, b"kind:");
            write!(DisplayHasher::new(&mut hash), "{}", self.occurrence.kind())?;
        }

        if self.include_message {
            hash_bytes(&mut hash, b"msg:");
            hash_bytes(&mut hash, self.occurrence.message().as_bytes());
        }

        if self.include_top_frame {
            if let Some(frame) = self.occurrence.top_frame() {
                hash_bytes(&mut hash, b"frame:");
                hash_bytes(&mut hash, frame.as_str().as_bytes());
            }
        }

        if self.include_time {
            let since_epoch = self
                .occurrence
                .timestamp()
                .duration_since(UNIX_EPOCH)
                .map_err(FingerprintError::Timestamp)?;
            hash_bytes(&mut hash, b"at:");
            hash_bytes(&mut hash, &since_epoch.as_nanos().to_le_bytes());
            hash_bytes(&mut hash, b"seq:");
            hash_bytes(&mut hash, &self.occurrence.sequence().to_le_bytes());
        }

        Ok(hash)
    }
}

/// FNV-1a prime constant for 64-bit hash.
const FNV_PRIME: u64 = 0x100000001b3;

#[inline(always)]
fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for &byte in bytes {
        *hash ^= byte as u64;
        *hash = hash.wrapping_mul(FNV_PRIME);
    }
}

struct DisplayHasher<'a> {
    hash: &'a mut u64,
}

impl<'a> DisplayHasher<'a> {
    #[inline(always)]
    fn new(hash: &'a mut u64) -> Self {
        Self { hash }
    }
}

impl Write for DisplayHasher<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        hash_bytes(self.hash, s.as_bytes());
        Ok(())
    }
}
