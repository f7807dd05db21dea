//! The immutable record of one error being raised and handled.
//!
//! An [`ErrorOccurrence`] is created once, when the host framework first
//! observes a failure, and is only ever borrowed afterwards. The classifier,
//! reporter and renderer all read from the same instance, and the correlation
//! id is cached inside it so every consumer sees the same value.

use std::borrow::Cow;
use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::SystemTime;

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, StatusCode};

use crate::identifier::ErrorIdentifier;
use crate::types::{CorrelationId, ErrorVec};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// The kind of failure an occurrence represents.
///
/// Kinds map onto classifications through their [`tag`](ErrorKind::tag), so a
/// custom [`ErrorKind::Other`] tag can be given its own policy at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller is not logged in.
    AuthenticationFailure,
    /// The caller is logged in but not allowed to do this.
    AuthorizationFailure,
    /// An error that already carries an HTTP status code.
    HttpStatus(StatusCode),
    /// A looked-up resource or model does not exist.
    ResourceNotFound,
    /// The session token (CSRF) did not match.
    SessionTokenMismatch,
    /// Input failed validation.
    ValidationFailure,
    /// Anything else, identified by a free-form tag.
    Other(Cow<'static, str>),
}

impl ErrorKind {
    /// Creates a custom kind from a tag.
    #[inline]
    pub fn other(tag: impl Into<Cow<'static, str>>) -> Self {
        Self::Other(tag.into())
    }

    /// Stable tag used for policy lookup and fingerprinting.
    pub fn tag(&self) -> &str {
        match self {
            Self::AuthenticationFailure => "authentication",
            Self::AuthorizationFailure => "authorization",
            Self::HttpStatus(_) => "http_status",
            Self::ResourceNotFound => "not_found",
            Self::SessionTokenMismatch => "token_mismatch",
            Self::ValidationFailure => "validation",
            Self::Other(tag) => tag,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpStatus(code) => write!(f, "http_status({})", code.as_u16()),
            other => f.write_str(other.tag()),
        }
    }
}

/// One entry of an occurrence's stack trace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame(Cow<'static, str>);

impl Frame {
    #[inline]
    pub fn new(frame: impl Into<Cow<'static, str>>) -> Self {
        Self(frame.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Frame {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Frame {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// What was known about the request when the error was raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSnapshot {
    pub method: Option<Method>,
    pub url: Option<String>,
}

impl RequestSnapshot {
    #[inline]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method: Some(method), url: Some(url.into()) }
    }

    /// Captures method and full url from an `http::Request`.
    pub fn of<B>(request: &http::Request<B>) -> Self {
        Self { method: Some(request.method().clone()), url: Some(request.uri().to_string()) }
    }
}

/// Immutable record of a single error occurrence.
///
/// The builder methods consume `self`, so an occurrence is fully assembled
/// before anything borrows it. The correlation id is computed on first request
/// through [`correlation_id`](ErrorOccurrence::correlation_id) and never
/// recomputed for the same instance.
#[must_use]
#[derive(Debug, Clone)]
pub struct ErrorOccurrence {
    kind: ErrorKind,
    message: String,
    trace: ErrorVec<Frame>,
    headers: HeaderMap,
    timestamp: SystemTime,
    sequence: u64,
    request: RequestSnapshot,
    correlation: OnceLock<CorrelationId>,
}

impl ErrorOccurrence {
    /// Records a new occurrence stamped with the current time.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            trace: ErrorVec::new(),
            headers: HeaderMap::new(),
            timestamp: SystemTime::now(),
            sequence: SEQUENCE.fetch_add(1, Ordering::Relaxed),
            request: RequestSnapshot::default(),
            correlation: OnceLock::new(),
        }
    }

    /// Records an occurrence from a `std::error::Error`.
    ///
    /// The error's `Display` becomes the message and each entry of its
    /// `source()` chain becomes a trace frame, nearest cause first.
    pub fn from_error(kind: ErrorKind, error: &(dyn std::error::Error + 'static)) -> Self {
        let mut occurrence = Self::new(kind, error.to_string());
        let mut source = error.source();
        while let Some(cause) = source {
            occurrence.trace.push(Frame::new(format!("caused by: {cause}")));
            source = cause.source();
        }
        occurrence
    }

    /// Replaces the trace with the given frames, top frame first.
    pub fn with_trace<I, F>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Frame>,
    {
        self.trace = frames.into_iter().map(Into::into).collect();
        self
    }

    /// Appends one frame to the trace.
    pub fn with_frame(mut self, frame: impl Into<Frame>) -> Self {
        self.trace.push(frame.into());
        self
    }

    /// Attaches a header that must be sent with whatever response is rendered.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_request(mut self, request: RequestSnapshot) -> Self {
        self.request = request;
        self
    }

    /// Overrides the timestamp. Mostly useful for replaying recorded failures.
    pub fn at(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace frames, top frame first.
    #[inline]
    pub fn trace(&self) -> &[Frame] {
        &self.trace
    }

    #[inline]
    pub fn top_frame(&self) -> Option<&Frame> {
        self.trace.first()
    }

    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[inline]
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Process-wide construction order of this occurrence.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    #[inline]
    pub fn request(&self) -> &RequestSnapshot {
        &self.request
    }

    /// Returns the correlation id, computing it with `identifier` on first use.
    pub fn correlation_id(&self, identifier: &ErrorIdentifier) -> &CorrelationId {
        self.correlation.get_or_init(|| identifier.identify(self))
    }

    /// Returns the cached correlation id, if one was computed already.
    #[inline]
    pub fn cached_correlation_id(&self) -> Option<&CorrelationId> {
        self.correlation.get()
    }
}

impl Display for ErrorOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Conversion from a service error into an occurrence.
///
/// Implemented by the error types of services wrapped in the tower layer.
pub trait IntoOccurrence {
    fn into_occurrence(self) -> ErrorOccurrence;
}

impl IntoOccurrence for ErrorOccurrence {
    #[inline]
    fn into_occurrence(self) -> ErrorOccurrence {
        self
    }
}
