//! Data carried between the classifier, identifier, reporter and renderer.
//!
//! # Examples
//!
//! ```
//! use faultline::{ErrorKind, ErrorOccurrence};
//!
//! let occurrence = ErrorOccurrence::new(ErrorKind::ValidationFailure, "email is required")
//!     .with_frame("signup::validate");
//!
//! assert_eq!(occurrence.kind().tag(), "validation");
//! assert_eq!(occurrence.top_frame().map(|f| f.as_str()), Some("signup::validate"));
//! ```
use smallvec::SmallVec;

pub mod classification;
pub mod correlation;
pub mod log_context;
pub mod occurrence;
pub mod response;

pub use classification::*;
pub use correlation::*;
pub use log_context::*;
pub use occurrence::*;
pub use response::*;

/// SmallVec-backed collection used for trace frames.
///
/// Most traces handed over by the host framework are short, so the first few
/// frames stay inline.
pub type ErrorVec<E> = SmallVec<[E; 4]>;
