//! Classification, identification, reporting and rendering of HTTP request
//! errors.
//!
//! An error raised while serving a request becomes an [`ErrorOccurrence`].
//! The [`ErrorHandler`] then:
//!
//! - classifies it ([`ErrorClassifier`]) into a status code, a category and a
//!   reportable flag,
//! - derives a [`CorrelationId`] for it ([`ErrorIdentifier`]),
//! - logs reportable occurrences with user and request context
//!   ([`ErrorReporter`]),
//! - renders a JSON body, a redirect, a debug dump or an error page
//!   ([`ErrorRenderer`]).
//!
//! The id shown on a production error page is the same id found in the log
//! record, so a user report can be joined to the failure behind it.
//!
//! # Examples
//!
//! ## Rendering an error page
//!
//! ```
//! use faultline::{ErrorHandler, ErrorKind, ErrorOccurrence, HandlerConfig, RequestMeta, ResponseDescriptor};
//!
//! let handler = ErrorHandler::new(HandlerConfig::default());
//! let occurrence = ErrorOccurrence::new(ErrorKind::other("db"), "connection refused");
//!
//! let response = handler.handle(&occurrence, &RequestMeta::html(), &()).unwrap();
//! match response {
//!     ResponseDescriptor::Page { page, .. } => {
//!         assert_eq!(page.code, 500);
//!         assert_eq!(&page.id, handler.identify(&occurrence));
//!     },
//!     other => panic!("unexpected response: {other:?}"),
//! }
//! ```
//!
//! ## Registering a custom kind
//!
//! ```
//! use faultline::{Category, ErrorClassifier, ErrorHandler, ErrorKind, ErrorOccurrence, ErrorPolicy};
//! use http::StatusCode;
//!
//! let classifier = ErrorClassifier::new()
//!     .register("maintenance", ErrorPolicy::quiet(StatusCode::SERVICE_UNAVAILABLE, Category::HttpGeneric));
//! let handler = ErrorHandler::default().with_classifier(classifier);
//!
//! let occurrence = ErrorOccurrence::new(ErrorKind::other("maintenance"), "down for upgrade");
//! assert_eq!(handler.classify(&occurrence).status, StatusCode::SERVICE_UNAVAILABLE);
//! ```

/// Kind-to-classification policy table
pub mod classifier;
/// Configuration loading
pub mod config;
/// Handler error type
pub mod error;
/// Facade wiring all components together
pub mod handler;
/// Correlation id derivation
pub mod identifier;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Response selection
pub mod renderer;
/// Structured logging of reportable occurrences
pub mod reporter;
/// Collaborator interfaces
pub mod traits;
/// Occurrences, classifications and responses
pub mod types;

/// Tower integration - Layer and Service implementations (requires `tower` feature)
#[cfg(feature = "tower")]
pub mod tower;

pub use classifier::ErrorClassifier;
pub use crate::config::{HandlerConfig, LoginLocations};
pub use error::{HandlerError, Result};
pub use handler::ErrorHandler;
pub use identifier::{ErrorIdentifier, FingerprintConfig, FingerprintError, IdentifierStrategy};
pub use renderer::ErrorRenderer;
pub use reporter::ErrorReporter;
pub use traits::*;
pub use types::*;
