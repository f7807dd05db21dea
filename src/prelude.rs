//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use faultline::prelude::*;
//!
//! let handler = ErrorHandler::new(HandlerConfig::default());
//! let occurrence = ErrorOccurrence::new(ErrorKind::ResourceNotFound, "no such post");
//! assert_eq!(handler.classify(&occurrence).category, Category::NotFound);
//! ```

pub use crate::config::HandlerConfig;
pub use crate::error::HandlerError;
pub use crate::handler::ErrorHandler;
pub use crate::traits::{ContextSource, LogSink, StaticContext, TemplateResolver, Translator};
pub use crate::types::{
    Category, CorrelationId, ErrorKind, ErrorOccurrence, IntoOccurrence, RequestMeta,
    ResponseDescriptor,
};

#[cfg(feature = "tower")]
pub use crate::tower::{ErrorPageExt, ErrorPageLayer};
