//! Narrow interfaces to the collaborators the core calls into.
//!
//! - [`ContextSource`]: who the current user is and which url was requested
//! - [`LogSink`]: where reported occurrences are written
//! - [`Translator`]: localized error titles and messages
//! - [`TemplateResolver`]: error page views
//!
//! Each trait ships with a small in-crate implementation so the handler works
//! out of the box and tests can stand in for the host framework.

pub mod context_source;
pub mod log_sink;
pub mod template;
pub mod translator;

pub use context_source::{ContextError, ContextSource, StaticContext};
pub use log_sink::{LogSink, SinkError, TracingSink};
pub use template::{DirectoryResolver, MapResolver, ResolvedView, TemplateResolver};
pub use translator::{CatalogTranslator, NullTranslator, Translator};
