//! The error handler facade.
//!
//! [`ErrorHandler`] owns one classifier, identifier, reporter and renderer and
//! wires them together: an occurrence is classified once, its correlation id is
//! computed once (and cached on the occurrence), and both reporting and
//! rendering see the same values.
//!
//! # Examples
//!
//! ```
//! use faultline::{ErrorHandler, ErrorKind, ErrorOccurrence, HandlerConfig, RequestMeta};
//!
//! let handler = ErrorHandler::new(HandlerConfig::default());
//! let occurrence = ErrorOccurrence::new(ErrorKind::AuthenticationFailure, "no session");
//!
//! let response = handler.handle(&occurrence, &RequestMeta::json(), &()).unwrap();
//! assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);
//! ```

use std::sync::Arc;

use crate::classifier::ErrorClassifier;
use crate::config::HandlerConfig;
use crate::error::Result;
use crate::identifier::ErrorIdentifier;
use crate::renderer::ErrorRenderer;
use crate::reporter::ErrorReporter;
use crate::traits::{ContextSource, LogSink, TemplateResolver, Translator};
use crate::types::{CorrelationId, ErrorClassification, ErrorOccurrence, RequestMeta, ResponseDescriptor};

#[derive(Debug, Clone)]
pub struct ErrorHandler {
    config: HandlerConfig,
    classifier: ErrorClassifier,
    identifier: ErrorIdentifier,
    reporter: ErrorReporter,
    renderer: ErrorRenderer,
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self::new(HandlerConfig::default())
    }
}

impl ErrorHandler {
    pub fn new(config: HandlerConfig) -> Self {
        Self {
            classifier: ErrorClassifier::new(),
            identifier: ErrorIdentifier::new(config.identifier),
            reporter: ErrorReporter::default(),
            renderer: ErrorRenderer::new(&config),
            config,
        }
    }

    pub fn with_classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.reporter = ErrorReporter::new(sink);
        self
    }

    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.renderer = self.renderer.with_translator(translator);
        self
    }

    pub fn with_resolver(mut self, resolver: impl TemplateResolver + 'static) -> Self {
        self.renderer = self.renderer.with_resolver(resolver);
        self
    }

    /// Wraps the handler for sharing across services.
    #[inline]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    #[inline]
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    #[inline]
    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    #[inline]
    pub fn classify(&self, occurrence: &ErrorOccurrence) -> ErrorClassification {
        self.classifier.classify(occurrence)
    }

    /// The occurrence's correlation id, computed on first call.
    #[inline]
    pub fn identify<'a>(&self, occurrence: &'a ErrorOccurrence) -> &'a CorrelationId {
        occurrence.correlation_id(&self.identifier)
    }

    /// Logs `occurrence` if it is reportable. Never fails.
    ///
    /// Returns whether a record was written.
    pub fn report(&self, occurrence: &ErrorOccurrence, source: &dyn ContextSource) -> bool {
        let class = self.classify(occurrence);
        self.reporter.report(occurrence, class, self.identify(occurrence), source)
    }

    /// Renders the response for `occurrence`.
    ///
    /// # Errors
    ///
    /// [`HandlerError::RenderingUnavailable`](crate::HandlerError::RenderingUnavailable)
    /// when no error view can be resolved.
    pub fn render(&self, occurrence: &ErrorOccurrence, meta: &RequestMeta) -> Result<ResponseDescriptor> {
        let class = self.classify(occurrence);
        self.renderer.render(occurrence, class, self.identify(occurrence), meta)
    }

    /// Reports, then renders, `occurrence` under a single correlation id.
    pub fn handle(
        &self,
        occurrence: &ErrorOccurrence,
        meta: &RequestMeta,
        source: &dyn ContextSource,
    ) -> Result<ResponseDescriptor> {
        let class = self.classify(occurrence);
        let id = self.identify(occurrence);
        self.reporter.report(occurrence, class, id, source);
        self.renderer.render(occurrence, class, id, meta)
    }

    /// Request metadata for `request`, with the configured debug flag.
    pub fn request_meta<B>(&self, request: &http::Request<B>) -> RequestMeta {
        RequestMeta::from_request(request, self.config.debug)
    }
}
