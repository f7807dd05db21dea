//! Tower integration for faultline.
//!
//! This module provides a Tower `Layer` and `Service` that turn errors of the
//! wrapped service into rendered error responses. Each error is converted into
//! an [`ErrorOccurrence`], reported, and rendered with request metadata taken
//! from the incoming `http::Request`. Only
//! [`HandlerError::RenderingUnavailable`] is left as a service error.
//!
//! # Feature Flag
//!
//! Requires the `tower` feature (enabled by default).
//!
//! # Example
//!
//! ```rust,ignore
//! use faultline::tower::ErrorPageLayer;
//! use faultline::{ErrorHandler, HandlerConfig};
//! use tower::ServiceBuilder;
//!
//! let handler = ErrorHandler::new(HandlerConfig::from_env()?).shared();
//! let service = ServiceBuilder::new()
//!     .layer(ErrorPageLayer::new(handler))
//!     .service(my_service);
//! ```
//!
//! User information for log records can be supplied per request by inserting
//! a [`StaticContext`] into the request extensions.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::sync::Arc;

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use crate::error::HandlerError;
use crate::handler::ErrorHandler;
use crate::traits::StaticContext;
use crate::types::{ErrorOccurrence, IntoOccurrence, RequestMeta, RequestSnapshot, ResponseDescriptor};

/// A Tower [`Layer`] that renders service errors as error responses.
#[derive(Clone, Debug)]
pub struct ErrorPageLayer {
    handler: Arc<ErrorHandler>,
}

impl ErrorPageLayer {
    #[inline]
    pub fn new(handler: Arc<ErrorHandler>) -> Self {
        Self { handler }
    }

    #[inline]
    pub fn handler(&self) -> &ErrorHandler {
        &self.handler
    }
}

impl<S> Layer<S> for ErrorPageLayer {
    type Service = ErrorPageService<S>;

    #[inline]
    fn layer(&self, inner: S) -> Self::Service {
        ErrorPageService::new(inner, Arc::clone(&self.handler))
    }
}

/// A Tower [`Service`] created by [`ErrorPageLayer`].
///
/// An error from the inner service's `poll_ready` is held back and answered
/// by the next `call`, since readiness errors carry no request to render for.
/// A held error belongs to the service that saw it and is not cloned.
#[derive(Debug)]
pub struct ErrorPageService<S> {
    inner: S,
    handler: Arc<ErrorHandler>,
    not_ready: Option<ErrorOccurrence>,
}

impl<S: Clone> Clone for ErrorPageService<S> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone(), Arc::clone(&self.handler))
    }
}

impl<S> ErrorPageService<S> {
    #[inline]
    pub fn new(inner: S, handler: Arc<ErrorHandler>) -> Self {
        Self { inner, handler, not_ready: None }
    }

    #[inline]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    #[inline]
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, B> Service<http::Request<B>> for ErrorPageService<S>
where
    S: Service<http::Request<B>>,
    S::Error: IntoOccurrence,
    S::Response: From<ResponseDescriptor>,
{
    type Response = S::Response;
    type Error = HandlerError;
    type Future = ErrorPageFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if self.not_ready.is_some() {
            return Poll::Ready(Ok(()));
        }
        match self.inner.poll_ready(cx) {
            Poll::Ready(Err(error)) => {
                self.not_ready = Some(error.into_occurrence());
                Poll::Ready(Ok(()))
            },
            other => other.map(|_| Ok(())),
        }
    }

    fn call(&mut self, request: http::Request<B>) -> Self::Future {
        let pending = PendingError {
            handler: Arc::clone(&self.handler),
            meta: self.handler.request_meta(&request),
            snapshot: RequestSnapshot::of(&request),
            context: request.extensions().get::<StaticContext>().cloned().unwrap_or_default(),
        };

        match self.not_ready.take() {
            Some(occurrence) => ErrorPageFuture::failed(pending, occurrence),
            None => ErrorPageFuture::new(self.inner.call(request), pending),
        }
    }
}

/// What is needed to render an error once the inner future fails.
#[derive(Debug)]
struct PendingError {
    handler: Arc<ErrorHandler>,
    meta: RequestMeta,
    snapshot: RequestSnapshot,
    context: StaticContext,
}

impl PendingError {
    fn resolve<R>(self, occurrence: ErrorOccurrence) -> Result<R, HandlerError>
    where
        R: From<ResponseDescriptor>,
    {
        let occurrence = if occurrence.request().url.is_none() {
            occurrence.with_request(self.snapshot)
        } else {
            occurrence
        };
        self.handler.handle(&occurrence, &self.meta, &self.context).map(R::from)
    }
}

pin_project! {
    /// Future returned by [`ErrorPageService`].
    #[must_use = "futures do nothing unless polled"]
    pub struct ErrorPageFuture<F> {
        #[pin]
        inner: Option<F>,
        pending: Option<PendingError>,
        failed: Option<ErrorOccurrence>,
    }
}

impl<F> ErrorPageFuture<F> {
    #[inline]
    fn new(inner: F, pending: PendingError) -> Self {
        Self { inner: Some(inner), pending: Some(pending), failed: None }
    }

    #[inline]
    fn failed(pending: PendingError, occurrence: ErrorOccurrence) -> Self {
        Self { inner: None, pending: Some(pending), failed: Some(occurrence) }
    }
}

impl<F, T, E> Future for ErrorPageFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: IntoOccurrence,
    T: From<ResponseDescriptor>,
{
    type Output = Result<T, HandlerError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        if let Some(occurrence) = this.failed.take() {
            let pending = this.pending.take().expect("polled after completion");
            return Poll::Ready(pending.resolve(occurrence));
        }

        let inner = this.inner.as_pin_mut().expect("polled after completion");
        match inner.poll(cx) {
            Poll::Ready(Ok(response)) => {
                this.pending.take();
                Poll::Ready(Ok(response))
            },
            Poll::Ready(Err(error)) => {
                let pending = this.pending.take().expect("polled after completion");
                Poll::Ready(pending.resolve(error.into_occurrence()))
            },
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<F, T, E> FusedFuture for ErrorPageFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: IntoOccurrence,
    T: From<ResponseDescriptor>,
{
    #[inline]
    fn is_terminated(&self) -> bool {
        self.pending.is_none()
    }
}

/// Extension trait for wrapping services with error pages.
pub trait ErrorPageExt<Request>: Service<Request> + Sized {
    fn with_error_pages(self, handler: Arc<ErrorHandler>) -> ErrorPageService<Self> {
        ErrorPageService::new(self, handler)
    }
}

impl<S, Request> ErrorPageExt<Request> for S where S: Service<Request> {}
