//! Selection of the response sent back for an occurrence.
//!
//! Branches are tried in order and the first match wins:
//!
//! 1. authentication failures get a JSON 401 or a redirect to a login page
//! 2. not-found errors (missing resources and plain 404 statuses) are
//!    redirected when a redirect target is configured
//! 3. debug mode exposes the raw error detail
//! 4. JSON callers get a sanitized JSON body
//! 5. everyone else gets a templated error page
//!
//! Headers attached to the occurrence (e.g. `Retry-After`) are copied onto
//! the response whichever branch ran.

use std::sync::Arc;

use http::{HeaderMap, StatusCode};
use serde_json::json;

use crate::config::{HandlerConfig, LoginLocations};
use crate::error::{HandlerError, Result};
use crate::traits::{
    CatalogTranslator, DirectoryResolver, MapResolver, TemplateResolver, Translator,
};
use crate::types::{
    Category, CorrelationId, DebugDetail, ErrorClassification, ErrorOccurrence, ErrorPage,
    RequestMeta, ResponseDescriptor,
};

const GENERIC_VIEW: &str = "<!doctype html>\n<html>\n<head><title>{{ code }} {{ name }}</title></head>\n<body>\n<h1>{{ name }}</h1>\n<p>{{ message }}</p>\n<p><small>Error ID: {{ id }}</small></p>\n</body>\n</html>\n";

/// Turns an occurrence into a [`ResponseDescriptor`].
#[derive(Clone)]
pub struct ErrorRenderer {
    not_found_redirect: Option<String>,
    login: LoginLocations,
    namespace: String,
    translator: Arc<dyn Translator>,
    resolver: Arc<dyn TemplateResolver>,
}

impl std::fmt::Debug for ErrorRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorRenderer")
            .field("not_found_redirect", &self.not_found_redirect)
            .field("login", &self.login)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl ErrorRenderer {
    /// Builds a renderer from configuration.
    ///
    /// Views are read from `views_dir` when configured; otherwise a built-in
    /// generic page is available as `{namespace}/error`.
    pub fn new(config: &HandlerConfig) -> Self {
        let resolver: Arc<dyn TemplateResolver> = match &config.views_dir {
            Some(dir) => Arc::new(DirectoryResolver::new(dir)),
            None => Arc::new(
                MapResolver::new().with_view(format!("{}/error", config.view_namespace), GENERIC_VIEW),
            ),
        };

        Self {
            not_found_redirect: config.not_found_redirect.clone(),
            login: config.login.clone(),
            namespace: config.view_namespace.clone(),
            translator: Arc::new(CatalogTranslator::with_defaults()),
            resolver,
        }
    }

    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    pub fn with_resolver(mut self, resolver: impl TemplateResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Renders `occurrence`, already classified as `class` and identified as `id`.
    ///
    /// # Errors
    ///
    /// [`HandlerError::RenderingUnavailable`] when an error page is needed but
    /// neither the code-specific nor the generic view can be resolved.
    pub fn render(
        &self,
        occurrence: &ErrorOccurrence,
        class: ErrorClassification,
        id: &CorrelationId,
        meta: &RequestMeta,
    ) -> Result<ResponseDescriptor> {
        let mut response = self.select(occurrence, class, id, meta)?;

        let headers = response.headers_mut();
        for (name, value) in occurrence.headers() {
            headers.append(name.clone(), value.clone());
        }
        Ok(response)
    }

    fn select(
        &self,
        occurrence: &ErrorOccurrence,
        class: ErrorClassification,
        id: &CorrelationId,
        meta: &RequestMeta,
    ) -> Result<ResponseDescriptor> {
        if class.category == Category::Authentication {
            return Ok(self.unauthenticated(occurrence, meta));
        }

        if class.category == Category::NotFound || class.status == StatusCode::NOT_FOUND {
            if let Some(target) = &self.not_found_redirect {
                return Ok(redirect(target.clone(), None));
            }
        }

        if meta.debug {
            return Ok(debug_response(occurrence, class, id, meta));
        }

        let code = class.status.as_u16();
        let name = self.translator.translate_or_key(&format!("error.{code}.name"));
        let message = self.translator.translate_or_key(&format!("error.{code}.message"));

        if meta.wants_json() {
            return Ok(ResponseDescriptor::Json {
                status: class.status,
                headers: HeaderMap::new(),
                body: json!({ "id": id, "code": code, "name": name, "message": message }),
            });
        }

        let page = ErrorPage { id: id.clone(), code, name, message, summary: String::new() };
        self.page(class.status, page)
    }

    fn unauthenticated(&self, occurrence: &ErrorOccurrence, meta: &RequestMeta) -> ResponseDescriptor {
        if meta.wants_json() {
            return ResponseDescriptor::Json {
                status: StatusCode::UNAUTHORIZED,
                headers: HeaderMap::new(),
                body: json!({ "error": "Unauthenticated." }),
            };
        }

        let location = self.login.for_segment(meta.path_segment.as_deref()).to_owned();
        let intended = meta.url.clone().or_else(|| occurrence.request().url.clone());
        redirect(location, intended)
    }

    fn page(&self, status: StatusCode, page: ErrorPage) -> Result<ResponseDescriptor> {
        let views = [format!("{}/{}", self.namespace, page.code), format!("{}/error", self.namespace)];

        let resolved = views.iter().find_map(|view| self.resolver.resolve(view));
        match resolved {
            Some(view) => Ok(ResponseDescriptor::Page { status, headers: HeaderMap::new(), view, page }),
            None => {
                tracing::error!(views = ?views, identifier = %page.id, "no error view available");
                Err(HandlerError::RenderingUnavailable { views: views.into() })
            },
        }
    }
}

fn redirect(location: String, intended: Option<String>) -> ResponseDescriptor {
    ResponseDescriptor::Redirect { status: StatusCode::FOUND, headers: HeaderMap::new(), location, intended }
}

fn debug_response(
    occurrence: &ErrorOccurrence,
    class: ErrorClassification,
    id: &CorrelationId,
    meta: &RequestMeta,
) -> ResponseDescriptor {
    let detail = DebugDetail {
        id: id.clone(),
        code: class.status.as_u16(),
        kind: occurrence.kind().to_string(),
        message: occurrence.message().to_owned(),
        trace: occurrence.trace().iter().map(ToString::to_string).collect(),
    };
    ResponseDescriptor::Debug { status: class.status, headers: HeaderMap::new(), detail, json: meta.wants_json() }
}
