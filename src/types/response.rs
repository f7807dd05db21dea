//! Request metadata going into the renderer and responses coming out of it.

use http::header::{HeaderValue, ACCEPT, CONTENT_TYPE, LOCATION};
use http::{HeaderMap, StatusCode};
use serde::Serialize;

use crate::traits::ResolvedView;
use crate::types::CorrelationId;

/// Response format the caller asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreferredFormat {
    Json,
    #[default]
    Html,
}

/// What the renderer needs to know about the request being answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    pub preferred_format: PreferredFormat,
    /// First path segment of the request, used to pick a login location.
    pub path_segment: Option<String>,
    pub debug: bool,
    /// Full request url, remembered as the intended target of login redirects.
    pub url: Option<String>,
}

impl RequestMeta {
    #[inline]
    pub fn new(preferred_format: PreferredFormat, debug: bool) -> Self {
        Self { preferred_format, debug, ..Self::default() }
    }

    #[inline]
    pub fn json() -> Self {
        Self::new(PreferredFormat::Json, false)
    }

    #[inline]
    pub fn html() -> Self {
        Self::new(PreferredFormat::Html, false)
    }

    pub fn with_path_segment(mut self, segment: impl Into<String>) -> Self {
        self.path_segment = Some(segment.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Derives the metadata from an incoming `http::Request`.
    ///
    /// JSON is preferred when the request was sent by script
    /// (`X-Requested-With: XMLHttpRequest`) or its `Accept` header names a JSON
    /// media type. The path segment is the first non-empty segment of the path.
    pub fn from_request<B>(request: &http::Request<B>, debug: bool) -> Self {
        let headers = request.headers();
        let ajax = headers
            .get("x-requested-with")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));
        let wants_json = headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .any(|media| {
                let media = media.split(';').next().unwrap_or("").trim();
                media == "application/json" || media.ends_with("+json")
            });

        let preferred_format =
            if ajax || wants_json { PreferredFormat::Json } else { PreferredFormat::Html };

        let path_segment = request
            .uri()
            .path()
            .split('/')
            .find(|segment| !segment.is_empty())
            .map(str::to_owned);

        Self { preferred_format, path_segment, debug, url: Some(request.uri().to_string()) }
    }

    #[inline]
    pub fn wants_json(&self) -> bool {
        self.preferred_format == PreferredFormat::Json
    }
}

/// Data handed to an error page template.
///
/// `summary` is part of the page contract but deliberately left blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPage {
    pub id: CorrelationId,
    pub code: u16,
    pub name: String,
    pub message: String,
    pub summary: String,
}

/// Verbose error detail, only ever produced in debug mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugDetail {
    pub id: CorrelationId,
    pub code: u16,
    pub kind: String,
    pub message: String,
    pub trace: Vec<String>,
}

impl DebugDetail {
    /// Plain-text rendering used for HTML callers.
    pub fn to_text(&self) -> String {
        let mut text = format!("{} ({}): {}\nid: {}", self.kind, self.code, self.message, self.id);
        for (depth, frame) in self.trace.iter().enumerate() {
            text.push_str(&format!("\n  #{depth} {frame}"));
        }
        text
    }
}

/// Format-independent description of the response to send.
///
/// The host framework either inspects it directly or converts it with
/// [`into_http`](ResponseDescriptor::into_http).
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseDescriptor {
    Json { status: StatusCode, headers: HeaderMap, body: serde_json::Value },
    Redirect { status: StatusCode, headers: HeaderMap, location: String, intended: Option<String> },
    Debug { status: StatusCode, headers: HeaderMap, detail: DebugDetail, json: bool },
    Page { status: StatusCode, headers: HeaderMap, view: ResolvedView, page: ErrorPage },
}

impl ResponseDescriptor {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Json { status, .. }
            | Self::Redirect { status, .. }
            | Self::Debug { status, .. }
            | Self::Page { status, .. } => *status,
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        match self {
            Self::Json { headers, .. }
            | Self::Redirect { headers, .. }
            | Self::Debug { headers, .. }
            | Self::Page { headers, .. } => headers,
        }
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        match self {
            Self::Json { headers, .. }
            | Self::Redirect { headers, .. }
            | Self::Debug { headers, .. }
            | Self::Page { headers, .. } => headers,
        }
    }

    #[inline]
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    /// Target of a redirect response.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Redirect { location, .. } => Some(location),
            _ => None,
        }
    }

    /// Converts into an `http::Response` with a string body.
    ///
    /// Page responses carry the resolved view's content; filling the page data
    /// into it is the host's template engine's job.
    pub fn into_http(self) -> http::Response<String> {
        let (status, mut headers, body, content_type) = match self {
            Self::Json { status, headers, body } => {
                (status, headers, body.to_string(), "application/json")
            },
            Self::Redirect { status, mut headers, location, .. } => {
                if let Ok(value) = HeaderValue::try_from(location.as_str()) {
                    headers.insert(LOCATION, value);
                }
                (status, headers, String::new(), "text/plain; charset=utf-8")
            },
            Self::Debug { status, headers, detail, json: true } => {
                let body = serde_json::to_string(&detail).unwrap_or_default();
                (status, headers, body, "application/json")
            },
            Self::Debug { status, headers, detail, json: false } => {
                (status, headers, detail.to_text(), "text/plain; charset=utf-8")
            },
            Self::Page { status, headers, view, .. } => {
                (status, headers, view.content, "text/html; charset=utf-8")
            },
        };

        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }

        let mut response = http::Response::new(body);
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }
}

impl From<ResponseDescriptor> for http::Response<String> {
    fn from(descriptor: ResponseDescriptor) -> Self {
        descriptor.into_http()
    }
}
