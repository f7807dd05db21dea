use std::fmt;

use faultline::{
    ErrorHandler, ErrorKind, ErrorOccurrence, HandlerConfig, PreferredFormat, RequestMeta,
    ResponseDescriptor, StaticContext,
};
use http::header::ACCEPT;

use crate::support::RecordingSink;

#[test]
fn reported_and_rendered_ids_match() {
    let sink = RecordingSink::default();
    let handler = ErrorHandler::new(HandlerConfig::default()).with_sink(sink.clone());
    let occurrence = ErrorOccurrence::new(ErrorKind::other("db"), "deadlock detected");

    let response = handler
        .handle(&occurrence, &RequestMeta::html(), &StaticContext::default())
        .unwrap();

    let record = sink.records().pop().unwrap();
    match response {
        ResponseDescriptor::Page { page, .. } => assert_eq!(page.id, record.id),
        other => panic!("expected page, got {other:?}"),
    }
}

#[test]
fn separate_report_and_render_share_the_id() {
    let sink = RecordingSink::default();
    let handler = ErrorHandler::default().with_sink(sink.clone());
    let occurrence = ErrorOccurrence::new(ErrorKind::other("queue"), "broker unreachable");

    handler.report(&occurrence, &());
    let response = handler.render(&occurrence, &RequestMeta::json()).unwrap();

    match response {
        ResponseDescriptor::Json { body, .. } => {
            assert_eq!(body["id"], sink.records()[0].id.as_str());
        },
        other => panic!("expected json, got {other:?}"),
    }
}

#[test]
fn request_meta_prefers_json_for_json_accept() {
    let handler = ErrorHandler::default();
    let request = http::Request::builder()
        .uri("https://example.com/api/orders?page=2")
        .header(ACCEPT, "text/html;q=0.5, application/json")
        .body(())
        .unwrap();

    let meta = handler.request_meta(&request);

    assert_eq!(meta.preferred_format, PreferredFormat::Json);
    assert_eq!(meta.path_segment.as_deref(), Some("api"));
    assert_eq!(meta.url.as_deref(), Some("https://example.com/api/orders?page=2"));
    assert!(!meta.debug);
}

#[test]
fn request_meta_prefers_json_for_ajax() {
    let request = http::Request::builder()
        .uri("/admin/posts")
        .header("X-Requested-With", "XMLHttpRequest")
        .body(())
        .unwrap();

    let meta = RequestMeta::from_request(&request, true);

    assert!(meta.wants_json());
    assert_eq!(meta.path_segment.as_deref(), Some("admin"));
    assert!(meta.debug);
}

#[test]
fn request_meta_defaults_to_html() {
    let request = http::Request::builder().uri("/").header(ACCEPT, "text/html").body(()).unwrap();

    let meta = RequestMeta::from_request(&request, false);

    assert_eq!(meta.preferred_format, PreferredFormat::Html);
    assert_eq!(meta.path_segment, None);
}

#[derive(Debug)]
struct Outer(Inner);

#[derive(Debug)]
struct Inner;

impl fmt::Display for Outer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("could not load order")
    }
}

impl fmt::Display for Inner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("row not found")
    }
}

impl std::error::Error for Outer {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl std::error::Error for Inner {}

#[test]
fn occurrence_from_error_captures_source_chain() {
    let occurrence = ErrorOccurrence::from_error(ErrorKind::ResourceNotFound, &Outer(Inner));

    assert_eq!(occurrence.message(), "could not load order");
    assert_eq!(occurrence.trace().len(), 1);
    assert_eq!(occurrence.trace()[0].as_str(), "caused by: row not found");
    assert_eq!(occurrence.to_string(), "[not_found] could not load order");
}
