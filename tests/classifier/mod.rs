use faultline::{Category, ErrorClassification, ErrorClassifier, ErrorKind, ErrorOccurrence, ErrorPolicy};
use http::StatusCode;

fn classify(classifier: &ErrorClassifier, kind: ErrorKind) -> ErrorClassification {
    classifier.classify(&ErrorOccurrence::new(kind, "boom"))
}

#[test]
fn builtin_kinds_follow_policy_table() {
    let classifier = ErrorClassifier::new();
    let cases = [
        (ErrorKind::AuthenticationFailure, 401, Category::Authentication),
        (ErrorKind::AuthorizationFailure, 403, Category::Authorization),
        (ErrorKind::ResourceNotFound, 404, Category::NotFound),
        (ErrorKind::SessionTokenMismatch, 419, Category::TokenMismatch),
        (ErrorKind::ValidationFailure, 422, Category::Validation),
    ];

    for (kind, status, category) in cases {
        let class = classify(&classifier, kind.clone());
        assert_eq!(class.status.as_u16(), status, "status for {kind}");
        assert!(!class.reportable, "{kind} must not be reportable");
        assert_eq!(class.category, category, "category for {kind}");
    }
}

#[test]
fn http_status_errors_keep_their_code() {
    let classifier = ErrorClassifier::new();
    let class = classify(&classifier, ErrorKind::HttpStatus(StatusCode::TOO_MANY_REQUESTS));

    assert_eq!(class, ErrorClassification::new(StatusCode::TOO_MANY_REQUESTS, false, Category::HttpGeneric));
}

#[test]
fn unknown_kinds_are_unhandled_and_reportable() {
    let classifier = ErrorClassifier::new();
    let class = classify(&classifier, ErrorKind::other("query_exception"));

    assert_eq!(class.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(class.reportable);
    assert_eq!(class.category, Category::Unhandled);
}

#[test]
fn registered_policy_applies_to_custom_tag() {
    let classifier = ErrorClassifier::new().register(
        "payment_declined",
        ErrorPolicy::quiet(StatusCode::PAYMENT_REQUIRED, Category::HttpGeneric),
    );

    let class = classify(&classifier, ErrorKind::other("payment_declined"));
    assert_eq!(class.status, StatusCode::PAYMENT_REQUIRED);
    assert!(!class.reportable);

    let other = classify(&classifier, ErrorKind::other("payment_gateway_down"));
    assert_eq!(other, ErrorClassification::unhandled());
}

#[test]
fn registered_policy_overrides_builtin() {
    let classifier = ErrorClassifier::new().register(
        "validation",
        ErrorPolicy::new(StatusCode::BAD_REQUEST, true, Category::Validation),
    );

    let class = classify(&classifier, ErrorKind::ValidationFailure);
    assert_eq!(class.status, StatusCode::BAD_REQUEST);
    assert!(class.reportable);
}

#[test]
fn dont_report_silences_unknown_kind_but_keeps_status() {
    let noisy = ErrorKind::other("client_disconnected");
    let classifier = ErrorClassifier::new().dont_report(&noisy);

    let class = classify(&classifier, noisy);
    assert_eq!(class.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(class.category, Category::Unhandled);
    assert!(!class.reportable);
}

#[test]
fn dont_report_preserves_registered_policy() {
    let kind = ErrorKind::other("upstream_timeout");
    let classifier = ErrorClassifier::new()
        .register("upstream_timeout", ErrorPolicy::new(StatusCode::GATEWAY_TIMEOUT, true, Category::HttpGeneric))
        .dont_report(&kind);

    let policy = classifier.policy("upstream_timeout").copied().unwrap();
    assert_eq!(policy.status, StatusCode::GATEWAY_TIMEOUT);
    assert!(!policy.reportable);
}

#[test]
fn http_status_policies_keep_each_occurrence_code() {
    let classifier = ErrorClassifier::new().dont_report(&ErrorKind::HttpStatus(StatusCode::SERVICE_UNAVAILABLE));

    let not_found = classify(&classifier, ErrorKind::HttpStatus(StatusCode::NOT_FOUND));
    assert_eq!(not_found.status, StatusCode::NOT_FOUND);
    assert!(!not_found.reportable);

    let unavailable = classify(&classifier, ErrorKind::HttpStatus(StatusCode::SERVICE_UNAVAILABLE));
    assert_eq!(unavailable.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn registered_http_status_policy_sets_reportability_only() {
    let classifier = ErrorClassifier::new().register(
        "http_status",
        ErrorPolicy::new(StatusCode::IM_A_TEAPOT, true, Category::HttpGeneric),
    );

    let class = classify(&classifier, ErrorKind::HttpStatus(StatusCode::BAD_GATEWAY));
    assert_eq!(class, ErrorClassification::new(StatusCode::BAD_GATEWAY, true, Category::HttpGeneric));
}

#[test]
fn user_caused_categories() {
    assert!(Category::Authentication.is_user_caused());
    assert!(Category::Validation.is_user_caused());
    assert!(Category::NotFound.is_user_caused());
    assert!(!Category::HttpGeneric.is_user_caused());
    assert!(!Category::Unhandled.is_user_caused());
}
