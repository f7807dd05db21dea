use faultline::{HandlerConfig, IdentifierStrategy, LoginLocations};

fn app_debug_unset() -> bool {
    std::env::var("APP_DEBUG").is_err()
}

#[test]
fn defaults_are_production_safe() {
    let config = HandlerConfig::default();

    assert!(!config.debug);
    assert_eq!(config.not_found_redirect, None);
    assert_eq!(config.view_namespace, "errors");
    assert_eq!(config.identifier, IdentifierStrategy::PerOccurrence);
    assert_eq!(config.login, LoginLocations::default());
}

#[test]
fn toml_overrides_defaults() {
    let config = HandlerConfig::from_toml(
        r#"
        debug = true
        not_found_redirect = "/"
        view_namespace = "streams/errors"
        identifier = "content_addressed"

        [login]
        default = "/signin"
        by_segment = { admin = "/admin/signin", partners = "/partners/login" }
        "#,
    )
    .unwrap();

    if app_debug_unset() {
        assert!(config.debug);
    }
    assert_eq!(config.not_found_redirect.as_deref(), Some("/"));
    assert_eq!(config.view_namespace, "streams/errors");
    assert_eq!(config.identifier, IdentifierStrategy::ContentAddressed);
    assert_eq!(config.login.for_segment(Some("partners")), "/partners/login");
    assert_eq!(config.login.for_segment(Some("admin")), "/admin/signin");
    assert_eq!(config.login.for_segment(None), "/signin");
}

#[test]
fn partial_toml_keeps_remaining_defaults() {
    let config = HandlerConfig::from_toml(r#"not_found_redirect = "/home""#).unwrap();

    assert_eq!(config.not_found_redirect.as_deref(), Some("/home"));
    assert_eq!(config.view_namespace, "errors");
    assert_eq!(config.login.for_segment(Some("admin")), "/admin/login");
}

#[test]
fn unknown_identifier_strategy_is_a_config_error() {
    let err = HandlerConfig::from_toml(r#"identifier = "random""#).unwrap_err();

    assert!(err.to_string().contains("invalid error handler configuration"));
    assert!(!err.is_rendering_unavailable());
}

#[test]
fn missing_config_file_is_an_error() {
    let path = std::path::Path::new("/definitely/not/here/faultline.toml");

    assert!(HandlerConfig::load(Some(path)).is_err());
}

#[test]
fn unknown_segment_uses_default_login() {
    let login = LoginLocations::default();

    assert_eq!(login.for_segment(Some("blog")), "/login");
    assert_eq!(login.for_segment(Some("admin")), "/admin/login");
}
