//! Handler configuration.
//!
//! Values come from an optional TOML file, overridden by `FAULTLINE_`-prefixed
//! environment variables (nested keys separated by `__`, e.g.
//! `FAULTLINE_LOGIN__DEFAULT=/signin`). The conventional `APP_DEBUG` variable
//! is honoured for the debug flag when set.
//!
//! ```toml
//! debug = false
//! not_found_redirect = "/"
//! view_namespace = "errors"
//! identifier = "per_occurrence"
//!
//! [login]
//! default = "/login"
//! by_segment = { admin = "/admin/login" }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::Result;
use crate::identifier::IdentifierStrategy;

const ENV_PREFIX: &str = "FAULTLINE";

/// Where unauthenticated HTML requests are sent to log in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginLocations {
    pub default: String,
    /// Login location per first path segment, e.g. `admin` -> `/admin/login`.
    pub by_segment: HashMap<String, String>,
}

impl Default for LoginLocations {
    fn default() -> Self {
        Self {
            default: "/login".to_owned(),
            by_segment: HashMap::from([("admin".to_owned(), "/admin/login".to_owned())]),
        }
    }
}

impl LoginLocations {
    pub fn for_segment(&self, segment: Option<&str>) -> &str {
        segment
            .and_then(|segment| self.by_segment.get(segment))
            .map_or(self.default.as_str(), String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Expose raw error detail in responses. Never enable in production.
    pub debug: bool,
    /// Redirect target for not-found errors instead of an error page.
    pub not_found_redirect: Option<String>,
    /// Prefix of error view identifiers (`{namespace}/{code}`).
    pub view_namespace: String,
    /// Directory holding `{namespace}/{code}.html` views.
    pub views_dir: Option<PathBuf>,
    pub identifier: IdentifierStrategy,
    pub login: LoginLocations,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            debug: false,
            not_found_redirect: None,
            view_namespace: "errors".to_owned(),
            views_dir: None,
            identifier: IdentifierStrategy::default(),
            login: LoginLocations::default(),
        }
    }
}

impl HandlerConfig {
    /// Loads configuration from `path` (if given) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        Self::finish(builder)
    }

    /// Loads configuration from TOML text and the environment.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Self::finish(Config::builder().add_source(File::from_str(contents, FileFormat::Toml)))
    }

    /// Loads configuration from the environment only.
    pub fn from_env() -> Result<Self> {
        Self::finish(Config::builder())
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut handler_config: HandlerConfig = config.try_deserialize()?;
        if let Some(debug) = app_debug() {
            handler_config.debug = debug;
        }
        Ok(handler_config)
    }
}

fn app_debug() -> Option<bool> {
    let raw = std::env::var("APP_DEBUG").ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        other => {
            tracing::warn!(value = other, "ignoring unrecognised APP_DEBUG value");
            None
        },
    }
}
