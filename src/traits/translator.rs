use std::collections::HashMap;

/// Localized string lookup.
pub trait Translator: Send + Sync {
    /// Returns the translation for `key`, or `None` when there is none.
    fn translate(&self, key: &str) -> Option<String>;

    /// Returns the translation for `key`, or the key itself when missing.
    fn translate_or_key(&self, key: &str) -> String {
        self.translate(key).unwrap_or_else(|| key.to_owned())
    }
}

/// Translates nothing; every lookup yields its key.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTranslator;

impl Translator for NullTranslator {
    fn translate(&self, _key: &str) -> Option<String> {
        None
    }
}

/// In-memory key/value catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    entries: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// English titles and messages for the status codes the classifier emits.
    pub fn with_defaults() -> Self {
        const DEFAULTS: &[(u16, &str, &str)] = &[
            (401, "Unauthorized", "You need to log in to view this page."),
            (403, "Forbidden", "You are not allowed to access this page."),
            (404, "Page Not Found", "The page you are looking for could not be found."),
            (419, "Page Expired", "The page has expired due to inactivity. Please refresh and try again."),
            (422, "Unprocessable Entity", "The submitted data was invalid."),
            (429, "Too Many Requests", "Too many requests were sent. Please slow down."),
            (500, "Server Error", "Something went wrong on our end."),
            (503, "Service Unavailable", "We are down for maintenance. Please check back soon."),
        ];

        DEFAULTS.iter().fold(Self::new(), |catalog, (code, name, message)| {
            catalog
                .insert(format!("error.{code}.name"), *name)
                .insert(format!("error.{code}.message"), *message)
        })
    }

    pub fn insert(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
