//! Stand-ins for the host framework's collaborators.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use faultline::{
    ContextError, ContextSource, LogRecord, LogSink, MapResolver, ResolvedView, SinkError,
    TemplateResolver,
};

/// Keeps every record it is given.
#[derive(Clone, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl LogSink for RecordingSink {
    fn write(&self, record: &LogRecord) -> Result<(), SinkError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Rejects every record.
pub struct FailingSink;

impl LogSink for FailingSink {
    fn write(&self, _record: &LogRecord) -> Result<(), SinkError> {
        Err(SinkError::new("disk full"))
    }
}

/// Remembers which views were asked for.
#[derive(Clone, Default)]
pub struct CountingResolver {
    views: MapResolver,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl CountingResolver {
    pub fn new(views: MapResolver) -> Self {
        Self { views, lookups: Arc::default() }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl TemplateResolver for CountingResolver {
    fn resolve(&self, view: &str) -> Option<ResolvedView> {
        self.lookups.lock().unwrap().push(view.to_owned());
        self.views.resolve(view)
    }
}

/// Knows the user id but fails to look up the email.
pub struct BrokenEmailContext;

impl ContextSource for BrokenEmailContext {
    fn user_id(&self) -> Result<Option<String>, ContextError> {
        Ok(Some("42".to_owned()))
    }

    fn user_email(&self) -> Result<Option<String>, ContextError> {
        Err(ContextError::new("user provider unavailable"))
    }

    fn request_url(&self) -> Result<Option<String>, ContextError> {
        Ok(Some("https://example.com/orders/7".to_owned()))
    }
}

/// Every lookup fails.
pub struct BrokenContext;

impl ContextSource for BrokenContext {
    fn user_id(&self) -> Result<Option<String>, ContextError> {
        Err(ContextError::new("auth guard not booted"))
    }

    fn user_email(&self) -> Result<Option<String>, ContextError> {
        Err(ContextError::new("auth guard not booted"))
    }

    fn request_url(&self) -> Result<Option<String>, ContextError> {
        Err(ContextError::new("no request bound"))
    }
}
