use std::fmt::{self, Display};

/// Failure of a single context lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextError(String);

impl ContextError {
    #[inline]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ContextError {}

/// Source of the request-scoped facts attached to a log record.
///
/// Passed explicitly into every report call. Each lookup is fallible on its
/// own; a failing lookup only empties its own field.
pub trait ContextSource {
    fn user_id(&self) -> Result<Option<String>, ContextError> {
        Ok(None)
    }

    fn user_email(&self) -> Result<Option<String>, ContextError> {
        Ok(None)
    }

    fn request_url(&self) -> Result<Option<String>, ContextError> {
        Ok(None)
    }
}

/// Nothing is known about the current user or request.
impl ContextSource for () {}

/// Context values that were already looked up by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticContext {
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub url: Option<String>,
}

impl StaticContext {
    pub fn user(mut self, id: impl Into<String>, email: Option<String>) -> Self {
        self.user_id = Some(id.into());
        self.user_email = email;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl ContextSource for StaticContext {
    fn user_id(&self) -> Result<Option<String>, ContextError> {
        Ok(self.user_id.clone())
    }

    fn user_email(&self) -> Result<Option<String>, ContextError> {
        Ok(self.user_email.clone())
    }

    fn request_url(&self) -> Result<Option<String>, ContextError> {
        Ok(self.url.clone())
    }
}
