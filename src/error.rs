use thiserror::Error;

/// Errors surfaced by the handler.
///
/// Rendering is the only per-request operation that can fail, and only when no
/// error view at all can be resolved. That is a deployment problem, not
/// something a single request can recover from.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("no error view could be rendered (tried {})", .views.join(", "))]
    RenderingUnavailable { views: Vec<String> },

    #[error("invalid error handler configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl HandlerError {
    #[inline]
    pub fn is_rendering_unavailable(&self) -> bool {
        matches!(self, Self::RenderingUnavailable { .. })
    }
}

pub type Result<T, E = HandlerError> = std::result::Result<T, E>;
