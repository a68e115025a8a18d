/// Result type used across dotfield.
pub type DotfieldResult<T> = Result<T, DotfieldError>;

/// Errors returned by configuration, rendering and host-facing APIs.
#[derive(thiserror::Error, Debug)]
pub enum DotfieldError {
    /// Config or input values outside their accepted range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization or frame output failed.
    #[error("render error: {0}")]
    Render(String),

    /// The embedding host could not satisfy a request.
    #[error("host error: {0}")]
    Host(String),

    /// JSON could not be read or written.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DotfieldError {
    /// Build a [`DotfieldError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DotfieldError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DotfieldError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`DotfieldError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for DotfieldError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
