/// Convenience result type used across remnant.
pub type RemnantResult<T> = Result<T, RemnantError>;

/// Top-level error taxonomy used by the sketch pipeline.
#[derive(thiserror::Error, Debug)]
pub enum RemnantError {
    /// A path-command string could not be parsed. The outline it belongs to is skipped.
    #[error("path syntax error at byte {offset}: {message}")]
    PathSyntax {
        /// Byte offset of the offending token in the command string.
        offset: usize,
        /// Human readable description.
        message: String,
    },

    /// Color text that is neither hex, `rgb(...)`, `hsl(...)` nor a known name.
    #[error("color resolution error: {0}")]
    ColorResolution(String),

    /// Out-of-range or malformed tunables.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Drawing surface or backend failures.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration and manifests.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RemnantError {
    /// Build a [`RemnantError::PathSyntax`] value.
    pub fn path_syntax(offset: usize, msg: impl Into<String>) -> Self {
        Self::PathSyntax {
            offset,
            message: msg.into(),
        }
    }

    /// Build a [`RemnantError::ColorResolution`] value.
    pub fn color(msg: impl Into<String>) -> Self {
        Self::ColorResolution(msg.into())
    }

    /// Build a [`RemnantError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`RemnantError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RemnantError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for RemnantError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
