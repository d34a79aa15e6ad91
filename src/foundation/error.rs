/// Convenience result type used across otfbm.
pub type OtfbmResult<T> = Result<T, OtfbmError>;

/// Top-level error taxonomy for the imaging pipeline.
///
/// Values are plain data. Mapping an error to a protocol response (HTTP status, CLI exit code)
/// belongs to the boundary layer; see [`OtfbmError::is_client_error`].
#[derive(thiserror::Error, Debug)]
pub enum OtfbmError {
    /// Malformed hexadecimal color string.
    #[error("color format error: {0}")]
    ColorFormat(String),

    /// Pixel buffer dimensions inconsistent with its byte length, or the encoder failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Source bytes did not match any supported magic prefix.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The image decoder rejected the source bytes.
    #[error("decode error: {0}")]
    Decode(String),

    /// Canvas allocation, extraction or release failure.
    #[error("resource error: {0}")]
    Resource(String),

    /// Invalid drawing parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OtfbmError {
    /// Build a [`OtfbmError::ColorFormat`] value.
    pub fn color_format(msg: impl Into<String>) -> Self {
        Self::ColorFormat(msg.into())
    }

    /// Build a [`OtfbmError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`OtfbmError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`OtfbmError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`OtfbmError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`OtfbmError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the failure was caused by caller input rather than by the pipeline itself.
    ///
    /// Color, format and parameter problems are the caller's. Encode, decode, resource and
    /// wrapped failures are reported as server-side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::ColorFormat(_) | Self::UnsupportedFormat(_) | Self::Validation(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
