//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Every variant is fatal for the call that produced it: a run either completes or
//! fails before any point is accepted.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// Non-positive or non-finite dimensions, radii or cell size, or inconsistent
    /// cutoffs.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pixel data that cannot be turned into a luminance field.
    #[error("invalid density image: {0}")]
    Image(String),
}

impl Error {
    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message_is_prefixed() {
        let err = Error::invalid_config("min_radius must be > 0");
        assert_eq!(
            err.to_string(),
            "invalid configuration: min_radius must be > 0"
        );
    }

    #[test]
    fn image_error_keeps_message() {
        let err = Error::Image("expected 16 bytes".into());
        assert!(matches!(err, Error::Image(ref msg) if msg == "expected 16 bytes"));
    }
}
