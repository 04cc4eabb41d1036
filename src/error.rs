//! Unified error type for logogen.

use thiserror::Error;

/// Errors that can occur while generating the logo.
#[derive(Debug, Error)]
pub enum LogoError {
    /// The requested font could not be located or parsed.
    #[error("Font '{name}' unavailable: {reason}")]
    FontUnavailable {
        /// The requested font file name.
        name: String,
        /// Why it could not be used.
        reason: String,
    },

    /// Encoding or writing the image failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}
