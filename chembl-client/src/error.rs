//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the ChEMBL web services.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// A response body could not be decoded.
    #[error("parse error for {url}: {message}")]
    Parse {
        /// URL of the request whose body failed to decode.
        url: String,
        /// Decoder message.
        message: String,
    },

    /// The configured base URL or a pagination link is not a valid URL.
    #[error("invalid URL {url}: {message}")]
    InvalidUrl {
        /// The offending URL text.
        url: String,
        /// Parser message.
        message: String,
    },
}
