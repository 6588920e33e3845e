//! HTTP-level error types.
//!
//! - [`BrightpearlApiError`]: the API answered with a failure (non-2xx status,
//!   or a body without the `response` envelope)
//! - [`ProtocolError`]: the body could not be decoded into the expected shape
//! - [`InvalidHttpRequestError`]: a request failed validation before sending
//! - [`HttpError`]: unified error type encompassing all of the above plus
//!   network failures
//!
//! # Example
//!
//! ```rust,ignore
//! match client.get_order(42).await {
//!     Ok(order) => println!("{order}"),
//!     Err(HttpError::Api(e)) => println!("API error {}: {}", e.status, e.payload),
//!     Err(HttpError::Protocol(e)) => println!("Unreadable response: {e}"),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error reported by the Brightpearl API itself.
///
/// Carries the HTTP status and the response payload verbatim so callers can
/// inspect Brightpearl's own error messages. Non-JSON error bodies are
/// wrapped as `{"text": "<raw body>"}`.
///
/// ```rust
/// use brightpearl_api::clients::BrightpearlApiError;
/// use serde_json::json;
///
/// let error = BrightpearlApiError {
///     status: 404,
///     payload: json!({"errors": [{"code": "CMNC-404", "message": "Not found"}]}),
///     message: "Brightpearl API GET order-service/order/1 failed with 404".to_string(),
/// };
/// assert!(error.to_string().contains("404"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct BrightpearlApiError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The raw response payload.
    pub payload: serde_json::Value,
    /// Human readable summary naming the method, path and status.
    pub message: String,
}

/// Error returned when a response body does not have the expected shape.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The body is not valid JSON.
    #[error("Response body is not valid JSON: {source}")]
    MalformedBody {
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The `response` object does not match the search envelope.
    #[error("Unexpected search envelope: {source}")]
    UnexpectedEnvelope {
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A result row does not have one value per column.
    #[error("Row {row} has {found} values but the page declares {expected} columns")]
    RowArity {
        /// Zero-based index of the offending row within the page.
        row: usize,
        /// Number of columns declared in `metaData`.
        expected: usize,
        /// Number of values in the row.
        found: usize,
    },

    /// The same column name appears twice in `metaData.columns`.
    #[error("Column '{name}' appears more than once in the search metadata")]
    DuplicateColumn {
        /// The repeated column name.
        name: String,
    },
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The API reported a failure.
    #[error(transparent)]
    Api(#[from] BrightpearlApiError),

    /// The response could not be decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status for API-reported failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            _ => None,
        }
    }
}
