//! Search error types.
//!
//! - [`ValidationError`]: caller input rejected before any request is sent
//! - [`SearchError`]: anything that can end a search call or an iteration
//!
//! # Example
//!
//! ```rust,ignore
//! match pages.next_page().await {
//!     Ok(Some(page)) => println!("{} rows", page.results.len()),
//!     Ok(None) => println!("done"),
//!     Err(SearchError::Validation(e)) => println!("bad parameters: {e}"),
//!     Err(SearchError::Http(HttpError::Api(e))) => println!("API error {}", e.status),
//!     Err(SearchError::Http(e)) => println!("transport or decode error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{BrightpearlApiError, HttpError, ProtocolError};

/// Error returned when search parameters are malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The page size must be a positive integer.
    #[error("Page size must be a positive integer, got {page_size}.")]
    NonPositivePageSize {
        /// The rejected page size.
        page_size: u32,
    },

    /// The page number must be a positive integer.
    #[error("Page number must be a positive integer, got {page}.")]
    NonPositivePage {
        /// The rejected page number.
        page: u32,
    },

    /// A sort directive names no field.
    #[error("Sort directive '{directive}' does not name a field.")]
    EmptySortField {
        /// The rejected directive.
        directive: String,
    },

    /// A column name in the projection is empty.
    #[error("Column names cannot be empty.")]
    EmptyColumnName,
}

/// Error type for search, list and iteration operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The search parameters were rejected before sending.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request failed or its response could not be decoded.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl SearchError {
    /// Returns the HTTP status for API-reported failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            Self::Validation(_) => None,
        }
    }

    /// Returns the API error, if the failure was reported by Brightpearl.
    #[must_use]
    pub const fn api_error(&self) -> Option<&BrightpearlApiError> {
        match self {
            Self::Http(HttpError::Api(e)) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if the response body could not be decoded.
    #[must_use]
    pub const fn is_protocol(&self) -> bool {
        matches!(self, Self::Http(HttpError::Protocol(_)))
    }
}

impl From<ProtocolError> for SearchError {
    fn from(error: ProtocolError) -> Self {
        Self::Http(HttpError::Protocol(error))
    }
}

impl From<BrightpearlApiError> for SearchError {
    fn from(error: BrightpearlApiError) -> Self {
        Self::Http(HttpError::Api(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_error_message() {
        let error = ValidationError::NonPositivePageSize { page_size: 0 };
        assert_eq!(error.to_string(), "Page size must be a positive integer, got 0.");
    }

    #[test]
    fn test_status_and_api_error_helpers() {
        let error: SearchError = BrightpearlApiError {
            status: 500,
            payload: json!({"text": "boom"}),
            message: "failed".to_string(),
        }
        .into();

        assert_eq!(error.status(), Some(500));
        assert_eq!(error.api_error().unwrap().payload["text"], "boom");
        assert!(!error.is_protocol());
    }

    #[test]
    fn test_protocol_error_conversion() {
        let error: SearchError = ProtocolError::DuplicateColumn {
            name: "orderId".to_string(),
        }
        .into();

        assert!(error.is_protocol());
        assert_eq!(error.status(), None);
        assert!(error.api_error().is_none());
    }

    #[test]
    fn test_validation_error_has_no_status() {
        let error: SearchError = ValidationError::EmptyColumnName.into();
        assert!(matches!(error, SearchError::Validation(_)));
        assert_eq!(error.status(), None);
    }
}
