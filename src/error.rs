//! Error types for client configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that an
//! invalid domain or missing credential is reported before any request is made.
//!
//! # Example
//!
//! ```rust
//! use brightpearl_api::{AccountId, ConfigError};
//!
//! let result = AccountId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccountId)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`BrightpearlConfig`](crate::BrightpearlConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The domain is missing a scheme or a host.
    #[error("Invalid domain '{domain}'. Include the scheme, e.g. 'https://use1.brightpearlconnect.com'.")]
    InvalidDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// Account id cannot be empty.
    #[error("Account id cannot be empty. Please provide your Brightpearl account id.")]
    EmptyAccountId,

    /// Account id contains characters that cannot appear in a URL path segment.
    #[error("Invalid account id '{account_id}'. Account ids cannot contain '/', '?' or '#'.")]
    InvalidAccountId {
        /// The invalid account id that was provided.
        account_id: String,
    },

    /// Account token cannot be empty.
    #[error("Account token cannot be empty. Please provide a valid Brightpearl account token.")]
    EmptyAccountToken,

    /// App reference cannot be empty.
    #[error("App reference cannot be empty. Please provide your Brightpearl app reference.")]
    EmptyAppRef,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_domain_error_message() {
        let error = ConfigError::InvalidDomain {
            domain: "use1.brightpearlconnect.com".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("use1.brightpearlconnect.com"));
        assert!(message.contains("scheme"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "app_ref" };
        let message = error.to_string();
        assert!(message.contains("app_ref"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyAccountToken;
        let _: &dyn std::error::Error = &error;
    }
}
