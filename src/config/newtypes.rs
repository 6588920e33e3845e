//! Validated newtype wrappers for connection settings.
//!
//! Each wrapper validates its contents on construction so that a
//! [`BrightpearlConfig`](super::BrightpearlConfig) can only ever hold usable
//! values.

use crate::error::ConfigError;
use std::fmt;

/// A validated Brightpearl API domain, including its scheme.
///
/// Trailing slashes are stripped so the value can be joined with the
/// `/public-api/{account}` prefix directly.
///
/// # Example
///
/// ```rust
/// use brightpearl_api::Domain;
///
/// let domain = Domain::new("https://use1.brightpearlconnect.com/").unwrap();
/// assert_eq!(domain.as_ref(), "https://use1.brightpearlconnect.com");
/// assert_eq!(domain.scheme(), "https");
/// assert_eq!(domain.host_name(), "use1.brightpearlconnect.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl Domain {
    /// Creates a new validated domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDomain`] if the scheme is not `http` or
    /// `https`, if the host is empty, or if the URL carries a query or
    /// fragment.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into();
        let url = domain.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidDomain {
            domain: domain.clone(),
        };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = url[..scheme_end].to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        if remainder.contains(['?', '#']) {
            return Err(invalid());
        }
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the domain.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

/// A validated Brightpearl account id (e.g. `"mybusinessname"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountId(String);

impl AccountId {
    /// Creates a new validated account id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccountId`] if the id is empty, or
    /// [`ConfigError::InvalidAccountId`] if it would break the URL path.
    pub fn new(account_id: impl Into<String>) -> Result<Self, ConfigError> {
        let account_id = account_id.into().trim().to_string();
        if account_id.is_empty() {
            return Err(ConfigError::EmptyAccountId);
        }
        if account_id.contains(['/', '?', '#']) {
            return Err(ConfigError::InvalidAccountId { account_id });
        }
        Ok(Self(account_id))
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Brightpearl account token.
///
/// The `Debug` implementation masks the token so it never ends up in logs.
///
/// ```rust
/// use brightpearl_api::AccountToken;
///
/// let token = AccountToken::new("secret-token").unwrap();
/// assert_eq!(format!("{:?}", token), "AccountToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccountToken(String);

impl AccountToken {
    /// Creates a new validated account token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccountToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccountToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccountToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccountToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccountToken(*****)")
    }
}

/// A validated Brightpearl app reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppRef(String);

impl AppRef {
    /// Creates a new validated app reference.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAppRef`] if the reference is empty.
    pub fn new(app_ref: impl Into<String>) -> Result<Self, ConfigError> {
        let app_ref = app_ref.into();
        if app_ref.is_empty() {
            return Err(ConfigError::EmptyAppRef);
        }
        Ok(Self(app_ref))
    }
}

impl AsRef<str> for AppRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_strips_trailing_slash() {
        let domain = Domain::new("https://ws-use.brightpearlconnect.com//").unwrap();
        assert_eq!(domain.as_ref(), "https://ws-use.brightpearlconnect.com");
    }

    #[test]
    fn test_domain_accepts_port() {
        let domain = Domain::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(domain.scheme(), "http");
        assert_eq!(domain.host_name(), "127.0.0.1");
    }

    #[test]
    fn test_domain_rejects_missing_scheme() {
        assert!(matches!(
            Domain::new("use1.brightpearlconnect.com"),
            Err(ConfigError::InvalidDomain { .. })
        ));
    }

    #[test]
    fn test_domain_rejects_non_http_scheme_and_empty_host() {
        assert!(Domain::new("ftp://example.com").is_err());
        assert!(Domain::new("https://").is_err());
        assert!(Domain::new("://example.com").is_err());
    }

    #[test]
    fn test_domain_rejects_query_and_fragment() {
        for domain in [
            "https://use1.brightpearlconnect.com?x",
            "https://use1.brightpearlconnect.com/?region=eu",
            "https://use1.brightpearlconnect.com#top",
            "http://127.0.0.1:8080/#",
        ] {
            assert!(
                matches!(Domain::new(domain), Err(ConfigError::InvalidDomain { .. })),
                "expected {domain} to be rejected"
            );
        }
    }

    #[test]
    fn test_account_id_validation() {
        assert!(matches!(AccountId::new("  "), Err(ConfigError::EmptyAccountId)));
        assert!(matches!(
            AccountId::new("acme/other"),
            Err(ConfigError::InvalidAccountId { .. })
        ));
        assert_eq!(AccountId::new(" acme ").unwrap().as_ref(), "acme");
    }

    #[test]
    fn test_account_token_masks_value_in_debug() {
        let token = AccountToken::new("super-secret-token").unwrap();
        let debug_output = format!("{token:?}");
        assert_eq!(debug_output, "AccountToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_empty_credentials_are_rejected() {
        assert!(matches!(AccountToken::new(""), Err(ConfigError::EmptyAccountToken)));
        assert!(matches!(AppRef::new(""), Err(ConfigError::EmptyAppRef)));
    }
}
