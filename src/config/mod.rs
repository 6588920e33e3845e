//! Configuration types for the Brightpearl API client.
//!
//! # Overview
//!
//! - [`BrightpearlConfig`]: connection settings and transport tuning
//! - [`BrightpearlConfigBuilder`]: a builder for [`BrightpearlConfig`]
//! - [`Domain`], [`AccountId`], [`AccountToken`], [`AppRef`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use brightpearl_api::{AccountId, AccountToken, AppRef, BrightpearlConfig, Domain};
//!
//! let config = BrightpearlConfig::builder()
//!     .domain(Domain::new("https://use1.brightpearlconnect.com").unwrap())
//!     .account_id(AccountId::new("mybusinessname").unwrap())
//!     .account_token(AccountToken::new("token").unwrap())
//!     .app_ref(AppRef::new("someapprefname").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     config.base_url(),
//!     "https://use1.brightpearlconnect.com/public-api/mybusinessname"
//! );
//! ```

mod newtypes;

pub use newtypes::{AccountId, AccountToken, AppRef, Domain};

use std::time::Duration;

use crate::error::ConfigError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default exponential backoff factor, in seconds.
pub const DEFAULT_BACKOFF_FACTOR: f64 = 0.5;

/// Connection configuration for a Brightpearl account.
///
/// The configuration is read-only once built; every client created from it
/// shares the same domain, credentials and transport settings.
#[derive(Clone, Debug)]
pub struct BrightpearlConfig {
    domain: Domain,
    account_id: AccountId,
    account_token: AccountToken,
    app_ref: AppRef,
    timeout: Duration,
    max_retries: u32,
    backoff_factor: f64,
    user_agent_prefix: Option<String>,
}

impl BrightpearlConfig {
    /// Creates a new builder for constructing a `BrightpearlConfig`.
    #[must_use]
    pub fn builder() -> BrightpearlConfigBuilder {
        BrightpearlConfigBuilder::new()
    }

    /// Returns the API domain.
    #[must_use]
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Returns the account id.
    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Returns the account token.
    #[must_use]
    pub const fn account_token(&self) -> &AccountToken {
        &self.account_token
    }

    /// Returns the app reference.
    #[must_use]
    pub const fn app_ref(&self) -> &AppRef {
        &self.app_ref
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns how many times a transient failure is retried.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the exponential backoff factor in seconds.
    #[must_use]
    pub const fn backoff_factor(&self) -> f64 {
        self.backoff_factor
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the account-scoped base URL, `{domain}/public-api/{account_id}`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "{}/public-api/{}",
            self.domain.as_ref(),
            self.account_id.as_ref()
        )
    }
}

// Verify BrightpearlConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BrightpearlConfig>();
};

/// Builder for constructing [`BrightpearlConfig`] instances.
///
/// `domain`, `account_id`, `account_token` and `app_ref` are required.
///
/// # Defaults
///
/// - `timeout`: 30 seconds
/// - `max_retries`: 3
/// - `backoff_factor`: 0.5
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct BrightpearlConfigBuilder {
    domain: Option<Domain>,
    account_id: Option<AccountId>,
    account_token: Option<AccountToken>,
    app_ref: Option<AppRef>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    backoff_factor: Option<f64>,
    user_agent_prefix: Option<String>,
}

impl BrightpearlConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API domain (required).
    #[must_use]
    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Sets the account id (required).
    #[must_use]
    pub fn account_id(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Sets the account token (required).
    #[must_use]
    pub fn account_token(mut self, token: AccountToken) -> Self {
        self.account_token = Some(token);
        self
    }

    /// Sets the app reference (required).
    #[must_use]
    pub fn app_ref(mut self, app_ref: AppRef) -> Self {
        self.app_ref = Some(app_ref);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how many times 429 and 5xx gateway responses are retried.
    ///
    /// `0` disables retries.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the exponential backoff factor in seconds.
    ///
    /// Retry `n` waits `backoff_factor * 2^(n-1)` seconds unless the server
    /// sent a `Retry-After` header.
    #[must_use]
    pub const fn backoff_factor(mut self, backoff_factor: f64) -> Self {
        self.backoff_factor = Some(backoff_factor);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`BrightpearlConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] naming the first
    /// required field that was not set.
    pub fn build(self) -> Result<BrightpearlConfig, ConfigError> {
        let domain = self
            .domain
            .ok_or(ConfigError::MissingRequiredField { field: "domain" })?;
        let account_id = self
            .account_id
            .ok_or(ConfigError::MissingRequiredField {
                field: "account_id",
            })?;
        let account_token = self
            .account_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "account_token",
            })?;
        let app_ref = self
            .app_ref
            .ok_or(ConfigError::MissingRequiredField { field: "app_ref" })?;

        Ok(BrightpearlConfig {
            domain,
            account_id,
            account_token,
            app_ref,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            backoff_factor: self
                .backoff_factor
                .filter(|factor| factor.is_finite() && *factor >= 0.0)
                .unwrap_or(DEFAULT_BACKOFF_FACTOR),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
