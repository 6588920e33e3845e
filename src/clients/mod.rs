//! HTTP transport types for Brightpearl API communication.
//!
//! This module is the transport collaborator of the search pipeline: it
//! attaches credentials, sends requests, retries transient failures, and
//! decodes JSON bodies.
//!
//! - [`HttpClient`]: the async HTTP client bound to one account
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a parsed response
//! - [`HttpMethod`]: supported HTTP methods
//! - [`HttpError`]: unified transport error
//!
//! # Retry Behavior
//!
//! - **429**: retried after `Retry-After` seconds, or the backoff delay
//! - **500, 502, 503, 504**: retried with exponential backoff
//! - **Connection failures and timeouts**: retried with exponential backoff
//! - **Other errors (4xx)**: returned immediately
//!
//! Retries are controlled by [`BrightpearlConfigBuilder::max_retries`](crate::BrightpearlConfigBuilder::max_retries).

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{BrightpearlApiError, HttpError, InvalidHttpRequestError, ProtocolError};
pub use http_client::{HttpClient, BACKOFF_MAX, RETRY_STATUSES, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
