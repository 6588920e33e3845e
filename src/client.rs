//! The Brightpearl API client.
//!
//! [`BrightpearlClient`] binds an [`HttpClient`] to one account and exposes
//! the search pipeline plus plain JSON request helpers. Resource-specific
//! methods live in [`crate::resources`].

use std::collections::BTreeMap;

use serde_json::Value;

use crate::clients::{DataType, HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::config::BrightpearlConfig;
use crate::search::{
    execute_search, PageIter, RawPage, Record, RecordIter, SearchError, SearchParams,
    SearchResource,
};

/// Client for one Brightpearl account.
///
/// The client holds only read-only connection settings and a connection
/// pool, so it can be shared freely and any number of searches can run on it
/// at once without affecting each other.
///
/// # Example
///
/// ```rust,ignore
/// use brightpearl_api::{BrightpearlClient, BrightpearlConfig};
/// use brightpearl_api::resources::PRODUCT_SEARCH;
/// use brightpearl_api::search::SearchParams;
///
/// let client = BrightpearlClient::new(&config)?;
///
/// let page = client
///     .search(&PRODUCT_SEARCH, &SearchParams::builder().filter("SKU", "ABC-1").build())
///     .await?;
/// println!("{} of {} products", page.results.len(), page.pagination.total_results);
/// ```
#[derive(Debug)]
pub struct BrightpearlClient {
    http_client: HttpClient,
}

// Verify BrightpearlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BrightpearlClient>();
};

impl BrightpearlClient {
    /// Creates a new client for the configured account.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: &BrightpearlConfig) -> Result<Self, HttpError> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
        })
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the account-scoped base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.http_client.base_uri()
    }

    /// Runs a single search request exactly as parameterized.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the parameters are invalid or the request
    /// or its decoding fails.
    pub async fn search(
        &self,
        resource: &SearchResource,
        params: &SearchParams,
    ) -> Result<RawPage, SearchError> {
        execute_search(&self.http_client, resource, params).await
    }

    /// Fetches one page, applying the resource's default projection when no
    /// columns were requested.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the parameters are invalid or the request
    /// or its decoding fails.
    pub async fn list(
        &self,
        resource: &SearchResource,
        params: SearchParams,
    ) -> Result<RawPage, SearchError> {
        let params = params.or_columns(resource.default_columns());
        self.search(resource, &params).await
    }

    /// Fetches one page and normalizes its rows into records.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the parameters are invalid or the request
    /// or its decoding fails.
    pub async fn list_records(
        &self,
        resource: &SearchResource,
        params: SearchParams,
    ) -> Result<Vec<Record>, SearchError> {
        Ok(self.list(resource, params).await?.into_records())
    }

    /// Returns a lazy cursor over every page of a search.
    ///
    /// No request is made until the first page is pulled.
    #[must_use]
    pub fn iter_pages(&self, resource: &SearchResource, params: SearchParams) -> PageIter<'_> {
        PageIter::new(
            &self.http_client,
            *resource,
            params.or_columns(resource.default_columns()),
        )
    }

    /// Returns a lazy cursor over every record of a search, across pages.
    #[must_use]
    pub fn iter_records(&self, resource: &SearchResource, params: SearchParams) -> RecordIter<'_> {
        self.iter_pages(resource, params).records()
    }

    /// Sends a GET request and returns the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get(
        &self,
        path: &str,
        query: Option<BTreeMap<String, String>>,
    ) -> Result<Value, HttpError> {
        self.send(HttpMethod::Get, path, query, None).await
    }

    /// Sends a POST request with a JSON body and returns the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, HttpError> {
        self.send(HttpMethod::Post, path, None, Some(body)).await
    }

    /// Sends a PATCH request with a JSON body and returns the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn patch(&self, path: &str, body: Value) -> Result<Value, HttpError> {
        self.send(HttpMethod::Patch, path, None, Some(body)).await
    }

    /// Sends a PUT request with a JSON body and returns the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn put(&self, path: &str, body: Value) -> Result<Value, HttpError> {
        self.send(HttpMethod::Put, path, None, Some(body)).await
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<BTreeMap<String, String>>,
        body: Option<Value>,
    ) -> Result<Value, HttpError> {
        let mut builder = HttpRequest::builder(method, path);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.body(body).body_type(DataType::Json);
        }
        let response = self.http_client.request(builder.build()?).await?;
        Ok(response.body)
    }
}
