//! Single search round trip.

use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::search::errors::SearchError;
use crate::search::page::RawPage;
use crate::search::params::{build_query, SearchParams};
use crate::search::resource::SearchResource;

/// Issues one search request and decodes the returned page.
///
/// Parameters are validated before anything is sent. A non-2xx status or a
/// body without the `response` envelope becomes an API error carrying the
/// status and the raw payload; an unreadable body becomes a protocol error.
/// A failed call never yields a partial or empty page.
///
/// # Errors
///
/// Returns [`SearchError::Validation`] for invalid parameters and
/// [`SearchError::Http`] for transport, API and decoding failures.
pub async fn execute_search(
    http: &HttpClient,
    resource: &SearchResource,
    params: &SearchParams,
) -> Result<RawPage, SearchError> {
    let query = build_query(params, resource.sort_param())?;

    tracing::debug!(
        "Searching {} with firstResult={:?} page={:?} pageSize={}",
        resource.path(),
        params.first_result(),
        params.page(),
        params.page_size()
    );

    let request = HttpRequest::builder(HttpMethod::Get, resource.path())
        .query(query)
        .build()
        .map_err(crate::clients::HttpError::from)?;
    let response = http.request(request).await?;

    RawPage::from_response(response)
}
