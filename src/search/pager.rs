//! Lazy page-by-page iteration over a search.

use futures::stream::{self, Stream};

use crate::clients::HttpClient;
use crate::search::errors::SearchError;
use crate::search::executor::execute_search;
use crate::search::page::RawPage;
use crate::search::params::SearchParams;
use crate::search::records::RecordIter;
use crate::search::resource::SearchResource;

#[derive(Debug)]
enum CursorState {
    Pending(SearchParams),
    Finished,
}

/// A lazy, forward-only cursor over the pages of a search.
///
/// Each call to [`next_page`](Self::next_page) performs exactly one request;
/// nothing is prefetched. After the first page the cursor moves by
/// `firstResult + resultCount` as reported by the server, so short pages do
/// not skip rows. Iteration ends when a page reaches `totalResults`, when a
/// page is empty, or when an error occurs. A finished cursor cannot be
/// restarted.
///
/// # Example
///
/// ```rust,ignore
/// let mut pages = client.iter_pages(&ORDER_SEARCH, params);
/// while let Some(page) = pages.next_page().await? {
///     println!("{} rows", page.results.len());
/// }
/// ```
#[derive(Debug)]
pub struct PageIter<'a> {
    http: &'a HttpClient,
    resource: SearchResource,
    state: CursorState,
    last_first_result: Option<u64>,
    pages_fetched: u32,
}

impl<'a> PageIter<'a> {
    pub(crate) fn new(
        http: &'a HttpClient,
        resource: SearchResource,
        params: SearchParams,
    ) -> Self {
        Self {
            http,
            resource,
            state: CursorState::Pending(params),
            last_first_result: None,
            pages_fetched: 0,
        }
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` once the search is exhausted. Empty pages are never
    /// yielded, so a search without results yields no pages at all. A page
    /// whose `firstResult` does not move past the previous page's is dropped
    /// and ends the search, so no row is handed out twice.
    ///
    /// # Errors
    ///
    /// Returns the [`SearchError`] of the failed fetch. The cursor is finished
    /// afterwards; later calls return `Ok(None)`.
    pub async fn next_page(&mut self) -> Result<Option<RawPage>, SearchError> {
        let params = match std::mem::replace(&mut self.state, CursorState::Finished) {
            CursorState::Pending(params) => params,
            CursorState::Finished => return Ok(None),
        };

        let page = execute_search(self.http, &self.resource, &params).await?;
        self.pages_fetched += 1;

        if page.is_empty() {
            tracing::debug!(
                "Search of {} ended with an empty page after {} requests",
                self.resource.path(),
                self.pages_fetched
            );
            return Ok(None);
        }

        let pagination = page.pagination;
        let advanced = self
            .last_first_result
            .map_or(true, |previous| pagination.first_result > previous);

        if !advanced {
            tracing::warn!(
                "Search of {} did not advance past firstResult={}, dropping the repeated page",
                self.resource.path(),
                pagination.first_result
            );
            return Ok(None);
        }

        if pagination.is_last_page() {
            tracing::debug!(
                "Search of {} exhausted at {} of {} results",
                self.resource.path(),
                pagination.last_result,
                pagination.total_results
            );
        } else {
            self.state =
                CursorState::Pending(params.at_first_result(pagination.next_first_result()));
        }
        self.last_first_result = Some(pagination.first_result);

        Ok(Some(page))
    }

    /// Returns `true` once no further request will be made.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.state, CursorState::Finished)
    }

    /// Returns how many requests this cursor has completed.
    #[must_use]
    pub const fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Returns the endpoint being searched.
    #[must_use]
    pub const fn resource(&self) -> &SearchResource {
        &self.resource
    }

    /// Flattens the pages into a cursor over normalized records.
    #[must_use]
    pub fn records(self) -> RecordIter<'a> {
        RecordIter::new(self)
    }

    /// Drains the remaining pages into a vector.
    ///
    /// # Errors
    ///
    /// Returns the first [`SearchError`] encountered.
    pub async fn collect_all(mut self) -> Result<Vec<RawPage>, SearchError> {
        let mut pages = Vec::new();
        while let Some(page) = self.next_page().await? {
            pages.push(page);
        }
        Ok(pages)
    }

    /// Converts the cursor into a [`Stream`] of pages.
    ///
    /// The stream ends after yielding the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<RawPage, SearchError>> + 'a {
        stream::try_unfold(self, |mut pages| async move {
            Ok(pages.next_page().await?.map(|page| (page, pages)))
        })
    }
}
