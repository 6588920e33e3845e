//! Paginated search over Brightpearl's column-oriented search endpoints.
//!
//! A search result arrives as a shared list of column names plus rows of
//! values. This module builds the search query, decodes each page, walks the
//! pages lazily, and zips rows into per-record JSON objects.
//!
//! - [`SearchParams`] / [`build_query`]: query construction and validation
//! - [`execute_search`]: one request, one decoded [`RawPage`]
//! - [`PageIter`]: lazy cursor over every page of a search
//! - [`RecordIter`]: lazy cursor over every [`Record`] of a search
//!
//! Both cursors issue one request per page, only when asked for more, and
//! can be turned into [`futures::Stream`]s with `into_stream()`.
//!
//! # Example
//!
//! ```rust,ignore
//! use brightpearl_api::search::SearchParams;
//! use brightpearl_api::resources::ORDER_SEARCH;
//!
//! let params = SearchParams::builder()
//!     .page_size(200)
//!     .order_by("-updatedOn")
//!     .filter("orderStatusId", 4)
//!     .build();
//!
//! let mut records = client.iter_records(&ORDER_SEARCH, params);
//! while let Some(record) = records.next_record().await? {
//!     println!("{}", record["orderId"]);
//! }
//! ```

mod errors;
mod executor;
mod page;
mod pager;
mod params;
mod records;
mod resource;

pub use errors::{SearchError, ValidationError};
pub use executor::execute_search;
pub use page::{PaginationMetadata, RawPage, ENVELOPE_KEY};
pub use pager::PageIter;
pub use params::{
    build_query, SearchParams, SearchParamsBuilder, SortDirective, COLUMNS_PARAM,
    DEFAULT_PAGE_SIZE, FIRST_RESULT_PARAM, PAGE_PARAM, PAGE_SIZE_PARAM,
};
pub use records::{normalize, normalize_rows, Record, RecordIter};
pub use resource::SearchResource;
