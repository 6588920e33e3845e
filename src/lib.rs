//! # Brightpearl API Rust Client
//!
//! A Rust client for the Brightpearl public API, focused on its
//! column-oriented search endpoints and the pagination around them.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`BrightpearlConfig`] and [`BrightpearlConfigBuilder`]
//! - Validated newtypes for the account domain, id and credentials
//! - Async HTTP client with retry logic and `Retry-After` handling
//! - Search query construction with friendly sort syntax via [`SearchParams`]
//! - Lazy page and record cursors ([`PageIter`], [`RecordIter`]) that fetch
//!   one page per request, only when more data is asked for
//! - Normalization of column-oriented rows into per-record JSON objects
//! - Order and product endpoints via [`resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use brightpearl_api::{AccountId, AccountToken, AppRef, BrightpearlConfig, Domain};
//!
//! let config = BrightpearlConfig::builder()
//!     .domain(Domain::new("https://ws-use.brightpearlconnect.com").unwrap())
//!     .account_id(AccountId::new("acme").unwrap())
//!     .account_token(AccountToken::new("your-account-token").unwrap())
//!     .app_ref(AppRef::new("acme_integration").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     config.base_url(),
//!     "https://ws-use.brightpearlconnect.com/public-api/acme"
//! );
//! ```
//!
//! ## Searching
//!
//! ```rust,ignore
//! use brightpearl_api::BrightpearlClient;
//! use brightpearl_api::search::SearchParams;
//!
//! let client = BrightpearlClient::new(&config)?;
//!
//! // One page, with the product listing's default columns
//! let page = client.list_products(SearchParams::default()).await?;
//! for record in page.records() {
//!     println!("{} {}", record["SKU"], record["productName"]);
//! }
//!
//! // Every matching order, fetched page by page
//! let params = SearchParams::builder()
//!     .order_by("-updatedOn")
//!     .filter("orderStatusId", 4)
//!     .build();
//! let orders = client.iter_orders_records(params).collect_all().await?;
//! ```
//!
//! ## Streams
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//!
//! let stream = client.iter_products_records(SearchParams::default()).into_stream();
//! futures::pin_mut!(stream);
//! while let Some(record) = stream.try_next().await? {
//!     println!("{}", record["productId"]);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: The client is `Send + Sync` and cursors share nothing
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Lazy pagination**: No request is made until a page is pulled

mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;
pub mod search;

// Re-export public types at crate root for convenience
pub use client::BrightpearlClient;
pub use config::{AccountId, AccountToken, AppRef, BrightpearlConfig, BrightpearlConfigBuilder, Domain};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    BrightpearlApiError, DataType, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, InvalidHttpRequestError, ProtocolError,
};

// Re-export search types
pub use search::{
    PageIter, PaginationMetadata, RawPage, Record, RecordIter, SearchError, SearchParams,
    SearchResource, SortDirective, ValidationError,
};
