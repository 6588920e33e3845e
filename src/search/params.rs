//! Search parameters and query construction.
//!
//! [`SearchParams`] describes one search call; [`build_query`] turns it into
//! the flat query-parameter mapping sent to a Brightpearl search endpoint.

use std::collections::BTreeMap;
use std::fmt;

use crate::search::errors::ValidationError;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Query parameter carrying the page size.
pub const PAGE_SIZE_PARAM: &str = "pageSize";
/// Query parameter carrying the comma-joined column projection.
pub const COLUMNS_PARAM: &str = "columns";
/// Query parameter carrying the first-result offset.
pub const FIRST_RESULT_PARAM: &str = "firstResult";
/// Query parameter carrying the page number.
pub const PAGE_PARAM: &str = "page";

/// A sort directive for a search.
///
/// Brightpearl expects `field:ASC` or `field:DESC`. Directives can also be
/// written in the friendly form `field` (ascending) or `-field` (descending).
///
/// ```rust
/// use brightpearl_api::search::SortDirective;
///
/// assert_eq!(SortDirective::parse("-updatedOn").to_string(), "updatedOn:DESC");
/// assert_eq!(SortDirective::parse("orderId").to_string(), "orderId:ASC");
/// assert_eq!(SortDirective::parse("placedOn:DESC").to_string(), "placedOn:DESC");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SortDirective {
    /// Sort ascending by the named field.
    Ascending(String),
    /// Sort descending by the named field.
    Descending(String),
    /// A directive already in `field:DIRECTION` form, sent verbatim.
    Raw(String),
}

impl SortDirective {
    /// Parses a directive in either pre-formatted or friendly form.
    ///
    /// Anything containing `:` is treated as pre-formatted and kept verbatim.
    #[must_use]
    pub fn parse(directive: &str) -> Self {
        let directive = directive.trim();
        if directive.contains(':') {
            Self::Raw(directive.to_string())
        } else {
            Self::friendly(directive)
        }
    }

    /// Parses a friendly directive: `-field` sorts descending, `field` ascending.
    #[must_use]
    pub fn friendly(order_by: &str) -> Self {
        let order_by = order_by.trim();
        order_by.strip_prefix('-').map_or_else(
            || Self::Ascending(order_by.to_string()),
            |field| Self::Descending(field.to_string()),
        )
    }

    /// Returns the field being sorted on.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Ascending(field) | Self::Descending(field) => field,
            Self::Raw(raw) => raw.split(':').next().unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.field().trim().is_empty() {
            return Err(ValidationError::EmptySortField {
                directive: self.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending(field) => write!(f, "{field}:ASC"),
            Self::Descending(field) => write!(f, "{field}:DESC"),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Parameters for one search call.
///
/// Built with [`SearchParams::builder`] and immutable afterwards. When both a
/// first-result offset and a page number are set, the offset wins.
///
/// ```rust
/// use brightpearl_api::search::SearchParams;
///
/// let params = SearchParams::builder()
///     .page_size(50)
///     .columns(["orderId", "updatedOn"])
///     .order_by("-updatedOn")
///     .filter("orderStatusId", 4)
///     .build();
///
/// assert_eq!(params.page_size(), 50);
/// assert_eq!(params.sort().unwrap().to_string(), "updatedOn:DESC");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    columns: Option<Vec<String>>,
    sort: Option<SortDirective>,
    page_size: u32,
    page: Option<u32>,
    first_result: Option<u64>,
    filters: BTreeMap<String, String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            columns: None,
            sort: None,
            page_size: DEFAULT_PAGE_SIZE,
            page: None,
            first_result: None,
            filters: BTreeMap::new(),
        }
    }
}

impl SearchParams {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn builder() -> SearchParamsBuilder {
        SearchParamsBuilder::default()
    }

    /// Returns the column projection, if any.
    #[must_use]
    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// Returns the sort directive, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<&SortDirective> {
        self.sort.as_ref()
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the explicit page number, if any.
    #[must_use]
    pub const fn page(&self) -> Option<u32> {
        self.page
    }

    /// Returns the explicit first-result offset, if any.
    #[must_use]
    pub const fn first_result(&self) -> Option<u64> {
        self.first_result
    }

    /// Returns the pass-through filters.
    #[must_use]
    pub const fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Returns a copy positioned at the given first-result offset.
    pub(crate) fn at_first_result(&self, first_result: u64) -> Self {
        Self {
            first_result: Some(first_result),
            page: None,
            ..self.clone()
        }
    }

    /// Fills in a column projection when none was requested.
    pub(crate) fn or_columns(mut self, default_columns: Option<&[&str]>) -> Self {
        if self.columns.is_none() {
            self.columns =
                default_columns.map(|columns| columns.iter().map(ToString::to_string).collect());
        }
        self
    }
}

/// Builder for constructing [`SearchParams`] instances.
#[derive(Debug, Default)]
pub struct SearchParamsBuilder {
    params: SearchParams,
}

impl SearchParamsBuilder {
    /// Sets the column projection.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the sort directive.
    #[must_use]
    pub fn sort(mut self, sort: SortDirective) -> Self {
        self.params.sort = Some(sort);
        self
    }

    /// Sets the sort from a string in `field:DIR`, `field` or `-field` form.
    #[must_use]
    pub fn order_by(self, order_by: &str) -> Self {
        self.sort(SortDirective::parse(order_by))
    }

    /// Sets the page size. Defaults to [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.params.page_size = page_size;
        self
    }

    /// Sets an explicit 1-based page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.params.page = Some(page);
        self
    }

    /// Sets an explicit first-result offset. Takes precedence over [`page`](Self::page).
    #[must_use]
    pub const fn first_result(mut self, first_result: u64) -> Self {
        self.params.first_result = Some(first_result);
        self
    }

    /// Adds a filter, passed to the API verbatim as a query parameter.
    #[must_use]
    pub fn filter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.filters.insert(name.into(), value.to_string());
        self
    }

    /// Builds the [`SearchParams`].
    #[must_use]
    pub fn build(self) -> SearchParams {
        self.params
    }
}

/// Builds the query-parameter mapping for a search call.
///
/// `sort_param` is the name the endpoint uses for its sort directive
/// (`orderBy` for orders, `sort` for products). Filters are applied first, so
/// a filter can never override the page size, projection, sort or cursor.
///
/// # Errors
///
/// Returns [`ValidationError`] if the page size or page number is zero, a
/// column name is empty, or the sort directive names no field.
///
/// ```rust
/// use brightpearl_api::search::{build_query, SearchParams};
///
/// let params = SearchParams::builder().page(3).first_result(201).build();
/// let query = build_query(&params, "orderBy").unwrap();
///
/// assert_eq!(query.get("firstResult").map(String::as_str), Some("201"));
/// assert!(!query.contains_key("page"));
/// ```
pub fn build_query(
    params: &SearchParams,
    sort_param: &str,
) -> Result<BTreeMap<String, String>, ValidationError> {
    if params.page_size == 0 {
        return Err(ValidationError::NonPositivePageSize {
            page_size: params.page_size,
        });
    }

    let mut query = params.filters.clone();
    query.insert(PAGE_SIZE_PARAM.to_string(), params.page_size.to_string());

    if let Some(columns) = params.columns.as_deref().filter(|c| !c.is_empty()) {
        if columns.iter().any(|column| column.trim().is_empty()) {
            return Err(ValidationError::EmptyColumnName);
        }
        query.insert(COLUMNS_PARAM.to_string(), columns.join(","));
    }

    if let Some(sort) = &params.sort {
        sort.validate()?;
        query.insert(sort_param.to_string(), sort.to_string());
    }

    query.remove(FIRST_RESULT_PARAM);
    query.remove(PAGE_PARAM);
    match (params.first_result, params.page) {
        (Some(first_result), _) => {
            query.insert(FIRST_RESULT_PARAM.to_string(), first_result.to_string());
        }
        (None, Some(0)) => return Err(ValidationError::NonPositivePage { page: 0 }),
        (None, Some(page)) => {
            query.insert(PAGE_PARAM.to_string(), page.to_string());
        }
        (None, None) => {}
    }

    Ok(query)
}
