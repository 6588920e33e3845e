//! Search endpoint descriptors.

/// Describes a Brightpearl search endpoint.
///
/// Search endpoints differ in their path, in the name of the sort parameter,
/// and in whether a default column projection should be requested.
///
/// ```rust
/// use brightpearl_api::search::SearchResource;
///
/// const CONTACT_SEARCH: SearchResource =
///     SearchResource::new("contact-service/contact-search", "sort");
///
/// assert_eq!(CONTACT_SEARCH.path(), "contact-service/contact-search");
/// assert!(CONTACT_SEARCH.default_columns().is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchResource {
    path: &'static str,
    sort_param: &'static str,
    default_columns: Option<&'static [&'static str]>,
}

impl SearchResource {
    /// Creates a descriptor without a default projection.
    #[must_use]
    pub const fn new(path: &'static str, sort_param: &'static str) -> Self {
        Self {
            path,
            sort_param,
            default_columns: None,
        }
    }

    /// Sets the projection requested when the caller names no columns.
    #[must_use]
    pub const fn with_default_columns(mut self, columns: &'static [&'static str]) -> Self {
        self.default_columns = Some(columns);
        self
    }

    /// Returns the search path, relative to the account base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the name of the sort query parameter.
    #[must_use]
    pub const fn sort_param(&self) -> &'static str {
        self.sort_param
    }

    /// Returns the default column projection, if any.
    #[must_use]
    pub const fn default_columns(&self) -> Option<&'static [&'static str]> {
        self.default_columns
    }
}
