//! Column-oriented search pages.
//!
//! A Brightpearl search answers with a shared list of column names and an
//! array of value rows:
//!
//! ```json
//! {
//!   "response": {
//!     "metaData": { "columns": [ { "name": "orderId" }, { "name": "updatedOn" } ] },
//!     "results": [ [1, "2024-01-01"], [2, "2024-01-02"] ],
//!     "resultCount": 2,
//!     "firstResult": 1,
//!     "lastResult": 2,
//!     "totalResults": 2
//!   }
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{BrightpearlApiError, HttpResponse, ProtocolError};
use crate::search::records::{normalize_rows, Record};

/// Key of the envelope object wrapping every search response.
pub const ENVELOPE_KEY: &str = "response";

/// Pagination metadata reported alongside a page's results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    /// Number of results matching the search across all pages.
    pub total_results: u64,
    /// 1-based position of the first row on this page.
    pub first_result: u64,
    /// 1-based position of the last row on this page.
    pub last_result: u64,
    /// Number of rows on this page.
    pub result_count: u64,
}

impl PaginationMetadata {
    /// Returns `true` if no page follows this one.
    ///
    /// The end is reached when the page reaches or passes the last result, or
    /// when the page is empty even though the totals claim otherwise.
    #[must_use]
    pub const fn is_last_page(&self) -> bool {
        self.last_result >= self.total_results || self.result_count == 0
    }

    /// Returns the first-result offset of the following page.
    #[must_use]
    pub const fn next_first_result(&self) -> u64 {
        self.first_result.saturating_add(self.result_count)
    }
}

/// One page of a column-oriented search result.
///
/// Every row has exactly one value per column, and rows keep the order the
/// server returned them in.
#[derive(Clone, Debug, PartialEq)]
pub struct RawPage {
    /// Column names, in order.
    pub columns: Vec<String>,
    /// Result rows; `results[i][j]` is the value of `columns[j]` in row `i`.
    pub results: Vec<Vec<Value>>,
    /// Pagination metadata for this page.
    pub pagination: PaginationMetadata,
}

impl RawPage {
    /// Decodes a page from a successful search response.
    ///
    /// # Errors
    ///
    /// Returns [`BrightpearlApiError`] (wrapped in [`SearchError`](crate::search::SearchError))
    /// if the body has no `response` envelope, or [`ProtocolError`] if the
    /// envelope does not have the search shape.
    pub fn from_response(response: HttpResponse) -> Result<Self, crate::search::SearchError> {
        if response.body.get(ENVELOPE_KEY).is_none() {
            return Err(BrightpearlApiError {
                status: response.code,
                message: format!(
                    "Brightpearl search response with status {} has no '{ENVELOPE_KEY}' envelope",
                    response.code
                ),
                payload: response.body,
            }
            .into());
        }
        Ok(Self::from_envelope(response.body)?)
    }

    /// Decodes a page from a body known to contain the `response` envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the envelope is malformed, a row's arity
    /// does not match the column count, or a column name repeats.
    pub fn from_envelope(mut body: Value) -> Result<Self, ProtocolError> {
        let inner = body
            .get_mut(ENVELOPE_KEY)
            .map(Value::take)
            .unwrap_or(Value::Null);
        let decoded: SearchResponse = serde_json::from_value(inner)
            .map_err(|source| ProtocolError::UnexpectedEnvelope { source })?;

        let columns: Vec<String> = decoded
            .meta_data
            .columns
            .into_iter()
            .map(|column| column.name)
            .collect();

        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(name) = columns.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(ProtocolError::DuplicateColumn { name: name.clone() });
        }

        if let Some((row, values)) = decoded
            .results
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != columns.len())
        {
            return Err(ProtocolError::RowArity {
                row,
                expected: columns.len(),
                found: values.len(),
            });
        }

        Ok(Self {
            columns,
            results: decoded.results,
            pagination: decoded.pagination,
        })
    }

    /// Returns `true` if the page holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns one [`Record`] per row, leaving the page intact.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        normalize_rows(&self.columns, self.results.iter().cloned())
    }

    /// Consumes the page and returns one [`Record`] per row.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        normalize_rows(&self.columns, self.results)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    meta_data: MetaData,
    results: Vec<Vec<Value>>,
    #[serde(flatten)]
    pagination: PaginationMetadata,
}

#[derive(Deserialize)]
struct MetaData {
    columns: Vec<ColumnMeta>,
}

#[derive(Deserialize)]
struct ColumnMeta {
    name: String,
}
