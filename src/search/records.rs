//! Record normalization.
//!
//! Turns column-oriented rows into one JSON object per row, and chains that
//! over every page of a search with [`RecordIter`].

use std::collections::VecDeque;

use futures::stream::{self, Stream};
use serde_json::Value;

use crate::search::errors::SearchError;
use crate::search::page::RawPage;
use crate::search::pager::PageIter;

/// A single search result keyed by column name.
///
/// Values are passed through exactly as the API typed them.
pub type Record = serde_json::Map<String, Value>;

/// Zips each row with the column names.
///
/// Rows are expected to carry exactly one value per column, which
/// [`RawPage`] guarantees for decoded pages.
///
/// ```rust
/// use brightpearl_api::search::normalize_rows;
/// use serde_json::json;
///
/// let columns = vec!["productId".to_string(), "SKU".to_string()];
/// let rows = vec![vec![json!(1001), json!("ABC-1")]];
///
/// let records = normalize_rows(&columns, rows);
/// assert_eq!(records[0]["SKU"], "ABC-1");
/// ```
pub fn normalize_rows<I>(columns: &[String], rows: I) -> Vec<Record>
where
    I: IntoIterator<Item = Vec<Value>>,
{
    rows.into_iter()
        .map(|row| columns.iter().cloned().zip(row).collect())
        .collect()
}

/// Normalizes every row of a page.
#[must_use]
pub fn normalize(page: RawPage) -> Vec<Record> {
    page.into_records()
}

/// A lazy cursor over the records of every page of a search.
///
/// Records come out in server order, page after page. Pages are fetched only
/// when the buffered records of the previous page are used up. After an
/// error or the last record the cursor is finished; to start over, build a
/// new one from the same parameters.
#[derive(Debug)]
pub struct RecordIter<'a> {
    pages: PageIter<'a>,
    buffer: VecDeque<Record>,
}

impl<'a> RecordIter<'a> {
    pub(crate) fn new(pages: PageIter<'a>) -> Self {
        Self {
            pages,
            buffer: VecDeque::new(),
        }
    }

    /// Returns the next record, fetching the next page when needed.
    ///
    /// Returns `Ok(None)` once every page has been consumed.
    ///
    /// # Errors
    ///
    /// Returns the [`SearchError`] of the page fetch that failed. Records of
    /// earlier pages have already been handed out; no further records follow.
    pub async fn next_record(&mut self) -> Result<Option<Record>, SearchError> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Ok(Some(record));
            }
            match self.pages.next_page().await {
                Ok(Some(page)) => self.buffer.extend(page.into_records()),
                Ok(None) => return Ok(None),
                Err(error) => {
                    self.buffer.clear();
                    return Err(error);
                }
            }
        }
    }

    /// Returns `true` once the cursor can yield nothing more.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.buffer.is_empty() && self.pages.is_finished()
    }

    /// Drains the remaining records into a vector.
    ///
    /// # Errors
    ///
    /// Returns the first [`SearchError`] encountered; records gathered so far
    /// are discarded.
    pub async fn collect_all(mut self) -> Result<Vec<Record>, SearchError> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record().await? {
            records.push(record);
        }
        Ok(records)
    }

    /// Converts the cursor into a [`Stream`] of records.
    ///
    /// The stream ends after yielding the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Record, SearchError>> + 'a {
        stream::try_unfold(self, |mut records| async move {
            Ok(records
                .next_record()
                .await?
                .map(|record| (record, records)))
        })
    }
}
