//! Order endpoints.
//!
//! Order search sorts through the `orderBy` parameter and requests no default
//! projection, since the available order columns vary by account.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde_json::{json, Value};

use crate::client::BrightpearlClient;
use crate::clients::HttpError;
use crate::resources::join_ids;
use crate::search::{PageIter, RawPage, Record, RecordIter, SearchError, SearchParams, SearchResource};

/// The order search endpoint.
pub const ORDER_SEARCH: SearchResource =
    SearchResource::new("order-service/order-search", "orderBy");

const ORDER_PATH: &str = "order-service/order";

impl BrightpearlClient {
    /// Runs one order search request exactly as parameterized.
    ///
    /// Common filters: `orderTypeId`, `orderStatusId`, `updatedOn`,
    /// `createdOn`, `placedOn`, `customerRef`, `externalRefSearchString`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the parameters are invalid or the request fails.
    pub async fn search_orders(&self, params: &SearchParams) -> Result<RawPage, SearchError> {
        self.search(&ORDER_SEARCH, params).await
    }

    /// Fetches one page of orders.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the parameters are invalid or the request fails.
    pub async fn list_orders(&self, params: SearchParams) -> Result<RawPage, SearchError> {
        self.list(&ORDER_SEARCH, params).await
    }

    /// Fetches one page of orders as records.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the parameters are invalid or the request fails.
    pub async fn list_orders_records(
        &self,
        params: SearchParams,
    ) -> Result<Vec<Record>, SearchError> {
        self.list_records(&ORDER_SEARCH, params).await
    }

    /// Returns a lazy cursor over every page of an order search.
    #[must_use]
    pub fn iter_orders(&self, params: SearchParams) -> PageIter<'_> {
        self.iter_pages(&ORDER_SEARCH, params)
    }

    /// Returns a lazy cursor over every order record of a search.
    #[must_use]
    pub fn iter_orders_records(&self, params: SearchParams) -> RecordIter<'_> {
        self.iter_records(&ORDER_SEARCH, params)
    }

    /// Fetches a single order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get_order(&self, order_id: impl Display) -> Result<Value, HttpError> {
        self.get(&format!("{ORDER_PATH}/{order_id}"), None).await
    }

    /// Fetches several orders in one request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get_orders_bulk<I, T>(&self, order_ids: I) -> Result<Value, HttpError>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let query = BTreeMap::from([("orderId".to_string(), join_ids(order_ids))]);
        self.get(ORDER_PATH, Some(query)).await
    }

    /// Creates an order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn create_order(&self, order: Value) -> Result<Value, HttpError> {
        self.post(ORDER_PATH, order).await
    }

    /// Partially updates an order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn patch_order(&self, order_id: impl Display, patch: Value) -> Result<Value, HttpError> {
        self.patch(&format!("{ORDER_PATH}/{order_id}"), patch).await
    }

    /// Replaces an order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn replace_order(
        &self,
        order_id: impl Display,
        order: Value,
    ) -> Result<Value, HttpError> {
        self.put(&format!("{ORDER_PATH}/{order_id}"), order).await
    }

    /// Adds a note to an order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn add_order_note(
        &self,
        order_id: impl Display,
        text: &str,
        is_public: bool,
    ) -> Result<Value, HttpError> {
        let note = json!({ "text": text, "isPublic": is_public });
        self.post(&format!("{ORDER_PATH}/{order_id}/note"), note).await
    }

    /// Lists the notes on an order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn list_order_notes(&self, order_id: impl Display) -> Result<Value, HttpError> {
        self.get(&format!("{ORDER_PATH}/{order_id}/note"), None).await
    }

    /// Moves an order to another status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn update_order_status(
        &self,
        order_id: impl Display,
        status_id: u32,
    ) -> Result<Value, HttpError> {
        self.patch_order(order_id, json!({ "statusId": status_id })).await
    }
}
