//! Product endpoints.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde_json::Value;

use crate::client::BrightpearlClient;
use crate::clients::HttpError;
use crate::resources::join_ids;
use crate::search::{PageIter, RawPage, Record, RecordIter, SearchError, SearchParams, SearchResource};

/// Columns requested by product listings when the caller names none.
pub const PRODUCT_SEARCH_COLUMNS: &[&str] = &[
    "productId",
    "SKU",
    "productName",
    "brandId",
    "productTypeId",
    "updatedOn",
];

/// The product search endpoint.
pub const PRODUCT_SEARCH: SearchResource =
    SearchResource::new("product-service/product-search", "sort")
        .with_default_columns(PRODUCT_SEARCH_COLUMNS);

const PRODUCT_PATH: &str = "product-service/product";
const AVAILABILITY_PATH: &str = "product-service/product-availability";

impl BrightpearlClient {
    /// Runs one product search request exactly as parameterized.
    ///
    /// Common filters: `SKU`, `productName`, `brandId`, `updatedOn`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the parameters are invalid or the request fails.
    pub async fn search_products(&self, params: &SearchParams) -> Result<RawPage, SearchError> {
        self.search(&PRODUCT_SEARCH, params).await
    }

    /// Fetches one page of products, using [`PRODUCT_SEARCH_COLUMNS`] unless
    /// columns are given.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the parameters are invalid or the request fails.
    pub async fn list_products(&self, params: SearchParams) -> Result<RawPage, SearchError> {
        self.list(&PRODUCT_SEARCH, params).await
    }

    /// Fetches one page of products as records.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the parameters are invalid or the request fails.
    pub async fn list_products_records(
        &self,
        params: SearchParams,
    ) -> Result<Vec<Record>, SearchError> {
        self.list_records(&PRODUCT_SEARCH, params).await
    }

    /// Returns a lazy cursor over every page of a product search.
    #[must_use]
    pub fn iter_products(&self, params: SearchParams) -> PageIter<'_> {
        self.iter_pages(&PRODUCT_SEARCH, params)
    }

    /// Returns a lazy cursor over every product record of a search.
    #[must_use]
    pub fn iter_products_records(&self, params: SearchParams) -> RecordIter<'_> {
        self.iter_records(&PRODUCT_SEARCH, params)
    }

    /// Fetches a single product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get_product(&self, product_id: impl Display) -> Result<Value, HttpError> {
        self.get(&format!("{PRODUCT_PATH}/{product_id}"), None).await
    }

    /// Fetches several products in one request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get_products_bulk<I, T>(&self, product_ids: I) -> Result<Value, HttpError>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let query = BTreeMap::from([("productId".to_string(), join_ids(product_ids))]);
        self.get(PRODUCT_PATH, Some(query)).await
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn create_product(&self, product: Value) -> Result<Value, HttpError> {
        self.post(PRODUCT_PATH, product).await
    }

    /// Partially updates a product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn patch_product(
        &self,
        product_id: impl Display,
        changes: Value,
    ) -> Result<Value, HttpError> {
        self.patch(&format!("{PRODUCT_PATH}/{product_id}"), changes).await
    }

    /// Replaces a product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn replace_product(
        &self,
        product_id: impl Display,
        product: Value,
    ) -> Result<Value, HttpError> {
        self.put(&format!("{PRODUCT_PATH}/{product_id}"), product).await
    }

    /// Looks up a product by SKU.
    ///
    /// Returns the first match as a record with `productId`, `SKU` and
    /// `productName`, or `None` if no product has that SKU.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails.
    pub async fn find_product_by_sku(&self, sku: &str) -> Result<Option<Record>, SearchError> {
        let params = SearchParams::builder()
            .columns(["productId", "SKU", "productName"])
            .page_size(1)
            .page(1)
            .filter("SKU", sku)
            .build();
        let page = self.search(&PRODUCT_SEARCH, &params).await?;
        Ok(page.into_records().into_iter().next())
    }

    /// Fetches stock availability for one or more products.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get_product_availability<I, T>(
        &self,
        product_ids: I,
        warehouse_id: Option<u32>,
    ) -> Result<Value, HttpError>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let mut query = BTreeMap::from([("productId".to_string(), join_ids(product_ids))]);
        if let Some(warehouse_id) = warehouse_id {
            query.insert("warehouseId".to_string(), warehouse_id.to_string());
        }
        self.get(AVAILABILITY_PATH, Some(query)).await
    }
}
