//! Resource-specific methods on [`BrightpearlClient`](crate::BrightpearlClient).
//!
//! - [`orders`]: order search, lookup, creation and notes
//! - [`products`]: product search, lookup, creation and availability
//!
//! Each resource exposes a [`SearchResource`](crate::search::SearchResource)
//! constant usable with the generic search methods as well.

pub mod orders;
pub mod products;

pub use orders::ORDER_SEARCH;
pub use products::{PRODUCT_SEARCH, PRODUCT_SEARCH_COLUMNS};

use std::fmt::Display;

/// Joins ids into the comma-separated form used by bulk endpoints.
pub(crate) fn join_ids<I, T>(ids: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids([1, 2, 3]), "1,2,3");
        assert_eq!(join_ids(["A-1"]), "A-1");
        assert_eq!(join_ids(Vec::<u32>::new()), "");
    }
}
