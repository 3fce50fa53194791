//! Decoding of raw response bodies into domain records.

use owstock_core::{AvailabilityOption, ProductRecord, StoreRecord};

use crate::error::ClientError;
use crate::types::{ProductSearchResponse, StoreDirectoryResponse, StoreEntry, WireOption};

/// Decodes a product search body into records, preserving response order.
///
/// # Errors
///
/// Returns [`ClientError::Deserialize`] if the body is not JSON or lacks the
/// `products` list.
pub fn parse_product_search(body: &str, code: &str) -> Result<Vec<ProductRecord>, ClientError> {
    let response: ProductSearchResponse =
        serde_json::from_str(body).map_err(|e| ClientError::Deserialize {
            context: format!("product search for {code}"),
            source: e,
        })?;
    Ok(response
        .products
        .into_iter()
        .map(ProductRecord::from)
        .collect())
}

/// Decodes a store directory body.
///
/// # Errors
///
/// - [`ClientError::InvalidStoreList`] when the body is not a JSON object with
///   a `stores` list. Individual entries are never rejected here.
/// - [`ClientError::EmptyStoreList`] when `stores` is present but empty.
pub fn parse_store_directory(body: &str) -> Result<Vec<StoreRecord>, ClientError> {
    let response: StoreDirectoryResponse =
        serde_json::from_str(body).map_err(|e| ClientError::InvalidStoreList {
            reason: e.to_string(),
        })?;

    let Some(stores) = response.stores else {
        return Err(ClientError::InvalidStoreList {
            reason: "missing \"stores\" field".to_string(),
        });
    };

    if stores.is_empty() {
        return Err(ClientError::EmptyStoreList);
    }

    Ok(stores
        .into_iter()
        .map(|value| StoreRecord::from(StoreEntry::from_value(value)))
        .collect())
}

/// Decodes one store's availability body.
///
/// Only the first array element is inspected. A first element without an
/// `options` field yields an empty list.
///
/// # Errors
///
/// Returns [`ClientError::MalformedAvailability`] when the body is not a JSON
/// array, the array is empty, the first element is not an object, any option
/// lacks a numeric `qty`, or an option with positive `qty` lacks a `type`.
pub fn parse_availability(
    store_id: &str,
    body: &str,
) -> Result<Vec<AvailabilityOption>, ClientError> {
    let malformed = |reason: String| ClientError::MalformedAvailability {
        store_id: store_id.to_string(),
        reason,
    };

    let entries: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;

    let first = entries
        .into_iter()
        .next()
        .ok_or_else(|| malformed("empty availability list".to_string()))?;

    let serde_json::Value::Object(mut entry) = first else {
        return Err(malformed("first availability entry is not an object".to_string()));
    };

    let Some(options) = entry.remove("options") else {
        return Ok(Vec::new());
    };

    let options: Vec<WireOption> =
        serde_json::from_value(options).map_err(|e| malformed(e.to_string()))?;

    options
        .into_iter()
        .map(AvailabilityOption::try_from)
        .collect::<Result<_, _>>()
        .map_err(malformed)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
