//! Response shapes for the three Officeworks endpoints.
//!
//! ### Product search
//! `{"products": [{"identity": {"partNumber": "...", "name": "..."}}, ...]}`.
//! Page size is fixed at 50 by the search URL; we never paginate.
//!
//! ### Store directory
//! `{"stores": [{"storeId": ..., "storeName": "...", "address": {"storeState": "NSW"}}]}`.
//! `storeId` has been observed both as a string and as a bare number. Entry
//! fields are decoded leniently: a missing or mistyped field becomes `None`
//! on that store instead of rejecting the whole directory.
//!
//! ### Availability
//! A JSON array. Only element 0 is read; it may carry an `options` array of
//! `{"qty": 3, "type": "inStore"}` objects. Other `type` values (delivery,
//! click-and-collect) are decoded but never reported. Options with no stock
//! sometimes omit `type`, and `qty` occasionally arrives as `5.0`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use owstock_core::{AvailabilityOption, OptionKind, ProductRecord, StoreRecord};

/// Top-level response from the product search endpoint.
#[derive(Debug, Deserialize)]
pub struct ProductSearchResponse {
    pub products: Vec<SearchProduct>,
}

#[derive(Debug, Deserialize)]
pub struct SearchProduct {
    pub identity: ProductIdentity,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdentity {
    pub part_number: String,
    pub name: String,
}

/// Top-level response from the store directory endpoint.
///
/// `stores` is optional so that a payload without the field can be told apart
/// from a payload with an empty list. Entries stay as raw values until
/// [`StoreEntry::from_value`] so one odd entry cannot fail the list.
#[derive(Debug, Deserialize)]
pub struct StoreDirectoryResponse {
    #[serde(default)]
    pub stores: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreEntry {
    #[serde(default, deserialize_with = "lenient_store_id")]
    pub store_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub store_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_address")]
    pub address: Option<StoreAddress>,
}

impl StoreEntry {
    /// Decodes one directory entry. Anything that is not an object yields an
    /// entry with every field absent.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAddress {
    #[serde(default, deserialize_with = "lenient_string")]
    pub store_state: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_store_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_address<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<StoreAddress>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// One availability option. `qty` must be a number; `type` may be absent.
#[derive(Debug, Deserialize)]
pub struct WireOption {
    pub qty: serde_json::Number,
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
}

impl WireOption {
    /// Whole-number quantity. Integral floats such as `5.0` are accepted.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp
    )]
    fn whole_qty(&self) -> Option<i64> {
        if let Some(qty) = self.qty.as_i64() {
            return Some(qty);
        }
        if self.qty.as_u64().is_some() {
            return Some(i64::MAX);
        }
        let qty = self.qty.as_f64()?;
        (qty.fract() == 0.0 && qty.abs() < i64::MAX as f64).then_some(qty as i64)
    }
}

impl From<SearchProduct> for ProductRecord {
    fn from(product: SearchProduct) -> Self {
        ProductRecord {
            part_number: product.identity.part_number,
            name: product.identity.name,
        }
    }
}

impl From<StoreEntry> for StoreRecord {
    fn from(entry: StoreEntry) -> Self {
        StoreRecord {
            store_id: entry.store_id,
            store_name: entry.store_name.unwrap_or_default(),
            region: entry.address.and_then(|a| a.store_state),
        }
    }
}

impl TryFrom<WireOption> for AvailabilityOption {
    type Error = String;

    /// Fails for a fractional `qty`, or for a positive `qty` with no `type`.
    fn try_from(option: WireOption) -> Result<Self, Self::Error> {
        let qty = option
            .whole_qty()
            .ok_or_else(|| format!("qty {} is not a whole number", option.qty))?;

        let kind = match option.kind {
            Some(Value::String(kind)) => OptionKind::from_wire(&kind),
            Some(Value::Null) | None if qty > 0 => {
                return Err(format!("option with qty {qty} has no type"));
            }
            Some(Value::Null) | None => OptionKind::Unspecified,
            Some(other) => OptionKind::Other(other.to_string()),
        };

        Ok(AvailabilityOption { qty, kind })
    }
}
