//! Request-scoped domain values passed between the workflow stages.

use crate::region::RegionFilter;

/// One stock-check request, built once from CLI input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Merchant part number, compared verbatim against search results.
    pub product_code: String,
    pub region: RegionFilter,
    /// Skip the product search, e.g. for delisted items.
    pub skip_lookup: bool,
}

/// A product search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub part_number: String,
    pub name: String,
}

/// One store from the store directory.
///
/// Directory entries are not validated up front. A store without an ID cannot
/// be probed, and a store without a state never matches a single-region filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRecord {
    pub store_id: Option<String>,
    /// Empty when the directory omits the name.
    pub store_name: String,
    /// State code exactly as the directory reports it.
    pub region: Option<String>,
}

/// Fulfilment type of an availability option. Only [`OptionKind::InStore`]
/// is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    InStore,
    Other(String),
    /// The option carried no `type`. Only accepted for options with no stock.
    Unspecified,
}

impl OptionKind {
    #[must_use]
    pub fn from_wire(kind: &str) -> Self {
        if kind == "inStore" {
            OptionKind::InStore
        } else {
            OptionKind::Other(kind.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityOption {
    pub qty: i64,
    pub kind: OptionKind,
}

impl AvailabilityOption {
    /// `true` when the option represents stock on a shelf right now.
    #[must_use]
    pub fn is_in_store_stock(&self) -> bool {
        self.qty > 0 && self.kind == OptionKind::InStore
    }
}

/// Linear scan for the first product whose part number equals `code`.
#[must_use]
pub fn find_product<'a>(products: &'a [ProductRecord], code: &str) -> Option<&'a ProductRecord> {
    products.iter().find(|p| p.part_number == code)
}

/// Quantities worth reporting, in response order.
pub fn in_store_quantities(options: &[AvailabilityOption]) -> impl Iterator<Item = i64> + '_ {
    options
        .iter()
        .filter(|o| o.is_in_store_stock())
        .map(|o| o.qty)
}
