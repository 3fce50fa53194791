//! The stock-check workflow: resolve the product, load the store directory,
//! narrow it to a region, then probe each store's availability.
//!
//! Guidance and result lines go to the supplied writer. The three terminal
//! conditions (no product, lookup mismatch, unusable store list) print one
//! message and return a non-`Completed` outcome rather than an error. A
//! failed store probe is printed and skipped so one bad store never aborts
//! the run.

use std::io::Write;

use anyhow::Context;
use futures::StreamExt;
use owstock_client::{ClientError, OfficeworksClient};
use owstock_core::{
    filter_stores, find_product, in_store_quantities, AvailabilityOption, ProductQuery,
    ProductRecord, RegionFilter, StoreRecord,
};

pub(crate) const NO_PRODUCT_FOUND: &str = "No product found. Have you entered the correct product code? Alternatively, use --skiplookup for delisted items";

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CheckOutcome {
    Completed(ProbeSummary),
    NoProductFound,
    ProductNameNotFound,
    InvalidStoreList,
    EmptyStoreList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ProbeSummary {
    pub stores_checked: usize,
    pub lines_found: usize,
    pub probe_failures: usize,
}

/// Result of the product lookup stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    Found(ProductRecord),
    Skipped,
    /// The search returned no products at all.
    NotFound,
    /// The search returned products, none with the exact part number.
    NameNotFound,
}

/// Looks up the product's display name unless the query skips the lookup.
///
/// # Errors
///
/// Propagates transport and decode failures from the search request.
pub(crate) async fn resolve_product(
    client: &OfficeworksClient,
    query: &ProductQuery,
) -> Result<Resolution, ClientError> {
    if query.skip_lookup {
        return Ok(Resolution::Skipped);
    }

    let products = client.search_products(&query.product_code).await?;
    if products.is_empty() {
        return Ok(Resolution::NotFound);
    }

    Ok(find_product(&products, &query.product_code)
        .cloned()
        .map_or(Resolution::NameNotFound, Resolution::Found))
}

/// Formats one result line. Returns `None` when every region is being checked
/// and the store has no state to print.
pub(crate) fn format_found_line(
    qty: i64,
    store: &StoreRecord,
    region: RegionFilter,
) -> Option<String> {
    if region.is_single_region() {
        Some(format!("Found: {qty} at {}", store.store_name))
    } else {
        let state = store.region.as_deref()?;
        Some(format!("Found: {qty} at {} ({state})", store.store_name))
    }
}

/// Why a single store produced no usable result.
#[derive(Debug)]
enum ProbeError {
    Request(ClientError),
    /// The directory entry lacks a field the probe needs.
    IncompleteStore(&'static str),
}

/// Runs the full workflow for `query`, writing console lines to `out`.
///
/// At most `concurrency` availability requests are in flight at once; output
/// always follows the filtered store order.
///
/// # Errors
///
/// Returns an error if writing to `out` fails, if the product search fails
/// outright, or if the store directory cannot be fetched for a reason other
/// than an invalid or empty list.
pub(crate) async fn run_check<W: Write>(
    client: &OfficeworksClient,
    query: &ProductQuery,
    concurrency: usize,
    out: &mut W,
) -> anyhow::Result<CheckOutcome> {
    writeln!(
        out,
        "Searching for product code: {} in {}",
        query.product_code, query.region
    )?;

    match resolve_product(client, query)
        .await
        .context("product search failed")?
    {
        Resolution::Skipped => writeln!(out, "Skipping lookup")?,
        Resolution::Found(product) => writeln!(out, "Product: {}", product.name)?,
        Resolution::NotFound => {
            writeln!(out, "{NO_PRODUCT_FOUND}")?;
            return Ok(CheckOutcome::NoProductFound);
        }
        Resolution::NameNotFound => {
            writeln!(out, "Error finding product name")?;
            return Ok(CheckOutcome::ProductNameNotFound);
        }
    }

    writeln!(out, "Getting all stores")?;
    let stores = match client.fetch_stores().await {
        Ok(stores) => stores,
        Err(ClientError::InvalidStoreList { reason }) => {
            tracing::warn!(%reason, "store directory rejected");
            writeln!(out, "Invalid store list")?;
            return Ok(CheckOutcome::InvalidStoreList);
        }
        Err(ClientError::EmptyStoreList) => {
            writeln!(out, "Empty store list")?;
            return Ok(CheckOutcome::EmptyStoreList);
        }
        Err(e) => return Err(anyhow::Error::new(e).context("failed to fetch store directory")),
    };

    let candidates = filter_stores(&stores, query.region);
    writeln!(out, "Checking {} stores", candidates.len())?;

    let summary = probe_stores(
        client,
        &candidates,
        &query.product_code,
        query.region,
        concurrency,
        out,
    )
    .await?;

    tracing::debug!(
        stores_checked = summary.stores_checked,
        lines_found = summary.lines_found,
        probe_failures = summary.probe_failures,
        "stock check complete"
    );

    Ok(CheckOutcome::Completed(summary))
}

async fn probe_stores<W: Write>(
    client: &OfficeworksClient,
    stores: &[&StoreRecord],
    code: &str,
    region: RegionFilter,
    concurrency: usize,
    out: &mut W,
) -> anyhow::Result<ProbeSummary> {
    let mut summary = ProbeSummary::default();

    let results = futures::stream::iter(stores.iter().copied())
        .map(|store| async move {
            let result = match store.store_id.as_deref() {
                Some(id) => client
                    .fetch_availability(id, code)
                    .await
                    .map_err(ProbeError::Request),
                None => Err(ProbeError::IncompleteStore("storeId")),
            };
            (store, result)
        })
        .buffered(concurrency.max(1));
    let mut results = std::pin::pin!(results);

    while let Some((store, result)) = results.next().await {
        summary.stores_checked += 1;
        let failure = match result {
            Ok(options) => write_found_lines(&options, store, region, &mut summary, out)?,
            Err(e) => Some(e),
        };

        if let Some(failure) = failure {
            match &failure {
                ProbeError::Request(e) if e.is_transport() => {
                    tracing::warn!(
                        store_id = ?store.store_id,
                        error = %e,
                        "availability request failed"
                    );
                }
                ProbeError::Request(e) => {
                    tracing::warn!(
                        store_id = ?store.store_id,
                        error = %e,
                        "availability response malformed"
                    );
                }
                ProbeError::IncompleteStore(field) => {
                    tracing::warn!(
                        store_name = %store.store_name,
                        field = *field,
                        "store record incomplete"
                    );
                }
            }
            writeln!(out, "Error getting availability for {}", store.store_name)?;
            summary.probe_failures += 1;
        }
    }

    Ok(summary)
}

/// Prints one line per in-store quantity. Stops at the first line that cannot
/// be formatted and returns it as a failure.
fn write_found_lines<W: Write>(
    options: &[AvailabilityOption],
    store: &StoreRecord,
    region: RegionFilter,
    summary: &mut ProbeSummary,
    out: &mut W,
) -> std::io::Result<Option<ProbeError>> {
    for qty in in_store_quantities(options) {
        let Some(line) = format_found_line(qty, store, region) else {
            return Ok(Some(ProbeError::IncompleteStore("address.storeState")));
        };
        writeln!(out, "{line}")?;
        summary.lines_found += 1;
    }
    Ok(None)
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
