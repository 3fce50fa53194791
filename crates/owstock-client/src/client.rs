//! HTTP client for the Officeworks product search, store directory, and
//! per-store availability endpoints.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};

use owstock_core::{AppConfig, AvailabilityOption, Endpoints, ProductRecord, StoreRecord};

use crate::cache::ResponseCache;
use crate::error::ClientError;
use crate::parse::{parse_availability, parse_product_search, parse_store_directory};

/// Client for the three Officeworks endpoints.
///
/// Only the store directory goes through the response cache. Product search
/// and availability requests always hit the network. No request is retried.
pub struct OfficeworksClient {
    client: Client,
    endpoints: Endpoints,
    cache: Arc<dyn ResponseCache>,
}

impl OfficeworksClient {
    /// Creates a client with the given endpoints, `User-Agent`, optional
    /// request timeout, and cache handle.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidUrl`] if any endpoint
    /// is not an absolute URL.
    pub fn new(
        endpoints: Endpoints,
        user_agent: &str,
        timeout_secs: Option<u64>,
        cache: Arc<dyn ResponseCache>,
    ) -> Result<Self, ClientError> {
        for url in [
            &endpoints.product_search_url,
            &endpoints.stores_url,
            &endpoints.availability_url,
        ] {
            parse_endpoint(url)?;
        }

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoints,
            cache,
        })
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`OfficeworksClient::new`].
    pub fn from_config(
        config: &AppConfig,
        cache: Arc<dyn ResponseCache>,
    ) -> Result<Self, ClientError> {
        Self::new(
            config.endpoints.clone(),
            &config.user_agent,
            config.request_timeout_secs,
            cache,
        )
    }

    /// Searches products by code. Uncached.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] on transport failure.
    /// - [`ClientError::Deserialize`] if the body has no `products` list.
    pub async fn search_products(&self, code: &str) -> Result<Vec<ProductRecord>, ClientError> {
        let url = self.search_url(code)?;
        let body = self.get_text(&url).await?;
        parse_product_search(&body, code)
    }

    /// Fetches the full store directory, served from the cache when a fresh
    /// entry exists. Only bodies that decode to a non-empty store list are
    /// written back to the cache.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] on transport failure.
    /// - [`ClientError::InvalidStoreList`] if the `stores` field is missing or malformed.
    /// - [`ClientError::EmptyStoreList`] if the list is empty.
    pub async fn fetch_stores(&self) -> Result<Vec<StoreRecord>, ClientError> {
        let url = parse_endpoint(&self.endpoints.stores_url)?;
        let key = url.as_str();

        if let Some(body) = self.cache.get(key) {
            match parse_store_directory(&body) {
                Ok(stores) => {
                    tracing::debug!(url = key, stores = stores.len(), "store directory cache hit");
                    return Ok(stores);
                }
                Err(e) => {
                    tracing::warn!(
                        url = key,
                        error = %e,
                        "discarding unusable cached store directory"
                    );
                }
            }
        } else {
            tracing::debug!(url = key, "store directory cache miss");
        }

        let body = self.get_text(&url).await?;
        let stores = parse_store_directory(&body)?;

        if let Err(e) = self.cache.put(key, &body) {
            tracing::warn!(url = key, error = %e, "failed to cache store directory");
        }

        Ok(stores)
    }

    /// Fetches one store's availability options for `code`. Uncached.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] on transport failure.
    /// - [`ClientError::MalformedAvailability`] if the body has an unexpected shape.
    pub async fn fetch_availability(
        &self,
        store_id: &str,
        code: &str,
    ) -> Result<Vec<AvailabilityOption>, ClientError> {
        let url = self.availability_url(store_id, code)?;
        let body = self.get_text(&url).await?;
        parse_availability(store_id, &body)
    }

    /// Search URL with `searchTerm` appended to the configured base.
    fn search_url(&self, code: &str) -> Result<Url, ClientError> {
        let mut url = parse_endpoint(&self.endpoints.product_search_url)?;
        url.query_pairs_mut().append_pair("searchTerm", code);
        Ok(url)
    }

    /// `{availability_url}/{store_id}?partNumber={code}` with the store ID as a
    /// single escaped path segment.
    fn availability_url(&self, store_id: &str, code: &str) -> Result<Url, ClientError> {
        let base = &self.endpoints.availability_url;
        let mut url = parse_endpoint(base)?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl {
                url: base.clone(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push(store_id);
        url.query_pairs_mut().append_pair("partNumber", code);
        Ok(url)
    }

    /// Sends a GET, requires a 2xx status, and returns the body text.
    async fn get_text(&self, url: &Url) -> Result<String, ClientError> {
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ClientError> {
    Url::parse(raw).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
