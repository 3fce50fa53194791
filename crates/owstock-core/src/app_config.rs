use std::path::PathBuf;

pub const DEFAULT_PRODUCT_SEARCH_URL: &str = "https://www.officeworks.com.au/shop/ProductSearchView?pageSize=50&langId=-1&catalogId=-1&storeId=10151";
pub const DEFAULT_STORES_URL: &str =
    "https://www.officeworks.com.au/contact-us?view=stores&format=json";
pub const DEFAULT_AVAILABILITY_URL: &str = "https://api.officeworks.com.au/v2/availability/store";

/// Base URLs for the three upstream endpoints.
///
/// Production runs use [`Endpoints::default`]; tests point every field at a
/// mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Product search base URL. The `searchTerm` parameter is appended per request.
    pub product_search_url: String,
    /// Full store directory URL. Requested verbatim.
    pub stores_url: String,
    /// Availability base URL. `/{store_id}?partNumber={code}` is appended per request.
    pub availability_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            product_search_url: DEFAULT_PRODUCT_SEARCH_URL.to_string(),
            stores_url: DEFAULT_STORES_URL.to_string(),
            availability_url: DEFAULT_AVAILABILITY_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Parent directory of the on-disk response cache.
    pub cache_dir: PathBuf,
    pub cache_ttl_days: u32,
    /// `None` leaves the HTTP client without a request timeout.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub max_concurrent_probes: usize,
    pub endpoints: Endpoints,
}
