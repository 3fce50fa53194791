pub mod cache;
pub mod client;
pub mod error;
pub mod parse;
pub mod types;

pub use cache::{CachedEntry, FileCache, MemoryCache, NoCache, ResponseCache, CACHE_NAMESPACE};
pub use client::OfficeworksClient;
pub use error::{CacheError, ClientError};
