mod app_config;
mod config;
pub mod region;
pub mod stock;

pub use app_config::{AppConfig, Endpoints};
pub use config::{load_app_config, load_app_config_from_env};
pub use region::{filter_stores, Region, RegionFilter, RegionParseError};
pub use stock::{
    find_product, in_store_quantities, AvailabilityOption, OptionKind, ProductQuery,
    ProductRecord, StoreRecord,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
