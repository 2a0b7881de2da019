pub mod aggregator;
pub mod app_config;
pub mod config;
pub mod geo;
pub mod ports;
pub mod presentation;
pub mod shared;
pub mod types;

use thiserror::Error;

pub use aggregator::LotAggregator;
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::distance_meters;
pub use ports::{
    DataSource, FetchError, LocationFeed, LocationProvider, LocationSubscriber, MemoryPreferences,
    PreferenceError, PreferenceStore,
};
pub use presentation::{DetailDisplay, LoadDisplay, LotRow};
pub use shared::{fetch_notice, SharedAggregator};
pub use types::{Coordinates, LotRecord, LotState, ServerNotice, SortMode};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid sort mode: {0}")]
    InvalidSortMode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
