//! Shared domain types and configuration for the trip itinerary planner.

pub mod app_config;
pub mod config;
pub mod itinerary;
pub mod models;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{default_max_concurrency, load_app_config, load_app_config_from_env};
pub use itinerary::{load_itinerary, ItineraryColumns};
pub use models::{Coordinate, ItineraryEntry};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read itinerary file {path}: {source}")]
    ItineraryFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse itinerary file {path}: {reason}")]
    ItineraryFileParse { path: String, reason: String },

    #[error("validation error: {0}")]
    Validation(String),
}
