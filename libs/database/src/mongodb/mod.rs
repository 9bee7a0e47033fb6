//! MongoDB connector and helpers

mod config;
mod connector;
mod errors;
mod health;

pub use config::MongoConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use errors::{DUPLICATE_KEY_CODE, is_duplicate_key_error};
pub use health::{HealthStatus, check_health, check_health_detailed, ping};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
