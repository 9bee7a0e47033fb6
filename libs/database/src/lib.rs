//! Database connectors and utilities.
//!
//! MongoDB is the only backend. Connections are configured through
//! [`mongodb::MongoConfig`], established with retry/backoff, and probed by
//! the readiness endpoint.
//!
//! # Features
//!
//! - `config` (default) - `core_config::FromEnv` for [`mongodb::MongoConfig`]
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};
