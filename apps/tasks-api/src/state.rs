//! Application state management.
//!
//! The state contains:
//! - Configuration
//! - MongoDB client and database
//! - The task service and the live connection registry it notifies

use axum_helpers::{SharedVerifier, ShutdownCoordinator};
use domain_tasks::{ConnectionRegistry, MongoTaskRepository, RealtimeState, TaskService};
use mongodb::{Client, Database};
use std::sync::Arc;

/// Shared application state.
///
/// Cloned into every router that needs it; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
    pub tasks: Arc<TaskService<MongoTaskRepository>>,
    /// Live WebSocket connections keyed by identity
    pub registry: Arc<ConnectionRegistry>,
    pub verifier: SharedVerifier,
    pub shutdown: ShutdownCoordinator,
}

impl AppState {
    pub fn realtime(&self) -> RealtimeState {
        RealtimeState {
            registry: self.registry.clone(),
            verifier: self.verifier.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}
