use axum_helpers::{
    JwtAuth, SharedVerifier, ShutdownCoordinator, create_production_app, health_router,
};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_tasks::{ConnectionRegistry, MongoTaskRepository, NotificationFanout, TaskService};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let repository = MongoTaskRepository::new(db.clone(), &config.tasks_collection);
    repository.ensure_indexes().await?;

    let registry = Arc::new(ConnectionRegistry::new());
    let fanout = Arc::new(NotificationFanout::new(registry.clone()));
    let verifier: SharedVerifier = Arc::new(JwtAuth::new(&config.jwt));
    let shutdown = ShutdownCoordinator::new();

    let state = AppState {
        config,
        mongo_client,
        db,
        tasks: Arc::new(TaskService::new(repository, fanout)),
        registry,
        verifier,
        shutdown: shutdown.clone(),
    };

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()))
        .merge(api::ws_router(&state));

    info!("Starting Tasks API with graceful shutdown (30s timeout)");

    let registry = state.registry.clone();
    let mongo_client = state.mongo_client.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        shutdown,
        async move {
            info!(
                connections = registry.connection_count(),
                "Shutting down: closing WebSocket sessions and MongoDB connections"
            );
            mongo_client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Tasks API shutdown complete");
    Ok(())
}
