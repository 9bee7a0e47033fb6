//! API routes module

pub mod health;

use axum::Router;
use domain_tasks::{handlers, realtime};

use crate::state::AppState;

/// Create all versioned REST routes.
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new().nest(
        "/v1/tasks",
        handlers::router(state.tasks.clone(), state.verifier.clone()),
    )
}

/// WebSocket upgrade route at `/api/v1/ws`.
///
/// Merged after `create_router` so the compression and trace layers never
/// wrap the upgraded connection.
pub fn ws_router(state: &AppState) -> Router {
    Router::new().nest("/api/v1/ws", realtime::ws::router(state.realtime()))
}

pub use health::ready_router;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::{JwtAuth, JwtConfig, SharedVerifier, ShutdownCoordinator};
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use domain_tasks::{ConnectionRegistry, MongoTaskRepository, NotificationFanout, TaskService};
    use mongodb::{Client, options::ClientOptions};
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &str = "tasks-api-routing-secret-32-characters";

    // The client never dials out unless a request reaches the store
    async fn state() -> AppState {
        let mongodb = MongoConfig::new("mongodb://localhost:27017", "tasks_test");
        let options = ClientOptions::parse(mongodb.url()).await.unwrap();
        let mongo_client = Client::with_options(options).unwrap();
        let db = mongo_client.database(mongodb.database());
        let jwt = JwtConfig::new(SECRET);
        let registry = Arc::new(ConnectionRegistry::new());
        let fanout = Arc::new(NotificationFanout::new(registry.clone()));
        let repository = MongoTaskRepository::new(db.clone(), "tasks");

        AppState {
            config: Config {
                app: app_info!(),
                mongodb,
                tasks_collection: "tasks".to_string(),
                jwt: jwt.clone(),
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            mongo_client,
            db,
            tasks: Arc::new(TaskService::new(repository, fanout)),
            registry,
            verifier: Arc::new(JwtAuth::new(&jwt)) as SharedVerifier,
            shutdown: ShutdownCoordinator::new(),
        }
    }

    #[tokio::test]
    async fn test_task_routes_require_credential() {
        let app = routes(&state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/tasks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_ws_route_rejects_plain_get() {
        let app = ws_router(&state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/ws")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Not an upgrade request
        assert!(response.status().is_client_error());
    }
}
