//! Tasks Domain
//!
//! Owner-scoped task management with real-time change notifications.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐      ┌──────────────────────┐
//! │  Handlers   │      │  realtime::ws        │  ← HTTP + WebSocket
//! └──────┬──────┘      └──────────┬───────────┘
//!        │                        │ register/deregister
//! ┌──────▼──────┐ hook ┌──────────▼───────────┐
//! │   Service   │─────►│ Fanout ─► Registry   │  ← post-commit notification
//! └──────┬──────┘      └──────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← owner-filtered store (MongoDB / in-memory)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_tasks::{
//!     ConnectionRegistry, MongoTaskRepository, NotificationFanout, TaskService,
//! };
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ConnectionRegistry::new());
//! let repository = MongoTaskRepository::new(db, "tasks");
//! repository.ensure_indexes().await?;
//!
//! let fanout = Arc::new(NotificationFanout::new(registry.clone()));
//! let service = Arc::new(TaskService::new(repository, fanout));
//! let routes = domain_tasks::handlers::router(service, verifier);
//! ```

pub mod error;
pub mod events;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod realtime;
pub mod repository;
pub mod service;

pub use error::{TaskError, TaskResult};
pub use events::TaskEvent;
pub use handlers::ApiDoc;
pub use models::{CreateTask, Task, UpdateTask};
pub use self::mongodb::MongoTaskRepository;
pub use realtime::{
    Connection, ConnectionHandle, ConnectionId, ConnectionRegistry, ConnectionState,
    NotificationFanout, RealtimeState,
};
pub use repository::{InMemoryTaskRepository, TaskRepository};
pub use service::{NoopHook, PostCommitHook, TaskService};
