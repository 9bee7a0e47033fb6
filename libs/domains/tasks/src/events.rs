//! Task change notifications pushed to a user's live connections.

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Task;

/// A committed task change.
///
/// Carries no identity: events are routed through the owner's connections.
///
/// ```json
/// {"event": "task:added", "data": {"_id": "...", "name": "buy milk", ...}}
/// {"event": "task:deleted", "data": {"id": "..."}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr, ToSchema)]
#[serde(tag = "event", content = "data")]
pub enum TaskEvent {
    #[serde(rename = "task:added")]
    #[strum(serialize = "task:added")]
    Added(Task),

    #[serde(rename = "task:updated")]
    #[strum(serialize = "task:updated")]
    Updated(Task),

    #[serde(rename = "task:deleted")]
    #[strum(serialize = "task:deleted")]
    Deleted { id: Uuid },
}

impl TaskEvent {
    /// Wire name of the event
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    pub fn task_id(&self) -> Uuid {
        match self {
            TaskEvent::Added(task) | TaskEvent::Updated(task) => task.id,
            TaskEvent::Deleted { id } => *id,
        }
    }
}
