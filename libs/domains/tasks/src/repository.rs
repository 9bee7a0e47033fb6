use async_trait::async_trait;
use axum_helpers::UserId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask};

/// Owner-scoped task persistence.
///
/// Every read and write is filtered by the owner as well as the id, inside
/// the same store operation, so a task owned by someone else behaves exactly
/// like a missing one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task owned by `owner`.
    ///
    /// Fails with [`TaskError::DuplicateName`] when the owner already has a
    /// task with that name.
    async fn create(&self, owner: &UserId, input: CreateTask) -> TaskResult<Task>;

    /// All tasks owned by `owner`, newest first
    async fn find_by_owner(&self, owner: &UserId) -> TaskResult<Vec<Task>>;

    async fn find_one(&self, owner: &UserId, id: Uuid) -> TaskResult<Option<Task>>;

    async fn exists_by_name(&self, owner: &UserId, name: &str) -> TaskResult<bool>;

    /// Atomically apply `input` to the owned task and return the result.
    ///
    /// `Ok(None)` when no such owned task exists.
    async fn update(&self, owner: &UserId, id: Uuid, input: UpdateTask)
    -> TaskResult<Option<Task>>;

    /// Atomically remove the owned task. `Ok(false)` when none matched.
    async fn delete(&self, owner: &UserId, id: Uuid) -> TaskResult<bool>;
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(tasks: &HashMap<Uuid, Task>, owner: &UserId, name: &str, except: Option<Uuid>) -> bool {
    tasks
        .values()
        .any(|t| &t.owner == owner && t.name == name && Some(t.id) != except)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, owner: &UserId, input: CreateTask) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;

        if name_taken(&tasks, owner, &input.name, None) {
            return Err(TaskError::DuplicateName(input.name));
        }

        let task = Task::new(owner.clone(), input);
        tasks.insert(task.id, task.clone());

        tracing::info!(task_id = %task.id, user_id = %owner, "Created task");
        Ok(task)
    }

    async fn find_by_owner(&self, owner: &UserId) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;

        let mut result: Vec<Task> = tasks
            .values()
            .filter(|t| &t.owner == owner)
            .cloned()
            .collect();

        // Ids are time-ordered, so they break created_at ties
        result.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(result)
    }

    async fn find_one(&self, owner: &UserId, id: Uuid) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).filter(|t| &t.owner == owner).cloned())
    }

    async fn exists_by_name(&self, owner: &UserId, name: &str) -> TaskResult<bool> {
        let tasks = self.tasks.read().await;
        Ok(name_taken(&tasks, owner, name, None))
    }

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        input: UpdateTask,
    ) -> TaskResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;

        if !tasks.get(&id).is_some_and(|t| &t.owner == owner) {
            return Ok(None);
        }

        if let Some(ref new_name) = input.name
            && name_taken(&tasks, owner, new_name, Some(id))
        {
            return Err(TaskError::DuplicateName(new_name.clone()));
        }

        let Some(task) = tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.apply_update(input);

        tracing::info!(task_id = %id, user_id = %owner, "Updated task");
        Ok(Some(task.clone()))
    }

    async fn delete(&self, owner: &UserId, id: Uuid) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().await;

        if !tasks.get(&id).is_some_and(|t| &t.owner == owner) {
            return Ok(false);
        }

        tasks.remove(&id);
        tracing::info!(task_id = %id, user_id = %owner, "Deleted task");
        Ok(true)
    }
}
