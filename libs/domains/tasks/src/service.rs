use axum_helpers::UserId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Weak};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::events::TaskEvent;
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::TaskRepository;

/// Receives every committed task change.
///
/// Invoked synchronously after the store write. Failures are logged by the
/// service and never reach the caller of the mutation.
pub trait PostCommitHook: Send + Sync {
    fn after_commit(&self, owner: &UserId, event: TaskEvent) -> eyre::Result<()>;
}

/// Hook that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl PostCommitHook for NoopHook {
    fn after_commit(&self, _owner: &UserId, _event: TaskEvent) -> eyre::Result<()> {
        Ok(())
    }
}

/// One async mutex per task id with a live mutation.
///
/// Entries are weak, so ids nobody is mutating cost nothing beyond a dead
/// slot that the next insert prunes.
#[derive(Default)]
struct TaskLocks {
    locks: Mutex<HashMap<Uuid, Weak<tokio::sync::Mutex<()>>>>,
}

impl TaskLocks {
    fn lock_for(&self, id: Uuid) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock();

        if let Some(lock) = locks.get(&id).and_then(Weak::upgrade) {
            return lock;
        }

        locks.retain(|_, lock| lock.strong_count() > 0);
        let lock = Arc::new(tokio::sync::Mutex::new(()));
        locks.insert(id, Arc::downgrade(&lock));
        lock
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.lock().len()
    }
}

/// Owner-scoped task operations with post-commit notification.
///
/// Update and delete of one task id are serialized from the store write
/// through the hook call, so hook calls for a task follow commit order.
/// Different tasks never share a lock.
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
    hook: Arc<dyn PostCommitHook>,
    locks: TaskLocks,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R, hook: Arc<dyn PostCommitHook>) -> Self {
        Self {
            repository: Arc::new(repository),
            hook,
            locks: TaskLocks::default(),
        }
    }

    /// Service whose mutations notify nobody
    pub fn without_notifications(repository: R) -> Self {
        Self::new(repository, Arc::new(NoopHook))
    }

    #[instrument(skip(self), fields(user_id = %owner))]
    pub async fn list_tasks(&self, owner: &UserId) -> TaskResult<Vec<Task>> {
        self.repository.find_by_owner(owner).await
    }

    #[instrument(skip(self), fields(user_id = %owner, task_id = %id))]
    pub async fn get_task(&self, owner: &UserId, id: Uuid) -> TaskResult<Task> {
        self.repository
            .find_one(owner, id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(user_id = %owner, task_name = %input.name))]
    pub async fn create_task(&self, owner: &UserId, input: CreateTask) -> TaskResult<Task> {
        input.validate()?;

        if self.repository.exists_by_name(owner, &input.name).await? {
            return Err(TaskError::DuplicateName(input.name));
        }

        let task = self.repository.create(owner, input).await?;
        self.notify(owner, TaskEvent::Added(task.clone()));

        Ok(task)
    }

    #[instrument(skip(self, input), fields(user_id = %owner, task_id = %id))]
    pub async fn update_task(
        &self,
        owner: &UserId,
        id: Uuid,
        input: UpdateTask,
    ) -> TaskResult<Task> {
        input.validate()?;

        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        let task = self
            .repository
            .update(owner, id, input)
            .await?
            .ok_or(TaskError::NotFound(id))?;
        self.notify(owner, TaskEvent::Updated(task.clone()));

        Ok(task)
    }

    #[instrument(skip(self), fields(user_id = %owner, task_id = %id))]
    pub async fn delete_task(&self, owner: &UserId, id: Uuid) -> TaskResult<()> {
        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        if !self.repository.delete(owner, id).await? {
            return Err(TaskError::NotFound(id));
        }
        self.notify(owner, TaskEvent::Deleted { id });

        Ok(())
    }

    /// Hand `event` to the hook. Errors and panics stop here.
    fn notify(&self, owner: &UserId, event: TaskEvent) {
        let kind = event.kind();
        let task_id = event.task_id();

        match catch_unwind(AssertUnwindSafe(|| self.hook.after_commit(owner, event))) {
            Ok(Ok(())) => tracing::debug!(event = kind, %task_id, "Post-commit hook done"),
            Ok(Err(e)) => {
                tracing::warn!(event = kind, %task_id, error = ?e, "Post-commit hook failed")
            }
            Err(_) => tracing::error!(event = kind, %task_id, "Post-commit hook panicked"),
        }
    }
}
