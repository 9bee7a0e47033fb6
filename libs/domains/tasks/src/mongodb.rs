//! MongoDB implementation of TaskRepository

use async_trait::async_trait;
use axum_helpers::UserId;
use chrono::Utc;
use database::mongodb::is_duplicate_key_error;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Binary, Bson, Document, doc, spec::BinarySubtype, to_bson},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::TaskRepository;

pub const DEFAULT_COLLECTION: &str = "tasks";

/// Tasks collection keyed by `_id`, owner stored in `user`.
///
/// ```ignore
/// let db = client.database("tasks");
/// let repo = MongoTaskRepository::new(db, DEFAULT_COLLECTION);
/// repo.ensure_indexes().await?;
/// ```
#[derive(Clone)]
pub struct MongoTaskRepository {
    collection: Collection<Task>,
}

impl MongoTaskRepository {
    pub fn new(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Task>(collection_name),
        }
    }

    pub fn collection(&self) -> &Collection<Task> {
        &self.collection
    }

    /// Create the per-owner unique name index and the listing index.
    ///
    /// Idempotent; run once at startup.
    pub async fn ensure_indexes(&self) -> TaskResult<()> {
        let unique_name = IndexModel::builder()
            .keys(doc! { "user": 1, "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_name_unique".to_string())
                    .build(),
            )
            .build();
        let by_owner = IndexModel::builder()
            .keys(doc! { "user": 1, "_id": -1 })
            .options(IndexOptions::builder().name("user_id_desc".to_string()).build())
            .build();

        self.collection
            .create_indexes([unique_name, by_owner])
            .await?;

        tracing::info!(collection = %self.collection.name(), "Task indexes ensured");
        Ok(())
    }

    fn owner_filter(owner: &UserId) -> Document {
        doc! { "user": owner.as_str() }
    }

    /// `_id` in stored form. Documents are written through the raw (binary)
    /// serializer, which encodes a `Uuid` as 16 generic-subtype bytes.
    fn id_bson(id: Uuid) -> Bson {
        Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: id.as_bytes().to_vec(),
        })
    }

    fn owned_task_filter(owner: &UserId, id: Uuid) -> Document {
        doc! { "_id": Self::id_bson(id), "user": owner.as_str() }
    }

    /// `$set` document for a patch; always bumps `updated_at`.
    fn update_document(input: &UpdateTask) -> TaskResult<Document> {
        let mut set = Document::new();

        if let Some(ref name) = input.name {
            set.insert("name", name.as_str());
        }
        if let Some(ref description) = input.description {
            set.insert("description", description.as_deref());
        }
        if let Some(completed) = input.completed {
            set.insert("completed", completed);
        }
        set.insert(
            "updated_at",
            to_bson(&Utc::now()).map_err(|e| TaskError::Internal(e.to_string()))?,
        );

        Ok(doc! { "$set": set })
    }
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
    #[instrument(skip(self, input), fields(user_id = %owner, task_name = %input.name))]
    async fn create(&self, owner: &UserId, input: CreateTask) -> TaskResult<Task> {
        let task = Task::new(owner.clone(), input);

        match self.collection.insert_one(&task).await {
            Ok(_) => {}
            Err(e) if is_duplicate_key_error(&e) => return Err(TaskError::DuplicateName(task.name)),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(task_id = %task.id, "Task created");
        Ok(task)
    }

    #[instrument(skip(self), fields(user_id = %owner))]
    async fn find_by_owner(&self, owner: &UserId) -> TaskResult<Vec<Task>> {
        let cursor = self
            .collection
            .find(Self::owner_filter(owner))
            .sort(doc! { "_id": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self), fields(user_id = %owner, task_id = %id))]
    async fn find_one(&self, owner: &UserId, id: Uuid) -> TaskResult<Option<Task>> {
        Ok(self
            .collection
            .find_one(Self::owned_task_filter(owner, id))
            .await?)
    }

    #[instrument(skip(self), fields(user_id = %owner))]
    async fn exists_by_name(&self, owner: &UserId, name: &str) -> TaskResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "user": owner.as_str(), "name": name })
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, input), fields(user_id = %owner, task_id = %id))]
    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        input: UpdateTask,
    ) -> TaskResult<Option<Task>> {
        let result = self
            .collection
            .find_one_and_update(
                Self::owned_task_filter(owner, id),
                Self::update_document(&input)?,
            )
            .return_document(ReturnDocument::After)
            .await;

        match result {
            Ok(task) => {
                if task.is_some() {
                    tracing::info!("Task updated");
                }
                Ok(task)
            }
            Err(e) if is_duplicate_key_error(&e) => Err(TaskError::DuplicateName(
                input.name.unwrap_or_default(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), fields(user_id = %owner, task_id = %id))]
    async fn delete(&self, owner: &UserId, id: Uuid) -> TaskResult<bool> {
        let deleted = self
            .collection
            .find_one_and_delete(Self::owned_task_filter(owner, id))
            .await?;

        if deleted.is_some() {
            tracing::info!("Task deleted");
        }
        Ok(deleted.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task(owner: &UserId) -> Task {
        Task::new(
            owner.clone(),
            CreateTask {
                name: "buy milk".to_string(),
                description: None,
                completed: false,
            },
        )
    }

    #[test]
    fn test_owned_task_filter_matches_stored_document() {
        let owner = UserId::new("alice");
        let task = sample_task(&owner);

        // Same path insert_one takes
        let stored = mongodb::bson::to_raw_document_buf(&task)
            .unwrap()
            .to_document()
            .unwrap();
        let filter = MongoTaskRepository::owned_task_filter(&owner, task.id);

        assert_eq!(filter.get("_id"), stored.get("_id"));
        assert_eq!(filter.get("user"), stored.get("user"));
    }

    #[test]
    fn test_owned_task_filter_scopes_by_owner() {
        let id = Uuid::now_v7();
        let filter = MongoTaskRepository::owned_task_filter(&UserId::new("alice"), id);

        assert_eq!(filter.get_str("user").unwrap(), "alice");
        assert_eq!(
            filter.get_binary_generic("_id").unwrap().as_slice(),
            id.as_bytes()
        );
    }

    #[test]
    fn test_stored_document_reads_back_as_task() {
        let task = sample_task(&UserId::new("alice"));
        let raw = mongodb::bson::to_raw_document_buf(&task).unwrap();

        let decoded: Task = mongodb::bson::from_slice(raw.as_bytes()).unwrap();
        assert_eq!(decoded.id, task.id);
        assert_eq!(decoded.owner, task.owner);
    }

    #[test]
    fn test_update_document_only_sets_present_fields() {
        let update = UpdateTask {
            completed: Some(true),
            ..Default::default()
        };
        let doc = MongoTaskRepository::update_document(&update).unwrap();
        let set = doc.get_document("$set").unwrap();

        assert!(set.get_bool("completed").unwrap());
        assert!(set.contains_key("updated_at"));
        assert!(!set.contains_key("name"));
        assert!(!set.contains_key("description"));
    }

    #[test]
    fn test_update_document_null_description_clears() {
        let clear = UpdateTask {
            description: Some(None),
            ..Default::default()
        };
        let doc = MongoTaskRepository::update_document(&clear).unwrap();
        let set = doc.get_document("$set").unwrap();
        assert_eq!(set.get("description"), Some(&Bson::Null));

        let rewrite = UpdateTask {
            description: Some(Some("2 litres".to_string())),
            ..Default::default()
        };
        let doc = MongoTaskRepository::update_document(&rewrite).unwrap();
        let set = doc.get_document("$set").unwrap();
        assert_eq!(set.get_str("description").unwrap(), "2 litres");
    }

    #[tokio::test]
    #[ignore] // Requires a running MongoDB
    async fn test_mongo_owner_scoping() {
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let repo = MongoTaskRepository::new(client.database("tasks_test"), "tasks_owner_scoping");
        repo.collection().drop().await.unwrap();
        repo.ensure_indexes().await.unwrap();

        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        let input = CreateTask {
            name: "buy milk".to_string(),
            description: None,
            completed: false,
        };

        let task = repo.create(&alice, input.clone()).await.unwrap();

        let found = repo.find_one(&alice, task.id).await.unwrap().unwrap();
        assert_eq!(found.id, task.id);
        assert_eq!(found.name, "buy milk");
        assert!(repo.find_one(&bob, task.id).await.unwrap().is_none());

        let updated = repo
            .update(
                &alice,
                task.id,
                UpdateTask {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, task.id);
        assert!(updated.completed);
        assert!(
            repo.update(&bob, task.id, UpdateTask::default())
                .await
                .unwrap()
                .is_none()
        );

        let listed = repo.find_by_owner(&alice).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, task.id);

        assert!(matches!(
            repo.create(&alice, input.clone()).await,
            Err(TaskError::DuplicateName(_))
        ));
        assert!(repo.create(&bob, input).await.is_ok());
        assert!(!repo.delete(&bob, task.id).await.unwrap());
        assert!(repo.delete(&alice, task.id).await.unwrap());
    }
}
