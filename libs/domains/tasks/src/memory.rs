//! In-memory implementation of TaskRepository

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::Task;
use crate::repository::TaskRepository;

/// Thread-safe in-memory implementation of the TaskRepository.
///
/// Records live in a `BTreeMap` keyed by id, so `find_all` iterates in
/// ascending id order. Ids come from an atomic counter: allocation is
/// linearizable, monotonically increasing, and an id is never handed out
/// twice, even after the task it belonged to is deleted.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    records: RwLock<BTreeMap<i64, Task>>,
    next_id: AtomicI64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository. The first allocated id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskResult<RwLockReadGuard<'_, BTreeMap<i64, Task>>> {
        self.records
            .read()
            .map_err(|e| TaskError::Store(e.to_string()))
    }

    fn write(&self) -> TaskResult<RwLockWriteGuard<'_, BTreeMap<i64, Task>>> {
        self.records
            .write()
            .map_err(|e| TaskError::Store(e.to_string()))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    #[instrument(skip(self, title))]
    async fn insert(&self, title: String, done: bool) -> TaskResult<Task> {
        // fetch_add is an atomic read-modify-write, so concurrent inserts
        // can never observe the same counter value.
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let task = Task { id, title, done };

        self.write()?.insert(id, task.clone());

        tracing::info!(task_id = %id, "Task created successfully");
        Ok(task)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        Ok(self.read()?.values().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        Ok(self.read()?.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn exists_by_id(&self, id: i64) -> TaskResult<bool> {
        Ok(self.read()?.contains_key(&id))
    }

    #[instrument(skip(self, task))]
    async fn save(&self, task: Task) -> TaskResult<Task> {
        let mut records = self.write()?;

        if !records.contains_key(&task.id) {
            return Err(TaskError::NotFound(task.id));
        }
        records.insert(task.id, task.clone());

        tracing::info!(task_id = %task.id, "Task updated successfully");
        Ok(task)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i64) -> TaskResult<()> {
        if self.write()?.remove(&id).is_some() {
            tracing::info!(task_id = %id, "Task deleted successfully");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_insert_allocates_sequential_ids_from_one() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.insert("first".to_string(), false).await.unwrap();
        let second = repo.insert("second".to_string(), true).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.title, "first");
        assert!(!first.done);
        assert!(second.done);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.insert("a".to_string(), false).await.unwrap();
        repo.delete_by_id(first.id).await.unwrap();
        let second = repo.insert("b".to_string(), false).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(repo.find_by_id(first.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_all_returns_ascending_id_order() {
        let repo = InMemoryTaskRepository::new();

        for title in ["a", "b", "c"] {
            repo.insert(title.to_string(), false).await.unwrap();
        }
        repo.delete_by_id(2).await.unwrap();
        repo.insert("d".to_string(), false).await.unwrap();

        let ids: Vec<i64> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn test_save_replaces_existing_record() {
        let repo = InMemoryTaskRepository::new();
        let mut task = repo.insert("before".to_string(), false).await.unwrap();

        task.title = "after".to_string();
        task.done = true;
        let saved = repo.save(task.clone()).await.unwrap();

        assert_eq!(saved, task);
        assert_eq!(repo.find_by_id(task.id).await.unwrap(), Some(task));
    }

    #[tokio::test]
    async fn test_save_unknown_id_is_not_found() {
        let repo = InMemoryTaskRepository::new();
        let task = Task {
            id: 99,
            title: "ghost".to_string(),
            done: false,
        };

        let err = repo.save(task).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(99)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_at_store_level() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.insert("a".to_string(), false).await.unwrap();

        repo.delete_by_id(task.id).await.unwrap();
        // Second delete of the same id is a no-op, not an error.
        repo.delete_by_id(task.id).await.unwrap();
        assert!(!repo.exists_by_id(task.id).await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_inserts_never_collide() {
        let repo = Arc::new(InMemoryTaskRepository::new());

        let mut handles = Vec::new();
        for worker in 0..16 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let mut ids = Vec::new();
                for i in 0..25 {
                    let task = repo
                        .insert(format!("task {}-{}", worker, i), false)
                        .await
                        .unwrap();
                    ids.push(task.id);
                }
                ids
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.await.unwrap() {
                assert!(id > 0);
                assert!(seen.insert(id), "id {} was allocated twice", id);
            }
        }
        assert_eq!(seen.len(), 16 * 25);
    }
}
