use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::Task;

/// Repository trait for Task persistence.
///
/// This trait defines the data access interface for tasks and owns
/// identifier allocation. Implementations can use different storage
/// backends (in-memory, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Store a new task under a freshly allocated id and return it.
    ///
    /// Ids are monotonically increasing and never reused, even after the
    /// task they belonged to is deleted. Concurrent inserts never receive
    /// the same id.
    async fn insert(&self, title: String, done: bool) -> TaskResult<Task>;

    /// Get all tasks in ascending id order
    async fn find_all(&self) -> TaskResult<Vec<Task>>;

    /// Get a task by id
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// Check whether a task with the given id exists
    async fn exists_by_id(&self, id: i64) -> TaskResult<bool>;

    /// Replace the stored record at `task.id` and return the saved task.
    ///
    /// Fails with a not-found error if no task with that id exists; callers
    /// are expected to have fetched the record first.
    async fn save(&self, task: Task) -> TaskResult<Task>;

    /// Remove the task with the given id. A no-op if it does not exist;
    /// reporting "already absent" to callers is the service layer's job.
    async fn delete_by_id(&self, id: i64) -> TaskResult<()>;
}
