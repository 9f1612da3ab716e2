//! Task Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, TITLE_MAX_LEN, Task, UpdateTask};
use crate::repository::TaskRepository;

/// Task service providing the validation and merge policy on top of the
/// repository.
///
/// The service holds no mutable state of its own; the repository handle is
/// the only state it touches, so clones can be shared freely across
/// concurrent request handlers.
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Create a new TaskService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task. New tasks always start with `done = false`.
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        validate_title(&input.title)?;

        self.repository.insert(input.title, false).await
    }

    /// Get all tasks in ascending id order
    #[instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.find_all().await
    }

    /// Get a task by id. Absence is a valid outcome, not an error.
    #[instrument(skip(self))]
    pub async fn get_task_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        self.repository.find_by_id(id).await
    }

    /// Update a task with a field-level merge: supplied fields overwrite,
    /// unsupplied fields keep their stored values.
    ///
    /// The merged title is re-validated even when the request leaves it
    /// unchanged, so a store holding an invalid legacy record cannot be
    /// re-saved through this path. The save happens unconditionally, also
    /// for requests that supply no fields.
    #[instrument(skip(self, input))]
    pub async fn update_task(&self, id: i64, input: UpdateTask) -> TaskResult<Task> {
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        task.apply_update(input);
        validate_title(&task.title)?;

        // A delete racing this update makes `save` report the id as gone;
        // that surfaces as NotFound like any other missing id.
        self.repository.save(task).await
    }

    /// Delete a task. Returns `false` when no task with that id exists,
    /// `true` when the task existed and was removed.
    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: i64) -> TaskResult<bool> {
        if !self.repository.exists_by_id(id).await? {
            return Ok(false);
        }

        self.repository.delete_by_id(id).await?;
        Ok(true)
    }
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// Validate a task title: rejected when blank after trimming or longer
/// than [`TITLE_MAX_LEN`] characters.
fn validate_title(title: &str) -> TaskResult<()> {
    if title.trim().is_empty() {
        return Err(TaskError::Validation("Title cannot be blank".to_string()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(TaskError::Validation(format!(
            "Title must be at most {} characters",
            TITLE_MAX_LEN
        )));
    }
    Ok(())
}
