use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Maximum accepted title length, in characters.
pub const TITLE_MAX_LEN: usize = 255;

/// Task entity - a single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier, assigned by the store on creation and immutable
    /// thereafter
    pub id: i64,
    /// Short description of the work to do, never blank
    pub title: String,
    /// Whether the task has been completed
    pub done: bool,
}

/// DTO for creating a new task
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
}

/// DTO for partially updating an existing task.
///
/// A `None` field (absent from the JSON body, or an explicit `null`) means
/// "leave unchanged" - only supplied fields overwrite the stored record.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    #[validate(length(max = 255))]
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

impl Task {
    /// Apply a field-level merge from an UpdateTask DTO.
    ///
    /// Unsupplied fields keep their current values; the id is never touched.
    pub fn apply_update(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(done) = update.done {
            self.done = done;
        }
    }
}
