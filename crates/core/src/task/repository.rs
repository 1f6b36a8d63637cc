//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Task, TaskPatch};
use crate::Result;

/// Repository interface for task CRUD operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task. Fails with `Error::DuplicateName` when another
    /// task already carries the same name.
    async fn create(&self, task: Task) -> Result<Task>;

    /// Get a task by ID
    async fn get(&self, id: Uuid) -> Result<Option<Task>>;

    /// Get all tasks in storage order
    async fn list(&self) -> Result<Vec<Task>>;

    /// Apply a partial update to an existing task. A rename is checked
    /// against the name uniqueness rule before anything is written.
    async fn update(&self, id: Uuid, patch: TaskPatch) -> Result<Task>;

    /// Delete a task by ID, returning whether a record was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Find a task by its exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Task>>;
}
