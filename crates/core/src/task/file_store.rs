//! File-based task storage implementation
//!
//! Stores tasks as JSON in a file on disk. The in-memory cache behind a
//! single write lock is also what makes the duplicate-name guard atomic:
//! the existence check and the insert (or rename) happen under one lock.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{Task, TaskPatch};
use super::repository::TaskRepository;
use crate::{Error, Result};

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory cache of tasks
    cache: RwLock<HashMap<Uuid, Task>>,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let tasks: Vec<Task> = serde_json::from_str(&content)?;
            tasks.into_iter().map(|t| (t.id, t)).collect()
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    /// Persist the cache to disk
    async fn persist(&self) -> Result<()> {
        let cache = self.cache.read().await;
        let tasks: Vec<&Task> = cache.values().collect();
        let content = serde_json::to_string_pretty(&tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn create(&self, task: Task) -> Result<Task> {
        {
            let mut cache = self.cache.write().await;
            if cache.values().any(|t| t.name == task.name) {
                return Err(Error::DuplicateName(task.name));
            }
            cache.insert(task.id, task.clone());
        }
        self.persist().await?;
        Ok(task)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>> {
        let cache = self.cache.read().await;
        Ok(cache.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let cache = self.cache.read().await;
        let mut tasks: Vec<Task> = cache.values().cloned().collect();
        // Storage order: oldest first
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(tasks)
    }

    async fn update(&self, id: Uuid, patch: TaskPatch) -> Result<Task> {
        let updated = {
            let mut cache = self.cache.write().await;
            let mut task = cache
                .get(&id)
                .cloned()
                .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

            // Rename guard: only when the name actually changes
            if let Some(new_name) = &patch.name {
                if *new_name != task.name
                    && cache.values().any(|t| t.name == *new_name)
                {
                    return Err(Error::DuplicateName(new_name.clone()));
                }
            }

            patch.apply(&mut task);
            task.updated_at = Utc::now();
            cache.insert(task.id, task.clone());
            task
        };
        self.persist().await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let removed = {
            let mut cache = self.cache.write().await;
            cache.remove(&id).is_some()
        };
        if removed {
            self.persist().await?;
        }
        Ok(removed)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Task>> {
        let cache = self.cache.read().await;
        Ok(cache.values().find(|t| t.name == name).cloned())
    }
}
