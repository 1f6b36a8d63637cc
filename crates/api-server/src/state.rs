//! Application state

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tr_core::task::FileTaskStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_store: FileTaskStore,
    data_dir: PathBuf,
}

impl AppState {
    /// Create a new AppState with the given data directory
    pub async fn new(data_dir: PathBuf) -> tr_core::Result<Self> {
        let tasks_path = data_dir.join("tasks.json");
        let task_store = FileTaskStore::new(tasks_path).await?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                task_store,
                data_dir,
            }),
        })
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &FileTaskStore {
        &self.inner.task_store
    }

    /// Get the data directory
    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }
}
