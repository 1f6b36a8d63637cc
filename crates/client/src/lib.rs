//! Typed REST client for the Task Registry API
//!
//! The thin HTTP client the UI layer consumes: a base URL, JSON content
//! type, and the `{statusCode, message, data}` envelope unwrapped into
//! typed results.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

pub use tr_core::task::TaskPriority;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error envelope
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("response envelope carried no data")]
    EmptyEnvelope,
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// A task as returned by the API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: TaskPriority,
    pub category: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload; omitted fields take server defaults
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTask {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

/// Partial update payload.
///
/// Omitted fields (`None`) are not serialized and keep their stored value;
/// `Some(None)` serializes as an explicit `null` and clears a nullable
/// field on the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
struct Envelope<T> {
    status_code: u16,
    message: String,
    #[serde(default)]
    data: Option<T>,
}

/// Client for the task registry REST API
#[derive(Debug, Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    base_url: String,
}

impl TaskClient {
    /// Create a new client against the given base URL (e.g. `http://localhost:8080`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /api/tasks
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let url = self.url("/api/tasks");
        debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        unwrap_envelope(response).await
    }

    /// GET /api/tasks/{id}
    pub async fn get_task(&self, id: Uuid) -> Result<Task> {
        let url = self.url(&format!("/api/tasks/{id}"));
        debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        unwrap_envelope(response).await
    }

    /// POST /api/tasks
    pub async fn create_task(&self, task: &CreateTask) -> Result<Task> {
        let url = self.url("/api/tasks");
        debug!("POST {url}");
        let response = self.http.post(url).json(task).send().await?;
        unwrap_envelope(response).await
    }

    /// PUT /api/tasks/{id}
    pub async fn update_task(&self, id: Uuid, patch: &UpdateTask) -> Result<Task> {
        let url = self.url(&format!("/api/tasks/{id}"));
        debug!("PUT {url}");
        let response = self.http.put(url).json(patch).send().await?;
        unwrap_envelope(response).await
    }

    /// DELETE /api/tasks/{id} — success is 204 with an empty body
    pub async fn delete_task(&self, id: Uuid) -> Result<()> {
        let url = self.url(&format!("/api/tasks/{id}"));
        debug!("DELETE {url}");
        let response = self.http.delete(url).send().await?;

        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(());
        }
        let envelope: Envelope<serde_json::Value> = response.json().await?;
        Err(ClientError::Api {
            status: envelope.status_code,
            message: envelope.message,
        })
    }
}

async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let success = response.status().is_success();
    let envelope: Envelope<T> = response.json().await?;

    if success {
        envelope.data.ok_or(ClientError::EmptyEnvelope)
    } else {
        Err(ClientError::Api {
            status: envelope.status_code,
            message: envelope.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_task_serializes_null_to_clear() {
        let patch = UpdateTask {
            description: Some(None),
            ..Default::default()
        };
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, json!({"description": null}));
    }

    #[test]
    fn update_task_omits_absent_fields() {
        let body = serde_json::to_value(UpdateTask::default()).unwrap();
        assert_eq!(body, json!({}));

        let patch = UpdateTask {
            completed: Some(false),
            ..Default::default()
        };
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, json!({"completed": false}));
    }

    #[test]
    fn create_task_serializes_name_only() {
        let task = CreateTask {
            name: "Ship release".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_value(&task).unwrap();
        assert_eq!(body, json!({"name": "Ship release"}));
    }

    #[test]
    fn envelope_deserializes_success_body() {
        let body = json!({
            "statusCode": 200,
            "message": "Task retrieved successfully",
            "data": {
                "id": "7f8c0e9a-7b56-4a1d-9c6c-6e1b2f3a4d5e",
                "name": "Ship release",
                "description": null,
                "completed": false,
                "priority": "High",
                "category": null,
                "deadline": null,
                "createdAt": "2026-08-01T10:00:00+00:00",
                "updatedAt": "2026-08-01T10:00:00+00:00"
            }
        });

        let envelope: Envelope<Task> = serde_json::from_value(body).unwrap();
        let task = envelope.data.unwrap();
        assert_eq!(task.name, "Ship release");
        assert_eq!(task.priority, TaskPriority::High);
        assert!(!task.completed);
    }

    #[test]
    fn envelope_deserializes_error_body() {
        let body = json!({
            "statusCode": 404,
            "message": "Task not found",
            "data": null
        });

        let envelope: Envelope<Task> = serde_json::from_value(body).unwrap();
        assert_eq!(envelope.status_code, 404);
        assert_eq!(envelope.message, "Task not found");
        assert!(envelope.data.is_none());
    }
}
