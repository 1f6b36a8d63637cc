//! Route handlers

pub mod health;
pub mod task;

use crate::envelope::ApiError;

/// Fallback for unmatched routes
pub async fn api_not_found() -> ApiError {
    ApiError::not_found("API not found")
}
