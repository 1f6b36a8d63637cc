//! Core library for the Task Registry Service
//!
//! This crate contains the core business logic, including:
//! - The Task model and partial-update semantics
//! - Field validation rules
//! - The repository trait and file-backed document store

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
