//! Shared types, errors, and configuration for Finsight.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Inclusive date ranges used by every analytics query
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::DateRange;
