//! Centralized error handling for the catalog service
//!
//! # Error Categories
//!
//! - **Validation Errors**: malformed or missing request fields (400)
//! - **Not Found Errors**: a referenced channel or device does not exist (404)
//! - **Unauthorized Errors**: the action needs a session the caller lacks (401)
//! - **Repository Errors**: persistence failures, surfaced as 500
//!
//! # Usage
//!
//! ```rust
//! use iptv_catalog::errors::{AppError, AppResult};
//!
//! fn require_name(name: &str) -> AppResult<&str> {
//!     if name.is_empty() {
//!         return Err(AppError::validation("name", "Required"));
//!     }
//!     Ok(name)
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;
