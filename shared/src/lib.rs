//! Shared types for Saray
//!
//! Records and payloads for every resource kind, the unified error-code
//! system, and logging bootstrap used by the admin console and the site
//! service.

pub mod error;
pub mod logger;
pub mod models;
pub mod resource;

// Re-exports
pub use chrono;
pub use serde::{Deserialize, Serialize};
pub use tracing;

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use resource::{Record, RecordInput, ResourceKind, SortOrder};
