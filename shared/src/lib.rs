//! Shared types for the license service
//!
//! Error codes, error types, unified API response structures and small
//! time utilities used by the service crates.

pub mod error;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
