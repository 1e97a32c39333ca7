//! license-server — license issuance and validation service
//!
//! Small HTTP service backed by a relational license store:
//! - Activates/verifies license keys and issues short-lived session tokens
//! - Revalidates session tokens against live license state (heartbeat)
//! - Administratively generates new license records

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod license;
pub mod state;
