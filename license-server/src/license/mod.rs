//! License domain logic
//!
//! Pure functions and types for the license lifecycle: plan duration
//! parsing, access evaluation with lazy expiry transitions, license key
//! generation. Nothing here touches the store or the transport.

pub mod duration;
pub mod keygen;
pub mod policy;

mod status;

pub use status::LicenseStatus;
