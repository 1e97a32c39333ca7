//! Session credential handling

pub mod session;
