//! Infrastructure Layer
//!
//! Notifier, rate limiter and directory implementations.

pub mod memory_directory;
pub mod memory_rate_limit;
pub mod notifier;
