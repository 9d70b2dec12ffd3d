//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, Base64, constant-time comparison)
//! - Secret generation for signing keys
//! - Fixed-window rate limit settings

pub mod crypto;
pub mod rate_limit;
