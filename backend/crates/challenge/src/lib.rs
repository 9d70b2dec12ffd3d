//! OTP Custom-Challenge Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Attempt history, challenge entities, decision logic, ports
//! - `application/` - Use cases (define / create / verify, start / respond)
//! - `infra/` - Email notifiers and the in-memory login directory
//! - `presentation/` - HTTP handlers and routers
//!
//! ## Protocol
//! - The orchestrator decides `issue`, `grant` or `fail` from the attempt history alone
//! - The issuer draws a fresh six-digit code per round and delivers it exactly once
//! - The verifier compares one answer; it never sees the attempt limit
//!
//! ## Security Model
//! - The code lives only in private challenge parameters and the outgoing email
//! - Login responses never carry private parameters or metadata
//! - Trigger routes require the directory's bearer key
//! - Session handles are single use; every round gets a fresh one

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{ChallengeConfig, DirectoryConfig};
pub use error::{ChallengeError, ChallengeResult};
pub use infra::memory_directory::InMemoryDirectory;
pub use infra::memory_rate_limit::InMemoryRateLimiter;
pub use infra::notifier::{ConfiguredNotifier, HttpNotifier, HttpNotifierConfig, LogNotifier};
pub use presentation::router::{login_router, trigger_router};

// Re-export kernel error types for unified error handling
pub use kernel::{AppError, ErrorKind};
