//! Domain Layer - Protocol logic and entities
//!
//! This layer contains:
//! - Domain entities (Session, ChallengeAttempt, Challenge)
//! - Domain value objects (OtpCode, Identity, AttemptLimit, Decision)
//! - Domain services (pure decision, generation and comparison logic)
//! - Ports (Notifier, Directory, RateLimiter)

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
