//! Application Layer - Use Cases
//!
//! The three protocol entry points (define / create / verify) and the two
//! user-facing login operations that forward to a directory.

pub mod config;
pub mod create_challenge;
pub mod define_challenge;
pub mod respond_to_challenge;
pub mod start_login;
pub mod verify_challenge;
