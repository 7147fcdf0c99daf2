//! `pwguard-policy` — pure password expiration and complexity policy.
//!
//! This crate is intentionally decoupled from the host backend: no IO, no
//! shared state, no serialization parsing. The host supplies configuration
//! and per-user state at the call boundary.

pub mod complexity;
pub mod config;
pub mod expiration;
pub mod state;

pub use complexity::{CharacterClass, RuleViolation, ValidationResult, validate};
pub use config::{PasswordPolicyConfig, SpecialCharSet};
pub use expiration::{ExpirationStatus, expiration_status, is_expired};
pub use state::UserPasswordState;
