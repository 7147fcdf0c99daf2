//! `pwguard-core` — shared primitives for the password policy crates.
//!
//! This crate contains **pure** building blocks (no IO, no host concerns).

pub mod error;
pub mod id;
pub mod time;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
pub use time::{EpochSeconds, epoch_seconds, now_epoch_seconds};
pub use value_object::ValueObject;
