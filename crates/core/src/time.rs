//! Epoch-second helpers.
//!
//! The policy works on plain integer epoch seconds so that hosts can pass
//! whatever they persisted without conversion; these helpers cover hosts that
//! hold `chrono` timestamps instead.

use chrono::{DateTime, Utc};

/// Seconds since the Unix epoch (UTC).
pub type EpochSeconds = i64;

pub fn epoch_seconds(at: DateTime<Utc>) -> EpochSeconds {
    at.timestamp()
}

pub fn now_epoch_seconds() -> EpochSeconds {
    epoch_seconds(Utc::now())
}
