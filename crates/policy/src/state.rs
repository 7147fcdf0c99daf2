//! Per-user password state supplied by the host.

use serde::{Deserialize, Serialize};

use pwguard_core::{EpochSeconds, UserId, ValueObject};

/// What the host knows about a user's password at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPasswordState {
    pub user_id: UserId,
    /// Epoch seconds of the last change; 0 means never changed.
    #[serde(default)]
    pub last_change_timestamp: EpochSeconds,
    /// An administrator is acting as this user in a sub-session.
    #[serde(default)]
    pub is_impersonated: bool,
}

impl ValueObject for UserPasswordState {}

impl UserPasswordState {
    pub fn new(user_id: UserId, last_change_timestamp: EpochSeconds) -> Self {
        Self {
            user_id,
            last_change_timestamp,
            is_impersonated: false,
        }
    }

    pub fn never_changed(user_id: UserId) -> Self {
        Self::new(user_id, 0)
    }

    pub fn impersonated(mut self) -> Self {
        self.is_impersonated = true;
        self
    }

    pub fn has_changed_password(&self) -> bool {
        self.last_change_timestamp != 0
    }
}
