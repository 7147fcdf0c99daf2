//! Password expiration policy.
//!
//! - No IO
//! - No panics
//! - Deterministic for identical inputs

use serde::Serialize;

use pwguard_core::EpochSeconds;

use crate::{PasswordPolicyConfig, UserPasswordState};

/// Why a password is (or is not) considered expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ExpirationStatus {
    /// `maxAgeSeconds` is 0 (or negative): passwords never expire.
    Disabled,
    /// An administrator is acting as the user; their record is left alone.
    Impersonated,
    /// No change has ever been recorded under the policy.
    NeverChanged,
    /// Age reached the configured maximum.
    Expired { age_seconds: i64 },
    /// Still valid for `remaining_seconds`.
    Current { remaining_seconds: i64 },
}

impl ExpirationStatus {
    pub fn is_expired(&self) -> bool {
        matches!(
            self,
            ExpirationStatus::NeverChanged | ExpirationStatus::Expired { .. }
        )
    }
}

/// Explain the expiration decision for a user at `now`.
///
/// Checks run in order: disabled policy, impersonation, missing timestamp,
/// then age. Exactly reaching the maximum age counts as expired. A last
/// change in the future (clock skew) is treated as age 0.
pub fn expiration_status(
    now: EpochSeconds,
    state: &UserPasswordState,
    config: &PasswordPolicyConfig,
) -> ExpirationStatus {
    let max_age = config.max_age_seconds();
    if max_age == 0 {
        return ExpirationStatus::Disabled;
    }
    if state.is_impersonated {
        return ExpirationStatus::Impersonated;
    }
    if !state.has_changed_password() {
        return ExpirationStatus::NeverChanged;
    }

    let age = now.saturating_sub(state.last_change_timestamp).max(0);
    if age >= max_age {
        ExpirationStatus::Expired { age_seconds: age }
    } else {
        ExpirationStatus::Current {
            remaining_seconds: max_age - age,
        }
    }
}

/// Whether the user's password has expired at `now`.
pub fn is_expired(
    now: EpochSeconds,
    state: &UserPasswordState,
    config: &PasswordPolicyConfig,
) -> bool {
    expiration_status(now, state, config).is_expired()
}
