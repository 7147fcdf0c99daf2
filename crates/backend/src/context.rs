use pwguard_core::{EpochSeconds, UserId};
use pwguard_policy::{ExpirationStatus, PasswordPolicyConfig, UserPasswordState, expiration_status};

/// Per-request context threaded through every backend decision.
///
/// Holds the clock reading, the policy loaded for this request and the acting
/// user's password state. The only mutable part is the reload flag, which a
/// password save sets and the page-render step reads later in the same
/// request.
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    now: EpochSeconds,
    config: &'a PasswordPolicyConfig,
    password_state: UserPasswordState,
    reload_required: bool,
}

impl<'a> RequestContext<'a> {
    pub fn new(
        now: EpochSeconds,
        config: &'a PasswordPolicyConfig,
        password_state: UserPasswordState,
    ) -> Self {
        Self {
            now,
            config,
            password_state,
            reload_required: false,
        }
    }

    pub fn now(&self) -> EpochSeconds {
        self.now
    }

    pub fn config(&self) -> &PasswordPolicyConfig {
        self.config
    }

    pub fn password_state(&self) -> &UserPasswordState {
        &self.password_state
    }

    pub fn user_id(&self) -> UserId {
        self.password_state.user_id
    }

    pub fn is_impersonated(&self) -> bool {
        self.password_state.is_impersonated
    }

    pub fn expiration_status(&self) -> ExpirationStatus {
        expiration_status(self.now, &self.password_state, self.config)
    }

    pub fn is_expired(&self) -> bool {
        self.expiration_status().is_expired()
    }

    /// Record a password change for the acting user at `at`.
    pub(crate) fn record_password_change(&mut self, at: EpochSeconds) {
        self.password_state.last_change_timestamp = at;
    }

    pub fn mark_reload_required(&mut self) {
        self.reload_required = true;
    }

    /// Whether the backend must fully reload to lift a previous lockdown.
    pub fn reload_required(&self) -> bool {
        self.reload_required
    }
}
