//! Password-change submission handling.

use serde::{Deserialize, Serialize};

use pwguard_core::{EpochSeconds, UserId};
use pwguard_policy::{RuleViolation, ValidationResult, validate};

use crate::RequestContext;

/// The password fields of a user-settings form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PasswordChangeSubmission {
    pub new_password: String,
    pub new_password_repeat: String,
    pub current_password: String,
}

impl PasswordChangeSubmission {
    pub fn new(
        new_password: impl Into<String>,
        new_password_repeat: impl Into<String>,
        current_password: impl Into<String>,
    ) -> Self {
        Self {
            new_password: new_password.into(),
            new_password_repeat: new_password_repeat.into(),
            current_password: current_password.into(),
        }
    }

    fn is_empty(&self) -> bool {
        self.new_password.is_empty() && self.new_password_repeat.is_empty()
    }

    /// Blank both new-password fields so the host cannot save them.
    fn discard_new_password(&mut self) {
        self.new_password.clear();
        self.new_password_repeat.clear();
    }
}

/// Outcome of [`review_password_change`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum PasswordChangeOutcome {
    /// No new password was submitted.
    Unchanged,
    /// The new password satisfies the policy; the host may save it.
    Accepted,
    /// The new password was rejected and blanked in the submission.
    Rejected { result: ValidationResult },
}

impl PasswordChangeOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, PasswordChangeOutcome::Rejected { .. })
    }
}

/// Review a settings-form submission before the host saves it.
///
/// A user whose password expired is always validated, even when the form
/// carries no new password. Any violation, including reusing the current
/// password, blanks both new-password fields.
pub fn review_password_change(
    ctx: &RequestContext<'_>,
    submission: &mut PasswordChangeSubmission,
) -> PasswordChangeOutcome {
    if submission.is_empty() && !ctx.is_expired() {
        return PasswordChangeOutcome::Unchanged;
    }

    let result = validate(
        &submission.new_password,
        &submission.current_password,
        ctx.config(),
    );

    if !result.valid {
        tracing::info!(
            user_id = %ctx.user_id(),
            violations = result.violations.len(),
            same_as_previous = result.contains(RuleViolation::SameAsPrevious),
            "password change rejected"
        );
        submission.discard_new_password();
        return PasswordChangeOutcome::Rejected { result };
    }

    if submission.new_password.is_empty() {
        return PasswordChangeOutcome::Unchanged;
    }

    PasswordChangeOutcome::Accepted
}

/// What the host should persist after a user record save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StampDecision {
    /// New last-change timestamp to write, if any.
    pub last_change: Option<EpochSeconds>,
    /// The backend was locked down and must reload to restore access.
    pub reload_required: bool,
}

/// Decide how to stamp a saved user record whose password field was set.
///
/// Only a user editing their own record in their own session gets stamped;
/// an administrator impersonating someone must not reset that person's clock.
/// The reload flag is also recorded on `ctx`.
pub fn stamp_password_change(
    ctx: &mut RequestContext<'_>,
    record_owner: UserId,
    password_submitted: bool,
) -> StampDecision {
    if !password_submitted {
        return StampDecision::default();
    }

    let reload_required = ctx.is_expired();
    if reload_required {
        ctx.mark_reload_required();
    }

    let own_record = record_owner == ctx.user_id() && !ctx.is_impersonated();
    let last_change = own_record.then_some(ctx.now());
    if let Some(at) = last_change {
        ctx.record_password_change(at);
        tracing::info!(user_id = %record_owner, last_change = at, "password change stamped");
    } else {
        tracing::debug!(user_id = %record_owner, "password change not stamped");
    }

    StampDecision {
        last_change,
        reload_required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwguard_policy::{PasswordPolicyConfig, UserPasswordState};

    const NOW: i64 = 2_000_000;

    fn policy() -> PasswordPolicyConfig {
        PasswordPolicyConfig {
            min_length: 8,
            max_age_seconds: 1_000,
            ..PasswordPolicyConfig::default()
        }
    }

    fn current(id: UserId) -> UserPasswordState {
        UserPasswordState::new(id, NOW - 10)
    }

    #[test]
    fn empty_submission_is_unchanged_for_current_password() {
        let config = policy();
        let ctx = RequestContext::new(NOW, &config, current(UserId::new()));
        let mut submission = PasswordChangeSubmission::default();
        assert_eq!(review_password_change(&ctx, &mut submission), PasswordChangeOutcome::Unchanged);
    }

    #[test]
    fn empty_submission_is_rejected_for_expired_password() {
        let config = policy();
        let ctx = RequestContext::new(NOW, &config, UserPasswordState::never_changed(UserId::new()));
        let mut submission = PasswordChangeSubmission::default();

        let outcome = review_password_change(&ctx, &mut submission);
        let PasswordChangeOutcome::Rejected { result } = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert!(result.contains(RuleViolation::TooShort));
    }

    #[test]
    fn weak_password_is_blanked() {
        let config = policy();
        let ctx = RequestContext::new(NOW, &config, current(UserId::new()));
        let mut submission = PasswordChangeSubmission::new("weak", "weak", "Old-Passw0rd");

        assert!(review_password_change(&ctx, &mut submission).is_rejected());
        assert_eq!(submission.new_password, "");
        assert_eq!(submission.new_password_repeat, "");
        assert_eq!(submission.current_password, "Old-Passw0rd");
    }

    #[test]
    fn reusing_current_password_is_blanked() {
        let config = policy();
        let ctx = RequestContext::new(NOW, &config, current(UserId::new()));
        let mut submission = PasswordChangeSubmission::new("Passw0rd!", "Passw0rd!", "Passw0rd!");

        let outcome = review_password_change(&ctx, &mut submission);
        let PasswordChangeOutcome::Rejected { result } = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert_eq!(result.violations, vec![RuleViolation::SameAsPrevious]);
        assert!(submission.new_password.is_empty());
    }

    #[test]
    fn strong_new_password_is_accepted() {
        let config = policy();
        let ctx = RequestContext::new(NOW, &config, current(UserId::new()));
        let mut submission = PasswordChangeSubmission::new("N3w-Secret!", "N3w-Secret!", "Passw0rd!");

        assert_eq!(review_password_change(&ctx, &mut submission), PasswordChangeOutcome::Accepted);
        assert_eq!(submission.new_password, "N3w-Secret!");
    }

    #[test]
    fn own_record_is_stamped_and_lockdown_triggers_reload() {
        let id = UserId::new();
        let config = policy();
        let mut ctx = RequestContext::new(NOW, &config, UserPasswordState::never_changed(id));

        let decision = stamp_password_change(&mut ctx, id, true);
        assert_eq!(
            decision,
            StampDecision {
                last_change: Some(NOW),
                reload_required: true,
            }
        );
        assert!(ctx.reload_required());
        assert!(!ctx.is_expired());
    }

    #[test]
    fn other_users_record_is_not_stamped() {
        let config = policy();
        let mut ctx = RequestContext::new(NOW, &config, current(UserId::new()));

        let decision = stamp_password_change(&mut ctx, UserId::new(), true);
        assert_eq!(decision, StampDecision::default());
        assert!(!ctx.reload_required());
    }

    #[test]
    fn impersonated_session_is_not_stamped() {
        let id = UserId::new();
        let config = policy();
        let mut ctx = RequestContext::new(NOW, &config, UserPasswordState::never_changed(id).impersonated());

        let decision = stamp_password_change(&mut ctx, id, true);
        assert_eq!(decision.last_change, None);
        assert_eq!(ctx.password_state().last_change_timestamp, 0);
    }

    #[test]
    fn save_without_password_does_nothing() {
        let id = UserId::new();
        let config = policy();
        let mut ctx = RequestContext::new(NOW, &config, UserPasswordState::never_changed(id));

        assert_eq!(stamp_password_change(&mut ctx, id, false), StampDecision::default());
        assert!(!ctx.reload_required());
    }
}
