//! Password reminder prompt shown when the backend boots.

use serde::Serialize;

use pwguard_policy::ExpirationStatus;

use crate::RequestContext;

/// Instruction for the host to show the change-password reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReminderPrompt {
    /// The user may not postpone the change.
    pub force_change: bool,
    pub status: ExpirationStatus,
}

/// Decide whether the reminder should be shown for this request.
pub fn reminder_prompt(ctx: &RequestContext<'_>) -> Option<ReminderPrompt> {
    let status = ctx.expiration_status();
    if !status.is_expired() {
        return None;
    }

    tracing::debug!(user_id = %ctx.user_id(), ?status, "password reminder due");
    Some(ReminderPrompt {
        force_change: ctx.config().force_password_change,
        status,
    })
}
