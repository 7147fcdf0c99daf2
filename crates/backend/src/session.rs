//! Session capability restriction for users with an expired password.

use serde::{Deserialize, Serialize};

use pwguard_core::UserId;

use crate::RequestContext;

/// Modules that stay reachable while a password change is pending.
pub const PASSWORD_CHANGE_MODULES: [&str; 2] = ["user", "user_setup"];

/// Workspace permission bits.
pub const WORKSPACE_LIVE: u8 = 0b01;
pub const WORKSPACE_DRAFT: u8 = 0b10;

/// The capability set of a backend user, as resolved by the host for this request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendUser {
    pub id: UserId,
    pub is_admin: bool,
    pub modules: Vec<String>,
    pub groups: Vec<String>,
    pub workspace_permissions: u8,
}

impl BackendUser {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            is_admin: false,
            modules: Vec::new(),
            groups: Vec::new(),
            workspace_permissions: 0,
        }
    }

    /// Drop everything except what is needed to change the password.
    ///
    /// Admin rights go first, otherwise module access cannot be limited.
    /// Groups are cleared so no group grants modules back; both workspaces
    /// stay accessible because clearing groups would otherwise lock a user
    /// out of the workspace they are currently in.
    fn restrict_to_password_change(&mut self) {
        self.is_admin = false;
        self.modules = PASSWORD_CHANGE_MODULES.iter().map(|m| m.to_string()).collect();
        self.groups.clear();
        self.workspace_permissions = WORKSPACE_LIVE | WORKSPACE_DRAFT;
    }
}

/// Result of [`restrict_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAccess {
    Full,
    PasswordChangeOnly,
}

/// Degrade `user` to password-change-only access when their password has
/// expired and the policy forces a change.
pub fn restrict_session(ctx: &RequestContext<'_>, user: &mut BackendUser) -> SessionAccess {
    if !ctx.config().force_password_change || !ctx.is_expired() {
        return SessionAccess::Full;
    }

    tracing::info!(user_id = %user.id, "password expired; restricting backend session");
    user.restrict_to_password_change();
    SessionAccess::PasswordChangeOnly
}
