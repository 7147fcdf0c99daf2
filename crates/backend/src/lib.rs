//! `pwguard-backend` — host-side decisions around the password policy.
//!
//! Everything here is pure: the host passes in its request context and
//! applies the returned decisions (restricting a session, blanking form
//! fields, persisting a timestamp). Rendering and persistence stay with the
//! host.

pub mod change;
pub mod context;
pub mod hints;
pub mod reminder;
pub mod session;
pub mod settings;

pub use change::{
    PasswordChangeOutcome, PasswordChangeSubmission, StampDecision, review_password_change,
    stamp_password_change,
};
pub use context::RequestContext;
pub use hints::{ClientHints, PolicyRequirements};
pub use reminder::{ReminderPrompt, reminder_prompt};
pub use session::{BackendUser, SessionAccess, restrict_session};
pub use settings::{PolicySettings, SettingsError, load_config_from_path, load_config_from_str};
