use std::io::Write;

use pwguard_backend::{
    BackendUser, ClientHints, PasswordChangeOutcome, PasswordChangeSubmission, RequestContext,
    SessionAccess, load_config_from_path, reminder_prompt, restrict_session,
    review_password_change, stamp_password_change,
};
use pwguard_core::UserId;
use pwguard_policy::{RuleViolation, UserPasswordState};

const DAY: i64 = 24 * 60 * 60;
const NOW: i64 = 1_750_000_000;

fn write_settings(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    file.write_all(json.as_bytes()).expect("failed to write settings");
    file
}

fn editor(id: UserId) -> BackendUser {
    BackendUser {
        id,
        is_admin: true,
        modules: vec!["web_page".to_string(), "web_list".to_string()],
        groups: vec!["editors".to_string()],
        workspace_permissions: 1,
    }
}

#[test]
fn expired_user_is_locked_down_until_a_valid_change_is_saved() {
    let settings = write_settings(
        r#"{
            "minLength": 10,
            "forbiddenPatterns": "company, welcome",
            "maxAgeDays": 90,
            "forcePasswordChange": true
        }"#,
    );
    let config = load_config_from_path(settings.path()).unwrap();
    let id = UserId::new();
    let state = UserPasswordState::new(id, NOW - 91 * DAY);

    // Request 1: backend bootstrap + user lookup.
    let ctx = RequestContext::new(NOW, &config, state.clone());
    let prompt = reminder_prompt(&ctx).expect("reminder expected");
    assert!(prompt.force_change);

    let mut user = editor(id);
    assert_eq!(restrict_session(&ctx, &mut user), SessionAccess::PasswordChangeOnly);
    assert_eq!(user.modules, vec!["user", "user_setup"]);

    // Request 2: a weak attempt is rejected with complete feedback.
    let ctx = RequestContext::new(NOW, &config, state.clone());
    let mut submission = PasswordChangeSubmission::new("welcome1", "welcome1", "Old-Passw0rd!");
    let PasswordChangeOutcome::Rejected { result } = review_password_change(&ctx, &mut submission)
    else {
        panic!("weak password must be rejected");
    };
    assert_eq!(
        result.violations,
        vec![
            RuleViolation::TooShort,
            RuleViolation::MissingUppercase,
            RuleViolation::MissingSpecialChar,
            RuleViolation::ForbiddenPattern,
        ]
    );
    assert_eq!(result.forbidden_matches, vec!["welcome"]);
    assert!(submission.new_password.is_empty());

    // Request 3: a valid change is accepted, stamped, and triggers a reload.
    let mut ctx = RequestContext::new(NOW, &config, state);
    let mut submission =
        PasswordChangeSubmission::new("Tr0ub4dor&3-Horse", "Tr0ub4dor&3-Horse", "Old-Passw0rd!");
    assert_eq!(
        review_password_change(&ctx, &mut submission),
        PasswordChangeOutcome::Accepted
    );
    let decision = stamp_password_change(&mut ctx, id, true);
    assert_eq!(decision.last_change, Some(NOW));
    assert!(decision.reload_required);
    assert!(ctx.reload_required());

    // Request 4: with the new timestamp the session has full access again.
    let ctx = RequestContext::new(NOW + 60, &config, UserPasswordState::new(id, NOW));
    assert_eq!(reminder_prompt(&ctx), None);
    let mut user = editor(id);
    assert_eq!(restrict_session(&ctx, &mut user), SessionAccess::Full);
    assert!(user.is_admin);
}

#[test]
fn impersonating_admin_neither_sees_lockdown_nor_stamps() {
    let settings = write_settings(r#"{ "maxAgeSeconds": 3600, "forcePasswordChange": true }"#);
    let config = load_config_from_path(settings.path()).unwrap();
    let id = UserId::new();

    let mut ctx = RequestContext::new(NOW, &config, UserPasswordState::never_changed(id).impersonated());
    let mut user = editor(id);

    assert_eq!(reminder_prompt(&ctx), None);
    assert_eq!(restrict_session(&ctx, &mut user), SessionAccess::Full);

    let decision = stamp_password_change(&mut ctx, id, true);
    assert_eq!(decision.last_change, None);
    assert!(!decision.reload_required);
}

#[test]
fn client_hints_reflect_loaded_settings() {
    let settings = write_settings(r#"{ "minLength": 14, "requireDigit": false, "specialCharacters": "!@#" }"#);
    let config = load_config_from_path(settings.path()).unwrap();

    let hints = ClientHints::from_config(&config);
    assert_eq!(hints.min_length, 14);
    assert!(!hints.require_digit);
    assert_eq!(hints.special_characters.as_deref(), Some("!@#"));
}
