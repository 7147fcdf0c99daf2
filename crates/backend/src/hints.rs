//! Policy data exposed to the client for early feedback and instructions.

use serde::Serialize;

use pwguard_policy::{CharacterClass, PasswordPolicyConfig, SpecialCharSet};

/// Serializable mirror of the policy for client-side checks.
///
/// Mirrors the contract field names so client code can run the same rules
/// before submitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientHints {
    pub min_length: usize,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_digit: bool,
    pub require_special_char: bool,
    pub forbidden_patterns: Vec<String>,
    pub force_password_change: bool,
    /// Explicit special-character set, absent when the default applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_characters: Option<String>,
}

impl ClientHints {
    pub fn from_config(config: &PasswordPolicyConfig) -> Self {
        let special_characters = match &config.special_characters {
            SpecialCharSet::NonAlphanumeric => None,
            SpecialCharSet::Explicit(set) => Some(set.clone()),
        };

        Self {
            min_length: config.min_length(),
            require_lowercase: config.require_lowercase,
            require_uppercase: config.require_uppercase,
            require_digit: config.require_digit,
            require_special_char: config.require_special_char,
            forbidden_patterns: non_empty_patterns(config),
            force_password_change: config.force_password_change,
            special_characters,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Structured instruction data; the host turns it into localized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyRequirements {
    pub min_length: usize,
    pub classes: Vec<CharacterClass>,
    pub forbidden_patterns: Vec<String>,
}

impl PolicyRequirements {
    pub fn from_config(config: &PasswordPolicyConfig) -> Self {
        Self {
            min_length: config.min_length(),
            classes: config.requirements(),
            forbidden_patterns: non_empty_patterns(config),
        }
    }
}

fn non_empty_patterns(config: &PasswordPolicyConfig) -> Vec<String> {
    config
        .forbidden_patterns
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect()
}
