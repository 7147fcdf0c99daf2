//! Password policy configuration model.

use serde::{Deserialize, Serialize};

use pwguard_core::ValueObject;

use crate::complexity::CharacterClass;

/// Which characters count as "special".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "chars")]
pub enum SpecialCharSet {
    /// Anything that is neither alphanumeric nor whitespace.
    #[default]
    NonAlphanumeric,
    /// Exactly the characters of the given string.
    Explicit(String),
}

impl SpecialCharSet {
    /// Whether `c` counts as a special character under this set.
    pub fn contains(&self, c: char) -> bool {
        match self {
            SpecialCharSet::NonAlphanumeric => !c.is_alphanumeric() && !c.is_whitespace(),
            SpecialCharSet::Explicit(set) => set.contains(c),
        }
    }
}

/// Password policy as configured by the host.
///
/// Field names (camelCase on the wire) are the stable contract the host
/// supplies verbatim. Loaded once per request and passed by reference.
///
/// Numeric fields are signed so that malformed values coming from the host
/// can be clamped instead of rejected: evaluators read them through
/// [`Self::min_length`] / [`Self::max_age_seconds`], which treat negatives as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordPolicyConfig {
    pub min_length: i64,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_digit: bool,
    pub require_special_char: bool,
    /// Case-insensitive substrings a password must not contain.
    pub forbidden_patterns: Vec<String>,
    /// 0 disables expiration.
    pub max_age_seconds: i64,
    pub force_password_change: bool,
    pub special_characters: SpecialCharSet,
}

impl Default for PasswordPolicyConfig {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_lowercase: true,
            require_uppercase: true,
            require_digit: true,
            require_special_char: true,
            forbidden_patterns: Vec::new(),
            max_age_seconds: 0,
            force_password_change: false,
            special_characters: SpecialCharSet::default(),
        }
    }
}

impl ValueObject for PasswordPolicyConfig {}

impl PasswordPolicyConfig {
    /// A policy with every check disabled and no expiration.
    pub fn permissive() -> Self {
        Self {
            min_length: 0,
            require_lowercase: false,
            require_uppercase: false,
            require_digit: false,
            require_special_char: false,
            forbidden_patterns: Vec::new(),
            max_age_seconds: 0,
            force_password_change: false,
            special_characters: SpecialCharSet::default(),
        }
    }

    /// Effective minimum length in characters (negative clamps to 0).
    pub fn min_length(&self) -> usize {
        if self.min_length <= 0 {
            return 0;
        }
        usize::try_from(self.min_length).unwrap_or(usize::MAX)
    }

    /// Effective maximum password age (negative clamps to 0 = never expires).
    pub fn max_age_seconds(&self) -> i64 {
        self.max_age_seconds.max(0)
    }

    /// Whether passwords can expire at all under this policy.
    pub fn expiration_enabled(&self) -> bool {
        self.max_age_seconds() > 0
    }

    /// Whether the policy requires at least one character of `class`.
    pub fn requires(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Lowercase => self.require_lowercase,
            CharacterClass::Uppercase => self.require_uppercase,
            CharacterClass::Digit => self.require_digit,
            CharacterClass::Special => self.require_special_char,
        }
    }

    /// Enabled character-class requirements, in fixed order.
    pub fn requirements(&self) -> Vec<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .filter(|class| self.requires(*class))
            .collect()
    }
}
