//! Password complexity policy.
//!
//! `validate` collects every violated rule instead of stopping at the first
//! one, so callers can report complete feedback in one round trip.

use serde::{Deserialize, Serialize};
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::{PasswordPolicyConfig, SpecialCharSet};

/// A single structured reason a candidate password was rejected.
///
/// Hosts map these tags to localized text; the policy never formats messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleViolation {
    TooShort,
    MissingLowercase,
    MissingUppercase,
    MissingDigit,
    MissingSpecialChar,
    ForbiddenPattern,
    SameAsPrevious,
}

/// Character classes a policy can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digit,
    Special,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Lowercase,
        CharacterClass::Uppercase,
        CharacterClass::Digit,
        CharacterClass::Special,
    ];

    /// The violation reported when this class is required but absent.
    pub fn missing_violation(self) -> RuleViolation {
        match self {
            CharacterClass::Lowercase => RuleViolation::MissingLowercase,
            CharacterClass::Uppercase => RuleViolation::MissingUppercase,
            CharacterClass::Digit => RuleViolation::MissingDigit,
            CharacterClass::Special => RuleViolation::MissingSpecialChar,
        }
    }
}

/// Outcome of validating a candidate password.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// Violated rules in evaluation order; each tag appears at most once.
    pub violations: Vec<RuleViolation>,
    /// Every configured forbidden pattern the candidate contained, in config order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forbidden_matches: Vec<String>,
}

impl ValidationResult {
    pub fn contains(&self, violation: RuleViolation) -> bool {
        self.violations.contains(&violation)
    }
}

/// Class membership of a candidate, computed in a single pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CharacterScan {
    length: usize,
    lowercase: bool,
    uppercase: bool,
    digit: bool,
    special: bool,
}

impl CharacterScan {
    fn of(candidate: &str, special: &SpecialCharSet) -> Self {
        candidate.chars().fold(Self::default(), |mut scan, c| {
            scan.length += 1;
            scan.lowercase |= c.is_lowercase();
            scan.uppercase |= c.is_uppercase();
            scan.digit |= is_decimal_digit(c);
            scan.special |= special.contains(c);
            scan
        })
    }

    fn has(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Lowercase => self.lowercase,
            CharacterClass::Uppercase => self.uppercase,
            CharacterClass::Digit => self.digit,
            CharacterClass::Special => self.special,
        }
    }
}

/// Any decimal digit code point (general category Nd), in any script.
/// Fractions, superscripts, roman numerals and circled numbers do not count.
fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit() || get_general_category(c) == GeneralCategory::DecimalNumber
}

/// Validate `candidate` against the policy.
///
/// `previous` is the user's current password; an empty string disables the
/// reuse check. Length is counted in Unicode scalar values and pattern
/// matching is case-insensitive under [`fold_case`]. Empty forbidden
/// patterns are ignored.
pub fn validate(
    candidate: &str,
    previous: &str,
    config: &PasswordPolicyConfig,
) -> ValidationResult {
    let mut violations = Vec::new();
    let scan = CharacterScan::of(candidate, &config.special_characters);

    if scan.length < config.min_length() {
        violations.push(RuleViolation::TooShort);
    }

    for class in CharacterClass::ALL {
        if config.requires(class) && !scan.has(class) {
            violations.push(class.missing_violation());
        }
    }

    let forbidden_matches = forbidden_matches(candidate, &config.forbidden_patterns);
    if !forbidden_matches.is_empty() {
        violations.push(RuleViolation::ForbiddenPattern);
    }

    if !previous.is_empty() && candidate == previous {
        violations.push(RuleViolation::SameAsPrevious);
    }

    tracing::trace!(violations = violations.len(), "password complexity evaluated");

    ValidationResult {
        valid: violations.is_empty(),
        violations,
        forbidden_matches,
    }
}

fn forbidden_matches(candidate: &str, patterns: &[String]) -> Vec<String> {
    if patterns.is_empty() {
        return Vec::new();
    }

    let haystack = fold_case(candidate);
    patterns
        .iter()
        .filter(|pattern| !pattern.is_empty() && haystack.contains(&fold_case(pattern)))
        .cloned()
        .collect()
}

/// Lowercase, then expand the characters whose full case fold is longer
/// than their lowercase form (`ß`/`ẞ` to `ss`, long `ſ` to `s`), so that
/// "Straße" and "STRASSE" compare equal.
fn fold_case(s: &str) -> String {
    let mut folded = String::with_capacity(s.len());
    for c in s.chars().flat_map(char::to_lowercase) {
        match c {
            'ß' => folded.push_str("ss"),
            'ſ' => folded.push('s'),
            _ => folded.push(c),
        }
    }
    folded
}
