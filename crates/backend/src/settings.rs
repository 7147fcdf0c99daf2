//! Loading the policy from persisted settings.
//!
//! Settings are stored as JSON using the contract field names. All fields are
//! optional and fall back to the policy defaults. Unlike the policy core,
//! which clamps bad values, loading rejects them so administrators see the
//! mistake.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use pwguard_core::DomainError;
use pwguard_policy::{PasswordPolicyConfig, SpecialCharSet};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Forbidden patterns as stored: either a list or one comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PatternList {
    List(Vec<String>),
    CommaSeparated(String),
}

impl PatternList {
    fn into_patterns(self) -> Vec<String> {
        let raw = match self {
            PatternList::List(list) => list,
            PatternList::CommaSeparated(joined) => {
                joined.split(',').map(str::to_string).collect()
            }
        };
        raw.into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// Persisted policy settings, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PolicySettings {
    pub min_length: Option<i64>,
    pub require_lowercase: Option<bool>,
    pub require_uppercase: Option<bool>,
    pub require_digit: Option<bool>,
    pub require_special_char: Option<bool>,
    pub forbidden_patterns: Option<PatternList>,
    pub max_age_seconds: Option<i64>,
    /// Alternative to `maxAgeSeconds`; the two are mutually exclusive.
    pub max_age_days: Option<i64>,
    pub force_password_change: Option<bool>,
    /// Explicit special-character set; absent means "not alphanumeric".
    pub special_characters: Option<String>,
}

impl PolicySettings {
    pub fn into_config(self) -> Result<PasswordPolicyConfig, DomainError> {
        let defaults = PasswordPolicyConfig::default();

        let min_length = self.min_length.unwrap_or(defaults.min_length);
        if min_length < 0 {
            return Err(DomainError::validation(format!(
                "minLength must be >= 0 (got {min_length})"
            )));
        }

        let max_age_seconds = match (self.max_age_seconds, self.max_age_days) {
            (Some(_), Some(_)) => {
                return Err(DomainError::validation(
                    "maxAgeSeconds and maxAgeDays are mutually exclusive",
                ));
            }
            (Some(seconds), None) => seconds,
            (None, Some(days)) => days.checked_mul(SECONDS_PER_DAY).ok_or_else(|| {
                DomainError::validation(format!("maxAgeDays out of range (got {days})"))
            })?,
            (None, None) => defaults.max_age_seconds,
        };
        if max_age_seconds < 0 {
            return Err(DomainError::validation(format!(
                "maximum password age must be >= 0 (got {max_age_seconds})"
            )));
        }

        let special_characters = match self.special_characters {
            Some(set) if set.is_empty() => {
                return Err(DomainError::validation("specialCharacters must not be empty"));
            }
            Some(set) => SpecialCharSet::Explicit(set),
            None => SpecialCharSet::NonAlphanumeric,
        };

        Ok(PasswordPolicyConfig {
            min_length,
            require_lowercase: self.require_lowercase.unwrap_or(defaults.require_lowercase),
            require_uppercase: self.require_uppercase.unwrap_or(defaults.require_uppercase),
            require_digit: self.require_digit.unwrap_or(defaults.require_digit),
            require_special_char: self
                .require_special_char
                .unwrap_or(defaults.require_special_char),
            forbidden_patterns: self
                .forbidden_patterns
                .map(PatternList::into_patterns)
                .unwrap_or_default(),
            max_age_seconds,
            force_password_change: self
                .force_password_change
                .unwrap_or(defaults.force_password_change),
            special_characters,
        })
    }
}

/// Parse and validate settings from a JSON document.
pub fn load_config_from_str(json: &str) -> Result<PasswordPolicyConfig, SettingsError> {
    let settings: PolicySettings = serde_json::from_str(json)?;
    let config = settings.into_config()?;
    tracing::debug!(
        min_length = config.min_length(),
        max_age_seconds = config.max_age_seconds(),
        forbidden_patterns = config.forbidden_patterns.len(),
        "password policy loaded"
    );
    Ok(config)
}

/// Read, parse and validate settings from a JSON file.
pub fn load_config_from_path(path: &Path) -> Result<PasswordPolicyConfig, SettingsError> {
    let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&json)
}
