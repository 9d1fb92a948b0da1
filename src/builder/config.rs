//! Serializable history configuration and its validation.

use crate::core::HashType;
use crate::error::OptionsError;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub const DEFAULT_KEY_LENGTH: usize = 6;
pub const MIN_KEY_LENGTH: usize = 1;
pub const MAX_KEY_LENGTH: usize = 32;

/// Where the application path lives in the host URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Addressing {
    /// The URL path itself.
    #[default]
    Path,
    /// The fragment, written with the given [`HashType`].
    Hash(HashType),
}

/// The data part of the history options. Callbacks (pathname transform,
/// confirmation) are set on [`HistoryBuilder`](crate::builder::HistoryBuilder).
///
/// # Example
///
/// ```rust
/// use waypoint::builder::{Addressing, HistoryConfig};
/// use waypoint::core::HashType;
///
/// let config: HistoryConfig =
///     serde_json::from_str(r#"{ "basename": "/app", "addressing": { "hash": "hashbang" } }"#)
///         .unwrap();
///
/// assert_eq!(config.basename, "/app");
/// assert_eq!(config.key_length, 6);
/// assert_eq!(config.addressing, Addressing::Hash(HashType::HashBang));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub basename: String,
    pub key_length: usize,
    pub addressing: Addressing,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            basename: String::new(),
            key_length: DEFAULT_KEY_LENGTH,
            addressing: Addressing::Path,
        }
    }
}

impl HistoryConfig {
    /// Check every field, accumulating all problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<OptionsError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<OptionsError>>> = Vec::new();

        let key_length = if (MIN_KEY_LENGTH..=MAX_KEY_LENGTH).contains(&self.key_length) {
            Validation::success(())
        } else {
            Validation::fail(OptionsError::KeyLengthOutOfRange {
                length: self.key_length,
                min: MIN_KEY_LENGTH,
                max: MAX_KEY_LENGTH,
            })
        };
        checks.push(key_length);

        let basename = if self.basename.contains(['?', '#']) {
            Validation::fail(OptionsError::BasenameHasDelimiter {
                basename: self.basename.clone(),
            })
        } else {
            Validation::success(())
        };
        checks.push(basename);

        Validation::all_vec(checks).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(HistoryConfig::default().validate().is_success());
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config: HistoryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, HistoryConfig::default());
    }

    #[test]
    fn path_addressing_serializes_as_string() {
        let json = serde_json::to_string(&Addressing::Path).unwrap();
        assert_eq!(json, "\"path\"");

        let json = serde_json::to_string(&Addressing::Hash(HashType::NoSlash)).unwrap();
        assert_eq!(json, r#"{"hash":"noslash"}"#);
    }

    #[test]
    fn validation_accumulates_all_problems() {
        let config = HistoryConfig {
            basename: "/app?x".into(),
            key_length: 0,
            addressing: Addressing::Path,
        };

        match config.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, OptionsError::KeyLengthOutOfRange { length: 0, .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, OptionsError::BasenameHasDelimiter { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn key_length_upper_bound() {
        let config = HistoryConfig {
            key_length: MAX_KEY_LENGTH + 1,
            ..HistoryConfig::default()
        };
        assert!(config.validate().is_failure());

        let config = HistoryConfig {
            key_length: MAX_KEY_LENGTH,
            ..HistoryConfig::default()
        };
        assert!(config.validate().is_success());
    }
}
