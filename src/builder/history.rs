//! Builder for constructing a history.

use crate::builder::config::{Addressing, HistoryConfig};
use crate::core::{normalize_basename, HashType, PathTransform};
use crate::engine::{History, Settings};
use crate::error::{HistoryError, Result};
use crate::host::NavigationHost;
use crate::transition::{ConfirmFn, Confirmation};
use std::rc::Rc;
use stillwater::validation::Validation;

/// Builder for [`History`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use waypoint::host::MemoryHost;
/// use waypoint::History;
///
/// let history = History::builder(MemoryHost::with_entries(["/app/start"], 0))
///     .basename("/app/")
///     .key_length(8)
///     .get_user_confirmation(|_message, confirmation| {
///         confirmation.allow().unwrap();
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(history.location().pathname, "/start");
/// assert_eq!(history.create_href("/next"), "/app/next");
/// ```
pub struct HistoryBuilder<H: NavigationHost + 'static> {
    host: H,
    config: HistoryConfig,
    transform: Option<PathTransform>,
    confirm: Option<Rc<ConfirmFn>>,
}

impl<H: NavigationHost + 'static> HistoryBuilder<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: HistoryConfig::default(),
            transform: None,
            confirm: None,
        }
    }

    /// Replace all plain options at once.
    pub fn config(mut self, config: HistoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Path prefix shared by every URL. Trailing slashes are ignored.
    pub fn basename(mut self, basename: impl Into<String>) -> Self {
        self.config.basename = basename.into();
        self
    }

    pub fn key_length(mut self, key_length: usize) -> Self {
        self.config.key_length = key_length;
        self
    }

    pub fn addressing(mut self, addressing: Addressing) -> Self {
        self.config.addressing = addressing;
        self
    }

    /// Shorthand for `addressing(Addressing::Hash(hash_type))`.
    pub fn hash(self, hash_type: HashType) -> Self {
        self.addressing(Addressing::Hash(hash_type))
    }

    /// Applied to every pathname before it is encoded.
    pub fn transform_pathname<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        self.transform = Some(Rc::new(transform));
        self
    }

    /// Called when a hook asks for confirmation. Without one, such
    /// transitions are allowed.
    pub fn get_user_confirmation<F>(mut self, confirm: F) -> Self
    where
        F: Fn(&str, Confirmation) + 'static,
    {
        self.confirm = Some(Rc::new(confirm));
        self
    }

    /// Validate the options and read the initial location from the host.
    pub fn build(self) -> Result<History<H>> {
        if let Validation::Failure(errors) = self.config.validate() {
            return Err(HistoryError::InvalidOptions(errors.iter().cloned().collect()));
        }

        let HistoryConfig {
            basename,
            key_length,
            addressing,
        } = self.config;

        let settings = Settings {
            basename: normalize_basename(&basename),
            key_length,
            addressing,
            transform: self.transform,
            confirm: self.confirm,
        };

        Ok(History::from_parts(self.host, settings))
    }
}
