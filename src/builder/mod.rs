//! Fluent construction of a [`History`](crate::History).
//!
//! Plain options live in [`HistoryConfig`], which can be deserialized and is
//! validated as a whole. Callbacks are supplied on the [`HistoryBuilder`].

pub mod config;
mod history;

pub use config::{
    Addressing, HistoryConfig, DEFAULT_KEY_LENGTH, MAX_KEY_LENGTH, MIN_KEY_LENGTH,
};
pub use history::HistoryBuilder;
