//! Transition hook chain.
//!
//! Hooks are consulted in registration order before any navigation commits.
//! The first hook that answers decides; a hook that answers
//! [`Prompt::Confirm`] suspends the transition until the injected
//! confirmation function resolves the [`Confirmation`] it was handed.

mod hook;
mod pending;

pub use hook::{evaluate, Prompt, TransitionHook, Verdict};
pub use pending::{ConfirmFn, Confirmation, PendingTransition};
