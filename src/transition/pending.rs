//! Suspended transitions and their single-shot resolution handle.

use crate::core::{Action, Location};
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Injected confirmation function: shows `message` and eventually resolves
/// the [`Confirmation`]. It may resolve before returning or at any later
/// point; until then the engine stays suspended.
pub type ConfirmFn = dyn Fn(&str, Confirmation);

/// Resolution handle for one suspended transition.
///
/// Resolving consumes the handle, so a transition is settled at most once.
/// A handle whose transition is no longer pending resolves as a no-op.
pub struct Confirmation {
    resolver: Box<dyn FnOnce(bool) -> Result<()>>,
}

impl Confirmation {
    pub(crate) fn new<F>(resolver: F) -> Self
    where
        F: FnOnce(bool) -> Result<()> + 'static,
    {
        Self {
            resolver: Box::new(resolver),
        }
    }

    /// Settle the transition. Host failures while committing (or while
    /// processing requests queued behind this one) are returned here when
    /// resolution happens after the confirmation function has returned.
    pub fn resolve(self, allowed: bool) -> Result<()> {
        (self.resolver)(allowed)
    }

    pub fn allow(self) -> Result<()> {
        self.resolve(true)
    }

    pub fn deny(self) -> Result<()> {
        self.resolve(false)
    }
}

impl fmt::Debug for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Confirmation").finish_non_exhaustive()
    }
}

/// A transition waiting on user confirmation.
#[derive(Clone, Debug)]
pub struct PendingTransition {
    pub location: Location,
    pub action: Action,
    pub message: String,
    pub requested_at: DateTime<Utc>,
}

impl PendingTransition {
    /// Time spent waiting so far.
    pub fn elapsed(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.requested_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::create_location;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn resolve_passes_the_answer_through() {
        let answer = Rc::new(Cell::new(None));
        let sink = Rc::clone(&answer);
        let confirmation = Confirmation::new(move |allowed| {
            sink.set(Some(allowed));
            Ok(())
        });

        confirmation.deny().unwrap();
        assert_eq!(answer.get(), Some(false));
    }

    #[test]
    fn elapsed_is_measured_from_request() {
        let pending = PendingTransition {
            location: create_location("/home", None, None, None, None),
            action: Action::Push,
            message: "Leave?".into(),
            requested_at: Utc::now() - chrono::Duration::seconds(5),
        };

        assert!(pending.elapsed() >= Duration::from_secs(5));
    }

    #[test]
    fn elapsed_never_negative() {
        let pending = PendingTransition {
            location: create_location("/home", None, None, None, None),
            action: Action::Pop,
            message: String::new(),
            requested_at: Utc::now() + chrono::Duration::seconds(60),
        };

        assert_eq!(pending.elapsed(), Duration::ZERO);
    }
}
