//! Hook verdicts and chain evaluation.

use crate::core::{Action, Location};
use std::rc::Rc;
use tracing::trace;

/// A hook's answer for one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    Allow,
    Deny,
    /// Ask the user, showing this message.
    Confirm(String),
}

impl From<bool> for Prompt {
    fn from(allowed: bool) -> Self {
        if allowed {
            Prompt::Allow
        } else {
            Prompt::Deny
        }
    }
}

impl From<&str> for Prompt {
    fn from(message: &str) -> Self {
        Prompt::Confirm(message.to_string())
    }
}

impl From<String> for Prompt {
    fn from(message: String) -> Self {
        Prompt::Confirm(message)
    }
}

/// Returning `None` means "no opinion": the next hook is consulted.
pub type TransitionHook = dyn Fn(&Location, Action) -> Option<Prompt>;

/// Result of running the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Rejected,
    NeedsConfirmation(String),
}

/// Consult `hooks` in order; the first answer wins. An empty chain, or one
/// where every hook abstains, approves.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use waypoint::core::{create_location, Action, Location};
/// use waypoint::transition::{evaluate, Prompt, TransitionHook, Verdict};
///
/// let abstain: Rc<TransitionHook> = Rc::new(|_: &Location, _: Action| -> Option<Prompt> { None });
/// let guard: Rc<TransitionHook> = Rc::new(|location: &Location, _: Action| -> Option<Prompt> {
///     (location.pathname == "/admin").then(|| Prompt::from("Leave?"))
/// });
///
/// let admin = create_location("/admin", None, None, None, None);
/// let verdict = evaluate(&[abstain, guard], &admin, Action::Push);
/// assert_eq!(verdict, Verdict::NeedsConfirmation("Leave?".into()));
/// ```
pub fn evaluate(hooks: &[Rc<TransitionHook>], location: &Location, action: Action) -> Verdict {
    for (position, hook) in hooks.iter().enumerate() {
        let Some(prompt) = hook(location, action) else {
            continue;
        };
        trace!(
            position,
            %action,
            pathname = %location.pathname,
            ?prompt,
            "transition hook answered"
        );
        return match prompt {
            Prompt::Allow => Verdict::Approved,
            Prompt::Deny => Verdict::Rejected,
            Prompt::Confirm(message) => Verdict::NeedsConfirmation(message),
        };
    }
    Verdict::Approved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::create_location;
    use std::cell::Cell;

    fn hook<F>(f: F) -> Rc<TransitionHook>
    where
        F: Fn(&Location, Action) -> Option<Prompt> + 'static,
    {
        Rc::new(f)
    }

    fn home() -> Location {
        create_location("/home", None, None, None, None)
    }

    #[test]
    fn empty_chain_approves() {
        assert_eq!(evaluate(&[], &home(), Action::Push), Verdict::Approved);
    }

    #[test]
    fn abstaining_hooks_approve() {
        let abstain = hook(|_, _| None);
        assert_eq!(evaluate(&[abstain], &home(), Action::Pop), Verdict::Approved);
    }

    #[test]
    fn first_answer_short_circuits() {
        let later_calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&later_calls);

        let deny = hook(|_, _| Some(Prompt::Deny));
        let later = hook(move |_, _| {
            counter.set(counter.get() + 1);
            Some(Prompt::Allow)
        });

        assert_eq!(evaluate(&[deny, later], &home(), Action::Push), Verdict::Rejected);
        assert_eq!(later_calls.get(), 0);
    }

    #[test]
    fn hooks_receive_location_and_action() {
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        let recorder = hook(move |location, action| {
            sink.set(Some((location.pathname == "/home", action)));
            None
        });

        evaluate(&[recorder], &home(), Action::Replace);
        assert_eq!(seen.get(), Some((true, Action::Replace)));
    }

    #[test]
    fn confirm_carries_message() {
        let confirm = hook(|_, _| Some(Prompt::from("Are you sure?")));
        assert_eq!(
            evaluate(&[confirm], &home(), Action::Push),
            Verdict::NeedsConfirmation("Are you sure?".to_string())
        );
    }

    #[test]
    fn prompt_from_bool() {
        assert_eq!(Prompt::from(true), Prompt::Allow);
        assert_eq!(Prompt::from(false), Prompt::Deny);
    }
}
