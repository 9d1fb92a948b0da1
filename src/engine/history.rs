//! The history engine.

use super::position::Position;
use super::settings::Settings;
use crate::builder::HistoryBuilder;
use crate::core::{create_location, Action, Location, Registry, To};
use crate::error::Result;
use crate::host::{HostEntry, HostEvent, NavigationHost};
use crate::transition::{
    evaluate, Confirmation, PendingTransition, Prompt, TransitionHook, Verdict,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

/// Observer called after every committed transition.
pub type Listener = dyn Fn(&Location, Action);

/// Handle returned by [`History::listen`] and [`History::block`].
pub struct Subscription {
    remove: Box<dyn FnOnce() -> bool>,
}

impl Subscription {
    fn new<F>(remove: F) -> Self
    where
        F: FnOnce() -> bool + 'static,
    {
        Self {
            remove: Box::new(remove),
        }
    }

    /// Remove the registration. Returns `false` if the history is gone.
    pub fn unsubscribe(self) -> bool {
        (self.remove)()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

enum Request {
    Navigate(Navigation),
    Go(isize),
}

/// Work that goes through the hook chain.
enum Navigation {
    Push { to: To, state: Option<Value> },
    Replace { to: To, state: Option<Value> },
    Pop(HostEvent),
}

enum CandidateKind {
    Push,
    Replace,
    Pop {
        target: usize,
        known: bool,
        entry: HostEntry,
        host_index: Option<usize>,
    },
}

/// A location that has been computed but not yet committed.
struct Candidate {
    location: Location,
    action: Action,
    kind: CandidateKind,
}

struct Awaiting {
    ticket: u64,
    candidate: Candidate,
    message: String,
    requested_at: DateTime<Utc>,
    verdict: Option<bool>,
}

enum Phase {
    Idle,
    AwaitingConfirmation(Awaiting),
}

enum Step {
    Process(Navigation),
    Traverse(isize),
    Settle(Candidate, bool),
    Wait,
    Done,
}

struct Core<H> {
    host: H,
    settings: Settings,
    location: Location,
    action: Action,
    position: Position,
    hooks: Registry<TransitionHook>,
    listeners: Registry<Listener>,
    queue: VecDeque<Request>,
    phase: Phase,
    next_ticket: u64,
    draining: bool,
}

impl<H: NavigationHost> Core<H> {
    /// Move host notifications into the request queue. Returns whether
    /// there were any.
    fn collect_host_events(&mut self) -> bool {
        let events = self.host.take_events();
        let collected = !events.is_empty();
        self.queue
            .extend(events.into_iter().map(|event| Request::Navigate(Navigation::Pop(event))));
        collected
    }

    fn next_step(&mut self) -> Step {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::AwaitingConfirmation(Awaiting {
                verdict: Some(allowed),
                candidate,
                ..
            }) => Step::Settle(candidate, allowed),
            Phase::AwaitingConfirmation(awaiting) => {
                self.phase = Phase::AwaitingConfirmation(awaiting);
                Step::Wait
            }
            Phase::Idle => match self.queue.pop_front() {
                Some(Request::Navigate(navigation)) => Step::Process(navigation),
                Some(Request::Go(delta)) => Step::Traverse(delta),
                None => Step::Done,
            },
        }
    }

    /// Whether the host still shows the entry a notification reported.
    fn host_shows(&self, entry: &HostEntry, index: Option<usize>) -> bool {
        let same_index = match index {
            Some(index) => self.host.index() == Some(index),
            None => true,
        };
        same_index && self.host.current() == *entry
    }

    /// Turn a request into a candidate. Nothing comes out for a POP the host
    /// has already moved on from (a later notification describes where it
    /// is now), nor for one landing on the entry the engine already
    /// considers current, such as the echo of a revert.
    fn candidate(&self, navigation: Navigation) -> Option<Candidate> {
        match navigation {
            Navigation::Push { to, state } => Some(Candidate {
                location: self.create_location(to, state),
                action: Action::Push,
                kind: CandidateKind::Push,
            }),
            Navigation::Replace { to, state } => Some(Candidate {
                location: self.create_location(to, state),
                action: Action::Replace,
                kind: CandidateKind::Replace,
            }),
            Navigation::Pop(event) => {
                if !self.host_shows(&event.entry, event.index) {
                    trace!(url = %event.entry.url, cause = ?event.cause, "host moved on, skipping stale pop");
                    return None;
                }

                let from = self.position.current();
                let located = self.position.locate(&event);
                if located == Some(from) {
                    trace!(index = from, cause = ?event.cause, "pop landed on the current entry");
                    return None;
                }

                let target = located.unwrap_or(from + 1);
                Some(Candidate {
                    location: self.settings.read_location(&event.entry),
                    action: Action::Pop,
                    kind: CandidateKind::Pop {
                        target,
                        known: located.is_some(),
                        entry: event.entry,
                        host_index: event.index,
                    },
                })
            }
        }
    }

    fn create_location(&self, to: To, state: Option<Value>) -> Location {
        create_location(
            to,
            state,
            Some(self.settings.create_key()),
            Some(&self.location),
            self.settings.transform.as_ref(),
        )
    }

    /// Apply an approved candidate. Host failures leave everything as it was.
    fn commit(&mut self, candidate: Candidate) -> Result<()> {
        let Candidate {
            location,
            action,
            kind,
        } = candidate;

        match kind {
            CandidateKind::Push => {
                let entry = self.settings.host_entry(&location);
                let live = self.host.current();
                self.position.realign(&live, self.host.index());
                self.host.push(entry.clone())?;
                self.position.pushed(&entry, self.host.index());
            }
            CandidateKind::Replace => {
                let entry = self.settings.host_entry(&location);
                self.host.replace(entry.clone())?;
                self.position.replaced(&entry);
            }
            CandidateKind::Pop {
                target,
                known,
                entry,
                ..
            } => self.position.popped(target, &entry, known),
        }

        debug!(
            %action,
            path = %location.path(),
            key = ?location.key,
            index = self.position.current(),
            "navigation committed"
        );
        self.location = location;
        self.action = action;
        Ok(())
    }

    /// Drop a rejected candidate. A rejected POP has already moved the host,
    /// so the host is sent back to the entry that is still current. The
    /// distance is measured from where the host is now.
    fn reject(&mut self, candidate: Candidate) -> Result<()> {
        match candidate.kind {
            CandidateKind::Push | CandidateKind::Replace => {
                debug!(
                    action = %candidate.action,
                    path = %candidate.location.path(),
                    "navigation denied"
                );
            }
            CandidateKind::Pop { target, .. } => {
                let from = self.position.current();
                let now = self.host.index().unwrap_or(target);
                let back = from as isize - now as isize;
                debug!(
                    path = %candidate.location.path(),
                    back,
                    "pop denied, restoring previous entry"
                );
                self.host.go(back)?;
            }
        }
        Ok(())
    }
}

/// Navigation history over a host mechanism.
///
/// `History` is a cheap handle: clones share the same engine. All work
/// happens on the calling thread, in reaction to operations on this handle
/// and to [`sync`](Self::sync) delivering host notifications.
///
/// Requests are serialized. While a transition waits for confirmation, later
/// requests queue up behind it and run, in order, once it is settled.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use waypoint::core::Action;
/// use waypoint::host::MemoryHost;
/// use waypoint::History;
///
/// let history = History::new(MemoryHost::new()).unwrap();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&seen);
/// history.listen(move |location, action| {
///     sink.borrow_mut().push((location.pathname.clone(), action));
/// });
///
/// history.push("/home").unwrap();
/// history.go_back().unwrap();
/// history.sync().unwrap();
///
/// assert_eq!(
///     *seen.borrow(),
///     vec![("/home".to_string(), Action::Push), ("/".to_string(), Action::Pop)]
/// );
/// ```
pub struct History<H: NavigationHost + 'static> {
    core: Rc<RefCell<Core<H>>>,
}

impl<H: NavigationHost + 'static> Clone for History<H> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
        }
    }
}

impl<H: NavigationHost + 'static> History<H> {
    /// A history with default options.
    pub fn new(host: H) -> Result<Self> {
        HistoryBuilder::new(host).build()
    }

    pub fn builder(host: H) -> HistoryBuilder<H> {
        HistoryBuilder::new(host)
    }

    pub(crate) fn from_parts(host: H, settings: Settings) -> Self {
        let entry = host.current();
        let location = settings.read_location(&entry);
        let position = Position::new(&entry, host.index());

        debug!(path = %location.path(), "history created");

        Self {
            core: Rc::new(RefCell::new(Core {
                host,
                settings,
                location,
                action: Action::Pop,
                position,
                hooks: Registry::new(),
                listeners: Registry::new(),
                queue: VecDeque::new(),
                phase: Phase::Idle,
                next_ticket: 0,
                draining: false,
            })),
        }
    }

    /// The last committed location.
    pub fn location(&self) -> Location {
        self.core.borrow().location.clone()
    }

    /// The action of the last committed transition (`Pop` initially).
    pub fn action(&self) -> Action {
        self.core.borrow().action
    }

    pub fn push(&self, to: impl Into<To>) -> Result<()> {
        self.enqueue(Request::Navigate(Navigation::Push {
            to: to.into(),
            state: None,
        }))
    }

    pub fn push_with_state(&self, to: impl Into<To>, state: Value) -> Result<()> {
        self.enqueue(Request::Navigate(Navigation::Push {
            to: to.into(),
            state: Some(state),
        }))
    }

    pub fn replace(&self, to: impl Into<To>) -> Result<()> {
        self.enqueue(Request::Navigate(Navigation::Replace {
            to: to.into(),
            state: None,
        }))
    }

    pub fn replace_with_state(&self, to: impl Into<To>, state: Value) -> Result<()> {
        self.enqueue(Request::Navigate(Navigation::Replace {
            to: to.into(),
            state: Some(state),
        }))
    }

    /// Ask the host to move by `delta`. The request waits its turn in the
    /// queue like any other; the move itself is seen on the next
    /// [`sync`](Self::sync) (or any other operation), as a POP.
    pub fn go(&self, delta: isize) -> Result<()> {
        self.enqueue(Request::Go(delta))
    }

    pub fn go_back(&self) -> Result<()> {
        self.go(-1)
    }

    pub fn go_forward(&self) -> Result<()> {
        self.go(1)
    }

    /// Deliver pending host notifications through the POP pipeline.
    pub fn sync(&self) -> Result<()> {
        while self.core.borrow_mut().collect_host_events() {
            self.drive()?;
        }
        Ok(())
    }

    /// Register an observer for future transitions. It is not called for
    /// the current location.
    pub fn listen<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Location, Action) + 'static,
    {
        let id = self.core.borrow_mut().listeners.add(Rc::new(listener));
        let core = Rc::downgrade(&self.core);
        Subscription::new(move || {
            core.upgrade()
                .is_some_and(|core| core.borrow_mut().listeners.remove(id))
        })
    }

    /// Ask for confirmation with `message` before every transition.
    pub fn block(&self, message: impl Into<String>) -> Subscription {
        let message = message.into();
        self.block_with(move |_, _| Some(Prompt::Confirm(message.clone())))
    }

    /// Register a transition hook. Hooks run in registration order.
    pub fn block_with<F>(&self, hook: F) -> Subscription
    where
        F: Fn(&Location, Action) -> Option<Prompt> + 'static,
    {
        let id = self.core.borrow_mut().hooks.add(Rc::new(hook));
        let core = Rc::downgrade(&self.core);
        Subscription::new(move || {
            core.upgrade()
                .is_some_and(|core| core.borrow_mut().hooks.remove(id))
        })
    }

    /// The URL the host would show for `to`, resolved against the current
    /// location.
    pub fn create_href(&self, to: impl Into<To>) -> String {
        let core = self.core.borrow();
        let location = create_location(
            to,
            None,
            None,
            Some(&core.location),
            core.settings.transform.as_ref(),
        );
        core.settings.href(&location)
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        matches!(self.core.borrow().phase, Phase::AwaitingConfirmation(_))
    }

    pub fn pending_transition(&self) -> Option<PendingTransition> {
        match &self.core.borrow().phase {
            Phase::AwaitingConfirmation(awaiting) => Some(PendingTransition {
                location: awaiting.candidate.location.clone(),
                action: awaiting.candidate.action,
                message: awaiting.message.clone(),
                requested_at: awaiting.requested_at,
            }),
            Phase::Idle => None,
        }
    }

    /// Run `f` against the host, e.g. to simulate a user pressing back.
    pub fn with_host<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(&mut self.core.borrow_mut().host)
    }

    fn enqueue(&self, request: Request) -> Result<()> {
        {
            let mut core = self.core.borrow_mut();
            core.collect_host_events();
            core.queue.push_back(request);
        }
        self.drive()
    }

    /// Process queued work until the queue is empty or a transition is
    /// waiting for confirmation. Re-entrant calls (from hooks, listeners or
    /// a synchronous confirmation) return at once and leave the work to the
    /// outer call.
    fn drive(&self) -> Result<()> {
        {
            let mut core = self.core.borrow_mut();
            if core.draining {
                return Ok(());
            }
            core.draining = true;
        }

        let result = self.drain();
        self.core.borrow_mut().draining = false;
        result
    }

    fn drain(&self) -> Result<()> {
        loop {
            let step = self.core.borrow_mut().next_step();
            match step {
                Step::Process(navigation) => self.process(navigation)?,
                Step::Traverse(delta) => self.core.borrow_mut().host.go(delta)?,
                Step::Settle(candidate, allowed) => self.finish(candidate, allowed)?,
                Step::Wait | Step::Done => return Ok(()),
            }
        }
    }

    fn process(&self, navigation: Navigation) -> Result<()> {
        let (candidate, hooks) = {
            let core = self.core.borrow();
            let Some(candidate) = core.candidate(navigation) else {
                return Ok(());
            };
            (candidate, core.hooks.snapshot())
        };

        match evaluate(&hooks, &candidate.location, candidate.action) {
            Verdict::Approved => self.finish(candidate, true),
            Verdict::Rejected => self.finish(candidate, false),
            Verdict::NeedsConfirmation(message) => self.await_confirmation(candidate, message),
        }
    }

    fn await_confirmation(&self, candidate: Candidate, message: String) -> Result<()> {
        let confirm = self.core.borrow().settings.confirm.clone();
        let Some(confirm) = confirm else {
            warn!(
                message = %message,
                "confirmation requested without a confirmation function, allowing transition"
            );
            return self.finish(candidate, true);
        };

        let confirmation = {
            let mut core = self.core.borrow_mut();
            let ticket = core.next_ticket;
            core.next_ticket += 1;
            debug!(
                ticket,
                action = %candidate.action,
                path = %candidate.location.path(),
                "awaiting confirmation"
            );
            core.phase = Phase::AwaitingConfirmation(Awaiting {
                ticket,
                candidate,
                message: message.clone(),
                requested_at: Utc::now(),
                verdict: None,
            });
            Self::confirmation(Rc::downgrade(&self.core), ticket)
        };

        confirm(&message, confirmation);
        Ok(())
    }

    fn confirmation(core: Weak<RefCell<Core<H>>>, ticket: u64) -> Confirmation {
        Confirmation::new(move |allowed| match core.upgrade() {
            Some(core) => History { core }.resolve(ticket, allowed),
            None => Ok(()),
        })
    }

    fn resolve(&self, ticket: u64, allowed: bool) -> Result<()> {
        {
            let mut core = self.core.borrow_mut();
            match &mut core.phase {
                Phase::AwaitingConfirmation(awaiting) if awaiting.ticket == ticket => {
                    awaiting.verdict = Some(allowed);
                }
                _ => {
                    warn!(ticket, "confirmation resolved for a transition that is no longer pending");
                    return Ok(());
                }
            }
        }
        self.drive()
    }

    fn finish(&self, candidate: Candidate, allowed: bool) -> Result<()> {
        if let CandidateKind::Pop {
            entry, host_index, ..
        } = &candidate.kind
        {
            if !self.core.borrow().host_shows(entry, *host_index) {
                debug!(
                    path = %candidate.location.path(),
                    "host moved while the pop was pending, leaving it to the newer notification"
                );
                return Ok(());
            }
        }

        if !allowed {
            return self.core.borrow_mut().reject(candidate);
        }

        let (listeners, location, action) = {
            let mut core = self.core.borrow_mut();
            core.commit(candidate)?;
            (core.listeners.snapshot(), core.location.clone(), core.action)
        };

        for listener in listeners {
            listener(&location, action);
        }
        Ok(())
    }
}

impl<H: NavigationHost + 'static> fmt::Debug for History<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.core.borrow();
        f.debug_struct("History")
            .field("location", &core.location)
            .field("action", &core.action)
            .field("index", &core.position.current())
            .field("queued", &core.queue.len())
            .finish_non_exhaustive()
    }
}
