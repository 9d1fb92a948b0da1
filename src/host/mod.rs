//! Host navigation primitives.
//!
//! A host is the mechanism that actually holds the entry list: a browser's
//! session history, an in-memory list, or a test double. The engine commits
//! through [`NavigationHost`] and learns about traversals by draining the
//! host's [`HostEvent`]s.

mod memory;
mod session;
mod stack;

pub use memory::MemoryHost;
pub use session::SessionHost;

pub use crate::error::HostError;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry as the host stores it. `url` includes any basename and, under
/// hash addressing, the fragment carrying the path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostEntry {
    pub url: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub state: Option<Value>,
}

impl HostEntry {
    /// An entry the engine did not create: no key, no state.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: None,
            state: None,
        }
    }
}

/// What moved the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopCause {
    /// Back/forward or a `go` call.
    Traverse,
    /// The fragment was edited directly.
    HashChange,
}

/// Change notification for a navigation the engine did not commit itself.
#[derive(Clone, Debug, PartialEq)]
pub struct HostEvent {
    /// The entry the host landed on.
    pub entry: HostEntry,
    /// Its position, for hosts that expose one.
    pub index: Option<usize>,
    pub cause: PopCause,
}

/// The primitive the engine commits through.
///
/// Implementations must not report their own `push`/`replace` calls as
/// events. A `go` call reports its effect as an event, never synchronously
/// through the return value.
pub trait NavigationHost {
    /// The entry the host is currently on.
    fn current(&self) -> HostEntry;

    /// Position of the current entry, if the mechanism allows inspecting it.
    fn index(&self) -> Option<usize> {
        None
    }

    fn push(&mut self, entry: HostEntry) -> Result<(), HostError>;

    fn replace(&mut self, entry: HostEntry) -> Result<(), HostError>;

    fn go(&mut self, delta: isize) -> Result<(), HostError>;

    /// Drain pending change notifications, oldest first.
    fn take_events(&mut self) -> Vec<HostEvent>;
}
