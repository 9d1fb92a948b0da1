//! In-memory host, for non-browser environments and tests.

use super::stack::EntryStack;
use super::{HostEntry, HostError, HostEvent, NavigationHost, PopCause};

/// An entry list held entirely in memory.
///
/// Exposes its index, so the engine can tell back from forward directly.
/// `go` clamps to the ends of the list instead of ignoring the request.
///
/// # Example
///
/// ```rust
/// use waypoint::host::{MemoryHost, NavigationHost};
///
/// let host = MemoryHost::with_entries(["/one", "/two", "/three"], 1);
/// assert_eq!(host.current().url, "/two");
/// assert_eq!(host.index(), Some(1));
/// assert!(host.can_go(1));
/// assert!(!host.can_go(2));
/// ```
pub struct MemoryHost {
    stack: EntryStack,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// A single entry at `/`.
    pub fn new() -> Self {
        Self::with_entries(["/"], 0)
    }

    /// Start from the given URLs, positioned at `initial_index` (clamped).
    pub fn with_entries<I, U>(urls: I, initial_index: usize) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        let entries = urls.into_iter().map(HostEntry::new).collect();
        Self {
            stack: EntryStack::new(entries, initial_index),
        }
    }

    /// Whether `go(n)` would land on an existing entry.
    pub fn can_go(&self, n: isize) -> bool {
        self.stack.target(n).is_some()
    }

    pub fn entries(&self) -> &[HostEntry] {
        self.stack.entries()
    }
}

impl NavigationHost for MemoryHost {
    fn current(&self) -> HostEntry {
        self.stack.current().clone()
    }

    fn index(&self) -> Option<usize> {
        Some(self.stack.index())
    }

    fn push(&mut self, entry: HostEntry) -> Result<(), HostError> {
        self.stack.push(entry)
    }

    fn replace(&mut self, entry: HostEntry) -> Result<(), HostError> {
        self.stack.replace(entry);
        Ok(())
    }

    fn go(&mut self, delta: isize) -> Result<(), HostError> {
        let target = self.stack.clamped_target(delta);
        self.stack.move_to(target, true, PopCause::Traverse);
        Ok(())
    }

    fn take_events(&mut self) -> Vec<HostEvent> {
        self.stack.take_events()
    }
}
