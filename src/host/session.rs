//! Browser-style session history simulation.

use super::stack::EntryStack;
use super::{HostEntry, HostError, HostEvent, NavigationHost, PopCause};

/// Behaves like a browser's session history: the current position cannot
/// be inspected, out-of-range traversals are ignored, and the user can press
/// back/forward or edit the fragment behind the engine's back.
///
/// # Example
///
/// ```rust
/// use waypoint::host::{NavigationHost, SessionHost};
///
/// let mut host = SessionHost::new("/");
/// host.set_hash("section");
/// assert_eq!(host.current().url, "/#section");
/// assert_eq!(host.index(), None);
/// assert_eq!(host.take_events().len(), 1);
/// ```
pub struct SessionHost {
    stack: EntryStack,
}

impl SessionHost {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            stack: EntryStack::new(vec![HostEntry::new(url)], 0),
        }
    }

    /// Reject pushes once the list holds `limit` entries.
    pub fn with_quota(mut self, limit: usize) -> Self {
        self.stack.set_quota(limit);
        self
    }

    /// Simulate the back button. Returns `false` at the start of the list.
    pub fn back(&mut self) -> bool {
        self.traverse(-1)
    }

    /// Simulate the forward button. Returns `false` at the end of the list.
    pub fn forward(&mut self) -> bool {
        self.traverse(1)
    }

    /// Simulate the user editing the fragment. Creates a new keyless entry
    /// unless the fragment is unchanged.
    pub fn set_hash(&mut self, fragment: &str) {
        let current = &self.stack.current().url;
        let base = current.split('#').next().unwrap_or_default();
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let url = format!("{base}#{fragment}");
        if url == *current {
            return;
        }

        // Fragment edits are not subject to the quota.
        let target = self.stack.index() + 1;
        self.stack.truncate_and_append(HostEntry::new(url));
        self.stack.move_to(target, false, PopCause::HashChange);
    }

    pub fn entries(&self) -> &[HostEntry] {
        self.stack.entries()
    }

    fn traverse(&mut self, delta: isize) -> bool {
        match self.stack.target(delta) {
            Some(target) if delta != 0 => {
                self.stack.move_to(target, false, PopCause::Traverse);
                true
            }
            _ => false,
        }
    }
}

impl NavigationHost for SessionHost {
    fn current(&self) -> HostEntry {
        self.stack.current().clone()
    }

    fn push(&mut self, entry: HostEntry) -> Result<(), HostError> {
        self.stack.push(entry)
    }

    fn replace(&mut self, entry: HostEntry) -> Result<(), HostError> {
        self.stack.replace(entry);
        Ok(())
    }

    fn go(&mut self, delta: isize) -> Result<(), HostError> {
        self.traverse(delta);
        Ok(())
    }

    fn take_events(&mut self) -> Vec<HostEvent> {
        self.stack.take_events()
    }
}
