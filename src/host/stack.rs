//! Entry list shared by the simulated hosts.

use super::{HostEntry, HostError, HostEvent, PopCause};
use std::collections::VecDeque;

pub(crate) struct EntryStack {
    entries: Vec<HostEntry>,
    index: usize,
    quota: Option<usize>,
    events: VecDeque<HostEvent>,
}

impl EntryStack {
    pub(crate) fn new(mut entries: Vec<HostEntry>, initial_index: usize) -> Self {
        if entries.is_empty() {
            entries.push(HostEntry::new("/"));
        }
        let index = initial_index.min(entries.len() - 1);
        Self {
            entries,
            index,
            quota: None,
            events: VecDeque::new(),
        }
    }

    pub(crate) fn set_quota(&mut self, limit: usize) {
        self.quota = Some(limit);
    }

    pub(crate) fn entries(&self) -> &[HostEntry] {
        &self.entries
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn current(&self) -> &HostEntry {
        &self.entries[self.index]
    }

    /// Drop forward entries and append, like a session history push.
    pub(crate) fn push(&mut self, entry: HostEntry) -> Result<(), HostError> {
        if let Some(limit) = self.quota {
            if self.index + 1 >= limit {
                return Err(HostError::QuotaExceeded { limit });
            }
        }
        self.truncate_and_append(entry);
        self.index += 1;
        Ok(())
    }

    /// Replace everything after the current entry with `entry` without
    /// moving.
    pub(crate) fn truncate_and_append(&mut self, entry: HostEntry) {
        self.entries.truncate(self.index + 1);
        self.entries.push(entry);
    }

    pub(crate) fn replace(&mut self, entry: HostEntry) {
        self.entries[self.index] = entry;
    }

    /// Target position for a relative move, if it lies inside the list.
    pub(crate) fn target(&self, delta: isize) -> Option<usize> {
        self.index
            .checked_add_signed(delta)
            .filter(|target| *target < self.entries.len())
    }

    pub(crate) fn clamped_target(&self, delta: isize) -> usize {
        let last = self.entries.len() as isize - 1;
        (self.index as isize).saturating_add(delta).clamp(0, last) as usize
    }

    /// Move to `target` and queue the change notification.
    pub(crate) fn move_to(&mut self, target: usize, expose_index: bool, cause: PopCause) {
        self.index = target;
        self.events.push_back(HostEvent {
            entry: self.current().clone(),
            index: expose_index.then_some(target),
            cause,
        });
    }

    pub(crate) fn take_events(&mut self) -> Vec<HostEvent> {
        self.events.drain(..).collect()
    }
}
