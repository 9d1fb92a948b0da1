//! Where the engine believes it is in the host's entry list.

use crate::host::{HostEntry, HostEvent, PopCause};

pub(crate) struct TrackedEntry {
    key: Option<String>,
    url: String,
}

impl From<&HostEntry> for TrackedEntry {
    fn from(entry: &HostEntry) -> Self {
        Self {
            key: entry.key.clone(),
            url: entry.url.clone(),
        }
    }
}

/// Hosts that expose their index are trusted directly. For the rest the
/// engine keeps its own list of keys (keyless entries are told apart by
/// URL) and infers positions from it.
pub(crate) enum Position {
    Indexed(usize),
    Tracked {
        entries: Vec<TrackedEntry>,
        index: usize,
    },
}

impl Position {
    pub(crate) fn new(entry: &HostEntry, host_index: Option<usize>) -> Self {
        match host_index {
            Some(index) => Position::Indexed(index),
            None => Position::Tracked {
                entries: vec![TrackedEntry::from(entry)],
                index: 0,
            },
        }
    }

    pub(crate) fn current(&self) -> usize {
        match self {
            Position::Indexed(index) | Position::Tracked { index, .. } => *index,
        }
    }

    /// Position of the entry an event landed on, if known. A hash edit
    /// always creates a fresh entry, even when its URL was seen before.
    pub(crate) fn locate(&self, event: &HostEvent) -> Option<usize> {
        match self {
            Position::Indexed(_) => event.index,
            Position::Tracked { .. } if event.cause == PopCause::HashChange => None,
            Position::Tracked { entries, index } => find(entries, *index, &event.entry),
        }
    }

    /// Follow a host that moved without the engine having accepted it yet.
    pub(crate) fn realign(&mut self, live: &HostEntry, host_index: Option<usize>) {
        match self {
            Position::Indexed(index) => {
                if let Some(host_index) = host_index {
                    *index = host_index;
                }
            }
            Position::Tracked { entries, index } => {
                if let Some(found) = find(entries, *index, live) {
                    *index = found;
                }
            }
        }
    }

    pub(crate) fn pushed(&mut self, entry: &HostEntry, host_index: Option<usize>) {
        match self {
            Position::Indexed(index) => *index = host_index.unwrap_or(*index + 1),
            Position::Tracked { entries, index } => {
                entries.truncate(*index + 1);
                entries.push(TrackedEntry::from(entry));
                *index += 1;
            }
        }
    }

    pub(crate) fn replaced(&mut self, entry: &HostEntry) {
        if let Position::Tracked { entries, index } = self {
            entries[*index] = TrackedEntry::from(entry);
        }
    }

    /// Accept a POP to `target`. An entry the engine had never seen is
    /// recorded right after the current one.
    pub(crate) fn popped(&mut self, target: usize, entry: &HostEntry, known: bool) {
        match self {
            Position::Indexed(index) => *index = target,
            Position::Tracked { entries, index } => {
                if !known {
                    entries.truncate(*index + 1);
                    entries.push(TrackedEntry::from(entry));
                }
                *index = target;
            }
        }
    }
}

/// Keyed entries match on key. Keyless entries match on URL; when several
/// share it, the one nearest to `current` wins.
fn find(entries: &[TrackedEntry], current: usize, entry: &HostEntry) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, tracked)| {
            tracked.key == entry.key && (entry.key.is_some() || tracked.url == entry.url)
        })
        .map(|(position, _)| position)
        .min_by_key(|position| position.abs_diff(current))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(url: &str, key: &str) -> HostEntry {
        HostEntry {
            url: url.into(),
            key: Some(key.into()),
            state: None,
        }
    }

    fn event(entry: HostEntry, index: Option<usize>) -> HostEvent {
        HostEvent {
            entry,
            index,
            cause: PopCause::Traverse,
        }
    }

    #[test]
    fn indexed_positions_come_from_events() {
        let position = Position::new(&HostEntry::new("/"), Some(3));
        assert_eq!(position.current(), 3);
        assert_eq!(position.locate(&event(HostEntry::new("/x"), Some(1))), Some(1));
    }

    #[test]
    fn tracked_positions_follow_keys() {
        let mut position = Position::new(&HostEntry::new("/"), None);
        position.pushed(&keyed("/a", "aaa"), None);
        position.pushed(&keyed("/b", "bbb"), None);

        assert_eq!(position.current(), 2);
        assert_eq!(position.locate(&event(keyed("/a", "aaa"), None)), Some(1));
        assert_eq!(position.locate(&event(HostEntry::new("/"), None)), Some(0));
        assert_eq!(position.locate(&event(keyed("/z", "zzz"), None)), None);
    }

    #[test]
    fn keyless_entries_match_by_url() {
        let position = Position::new(&HostEntry::new("/"), None);
        assert_eq!(position.locate(&event(HostEntry::new("/#frag"), None)), None);
    }

    #[test]
    fn unknown_pop_is_appended() {
        let mut position = Position::new(&HostEntry::new("/"), None);
        position.pushed(&keyed("/a", "aaa"), None);
        position.popped(0, &HostEntry::new("/"), true);
        position.popped(1, &HostEntry::new("/#frag"), false);

        assert_eq!(position.current(), 1);
        assert_eq!(position.locate(&event(HostEntry::new("/#frag"), None)), Some(1));
        assert_eq!(position.locate(&event(keyed("/a", "aaa"), None)), None);
    }

    #[test]
    fn hash_edit_is_never_located() {
        let position = Position::new(&HostEntry::new("/#a"), None);
        let edit = HostEvent {
            entry: HostEntry::new("/#a"),
            index: None,
            cause: PopCause::HashChange,
        };
        assert_eq!(position.locate(&edit), None);
        assert_eq!(position.locate(&event(HostEntry::new("/#a"), None)), Some(0));
    }

    #[test]
    fn repeated_urls_resolve_to_nearest_entry() {
        let mut position = Position::new(&HostEntry::new("/#a"), None);
        position.popped(1, &HostEntry::new("/#b"), false);
        position.popped(2, &HostEntry::new("/#a"), false);
        position.popped(1, &HostEntry::new("/#b"), true);

        assert_eq!(position.locate(&event(HostEntry::new("/#a"), None)), Some(0));
        position.popped(0, &HostEntry::new("/#a"), true);
        position.popped(1, &HostEntry::new("/#b"), true);
        position.popped(2, &HostEntry::new("/#a"), true);
        assert_eq!(position.current(), 2);
        assert_eq!(position.locate(&event(HostEntry::new("/#a"), None)), Some(2));
    }

    #[test]
    fn realign_follows_the_host() {
        let mut position = Position::new(&HostEntry::new("/"), None);
        position.pushed(&keyed("/a", "aaa"), None);
        position.realign(&HostEntry::new("/"), None);
        assert_eq!(position.current(), 0);

        position.pushed(&keyed("/c", "ccc"), None);
        assert_eq!(position.locate(&event(keyed("/a", "aaa"), None)), None);

        let mut indexed = Position::new(&HostEntry::new("/"), Some(4));
        indexed.realign(&HostEntry::new("/"), Some(1));
        assert_eq!(indexed.current(), 1);
    }

    #[test]
    fn replace_overwrites_current_key() {
        let mut position = Position::new(&HostEntry::new("/"), None);
        position.replaced(&keyed("/r", "rrr"));

        assert_eq!(position.locate(&event(keyed("/r", "rrr"), None)), Some(0));
        assert_eq!(position.locate(&event(HostEntry::new("/"), None)), None);
    }
}
