//! Ordered, id-keyed callback registry.
//!
//! Used for both transition hooks and change listeners. Callbacks are stored
//! behind `Rc` so the engine can take a snapshot and release its borrow
//! before invoking any of them; a callback may therefore add or remove
//! registrations while it runs.

use std::rc::Rc;

/// Identifier handed out on registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

pub struct Registry<F: ?Sized> {
    entries: Vec<(RegistrationId, Rc<F>)>,
    next_id: u64,
}

impl<F: ?Sized> Default for Registry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> Registry<F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Append a callback. Registration order is evaluation order.
    pub fn add(&mut self, callback: Rc<F>) -> RegistrationId {
        let id = RegistrationId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    /// Remove a callback. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: RegistrationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Clone the current callbacks, in registration order.
    pub fn snapshot(&self) -> Vec<Rc<F>> {
        self.entries.iter().map(|(_, f)| Rc::clone(f)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Callback = dyn Fn() -> u32;

    #[test]
    fn snapshot_keeps_registration_order() {
        let mut registry: Registry<Callback> = Registry::new();
        registry.add(Rc::new(|| 1_u32));
        registry.add(Rc::new(|| 2_u32));
        registry.add(Rc::new(|| 3_u32));

        let values: Vec<u32> = registry.snapshot().iter().map(|f| f()).collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut registry: Registry<Callback> = Registry::new();
        let id = registry.add(Rc::new(|| 1_u32));

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn ids_are_not_reused() {
        let mut registry: Registry<Callback> = Registry::new();
        let first = registry.add(Rc::new(|| 1_u32));
        registry.remove(first);
        let second = registry.add(Rc::new(|| 2_u32));

        assert_ne!(first, second);
        assert!(!registry.remove(first));
        assert_eq!(registry.snapshot().len(), 1);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_removal() {
        let mut registry: Registry<Callback> = Registry::new();
        let id = registry.add(Rc::new(|| 7_u32));
        let snapshot = registry.snapshot();
        registry.remove(id);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0](), 7);
    }
}
