//! Offset-change listener registry

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct ListenerId;
}

pub type OffsetListener = Box<dyn FnMut(i32)>;

/// Ordered fan-out of header offset changes
///
/// Listeners are called in registration order on every dispatch; repeated
/// values are not filtered.
#[derive(Default)]
pub struct OffsetListeners {
    listeners: SlotMap<ListenerId, OffsetListener>,
    order: Vec<ListenerId>,
}

impl OffsetListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: impl FnMut(i32) + 'static) -> ListenerId {
        let id = self.listeners.insert(Box::new(listener));
        self.order.push(id);
        id
    }

    /// Returns false if the listener was already gone
    pub fn remove(&mut self, id: ListenerId) -> bool {
        if self.listeners.remove(id).is_none() {
            return false;
        }
        self.order.retain(|existing| *existing != id);
        true
    }

    pub fn dispatch(&mut self, offset: i32) {
        for id in &self.order {
            if let Some(listener) = self.listeners.get_mut(*id) {
                listener(offset);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl std::fmt::Debug for OffsetListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OffsetListeners")
            .field("count", &self.order.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = OffsetListeners::new();

        let first = log.clone();
        listeners.add(move |offset| first.borrow_mut().push(("first", offset)));
        let second = log.clone();
        listeners.add(move |offset| second.borrow_mut().push(("second", offset)));

        listeners.dispatch(-10);
        listeners.dispatch(-10);

        assert_eq!(
            *log.borrow(),
            vec![("first", -10), ("second", -10), ("first", -10), ("second", -10)]
        );
    }

    #[test]
    fn test_remove() {
        let hits = Rc::new(RefCell::new(0));
        let mut listeners = OffsetListeners::new();
        let counter = hits.clone();
        let id = listeners.add(move |_| *counter.borrow_mut() += 1);

        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        listeners.dispatch(5);

        assert_eq!(*hits.borrow(), 0);
        assert!(listeners.is_empty());
    }
}
