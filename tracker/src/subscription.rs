use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

type Listener<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct Registry<E> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
}

/// A single-threaded list of listeners for events of type `E`.
///
/// Cloning a hub gives another handle to the same listeners.
pub struct EventHub<E> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E> Clone for EventHub<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<E: 'static> Default for EventHub<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> EventHub<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Registers `listener` and returns the handle that detaches it.
    pub fn subscribe(&self, listener: impl FnMut(&E) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            let listener: Listener<E> = Rc::new(RefCell::new(listener));
            registry.listeners.push((id, listener));
            id
        };

        let registry: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            let Some(registry) = registry.upgrade() else {
                return false;
            };
            // The listener is dropped after the registry borrow ends, so a
            // listener owning other subscriptions can release them safely.
            let removed = {
                let mut registry = registry.borrow_mut();
                let index = registry
                    .listeners
                    .iter()
                    .position(|(listener_id, _)| *listener_id == id);
                index.map(|index| registry.listeners.remove(index))
            };
            removed.is_some()
        })
    }

    /// Delivers `event` to every listener registered when the call starts.
    ///
    /// Listeners may subscribe or unsubscribe while the event is delivered;
    /// a listener detached mid-delivery is skipped.
    pub fn publish(&self, event: &E) {
        let snapshot: Vec<(u64, Listener<E>)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            let mut listener = listener.borrow_mut();
            (&mut *listener)(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    fn is_registered(&self, id: u64) -> bool {
        self.registry
            .borrow()
            .listeners
            .iter()
            .any(|(listener_id, _)| *listener_id == id)
    }
}

/// Handle for one registered listener.
///
/// `unsubscribe` detaches the listener the first time it is called; later
/// calls do nothing. Dropping the handle unsubscribes as well.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() -> bool>>,
}

impl Subscription {
    fn new(detach: impl FnOnce() -> bool + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Detaches the listener. Returns `true` only for the call that actually
    /// removed it.
    pub fn unsubscribe(&mut self) -> bool {
        match self.detach.take() {
            Some(detach) => detach(),
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.detach.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
