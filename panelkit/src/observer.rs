//! Multi-subscriber lifecycle events.
//!
//! Nodes expose one `Event` per lifecycle hook (`on_update`, `on_mouse`, ...)
//! so behavior can be attached by registering closures instead of writing a
//! new node type. Listeners run in registration order.

use std::fmt;

/// Handle returned on registration, used to remove a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered storage of boxed listeners of any callable shape.
pub struct Listeners<F: ?Sized> {
    entries: Vec<(ListenerId, Box<F>)>,
    next_id: u64,
}

impl<F: ?Sized> Listeners<F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a boxed listener at the end of the list.
    pub fn add_boxed(&mut self, listener: Box<F>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate listeners in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<F>> {
        self.entries.iter_mut().map(|(_, listener)| listener)
    }
}

impl<F: ?Sized> Default for Listeners<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for Listeners<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// An event whose listeners receive `&mut A`.
pub struct Event<A> {
    listeners: Listeners<dyn FnMut(&mut A)>,
}

impl<A> Event<A> {
    pub fn new() -> Self {
        Self {
            listeners: Listeners::new(),
        }
    }

    /// Register a listener.
    pub fn add(&mut self, listener: impl FnMut(&mut A) + 'static) -> ListenerId {
        self.listeners.add_boxed(Box::new(listener))
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invoke every listener in registration order.
    pub fn notify(&mut self, args: &mut A) {
        for listener in self.listeners.iter_mut() {
            listener(&mut *args);
        }
    }
}

impl<A> Default for Event<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
