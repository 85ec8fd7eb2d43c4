// Notify-on-change callback list for the account store.

use crate::state::StoreEvent;

pub type SubscriptionId = usize;

// Send so the owning store can sit behind a Mutex in Tauri managed state.
type Callback = Box<dyn FnMut(&StoreEvent) + Send>;

#[derive(Default)]
pub struct Observers {
    next_id: SubscriptionId,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sub, _)| *sub != id);
        self.callbacks.len() != before
    }

    /// Calls every callback in subscription order.
    pub fn notify(&mut self, event: &StoreEvent) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_notify_in_subscription_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::new();

        let first = Arc::clone(&seen);
        observers.subscribe(move |e| first.lock().unwrap().push(("first", e.account_id())));
        let second = Arc::clone(&seen);
        observers.subscribe(move |e| second.lock().unwrap().push(("second", e.account_id())));

        observers.notify(&StoreEvent::AccountAdded { id: 7 });

        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let mut observers = Observers::new();

        let c = Arc::clone(&count);
        let id = observers.subscribe(move |_| *c.lock().unwrap() += 1);
        observers.notify(&StoreEvent::AccountRemoved { id: 1 });

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        assert!(observers.is_empty());

        observers.notify(&StoreEvent::AccountRemoved { id: 1 });
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_unsubscribe() {
        let mut observers = Observers::new();
        let a = observers.subscribe(|_| {});
        observers.unsubscribe(a);
        let b = observers.subscribe(|_| {});
        assert_ne!(a, b);
        assert_eq!(observers.len(), 1);
    }
}
