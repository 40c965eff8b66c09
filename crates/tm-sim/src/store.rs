//! `StateStore` — the single owner of the current simulation snapshot.
//!
//! Every visible state change goes through whole-snapshot replacement: the
//! runner (or a purchase) computes a complete next [`SimulationState`] and
//! swaps it in.  Subscribers are notified after each replacement with a
//! reference to the new snapshot, never with partial mutations, so a reader
//! can never observe a half-applied tick.

use tm_engine::SimulationState;

/// Callback invoked after every snapshot replacement.
pub type Subscriber = Box<dyn FnMut(&SimulationState)>;

/// Owns the current [`SimulationState`] and the subscriber list.
///
/// The store is deliberately not `Sync`: the runner is the single writer,
/// and all reads go through cloned snapshots.
pub struct StateStore {
    state:       SimulationState,
    subscribers: Vec<Subscriber>,
}

impl StateStore {
    /// Wrap an initial snapshot.
    pub fn new(initial: SimulationState) -> Self {
        Self {
            state:       initial,
            subscribers: Vec::new(),
        }
    }

    /// Borrow the current snapshot.
    pub fn current(&self) -> &SimulationState {
        &self.state
    }

    /// Clone the current snapshot for a reader that outlives the borrow.
    pub fn snapshot(&self) -> SimulationState {
        self.state.clone()
    }

    /// Replace the snapshot wholesale and notify every subscriber.
    pub fn replace(&mut self, next: SimulationState) {
        self.state = next;
        for subscriber in &mut self.subscribers {
            subscriber(&self.state);
        }
    }

    /// Compute a replacement from the current snapshot.
    ///
    /// The closure receives the current state by reference and returns the
    /// full next state; notification behaves exactly as in [`replace`].
    ///
    /// [`replace`]: StateStore::replace
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&SimulationState) -> SimulationState,
    {
        let next = f(&self.state);
        self.replace(next);
    }

    /// Register a callback for future replacements.  Subscribers run in
    /// registration order and cannot be removed.
    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
