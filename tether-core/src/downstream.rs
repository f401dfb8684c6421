// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Delivery gate between a subscription and its subscriber.
//!
//! Every publisher and operator in the workspace keeps its subscriber inside a
//! [`Downstream`]. The gate gives the subscription protocol its guarantees:
//!
//! - **Serialized delivery**: a re-entrant lock is held for the duration of each
//!   callback, so deliveries arriving from several threads (for example from the
//!   inputs of a merge) never overlap.
//! - **Silent cancellation**: [`Downstream::cancel`] closes the gate with an atomic
//!   flag that every delivery checks once it holds the lock, so no delivery starts
//!   after it returns. It never waits for the lock: a delivery already running on
//!   another thread finishes, and whoever holds the gate releases the subscriber
//!   on the way out. Cancelling while inside a delivery of another gate therefore
//!   cannot deadlock against a thread that delivers in the opposite order.
//! - **Single terminal**: [`Downstream::finish`] takes the subscriber out before
//!   calling `on_terminal`, so a second terminal, or a value racing with the
//!   terminal, finds the gate empty.
//!
//! Subscriber handles are always released after the lock, so a subscriber whose
//! drop tears down other subscriptions never runs while this gate is held.

use crate::{Demand, Subscriber, SubscriberRef, SubscriptionRef, Terminal};
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

type Slot<T, E> = RefCell<Option<SubscriberRef<T, E>>>;

/// Holds a subscriber and serializes every delivery to it.
pub struct Downstream<T, E> {
    gate: ReentrantMutex<Slot<T, E>>,
    closed: AtomicBool,
}

impl<T, E> Downstream<T, E> {
    /// Creates a gate around `subscriber`.
    pub fn new(subscriber: SubscriberRef<T, E>) -> Self {
        Self {
            gate: ReentrantMutex::new(RefCell::new(Some(subscriber))),
            closed: AtomicBool::new(false),
        }
    }

    /// Hands `subscription` to the subscriber.
    pub fn on_subscribe(&self, subscription: SubscriptionRef) {
        self.deliver(|subscriber| subscriber.on_subscribe(subscription));
    }

    /// Delivers one value.
    ///
    /// Returns the additional demand reported by the subscriber, or `None` when the
    /// gate was already cancelled or finished and the value was discarded.
    pub fn send(&self, value: T) -> Option<Demand> {
        self.deliver(|subscriber| subscriber.on_next(value))
    }

    /// Delivers the terminal event and closes the gate.
    ///
    /// Returns `false` if the gate was already closed, in which case nothing is
    /// delivered.
    pub fn finish(&self, terminal: Terminal<E>) -> bool {
        if self.closed.load(Ordering::SeqCst) {
            return false;
        }
        let gate = self.gate.lock();
        let subscriber = gate.borrow_mut().take();
        if self.closed.swap(true, Ordering::SeqCst) {
            drop(gate);
            return false;
        }
        if let Some(subscriber) = subscriber.as_deref() {
            subscriber.on_terminal(terminal);
        }
        drop(gate);
        subscriber.is_some()
    }

    /// Closes the gate without a terminal event.
    ///
    /// Returns `true` only for the call that actually closed it. Never blocks.
    pub fn cancel(&self) -> bool {
        if self.closed.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.release();
        true
    }

    /// Returns `true` while the subscriber can still receive events.
    pub fn is_active(&self) -> bool {
        !self.closed.load(Ordering::SeqCst)
    }

    fn deliver<R>(&self, f: impl FnOnce(&dyn Subscriber<Input = T, Failure = E>) -> R) -> Option<R> {
        let gate = self.gate.lock();
        if self.closed.load(Ordering::SeqCst) {
            let released = gate.borrow_mut().take();
            drop(gate);
            drop(released);
            return None;
        }
        let subscriber = gate.borrow().clone();
        let result = subscriber.as_deref().map(f);
        drop(gate);
        drop(subscriber);
        // A cancel that found the gate busy leaves the release to its holder.
        if self.closed.load(Ordering::SeqCst) {
            self.release();
        }
        result
    }

    /// Drops the subscriber if the gate is free; otherwise its holder will.
    fn release(&self) {
        if let Some(gate) = self.gate.try_lock() {
            let subscriber = gate.borrow_mut().take();
            drop(gate);
            drop(subscriber);
        }
    }
}
