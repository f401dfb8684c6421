// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    Demand, DemandTracker, Downstream, EmptySubscription, SubjectError, SubscriberRef,
    Subscription, SubscriptionRef, Terminal,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct SubjectState<T, E> {
    terminal: Option<Terminal<E>>,
    subscriptions: Vec<Arc<SubjectSubscription<T, E>>>,
    current: Option<T>,
}

/// State shared by every clone of a subject.
pub(super) struct SubjectCore<T, E> {
    state: Mutex<SubjectState<T, E>>,
    replay_latest: bool,
}

impl<T, E> SubjectCore<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// A core without a current value; values nobody asked for are dropped.
    pub(super) fn passthrough() -> Self {
        Self::with_state(None, false)
    }

    /// A core holding `initial`, replayed to every new subscriber.
    pub(super) fn current_value(initial: T) -> Self {
        Self::with_state(Some(initial), true)
    }

    fn with_state(current: Option<T>, replay_latest: bool) -> Self {
        Self {
            state: Mutex::new(SubjectState {
                terminal: None,
                subscriptions: Vec::new(),
                current,
            }),
            replay_latest,
        }
    }

    pub(super) fn subscribe(&self, subscriber: SubscriberRef<T, E>) {
        let downstream = Downstream::new(subscriber);

        let mut state = self.state.lock();
        if let Some(terminal) = state.terminal.clone() {
            drop(state);
            downstream.on_subscribe(Arc::new(EmptySubscription));
            downstream.finish(terminal);
            return;
        }

        let pending = if self.replay_latest {
            state.current.clone()
        } else {
            None
        };
        let subscription = Arc::new(SubjectSubscription::new(
            downstream,
            pending,
            self.replay_latest,
        ));
        state.subscriptions.retain(|s| !s.is_terminated());
        state.subscriptions.push(Arc::clone(&subscription));
        drop(state);

        subscription.start();
    }

    pub(super) fn send_value(&self, value: T) -> Result<(), SubjectError> {
        let targets = {
            let mut state = self.state.lock();
            if state.terminal.is_some() {
                return Err(SubjectError::Closed);
            }
            if self.replay_latest {
                state.current = Some(value.clone());
            }
            state.subscriptions.retain(|s| !s.is_terminated());
            state.subscriptions.clone()
        };

        for subscription in targets {
            subscription.offer(value.clone());
        }
        Ok(())
    }

    pub(super) fn terminate(&self, terminal: Terminal<E>) -> Result<(), SubjectError> {
        let targets = {
            let mut state = self.state.lock();
            if state.terminal.is_some() {
                return Err(SubjectError::Closed);
            }
            state.terminal = Some(terminal.clone());
            std::mem::take(&mut state.subscriptions)
        };

        for subscription in targets {
            subscription.terminate(terminal.clone());
        }
        Ok(())
    }

    pub(super) fn is_closed(&self) -> bool {
        self.state.lock().terminal.is_some()
    }

    pub(super) fn subscriber_count(&self) -> usize {
        self.state
            .lock()
            .subscriptions
            .iter()
            .filter(|s| !s.is_terminated())
            .count()
    }

    pub(super) fn current(&self) -> Option<T> {
        self.state.lock().current.clone()
    }
}

impl<T, E> Drop for SubjectCore<T, E> {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if state.terminal.is_some() {
            return;
        }
        for subscription in std::mem::take(&mut state.subscriptions) {
            subscription.terminate(Terminal::Completed);
        }
    }
}

struct Delivery<T, E> {
    demand: DemandTracker,
    pending: Option<T>,
    subscribed: bool,
    deferred_terminal: Option<Terminal<E>>,
}

/// One subscriber's attachment to a subject.
struct SubjectSubscription<T, E> {
    downstream: Downstream<T, E>,
    delivery: Mutex<Delivery<T, E>>,
    replay_latest: bool,
    // Read while pruning; checking the gate there could wait on a delivery.
    terminated: AtomicBool,
}

impl<T, E> SubjectSubscription<T, E> {
    fn new(downstream: Downstream<T, E>, pending: Option<T>, replay_latest: bool) -> Self {
        Self {
            downstream,
            delivery: Mutex::new(Delivery {
                demand: DemandTracker::new(),
                pending,
                subscribed: false,
                deferred_terminal: None,
            }),
            replay_latest,
            terminated: AtomicBool::new(false),
        }
    }

    fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    /// Delivers the subscription, then any terminal that raced with it.
    fn start(self: &Arc<Self>)
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        let handle: SubscriptionRef = Arc::clone(self) as SubscriptionRef;
        self.downstream.on_subscribe(handle);

        let deferred = {
            let mut delivery = self.delivery.lock();
            delivery.subscribed = true;
            delivery.deferred_terminal.take()
        };
        if let Some(terminal) = deferred {
            self.downstream.finish(terminal);
        }
    }

    fn offer(&self, value: T) {
        let ready = {
            let mut delivery = self.delivery.lock();
            if delivery.demand.consume_one() {
                Some(value)
            } else {
                if self.replay_latest {
                    delivery.pending = Some(value);
                }
                None
            }
        };

        if let Some(value) = ready {
            self.deliver(value);
        }
    }

    fn deliver(&self, value: T) {
        if let Some(additional) = self.downstream.send(value) {
            self.add_demand(additional);
        }
    }

    fn add_demand(&self, demand: Demand) {
        if !demand.has_demand() {
            return;
        }

        let replay = {
            let mut delivery = self.delivery.lock();
            delivery.demand.request(demand);
            if delivery.pending.is_some() && delivery.demand.consume_one() {
                delivery.pending.take()
            } else {
                None
            }
        };

        if let Some(value) = replay {
            self.deliver(value);
        }
    }

    fn terminate(&self, terminal: Terminal<E>) {
        self.terminated.store(true, Ordering::Release);
        {
            let mut delivery = self.delivery.lock();
            delivery.pending = None;
            if !delivery.subscribed {
                delivery.deferred_terminal = Some(terminal);
                return;
            }
        }
        self.downstream.finish(terminal);
    }
}

impl<T, E> Subscription for SubjectSubscription<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn request(&self, demand: Demand) {
        if !self.is_terminated() {
            self.add_demand(demand);
        }
    }

    fn cancel(&self) {
        self.terminated.store(true, Ordering::Release);
        self.delivery.lock().pending = None;
        self.downstream.cancel();
    }
}
