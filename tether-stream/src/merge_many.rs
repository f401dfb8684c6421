// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fan-in of any number of publishers with the same output and failure types.
//!
//! Values are forwarded in the order they are delivered to the merge. Deliveries
//! from different threads are serialized by the downstream gate, so the
//! subscriber never observes overlapping calls.
//!
//! Upstreams are treated as hot sources: they are requested without limit, and a
//! value arriving while the downstream has no outstanding demand is dropped.

use parking_lot::Mutex;
use std::sync::Arc;
use tether_core::{
    Demand, DemandTracker, Downstream, Publisher, Subscriber, SubscriberRef, Subscription,
    SubscriptionRef, Terminal, Upstream,
};

/// Merges `publishers` into one publisher.
///
/// The result completes once every upstream has completed; an empty list completes
/// immediately. The first failure is forwarded and cancels the remaining upstreams.
///
/// # Examples
///
/// ```rust
/// use tether_core::{PassthroughSubject, Publisher};
/// use tether_stream::merge_many;
/// use tether_test_utils::TestSubscriber;
///
/// let a = PassthroughSubject::<i32, std::convert::Infallible>::new();
/// let b = PassthroughSubject::<i32, std::convert::Infallible>::new();
/// let results = TestSubscriber::<i32, std::convert::Infallible>::new();
///
/// merge_many(vec![a.clone(), b.clone()]).subscribe(results.clone());
///
/// a.next(1).unwrap();
/// b.next(2).unwrap();
/// a.next(3).unwrap();
///
/// assert_eq!(results.values(), vec![1, 2, 3]);
/// ```
pub fn merge_many<I, P>(publishers: I) -> MergeMany<P>
where
    I: IntoIterator<Item = P>,
    P: Publisher,
{
    MergeMany {
        upstreams: publishers.into_iter().collect(),
    }
}

/// Publisher returned by [`merge_many`].
pub struct MergeMany<P> {
    upstreams: Vec<P>,
}

impl<P> MergeMany<P> {
    /// Number of merged upstreams.
    pub fn len(&self) -> usize {
        self.upstreams.len()
    }

    /// Returns `true` if nothing is merged.
    pub fn is_empty(&self) -> bool {
        self.upstreams.is_empty()
    }
}

impl<P: Publisher> Publisher for MergeMany<P> {
    type Output = P::Output;
    type Failure = P::Failure;

    fn subscribe(&self, subscriber: SubscriberRef<P::Output, P::Failure>) {
        let merge = Arc::new(MergeInner::new(subscriber, self.upstreams.len()));
        merge
            .downstream
            .on_subscribe(Arc::new(MergeSubscription(Arc::clone(&merge))));

        if self.upstreams.is_empty() {
            merge.downstream.finish(Terminal::Completed);
            return;
        }

        for (index, publisher) in self.upstreams.iter().enumerate() {
            if merge.is_terminated() {
                break;
            }
            merge.upstreams[index].request(Demand::Unbounded);
            publisher.subscribe(Arc::new(MergeSubscriber {
                merge: Arc::clone(&merge),
                index,
            }));
        }
    }
}

struct MergeState {
    demand: DemandTracker,
    active: usize,
    terminated: bool,
}

struct MergeInner<T, E> {
    downstream: Downstream<T, E>,
    upstreams: Vec<Upstream>,
    state: Mutex<MergeState>,
}

impl<T, E> MergeInner<T, E> {
    fn new(subscriber: SubscriberRef<T, E>, count: usize) -> Self {
        Self {
            downstream: Downstream::new(subscriber),
            upstreams: (0..count).map(|_| Upstream::new()).collect(),
            state: Mutex::new(MergeState {
                demand: DemandTracker::new(),
                active: count,
                terminated: false,
            }),
        }
    }

    fn is_terminated(&self) -> bool {
        self.state.lock().terminated
    }

    fn on_value(&self, value: T) {
        {
            let mut state = self.state.lock();
            if state.terminated {
                return;
            }
            if !state.demand.consume_one() {
                crate::trace!("merge_many: dropping value without downstream demand");
                return;
            }
        }

        if let Some(additional) = self.downstream.send(value) {
            if additional.has_demand() {
                self.state.lock().demand.request(additional);
            }
        }
    }

    fn on_terminal(&self, index: usize, terminal: Terminal<E>) {
        self.upstreams[index].finish();

        match terminal {
            Terminal::Completed => {
                let all_done = {
                    let mut state = self.state.lock();
                    state.active = state.active.saturating_sub(1);
                    let done = state.active == 0 && !state.terminated;
                    if done {
                        state.terminated = true;
                    }
                    done
                };
                if all_done {
                    self.downstream.finish(Terminal::Completed);
                }
            }
            Terminal::Failed(error) => {
                {
                    let mut state = self.state.lock();
                    if state.terminated {
                        return;
                    }
                    state.terminated = true;
                }
                self.downstream.finish(Terminal::Failed(error));
                self.cancel_upstreams();
            }
        }
    }

    fn cancel(&self) {
        self.downstream.cancel();
        self.state.lock().terminated = true;
        self.cancel_upstreams();
    }

    fn cancel_upstreams(&self) {
        for upstream in &self.upstreams {
            upstream.cancel();
        }
    }
}

impl<T, E> Drop for MergeInner<T, E> {
    fn drop(&mut self) {
        self.cancel_upstreams();
    }
}

struct MergeSubscription<T, E>(Arc<MergeInner<T, E>>);

impl<T, E> Subscription for MergeSubscription<T, E> {
    fn request(&self, demand: Demand) {
        self.0.state.lock().demand.request(demand);
    }

    fn cancel(&self) {
        self.0.cancel();
    }
}

struct MergeSubscriber<T, E> {
    merge: Arc<MergeInner<T, E>>,
    index: usize,
}

impl<T, E> Subscriber for MergeSubscriber<T, E> {
    type Input = T;
    type Failure = E;

    fn on_subscribe(&self, subscription: SubscriptionRef) {
        self.merge.upstreams[self.index].attach(subscription);
    }

    fn on_next(&self, value: T) -> Demand {
        self.merge.on_value(value);
        Demand::NONE
    }

    fn on_terminal(&self, terminal: Terminal<E>) {
        self.merge.on_terminal(self.index, terminal);
    }
}
