// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Demand, SubscriptionRef};
use parking_lot::Mutex;
use std::sync::Arc;

enum State {
    /// Not attached yet; demand requested so far is buffered.
    Pending(Demand),
    Active(SubscriptionRef),
    Cancelled,
    /// The upstream delivered its terminal event.
    Finished,
}

/// Slot for the subscription an operator or subscriber receives from upstream.
///
/// The slot resolves the races between `on_subscribe`, `request` and `cancel`:
///
/// - demand requested before the subscription arrives is flushed on [`attach`](Upstream::attach);
/// - a subscription attached after [`cancel`](Upstream::cancel) is cancelled on the spot;
/// - `cancel` reaches the upstream exactly once, however often it is called;
/// - after [`finish`](Upstream::finish) the handle is dropped without cancelling.
///
/// Upstream calls are always made after the slot's lock is released.
pub struct Upstream {
    state: Mutex<State>,
}

impl Upstream {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::Pending(Demand::NONE)),
        }
    }

    /// Stores the subscription received in `on_subscribe`.
    ///
    /// Returns `false` if the subscription was rejected and cancelled, either
    /// because the slot was cancelled first or because one was already attached.
    pub fn attach(&self, subscription: SubscriptionRef) -> bool {
        let buffered = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            match state {
                State::Pending(demand) => {
                    let demand = *demand;
                    *state = State::Active(Arc::clone(&subscription));
                    Some(demand)
                }
                State::Active(_) => {
                    crate::warn!("upstream: received a second subscription; cancelling it");
                    None
                }
                State::Cancelled | State::Finished => None,
            }
        };

        match buffered {
            Some(demand) => {
                if demand.has_demand() {
                    subscription.request(demand);
                }
                true
            }
            None => {
                subscription.cancel();
                false
            }
        }
    }

    /// Forwards `demand` upstream, or buffers it until a subscription is attached.
    pub fn request(&self, demand: Demand) {
        if !demand.has_demand() {
            return;
        }

        let active = {
            let mut state = self.state.lock();
            match &mut *state {
                State::Pending(pending) => {
                    *pending = *pending + demand;
                    None
                }
                State::Active(subscription) => Some(Arc::clone(subscription)),
                State::Cancelled | State::Finished => None,
            }
        };

        if let Some(subscription) = active {
            subscription.request(demand);
        }
    }

    /// Cancels the upstream subscription.
    ///
    /// Returns `true` only for the call that performed the cancellation.
    pub fn cancel(&self) -> bool {
        let previous = {
            let mut state = self.state.lock();
            if matches!(*state, State::Cancelled | State::Finished) {
                return false;
            }
            std::mem::replace(&mut *state, State::Cancelled)
        };

        if let State::Active(subscription) = previous {
            subscription.cancel();
        }
        true
    }

    /// Records that the upstream terminated and drops the handle without cancelling it.
    ///
    /// Returns `false` if the slot was already cancelled or finished.
    pub fn finish(&self) -> bool {
        let previous = {
            let mut state = self.state.lock();
            if matches!(*state, State::Cancelled | State::Finished) {
                return false;
            }
            std::mem::replace(&mut *state, State::Finished)
        };
        drop(previous);
        true
    }

    /// Returns `true` once [`cancel`](Upstream::cancel) has taken effect.
    pub fn is_cancelled(&self) -> bool {
        matches!(*self.state.lock(), State::Cancelled)
    }

    /// Returns `true` while a subscription is attached and live.
    pub fn is_active(&self) -> bool {
        matches!(*self.state.lock(), State::Active(_))
    }
}

impl Default for Upstream {
    fn default() -> Self {
        Self::new()
    }
}
