// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Demand, SubscriptionRef, Terminal};
use std::sync::Arc;

/// Receiving end of a publisher.
///
/// Publishers call the three callbacks in protocol order:
///
/// 1. `on_subscribe` exactly once, before anything else;
/// 2. `on_next` zero or more times, never beyond the demand the subscriber granted;
/// 3. `on_terminal` at most once, after which nothing else arrives.
///
/// Callbacks take `&self` because a subscriber is shared with the subscription
/// that feeds it. Deliveries to one subscriber never overlap: publishers in this
/// workspace route them through a [`Downstream`](crate::Downstream) gate.
pub trait Subscriber: Send + Sync {
    /// Type of the values received.
    type Input;
    /// Type of the failure that may end the sequence.
    type Failure;

    /// Hands over the subscription. Request demand here to start receiving.
    fn on_subscribe(&self, subscription: SubscriptionRef);

    /// Receives one value and returns any *additional* demand.
    fn on_next(&self, value: Self::Input) -> Demand;

    /// Receives the terminal event.
    fn on_terminal(&self, terminal: Terminal<Self::Failure>);
}

/// Shared handle to a type-erased subscriber.
pub type SubscriberRef<T, E> = Arc<dyn Subscriber<Input = T, Failure = E>>;
