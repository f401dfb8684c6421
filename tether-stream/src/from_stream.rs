// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use event_listener::Event;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tether_core::{
    Demand, DemandTracker, Downstream, Publisher, StreamItem, SubscriberRef, Subscription,
    Terminal,
};

/// A source backed by an async stream.
///
/// Every subscription calls `factory` for a fresh stream and pulls it on a spawned
/// tokio task. The task waits for demand before pulling each item, so a slow
/// subscriber is never flooded. A `StreamItem::Error` fails the subscription, the
/// end of the stream completes it, and cancelling stops the task at its next await.
///
/// Subscribing outside a tokio runtime logs a warning and leaves the subscriber
/// without events after `on_subscribe`.
///
/// # Examples
///
/// ```rust
/// use futures::stream;
/// use tether_core::StreamItem;
/// use tether_stream::{from_stream, IntoStreamExt};
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() {
/// let source = from_stream(|| {
///     stream::iter(vec![1, 2, 3]).map(StreamItem::<i32, std::convert::Infallible>::Value)
/// });
///
/// let values: Vec<_> = source.into_stream().map(|item| item.unwrap()).collect().await;
/// assert_eq!(values, vec![1, 2, 3]);
/// # }
/// ```
pub fn from_stream<F, S>(factory: F) -> FromStream<F>
where
    F: Fn() -> S + Send + Sync + 'static,
    S: Stream + Send + 'static,
{
    FromStream { factory }
}

/// Publisher returned by [`from_stream`].
pub struct FromStream<F> {
    factory: F,
}

impl<F, S, T, E> Publisher for FromStream<F>
where
    F: Fn() -> S + Send + Sync + 'static,
    S: Stream<Item = StreamItem<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;
    type Failure = E;

    fn subscribe(&self, subscriber: SubscriberRef<T, E>) {
        let subscription = Arc::new(StreamSubscription {
            downstream: Downstream::new(subscriber),
            demand: Mutex::new(DemandTracker::new()),
            cancelled: AtomicBool::new(false),
            wake: Event::new(),
        });
        subscription
            .downstream
            .on_subscribe(Arc::clone(&subscription) as Arc<dyn Subscription>);
        if subscription.is_cancelled() {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(pump((self.factory)(), subscription));
            }
            Err(_) => {
                crate::warn!("from_stream: subscribed outside a tokio runtime; nothing will be emitted");
                subscription.downstream.cancel();
            }
        }
    }
}

async fn pump<S, T, E>(stream: S, subscription: Arc<StreamSubscription<T, E>>)
where
    S: Stream<Item = StreamItem<T, E>>,
{
    let mut stream = Box::pin(stream);
    loop {
        if !subscription.wait_for_demand().await {
            return;
        }

        let item = tokio::select! {
            biased;
            () = subscription.cancelled() => return,
            item = stream.next() => item,
        };

        match item {
            Some(StreamItem::Value(value)) => {
                match subscription.downstream.send(value) {
                    Some(additional) => subscription.add_demand(additional),
                    None => return,
                }
            }
            Some(StreamItem::Error(error)) => {
                subscription.downstream.finish(Terminal::Failed(error));
                return;
            }
            None => {
                subscription.downstream.finish(Terminal::Completed);
                return;
            }
        }
    }
}

struct StreamSubscription<T, E> {
    downstream: Downstream<T, E>,
    demand: Mutex<DemandTracker>,
    cancelled: AtomicBool,
    wake: Event,
}

impl<T, E> StreamSubscription<T, E> {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn add_demand(&self, demand: Demand) {
        if demand.has_demand() {
            self.demand.lock().request(demand);
            self.wake.notify(usize::MAX);
        }
    }

    /// Consumes one unit of demand, waiting for it if necessary.
    ///
    /// Returns `false` once the subscription is cancelled.
    async fn wait_for_demand(&self) -> bool {
        loop {
            if self.is_cancelled() {
                return false;
            }
            if self.demand.lock().consume_one() {
                return true;
            }

            let listener = self.wake.listen();
            if self.is_cancelled() {
                return false;
            }
            if self.demand.lock().consume_one() {
                return true;
            }
            listener.await;
        }
    }

    async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            let listener = self.wake.listen();
            if self.is_cancelled() {
                return;
            }
            listener.await;
        }
    }
}

impl<T, E> Subscription for StreamSubscription<T, E>
where
    T: Send,
    E: Send,
{
    fn request(&self, demand: Demand) {
        self.add_demand(demand);
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.wake.notify(usize::MAX);
        self.downstream.cancel();
    }
}
