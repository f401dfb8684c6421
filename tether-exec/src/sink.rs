// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::marker::PhantomData;
use std::sync::Arc;
use tether_core::{
    AnyCancellable, Cancellable, Demand, Publisher, Subscriber, SubscriptionRef, Terminal,
    Upstream,
};

/// Extension trait subscribing closures to a publisher.
pub trait SinkExt: Publisher + Sized {
    /// Calls `on_value` for every value until the returned handle is cancelled or
    /// dropped. The terminal event is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use parking_lot::Mutex;
    /// use std::sync::Arc;
    /// use tether_core::PassthroughSubject;
    /// use tether_exec::SinkExt;
    ///
    /// let subject = PassthroughSubject::<i32, std::convert::Infallible>::new();
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    ///
    /// let sink = Arc::clone(&seen);
    /// let handle = subject.clone().sink(move |value| sink.lock().push(value));
    ///
    /// subject.next(1).unwrap();
    /// drop(handle);
    /// subject.next(2).unwrap();
    ///
    /// assert_eq!(*seen.lock(), vec![1]);
    /// ```
    fn sink<V>(self, on_value: V) -> AnyCancellable
    where
        V: Fn(Self::Output) + Send + Sync + 'static,
    {
        self.sink_with_completion(|_| {}, on_value)
    }

    /// Like [`sink`](SinkExt::sink), and also calls `on_terminal` once when the
    /// publisher completes or fails.
    ///
    /// `on_terminal` is not called when the subscription is cancelled.
    fn sink_with_completion<C, V>(self, on_terminal: C, on_value: V) -> AnyCancellable
    where
        C: FnOnce(Terminal<Self::Failure>) + Send + 'static,
        V: Fn(Self::Output) + Send + Sync + 'static,
    {
        let sink = Arc::new(ClosureSink {
            upstream: Upstream::new(),
            on_value,
            on_terminal: Mutex::new(Some(on_terminal)),
            _types: PhantomData,
        });
        sink.upstream.request(Demand::Unbounded);
        self.subscribe(Arc::clone(&sink) as _);
        AnyCancellable::new(sink)
    }
}

impl<P: Publisher> SinkExt for P {}

struct ClosureSink<T, E, C, V> {
    upstream: Upstream,
    on_value: V,
    on_terminal: Mutex<Option<C>>,
    _types: PhantomData<fn(T, E)>,
}

impl<T, E, C, V> Subscriber for ClosureSink<T, E, C, V>
where
    C: FnOnce(Terminal<E>) + Send,
    V: Fn(T) + Send + Sync,
{
    type Input = T;
    type Failure = E;

    fn on_subscribe(&self, subscription: SubscriptionRef) {
        self.upstream.attach(subscription);
    }

    fn on_next(&self, value: T) -> Demand {
        (self.on_value)(value);
        Demand::NONE
    }

    fn on_terminal(&self, terminal: Terminal<E>) {
        self.upstream.finish();
        let on_terminal = self.on_terminal.lock().take();
        if let Some(on_terminal) = on_terminal {
            on_terminal(terminal);
        }
    }
}

impl<T, E, C, V> Cancellable for ClosureSink<T, E, C, V>
where
    C: Send,
    V: Send + Sync,
{
    fn cancel(&self) {
        self.upstream.cancel();
        let on_terminal = self.on_terminal.lock().take();
        drop(on_terminal);
    }
}
