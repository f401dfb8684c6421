// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::WritableField;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;
use tether_core::{
    AnyCancellable, Cancellable, Demand, Ownership, Publisher, ReceiverHandle, Subscriber,
    SubscriptionRef, Terminal, Upstream,
};

/// Extension trait delivering a publisher's values to a receiver object.
///
/// Every operator takes the receiver as `&Arc<R>` plus an [`Ownership`] token:
///
/// - [`Ownership::Strong`]: the subscription keeps the receiver alive until it is
///   cancelled or the publisher terminates.
/// - [`Ownership::Weak`]: the subscription only observes the receiver. Each value
///   upgrades the handle and keeps the resulting `Arc` for the whole call, so the
///   receiver cannot be deallocated mid-call. Once the receiver is gone, the value
///   is dropped without error and the subscription cancels itself.
///
/// The subscription requests unbounded demand. An upstream failure is logged and
/// ends it; completion ends it silently. Either way the receiver handle is released.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tether_core::{Ownership, PassthroughSubject};
/// use tether_exec::DispatchExt;
/// use tether_test_utils::MockReceiver;
///
/// let subject = PassthroughSubject::<i32, std::convert::Infallible>::new();
/// let receiver = Arc::new(MockReceiver::<i32>::new());
///
/// let _handle = subject
///     .clone()
///     .sink_to(&receiver, MockReceiver::record, Ownership::Weak);
///
/// subject.next(7).unwrap();
/// assert_eq!(receiver.captured_values(), vec![7]);
/// ```
pub trait DispatchExt: Publisher + Sized {
    /// Calls `method` on the receiver with every value.
    fn sink_to<R, M>(self, receiver: &Arc<R>, method: M, ownership: Ownership) -> AnyCancellable
    where
        R: Send + Sync + 'static,
        M: Fn(&R, Self::Output) + Send + Sync + 'static,
        Self::Failure: Debug,
    {
        dispatch(self, ReceiverHandle::new(receiver, ownership), method)
    }

    /// Calls `method` on the receiver once per value, discarding the value.
    fn sink_to_unit<R, M>(
        self,
        receiver: &Arc<R>,
        method: M,
        ownership: Ownership,
    ) -> AnyCancellable
    where
        R: Send + Sync + 'static,
        M: Fn(&R) + Send + Sync + 'static,
        Self::Failure: Debug,
    {
        dispatch(
            self,
            ReceiverHandle::new(receiver, ownership),
            move |receiver: &R, _value: Self::Output| method(receiver),
        )
    }

    /// Writes every value into the field of the receiver selected by `field`.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use tether_core::{Ownership, PassthroughSubject};
    /// use tether_exec::DispatchExt;
    /// use tether_test_utils::MockReceiver;
    ///
    /// let subject = PassthroughSubject::<i32, std::convert::Infallible>::new();
    /// let receiver = Arc::new(MockReceiver::<i32>::new());
    ///
    /// let _handle = subject
    ///     .clone()
    ///     .assign_to(|r: &MockReceiver<i32>| &r.field, &receiver, Ownership::Strong);
    ///
    /// subject.next(3).unwrap();
    /// assert_eq!(receiver.field_value(), 3);
    /// ```
    fn assign_to<R, W, A>(self, field: A, receiver: &Arc<R>, ownership: Ownership) -> AnyCancellable
    where
        R: Send + Sync + 'static,
        W: WritableField<Self::Output> + ?Sized + 'static,
        A: Fn(&R) -> &W + Send + Sync + 'static,
        Self::Failure: Debug,
    {
        dispatch(
            self,
            ReceiverHandle::new(receiver, ownership),
            move |receiver: &R, value: Self::Output| field(receiver).set(value),
        )
    }
}

impl<P: Publisher> DispatchExt for P {}

fn dispatch<P, R, M>(publisher: P, handle: ReceiverHandle<R>, method: M) -> AnyCancellable
where
    P: Publisher,
    P::Failure: Debug,
    R: Send + Sync + 'static,
    M: Fn(&R, P::Output) + Send + Sync + 'static,
{
    let sink: Arc<DispatchSink<R, P::Output, P::Failure, M>> = Arc::new(DispatchSink {
        receiver: Mutex::new(Some(handle)),
        upstream: Upstream::new(),
        method,
        _types: PhantomData,
    });
    sink.upstream.request(Demand::Unbounded);
    publisher.subscribe(Arc::clone(&sink) as _);
    AnyCancellable::new(sink)
}

/// Subscriber behind every dispatch operator.
struct DispatchSink<R, T, E, M> {
    /// `None` once the subscription ended.
    receiver: Mutex<Option<ReceiverHandle<R>>>,
    upstream: Upstream,
    method: M,
    _types: PhantomData<fn(T, E)>,
}

impl<R, T, E, M> DispatchSink<R, T, E, M> {
    /// Cancels the upstream first, then lets go of the receiver.
    fn release(&self) {
        self.upstream.cancel();
        let handle = self.receiver.lock().take();
        drop(handle);
    }
}

impl<R, T, E, M> Subscriber for DispatchSink<R, T, E, M>
where
    R: Send + Sync,
    E: Debug,
    M: Fn(&R, T) + Send + Sync,
{
    type Input = T;
    type Failure = E;

    fn on_subscribe(&self, subscription: SubscriptionRef) {
        self.upstream.attach(subscription);
    }

    fn on_next(&self, value: T) -> Demand {
        let resolved = self.receiver.lock().as_ref().map(ReceiverHandle::resolve);
        match resolved {
            Some(Some(receiver)) => (self.method)(&receiver, value),
            Some(None) => {
                crate::trace!("dispatch: receiver was released; cancelling the subscription");
                self.release();
            }
            None => {}
        }
        Demand::NONE
    }

    fn on_terminal(&self, terminal: Terminal<E>) {
        self.upstream.finish();
        if let Terminal::Failed(error) = terminal {
            crate::warn!("dispatch: upstream failed: {error:?}");
        }
        let handle = self.receiver.lock().take();
        drop(handle);
    }
}

impl<R, T, E, M> Cancellable for DispatchSink<R, T, E, M>
where
    R: Send + Sync,
    M: Send + Sync,
{
    fn cancel(&self) {
        self.release();
    }
}
