// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::task::{Context, Poll};
use futures::Stream;
use futures_channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use pin_project::pin_project;
use std::pin::Pin;
use std::sync::Arc;
use tether_core::{
    AnyCancellable, Cancellable, Demand, Publisher, StreamItem, Subscriber, SubscriptionRef,
    Terminal, Upstream,
};

/// Extension trait bridging a publisher into a `futures::Stream`.
pub trait IntoStreamExt: Publisher + Sized {
    /// Subscribes with unbounded demand and yields every event as a [`StreamItem`].
    ///
    /// A failure is yielded as `StreamItem::Error` and ends the stream; completion
    /// ends it without an item. Dropping the stream cancels the subscription.
    fn into_stream(self) -> PublisherStream<Self::Output, Self::Failure> {
        let (sender, receiver) = mpsc::unbounded();
        let bridge = Arc::new(ChannelSubscriber {
            sender,
            upstream: Upstream::new(),
        });
        bridge.upstream.request(Demand::Unbounded);
        self.subscribe(Arc::clone(&bridge) as _);

        PublisherStream {
            receiver,
            _subscription: AnyCancellable::new(bridge),
        }
    }
}

impl<P: Publisher> IntoStreamExt for P {}

/// Stream returned by [`into_stream`](IntoStreamExt::into_stream).
#[pin_project]
pub struct PublisherStream<T, E> {
    #[pin]
    receiver: UnboundedReceiver<StreamItem<T, E>>,
    _subscription: AnyCancellable,
}

impl<T, E> Stream for PublisherStream<T, E> {
    type Item = StreamItem<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().receiver.poll_next(cx)
    }
}

struct ChannelSubscriber<T, E> {
    sender: UnboundedSender<StreamItem<T, E>>,
    upstream: Upstream,
}

impl<T: Send, E: Send> Subscriber for ChannelSubscriber<T, E> {
    type Input = T;
    type Failure = E;

    fn on_subscribe(&self, subscription: SubscriptionRef) {
        self.upstream.attach(subscription);
    }

    fn on_next(&self, value: T) -> Demand {
        if self.sender.unbounded_send(StreamItem::Value(value)).is_err() {
            self.upstream.cancel();
        }
        Demand::NONE
    }

    fn on_terminal(&self, terminal: Terminal<E>) {
        self.upstream.finish();
        if let Terminal::Failed(error) = terminal {
            let _ = self.sender.unbounded_send(StreamItem::Error(error));
        }
        self.sender.close_channel();
    }
}

impl<T: Send, E: Send> Cancellable for ChannelSubscriber<T, E> {
    fn cancel(&self) {
        self.upstream.cancel();
        self.sender.close_channel();
    }
}
