// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::SubscriberRef;
use std::sync::Arc;

/// A push-based producer of a typed sequence of values.
///
/// Each call to [`subscribe`](Publisher::subscribe) starts an independent
/// sequence. The publisher must hand the subscriber a live subscription through
/// `on_subscribe` synchronously, before delivering any value, and must end the
/// sequence with at most one terminal event.
///
/// Operators built on top of a publisher are publishers themselves, so they
/// compose without special cases. Failure types are part of the type: combining
/// publishers with different failures is rejected at compile time.
pub trait Publisher: Send + Sync {
    /// Type of the values produced.
    type Output: Send + 'static;
    /// Type of the failure that may end the sequence.
    type Failure: Send + 'static;

    /// Attaches `subscriber` and starts a new sequence for it.
    fn subscribe(&self, subscriber: SubscriberRef<Self::Output, Self::Failure>);
}

impl<P> Publisher for Arc<P>
where
    P: Publisher + ?Sized,
{
    type Output = P::Output;
    type Failure = P::Failure;

    fn subscribe(&self, subscriber: SubscriberRef<Self::Output, Self::Failure>) {
        (**self).subscribe(subscriber);
    }
}
