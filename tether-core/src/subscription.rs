// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Demand;
use std::sync::Arc;

/// One consumer's live attachment to one publisher.
///
/// A subscription owns the right to ask for more values and the right to stop
/// them. Both methods take `&self`: a subscription is shared between the
/// subscriber that requests and cancels, and the publisher that delivers.
///
/// # Contract
///
/// - `request` adds to the outstanding demand; requesting [`Demand::NONE`] is a no-op.
/// - `cancel` may be called any number of times, from any thread, including from
///   inside a delivery to the subscriber. Once it returns, the subscriber receives
///   no further `on_next` or `on_terminal` calls.
pub trait Subscription: Send + Sync {
    /// Signals that the subscriber can accept `demand` more values.
    fn request(&self, demand: Demand);

    /// Stops delivery and releases upstream resources. Idempotent.
    fn cancel(&self);
}

/// Shared handle to a type-erased subscription.
pub type SubscriptionRef = Arc<dyn Subscription>;

/// Subscription handed out by publishers that terminate before any value.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySubscription;

impl Subscription for EmptySubscription {
    fn request(&self, _demand: Demand) {}

    fn cancel(&self) {}
}
