// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod cancellable;
pub mod demand;
pub mod downstream;
pub mod error;
pub mod ownership;
pub mod publisher;
pub mod stream_item;
pub mod subject;
pub mod subject_error;
pub mod subscriber;
pub mod subscription;
pub mod terminal;
pub mod upstream;

pub use self::cancellable::{AnyCancellable, CancelBag, Cancellable};
pub use self::demand::{Demand, DemandTracker};
pub use self::downstream::Downstream;
pub use self::error::{Result, TetherError};
pub use self::ownership::{Ownership, ReceiverHandle};
pub use self::publisher::Publisher;
pub use self::stream_item::StreamItem;
pub use self::subject::{CurrentValueSubject, PassthroughSubject};
pub use self::subject_error::SubjectError;
pub use self::subscriber::{Subscriber, SubscriberRef};
pub use self::subscription::{EmptySubscription, Subscription, SubscriptionRef};
pub use self::terminal::Terminal;
pub use self::upstream::Upstream;
