// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Tether
//!
//! Push-based reactive stream extensions.
//!
//! ## Overview
//!
//! Tether models a stream as a [`Publisher`] that pushes values to a
//! [`Subscriber`] under demand the subscriber controls, and builds three
//! extensions on top of that contract:
//!
//! - **Latest-value join**: [`with_latest_from`](prelude::WithLatestFromExt::with_latest_from)
//!   pairs every primary value with the most recent secondary value. Only the
//!   primary drives emissions; primary values arriving before any secondary value
//!   are dropped.
//! - **Ownership-aware dispatch**: [`sink_to`](prelude::DispatchExt::sink_to),
//!   [`sink_to_unit`](prelude::DispatchExt::sink_to_unit) and
//!   [`assign_to`](prelude::DispatchExt::assign_to) deliver values to a receiver
//!   object that the subscription holds either strongly or weakly.
//! - **Merged event sources**: [`EventCenter::publisher_for`] observes several
//!   event names through one publisher, subscribing to each distinct name once.
//!
//! ## Crates
//!
//! - `tether-core`: the publisher/subscriber contract, subjects, cancellation
//!   handles and ownership tokens
//! - `tether-stream`: operators, sources and the `futures::Stream` bridges
//! - `tether-exec`: terminal subscribers (`sink`, dispatch, assign)
//! - `tether-notify`: the named-event bus
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tether_rx::prelude::*;
//! use tether_rx::{CurrentValueSubject, Ownership, PassthroughSubject};
//! use tether_test_utils::MockReceiver;
//!
//! let clicks = PassthroughSubject::<&str, std::convert::Infallible>::new();
//! let zoom = CurrentValueSubject::<u32, std::convert::Infallible>::new(100);
//! let log = Arc::new(MockReceiver::<String>::new());
//!
//! let _handle = clicks
//!     .clone()
//!     .with_latest_from_map(zoom.clone(), |button, zoom| format!("{button}@{zoom}%"))
//!     .sink_to(&log, MockReceiver::record, Ownership::Weak);
//!
//! clicks.next("zoom-in").unwrap();
//! zoom.next(125).unwrap();
//! clicks.next("zoom-in").unwrap();
//!
//! assert_eq!(log.captured_values(), vec!["zoom-in@100%", "zoom-in@125%"]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

// Re-export core types
pub use tether_core::{
    AnyCancellable, CancelBag, Cancellable, CurrentValueSubject, Demand, Ownership,
    PassthroughSubject, Publisher, ReceiverHandle, StreamItem, SubjectError, Subscriber,
    SubscriberRef, Subscription, SubscriptionRef, Terminal, TetherError,
};

// Re-export sources and operator types
#[cfg(feature = "runtime-tokio")]
pub use tether_stream::from_stream;
pub use tether_stream::{
    empty, fail, just, merge_many, sequence, AnyPublisher, MergeMany, PublisherStream,
    WithLatestFrom,
};

pub use tether_exec::WritableField;
pub use tether_notify::{EventCenter, Notification, NotificationName};

/// Prelude module for convenient imports
pub mod prelude {
    pub use tether_core::{Ownership, Publisher};
    pub use tether_exec::{DispatchExt, SinkExt};
    pub use tether_stream::prelude::*;
}
