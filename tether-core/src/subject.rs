// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subjects.
//!
//! Subjects are the imperative entry points of a pipeline: code outside the
//! reactive world pushes values in, and every current subscriber receives them.
//!
//! ## Characteristics
//!
//! - **Hot**: late subscribers do not receive past values.
//! - **Demand-aware**: a subscriber only receives values it asked for. A
//!   [`PassthroughSubject`] drops values a subscriber has no demand for; a
//!   [`CurrentValueSubject`] keeps the latest one and delivers it when demand arrives.
//! - **Thread-safe**: cheap to clone; all clones share the same state.
//! - **Single terminal**: after [`close`](PassthroughSubject::close) or
//!   [`error`](PassthroughSubject::error) every send fails with
//!   [`SubjectError::Closed`](crate::SubjectError::Closed), and late subscribers
//!   receive the stored terminal right away.
//! - **Scoped**: dropping the last handle completes every remaining subscriber.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use tether_core::{
//!     Demand, PassthroughSubject, Publisher, Subscriber, SubscriptionRef, Terminal,
//! };
//!
//! struct Count(AtomicUsize);
//!
//! impl Subscriber for Count {
//!     type Input = i32;
//!     type Failure = std::convert::Infallible;
//!
//!     fn on_subscribe(&self, subscription: SubscriptionRef) {
//!         subscription.request(Demand::Unbounded);
//!     }
//!     fn on_next(&self, _value: i32) -> Demand {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!         Demand::NONE
//!     }
//!     fn on_terminal(&self, _terminal: Terminal<Self::Failure>) {}
//! }
//!
//! let subject = PassthroughSubject::<i32, std::convert::Infallible>::new();
//! let counter = Arc::new(Count(AtomicUsize::new(0)));
//! subject.subscribe(counter.clone());
//!
//! subject.next(1).unwrap();
//! subject.next(2).unwrap();
//! subject.close();
//!
//! assert_eq!(counter.0.load(Ordering::SeqCst), 2);
//! assert!(subject.next(3).is_err());
//! ```

mod current_value;
mod implementation;
mod passthrough;

pub use current_value::CurrentValueSubject;
pub use passthrough::PassthroughSubject;
