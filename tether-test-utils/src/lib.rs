// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the Tether reactive extensions.
//!
//! This crate is meant for development and testing only.
//!
//! # Key Types
//!
//! ## `TestSubscriber`
//!
//! A subscriber that records everything it receives and lets the test drive
//! demand and cancellation:
//!
//! ```rust
//! use tether_core::{Demand, PassthroughSubject, Publisher};
//! use tether_test_utils::TestSubscriber;
//!
//! let subject = PassthroughSubject::<i32, std::convert::Infallible>::new();
//! let subscriber = TestSubscriber::with_demand(Demand::max(1));
//! subject.subscribe(subscriber.clone());
//!
//! subject.next(1).unwrap();
//! subject.next(2).unwrap(); // no demand left, dropped
//!
//! assert_eq!(subscriber.values(), vec![1]);
//! ```
//!
//! ## `probe`
//!
//! Wraps a publisher and counts the protocol calls flowing through it, which is
//! how tests observe that an operator cancelled its upstream exactly once:
//!
//! ```rust
//! use tether_core::{PassthroughSubject, Publisher};
//! use tether_test_utils::{probe, TestSubscriber};
//!
//! let subject = PassthroughSubject::<i32, std::convert::Infallible>::new();
//! let (probed, stats) = probe(subject);
//! let subscriber = TestSubscriber::new();
//! probed.subscribe(subscriber.clone());
//!
//! subscriber.cancel();
//! subscriber.cancel();
//!
//! assert_eq!(stats.subscribe_count(), 1);
//! assert_eq!(stats.cancel_count(), 2);
//! ```
//!
//! ## Test Fixtures
//!
//! - `Toggle` - a named switch turned on or off
//! - `Tap` - a button tapped a number of times
//! - `TestData` - either of the above, with predefined values in [`test_data`]
//! - `MockReceiver` - a receiver object for dispatch operators
//!
//! # Module Organization
//!
//! - `test_subscriber` - recording subscriber
//! - `probe` - counting publisher wrapper
//! - `mock_receiver` - receiver with callable methods and assignable fields
//! - `test_data`, `toggle`, `tap` - fixtures
//! - `helpers` - async assertion helpers

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod mock_receiver;
pub mod probe;
pub mod tap;
pub mod test_data;
pub mod test_subscriber;
pub mod toggle;

pub use helpers::{assert_no_element_emitted, assert_stream_ended, next_within};
pub use mock_receiver::MockReceiver;
pub use probe::{probe, Probe, ProbeStats};
pub use test_data::TestData;
pub use test_subscriber::TestSubscriber;
