// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Terminal subscribers for push-based reactive streams.
//!
//! Everything here ends a pipeline: it subscribes with unbounded demand and
//! returns an [`AnyCancellable`](tether_core::AnyCancellable) that cancels the
//! subscription when dropped.
//!
//! - [`sink`](SinkExt::sink) / [`sink_with_completion`](SinkExt::sink_with_completion):
//!   closure subscribers
//! - [`sink_to`](DispatchExt::sink_to) / [`sink_to_unit`](DispatchExt::sink_to_unit):
//!   call a method of a receiver object for every value
//! - [`assign_to`](DispatchExt::assign_to): write every value into a field of a
//!   receiver object
//!
//! The dispatch operators take an [`Ownership`](tether_core::Ownership) token that
//! decides whether the subscription keeps its receiver alive.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod dispatch;
pub mod sink;
pub mod writable_field;

// Re-export commonly used types
pub use dispatch::DispatchExt;
pub use sink::SinkExt;
pub use writable_field::WritableField;
