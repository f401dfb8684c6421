// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operators and sources for push-based reactive streams.
//!
//! Every operator consumes one or more [`Publisher`]s and is itself a
//! `Publisher`, so operators compose freely. Each operator is provided through an
//! extension trait implemented for all publishers.
//!
//! ## Operator Categories
//!
//! ### Combination Operators
//!
//! - **[`with_latest_from`](WithLatestFromExt::with_latest_from)**: Samples the latest
//!   secondary value whenever the primary emits
//! - **[`merge_many`]**: Fans several publishers into one
//!
//! ### Transformation Operators
//!
//! - **[`map`](MapExt::map)**: Transforms each value
//! - **[`catch_silently`](CatchSilentlyExt::catch_silently)**: Turns a failure into completion
//! - **[`erase`](EraseExt::erase)**: Hides the concrete publisher type
//!
//! ### Sources and Bridges
//!
//! - **[`just`]**, **[`sequence`]**, **[`empty`]**, **[`fail`]**: Cold, demand-driven sources
//! - **`from_stream`** (feature `runtime-tokio`): Publishes an async stream
//! - **[`into_stream`](IntoStreamExt::into_stream)**: Consumes a publisher as an async stream
//!
//! # Protocol
//!
//! Operators keep the subscription contract intact: nothing is delivered before
//! `on_subscribe`, at most one terminal event is delivered, and once `cancel`
//! returns no further event reaches the subscriber. Cancelling an operator's
//! subscription cancels every upstream subscription it created, exactly once.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod any_publisher;
pub mod catch_silently;
#[cfg(feature = "runtime-tokio")]
pub mod from_stream;
pub mod into_stream;
pub mod map;
pub mod merge_many;
pub mod prelude;
pub mod sources;
pub mod with_latest_from;

// Re-export commonly used types
pub use any_publisher::{AnyPublisher, EraseExt};
pub use catch_silently::{CatchSilently, CatchSilentlyExt};
#[cfg(feature = "runtime-tokio")]
pub use from_stream::{from_stream, FromStream};
pub use into_stream::{IntoStreamExt, PublisherStream};
pub use map::{Map, MapExt};
pub use merge_many::{merge_many, MergeMany};
pub use sources::{empty, fail, just, sequence, Empty, Fail, Just, Sequence};
pub use tether_core::Publisher;
pub use with_latest_from::{WithLatestFrom, WithLatestFromExt};
