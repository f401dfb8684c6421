// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A named-event bus whose observers are reactive publishers.
//!
//! [`EventCenter::publisher_for`] merges several names into one publisher, so a
//! pipeline can react to any of a set of events without caring which one fired.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod event_center;
pub mod notification;

pub use event_center::EventCenter;
pub use notification::{Notification, NotificationName};
