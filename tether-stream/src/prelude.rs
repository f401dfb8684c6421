// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting the operator traits.
//!
//! ```
//! use tether_stream::prelude::*;
//! ```

pub use crate::any_publisher::{AnyPublisher, EraseExt};
pub use crate::catch_silently::CatchSilentlyExt;
pub use crate::into_stream::IntoStreamExt;
pub use crate::map::MapExt;
pub use crate::with_latest_from::WithLatestFromExt;
pub use tether_core::Publisher;
