// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Errors specific to subject operations.
///
/// These describe misuse of a subject's lifecycle, not stream failures. They can be
/// converted into [`TetherError`](crate::TetherError) when they need to travel
/// downstream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    /// The subject already delivered its terminal event and cannot accept new items.
    #[error("Subject is closed")]
    Closed,
}
