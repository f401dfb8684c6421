// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scoped ownership of subscriptions.
//!
//! Terminal operators return an [`AnyCancellable`]. Dropping it cancels the
//! subscription on every exit path, unwinding included, so the
//! lifetime of a pipeline is the lifetime of its handle. Keep handles alive by
//! storing them, typically in a [`CancelBag`] owned by whatever consumes the values.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Something that can be cancelled. Implementations must be idempotent.
pub trait Cancellable: Send + Sync {
    /// Cancels the activity.
    fn cancel(&self);
}

struct CancelFn(Mutex<Option<Box<dyn FnOnce() + Send>>>);

impl Cancellable for CancelFn {
    fn cancel(&self) {
        let action = self.0.lock().take();
        if let Some(action) = action {
            action();
        }
    }
}

/// Type-erased cancellation handle that cancels when dropped.
#[must_use = "dropping an AnyCancellable cancels the subscription immediately"]
pub struct AnyCancellable {
    inner: Arc<dyn Cancellable>,
}

impl AnyCancellable {
    /// Wraps a shared cancellable.
    pub fn new(inner: Arc<dyn Cancellable>) -> Self {
        Self { inner }
    }

    /// Creates a handle that runs `action` once, on the first cancellation.
    pub fn from_fn(action: impl FnOnce() + Send + 'static) -> Self {
        Self::new(Arc::new(CancelFn(Mutex::new(Some(Box::new(action))))))
    }

    /// Cancels now. Further calls, and the eventual drop, have no effect.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Moves the handle into `bag`, tying the subscription to the bag's lifetime.
    pub fn store(self, bag: &CancelBag) {
        bag.insert(self);
    }
}

impl Drop for AnyCancellable {
    fn drop(&mut self) {
        self.inner.cancel();
    }
}

impl fmt::Debug for AnyCancellable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyCancellable").finish_non_exhaustive()
    }
}

/// A collection of cancellation handles, all cancelled when the bag is dropped.
#[derive(Default)]
pub struct CancelBag {
    items: Mutex<Vec<AnyCancellable>>,
}

impl CancelBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handle to the bag.
    pub fn insert(&self, cancellable: AnyCancellable) {
        self.items.lock().push(cancellable);
    }

    /// Number of handles currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Returns `true` if the bag holds no handles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Cancels and removes every handle.
    pub fn cancel_all(&self) {
        let items = std::mem::take(&mut *self.items.lock());
        // Dropping cancels; done outside the lock so a handle may touch the bag.
        drop(items);
    }
}

impl fmt::Debug for CancelBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelBag").field("len", &self.len()).finish()
    }
}
