// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// A receiver object for dispatch and assign operators.
///
/// `record` and `ping` are the one- and zero-argument targets of `sink_to` and
/// `sink_to_unit`; `field` and `hits` are targets for `assign_to`.
#[derive(Debug, Default)]
pub struct MockReceiver<T> {
    calls: AtomicUsize,
    captured: Mutex<Vec<T>>,
    pub field: Mutex<T>,
    pub hits: AtomicU64,
}

impl<T: Default> MockReceiver<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> MockReceiver<T> {
    /// A receiver whose `field` starts at `initial`, for types without a default.
    pub fn with_field(initial: T) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            captured: Mutex::new(Vec::new()),
            field: Mutex::new(initial),
            hits: AtomicU64::new(0),
        }
    }

    /// Captures `value`.
    pub fn record(&self, value: T) {
        self.captured.lock().push(value);
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    /// Counts a call without a value.
    pub fn ping(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn captured_values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.captured.lock().clone()
    }

    pub fn field_value(&self) -> T
    where
        T: Clone,
    {
        self.field.lock().clone()
    }
}
