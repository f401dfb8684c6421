// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{
    AtomicBool, AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicIsize, AtomicU16, AtomicU32,
    AtomicU64, AtomicU8, AtomicUsize, Ordering,
};

/// A field that [`assign_to`](crate::DispatchExt::assign_to) can overwrite through a
/// shared reference.
pub trait WritableField<V>: Send + Sync {
    /// Replaces the current content with `value`.
    fn set(&self, value: V);
}

impl<V: Send> WritableField<V> for Mutex<V> {
    fn set(&self, value: V) {
        *self.lock() = value;
    }
}

impl<V: Send + Sync> WritableField<V> for RwLock<V> {
    fn set(&self, value: V) {
        *RwLock::write(self) = value;
    }
}

macro_rules! atomic_field {
    ($($atomic:ty => $value:ty),* $(,)?) => {
        $(
            impl WritableField<$value> for $atomic {
                fn set(&self, value: $value) {
                    self.store(value, Ordering::SeqCst);
                }
            }
        )*
    };
}

atomic_field! {
    AtomicBool => bool,
    AtomicU8 => u8,
    AtomicU16 => u16,
    AtomicU32 => u32,
    AtomicU64 => u64,
    AtomicUsize => usize,
    AtomicI8 => i8,
    AtomicI16 => i16,
    AtomicI32 => i32,
    AtomicI64 => i64,
    AtomicIsize => isize,
}
