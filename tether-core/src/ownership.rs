// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ownership tokens for receiver-bound operators.
//!
//! Dispatch operators deliver values to a method or field of a receiver object.
//! The [`Ownership`] chosen at construction decides whether the subscription keeps
//! that receiver alive:
//!
//! - [`Ownership::Strong`]: the subscription owns an `Arc` to the receiver, exactly as
//!   if the receiver itself held the subscription.
//! - [`Ownership::Weak`]: the subscription only observes the receiver. Each delivery
//!   resolves the handle first; once the receiver is gone the delivery is dropped.
//!
//! ```
//! use std::sync::Arc;
//! use tether_core::{Ownership, ReceiverHandle};
//!
//! let receiver = Arc::new(String::from("label"));
//! let handle = ReceiverHandle::new(&receiver, Ownership::Weak);
//! assert!(handle.resolve().is_some());
//!
//! drop(receiver);
//! assert!(handle.resolve().is_none());
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

/// Retention strategy for a receiver object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// Retain the receiver for the life of the subscription.
    Strong,
    /// Observe the receiver without extending its lifetime.
    Weak,
}

/// A receiver reference held according to an [`Ownership`] token.
pub enum ReceiverHandle<R: ?Sized> {
    /// Owning reference.
    Strong(Arc<R>),
    /// Non-owning reference, resolved on use.
    Weak(Weak<R>),
}

impl<R: ?Sized> ReceiverHandle<R> {
    /// Captures `receiver` with the requested ownership.
    pub fn new(receiver: &Arc<R>, ownership: Ownership) -> Self {
        match ownership {
            Ownership::Strong => Self::Strong(Arc::clone(receiver)),
            Ownership::Weak => Self::Weak(Arc::downgrade(receiver)),
        }
    }

    /// The ownership this handle was created with.
    pub fn ownership(&self) -> Ownership {
        match self {
            Self::Strong(_) => Ownership::Strong,
            Self::Weak(_) => Ownership::Weak,
        }
    }

    /// Resolves the receiver.
    ///
    /// The returned `Arc` keeps the receiver alive for as long as the caller holds
    /// it, so resolving and then invoking is a single step with respect to a
    /// concurrent drop of the last external reference.
    pub fn resolve(&self) -> Option<Arc<R>> {
        match self {
            Self::Strong(receiver) => Some(Arc::clone(receiver)),
            Self::Weak(receiver) => receiver.upgrade(),
        }
    }

    /// Returns `true` while the receiver can still be resolved.
    pub fn is_alive(&self) -> bool {
        match self {
            Self::Strong(_) => true,
            Self::Weak(receiver) => receiver.strong_count() > 0,
        }
    }
}

impl<R: ?Sized> Clone for ReceiverHandle<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Strong(receiver) => Self::Strong(Arc::clone(receiver)),
            Self::Weak(receiver) => Self::Weak(Weak::clone(receiver)),
        }
    }
}

impl<R: ?Sized> fmt::Debug for ReceiverHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiverHandle")
            .field("ownership", &self.ownership())
            .field("alive", &self.is_alive())
            .finish()
    }
}
