// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use tether_core::{Ownership, ReceiverHandle};
use tether_test_utils::MockReceiver;

#[test]
fn strong_handle_keeps_receiver_alive() {
    // Arrange
    let receiver = Arc::new(MockReceiver::<String>::new());
    let observer = Arc::downgrade(&receiver);
    let handle = ReceiverHandle::new(&receiver, Ownership::Strong);

    // Act
    drop(receiver);

    // Assert
    assert!(observer.upgrade().is_some());
    assert!(handle.is_alive());
    assert_eq!(handle.ownership(), Ownership::Strong);

    drop(handle);
    assert!(observer.upgrade().is_none());
}

#[test]
fn weak_handle_does_not_extend_lifetime() {
    // Arrange
    let receiver = Arc::new(MockReceiver::<String>::new());
    let handle = ReceiverHandle::new(&receiver, Ownership::Weak);
    assert!(handle.is_alive());

    // Act
    drop(receiver);

    // Assert
    assert!(!handle.is_alive());
    assert!(handle.resolve().is_none());
    assert_eq!(handle.ownership(), Ownership::Weak);
}

#[test]
fn resolved_weak_handle_keeps_receiver_for_the_call() {
    let receiver = Arc::new(MockReceiver::<String>::new());
    let handle = ReceiverHandle::new(&receiver, Ownership::Weak);

    let resolved = handle.resolve();
    drop(receiver);

    let resolved = resolved.unwrap();
    resolved.record("still here".to_string());
    assert_eq!(resolved.captured_values(), vec!["still here".to_string()]);

    drop(resolved);
    assert!(handle.resolve().is_none());
}

#[test]
fn cloned_handles_share_ownership_mode() {
    let receiver = Arc::new(MockReceiver::<u8>::new());
    let strong = ReceiverHandle::new(&receiver, Ownership::Strong);
    let weak = ReceiverHandle::new(&receiver, Ownership::Weak);

    assert_eq!(strong.clone().ownership(), Ownership::Strong);
    assert_eq!(weak.clone().ownership(), Ownership::Weak);
    assert_eq!(Arc::strong_count(&receiver), 2);
}
