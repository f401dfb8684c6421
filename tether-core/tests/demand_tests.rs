// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use tether_core::{Demand, DemandTracker};

#[test]
fn none_has_no_demand() {
    assert!(!Demand::NONE.has_demand());
    assert_eq!(Demand::max(0), Demand::NONE);
    assert_eq!(Demand::NONE.remaining(), Some(0));
}

#[test]
fn finite_demand_adds_up() {
    assert_eq!(Demand::max(2) + Demand::max(3), Demand::max(5));
}

#[test]
fn addition_saturates_to_unbounded() {
    assert_eq!(Demand::max(u64::MAX) + Demand::max(1), Demand::Unbounded);
    assert_eq!(Demand::max(1) + Demand::Unbounded, Demand::Unbounded);
    assert!(Demand::Unbounded.is_unbounded());
    assert_eq!(Demand::Unbounded.remaining(), None);
}

#[test]
fn tracker_consumes_finite_demand() {
    // Arrange
    let mut tracker = DemandTracker::new();
    tracker.request(Demand::max(2));

    // Act
    let first = tracker.consume_one();
    let second = tracker.consume_one();
    let third = tracker.consume_one();

    // Assert
    assert!(first && second);
    assert!(!third);
    assert_eq!(tracker.current(), Demand::NONE);
}

#[test]
fn tracker_never_exhausts_unbounded_demand() {
    let mut tracker = DemandTracker::default();
    assert_eq!(tracker.request(Demand::Unbounded), Demand::Unbounded);

    for _ in 0..1_000 {
        assert!(tracker.consume_one());
    }
    assert_eq!(tracker.current(), Demand::Unbounded);
}
