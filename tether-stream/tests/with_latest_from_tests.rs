// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::convert::Infallible;
use std::thread;
use tether_core::{CurrentValueSubject, Demand, PassthroughSubject, Publisher, TetherError};
use tether_stream::{just, sequence, WithLatestFromExt};
use tether_test_utils::test_data::{switch_a_off, switch_a_on, tap_a, tap_b};
use tether_test_utils::{probe, TestData, TestSubscriber};

type Pair = (&'static str, i32);

fn subjects() -> (
    PassthroughSubject<&'static str, Infallible>,
    PassthroughSubject<i32, Infallible>,
) {
    (PassthroughSubject::new(), PassthroughSubject::new())
}

#[test]
fn emits_primary_paired_with_latest_secondary() -> anyhow::Result<()> {
    // Arrange
    let (primary, secondary) = subjects();
    let results = TestSubscriber::<Pair, Infallible>::new();
    primary
        .clone()
        .with_latest_from(secondary.clone())
        .subscribe(results.clone());

    // Act
    secondary.next(1)?;
    primary.next("A")?;
    secondary.next(2)?;
    primary.next("B")?;

    // Assert
    assert_eq!(results.values(), vec![("A", 1), ("B", 2)]);
    Ok(())
}

#[test]
fn primary_before_any_secondary_is_dropped() -> anyhow::Result<()> {
    // Arrange
    let (primary, secondary) = subjects();
    let results = TestSubscriber::<Pair, Infallible>::new();
    primary
        .clone()
        .with_latest_from(secondary.clone())
        .subscribe(results.clone());

    // Act
    primary.next("A")?;
    primary.next("B")?;

    // Assert
    assert!(results.values().is_empty());

    // A later secondary value does not resurrect dropped primaries
    secondary.next(1)?;
    assert!(results.values().is_empty());

    primary.next("C")?;
    assert_eq!(results.values(), vec![("C", 1)]);
    Ok(())
}

#[test]
fn secondary_values_alone_never_emit() -> anyhow::Result<()> {
    // Arrange
    let (primary, secondary) = subjects();
    let results = TestSubscriber::<Pair, Infallible>::new();
    primary
        .clone()
        .with_latest_from(secondary.clone())
        .subscribe(results.clone());

    // Act
    for value in 0..10 {
        secondary.next(value)?;
    }

    // Assert
    assert!(results.values().is_empty());
    assert!(!results.is_terminated());
    Ok(())
}

#[test]
fn detached_subscriber_keeps_receiving_until_primary_completes() -> anyhow::Result<()> {
    // Arrange
    let (primary, secondary) = subjects();
    let results = TestSubscriber::<Pair, Infallible>::detached();
    primary
        .clone()
        .with_latest_from(secondary.clone())
        .subscribe(results.clone());

    // Act
    secondary.next(1)?;
    primary.next("A")?;
    secondary.next(2)?;
    primary.next("B")?;
    primary.close();

    // Assert
    assert_eq!(results.values(), vec![("A", 1), ("B", 2)]);
    assert!(results.is_completed());
    assert_eq!(secondary.subscriber_count(), 0);
    Ok(())
}

#[test]
fn repeated_primaries_reuse_the_cached_secondary() -> anyhow::Result<()> {
    // Arrange
    let primary = PassthroughSubject::<TestData, Infallible>::new();
    let secondary = PassthroughSubject::<TestData, Infallible>::new();
    let results = TestSubscriber::<(TestData, TestData), Infallible>::new();
    primary
        .clone()
        .with_latest_from(secondary.clone())
        .subscribe(results.clone());

    // Act
    secondary.next(tap_a())?;
    primary.next(switch_a_on())?;
    primary.next(switch_a_off())?;
    secondary.next(tap_b())?;
    primary.next(switch_a_on())?;

    // Assert
    assert_eq!(
        results.values(),
        vec![
            (switch_a_on(), tap_a()),
            (switch_a_off(), tap_a()),
            (switch_a_on(), tap_b()),
        ]
    );
    Ok(())
}

#[test]
fn cancel_cancels_each_upstream_exactly_once() {
    // Arrange
    let (primary, secondary) = subjects();
    let (primary_probe, primary_stats) = probe(primary.clone());
    let (secondary_probe, secondary_stats) = probe(secondary.clone());
    let results = TestSubscriber::<Pair, Infallible>::new();
    primary_probe
        .with_latest_from(secondary_probe)
        .subscribe(results.clone());

    // Act
    results.cancel();
    results.cancel();
    results.cancel();

    // Assert
    assert_eq!(primary_stats.subscribe_count(), 1);
    assert_eq!(secondary_stats.subscribe_count(), 1);
    assert_eq!(primary_stats.cancel_count(), 1);
    assert_eq!(secondary_stats.cancel_count(), 1);
    assert_eq!(primary.subscriber_count(), 0);
    assert_eq!(secondary.subscriber_count(), 0);
}

#[test]
fn nothing_is_delivered_after_cancel() -> anyhow::Result<()> {
    // Arrange
    let (primary, secondary) = subjects();
    let results = TestSubscriber::<Pair, Infallible>::new();
    primary
        .clone()
        .with_latest_from(secondary.clone())
        .subscribe(results.clone());
    secondary.next(1)?;
    primary.next("A")?;

    // Act
    results.cancel();
    secondary.next(2)?;
    primary.next("B")?;
    primary.close();

    // Assert
    assert_eq!(results.values(), vec![("A", 1)]);
    assert!(!results.is_terminated());
    Ok(())
}

#[test]
fn primary_completion_completes_and_cancels_secondary() -> anyhow::Result<()> {
    // Arrange
    let (primary, secondary) = subjects();
    let (secondary_probe, secondary_stats) = probe(secondary.clone());
    let results = TestSubscriber::<Pair, Infallible>::new();
    primary
        .clone()
        .with_latest_from(secondary_probe)
        .subscribe(results.clone());
    secondary.next(1)?;

    // Act
    primary.close();

    // Assert
    assert!(results.is_completed());
    assert_eq!(results.terminal_count(), 1);
    assert_eq!(secondary_stats.cancel_count(), 1);
    assert_eq!(secondary.subscriber_count(), 0);
    Ok(())
}

#[test]
fn secondary_completion_is_not_forwarded() -> anyhow::Result<()> {
    // Arrange
    let (primary, secondary) = subjects();
    let results = TestSubscriber::<Pair, Infallible>::new();
    primary
        .clone()
        .with_latest_from(secondary.clone())
        .subscribe(results.clone());
    secondary.next(7)?;

    // Act
    secondary.close();
    primary.next("A")?;

    // Assert
    assert!(!results.is_terminated());
    assert_eq!(results.values(), vec![("A", 7)]);

    primary.close();
    assert!(results.is_completed());
    Ok(())
}

#[test]
fn secondary_failure_is_not_forwarded() -> anyhow::Result<()> {
    // Arrange
    let primary = PassthroughSubject::<i32>::new();
    let secondary = PassthroughSubject::<i32>::new();
    let results = TestSubscriber::<(i32, i32), TetherError>::new();
    primary
        .clone()
        .with_latest_from(secondary.clone())
        .subscribe(results.clone());
    secondary.next(1)?;

    // Act
    secondary.error(TetherError::stream_error("secondary failed"))?;
    primary.next(10)?;

    // Assert
    assert!(!results.is_terminated());
    assert_eq!(results.values(), vec![(10, 1)]);
    Ok(())
}

#[test]
fn primary_failure_is_forwarded_verbatim() -> anyhow::Result<()> {
    // Arrange
    let primary = PassthroughSubject::<i32, String>::new();
    let secondary = PassthroughSubject::<i32, String>::new();
    let (secondary_probe, secondary_stats) = probe(secondary.clone());
    let results = TestSubscriber::<(i32, i32), String>::new();
    primary
        .clone()
        .with_latest_from(secondary_probe)
        .subscribe(results.clone());

    // Act
    primary.error("primary failed".to_string())?;

    // Assert
    assert_eq!(
        results.terminal(),
        Some(tether_core::Terminal::Failed("primary failed".to_string()))
    );
    assert_eq!(secondary_stats.cancel_count(), 1);
    Ok(())
}

#[test]
fn downstream_demand_is_forwarded_to_primary_only() -> anyhow::Result<()> {
    // Arrange
    let (primary, secondary) = subjects();
    let (primary_probe, primary_stats) = probe(primary.clone());
    let (secondary_probe, secondary_stats) = probe(secondary.clone());
    let results = TestSubscriber::<Pair, Infallible>::with_demand(Demand::max(1));
    primary_probe
        .with_latest_from(secondary_probe)
        .subscribe(results.clone());
    secondary.next(1)?;

    // Act
    primary.next("A")?;
    primary.next("B")?;
    results.request(Demand::max(1));
    primary.next("C")?;

    // Assert
    assert_eq!(results.values(), vec![("A", 1), ("C", 1)]);
    assert_eq!(primary_stats.requests(), vec![Demand::max(1), Demand::max(1)]);
    assert_eq!(secondary_stats.requests(), vec![Demand::Unbounded]);
    Ok(())
}

#[test]
fn dropped_primaries_do_not_consume_downstream_demand() -> anyhow::Result<()> {
    // Arrange
    let (primary, secondary) = subjects();
    let results = TestSubscriber::<Pair, Infallible>::with_demand(Demand::max(1));
    primary
        .clone()
        .with_latest_from(secondary.clone())
        .subscribe(results.clone());

    // Act
    primary.next("dropped")?;
    primary.next("dropped again")?;
    secondary.next(1)?;
    primary.next("A")?;

    // Assert
    assert_eq!(results.values(), vec![("A", 1)]);
    Ok(())
}

#[test]
fn replaying_secondary_arms_before_primary_subscribes() -> anyhow::Result<()> {
    // Arrange
    let primary = PassthroughSubject::<&'static str, Infallible>::new();
    let secondary = CurrentValueSubject::<i32, Infallible>::new(10);
    let results = TestSubscriber::<Pair, Infallible>::new();
    primary
        .clone()
        .with_latest_from(secondary.clone())
        .subscribe(results.clone());

    // Act
    primary.next("A")?;
    secondary.next(11)?;
    primary.next("B")?;

    // Assert
    assert_eq!(results.values(), vec![("A", 10), ("B", 11)]);
    Ok(())
}

#[test]
fn cold_sources_join_with_the_last_secondary_value() {
    // Arrange
    let results = TestSubscriber::<(&'static str, i32), Infallible>::new();

    // Act
    just("A")
        .with_latest_from(sequence(vec![1, 2, 3]))
        .subscribe(results.clone());

    // Assert
    assert_eq!(results.values(), vec![("A", 3)]);
    assert!(results.is_completed());
}

#[test]
fn with_latest_from_map_applies_selector() -> anyhow::Result<()> {
    // Arrange
    let primary = PassthroughSubject::<TestData, Infallible>::new();
    let secondary = PassthroughSubject::<TestData, Infallible>::new();
    let results = TestSubscriber::<String, Infallible>::new();
    primary
        .clone()
        .with_latest_from_map(secondary.clone(), |toggle, tap| {
            format!("{toggle} after {tap}")
        })
        .subscribe(results.clone());

    // Act
    secondary.next(tap_a())?;
    primary.next(switch_a_on())?;

    // Assert
    assert_eq!(
        results.values(),
        vec!["Toggle[A=on] after Tap[button=A, count=1]".to_string()]
    );
    Ok(())
}

#[test]
fn joins_compose_with_other_joins() -> anyhow::Result<()> {
    // Arrange
    let (primary, secondary) = subjects();
    let tertiary = PassthroughSubject::<char, Infallible>::new();
    let results = TestSubscriber::<(Pair, char), Infallible>::new();
    primary
        .clone()
        .with_latest_from(secondary.clone())
        .with_latest_from(tertiary.clone())
        .subscribe(results.clone());

    // Act
    tertiary.next('x')?;
    secondary.next(1)?;
    primary.next("A")?;

    // Assert
    assert_eq!(results.values(), vec![(("A", 1), 'x')]);
    Ok(())
}

#[test]
fn cross_thread_secondary_updates_are_observed_in_order() -> anyhow::Result<()> {
    // Arrange
    let primary = PassthroughSubject::<usize, Infallible>::new();
    let secondary = PassthroughSubject::<usize, Infallible>::new();
    let results = TestSubscriber::<(usize, usize), Infallible>::new();
    primary
        .clone()
        .with_latest_from(secondary.clone())
        .subscribe(results.clone());
    secondary.next(0)?;

    // Act
    let writer = {
        let secondary = secondary.clone();
        thread::spawn(move || {
            for value in 1..=1_000 {
                secondary.next(value).unwrap();
            }
        })
    };
    for value in 0..1_000 {
        primary.next(value)?;
    }
    writer.join().unwrap();

    // Assert
    let values = results.values();
    assert_eq!(values.len(), 1_000);
    assert!(values.windows(2).all(|w| w[0].1 <= w[1].1));
    assert!(values.iter().all(|(_, latest)| *latest <= 1_000));
    Ok(())
}
