// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::convert::Infallible;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tether_core::{
    Demand, PassthroughSubject, Publisher, Subscriber, SubscriptionRef, Terminal,
};
use tether_stream::{merge_many, sequence, Sequence};
use tether_test_utils::test_data::{switch_a_off, switch_a_on, tap_a};
use tether_test_utils::{probe, TestData, TestSubscriber};

#[test]
fn forwards_values_in_delivery_order() -> anyhow::Result<()> {
    // Arrange
    let toggles = PassthroughSubject::<TestData, Infallible>::new();
    let taps = PassthroughSubject::<TestData, Infallible>::new();
    let results = TestSubscriber::<TestData, Infallible>::new();
    merge_many(vec![toggles.clone(), taps.clone()]).subscribe(results.clone());

    // Act
    toggles.next(switch_a_on())?;
    taps.next(tap_a())?;
    toggles.next(switch_a_off())?;

    // Assert
    assert_eq!(
        results.values(),
        vec![switch_a_on(), tap_a(), switch_a_off()]
    );
    Ok(())
}

#[test]
fn completes_after_every_upstream_completed() {
    // Arrange
    let a = PassthroughSubject::<i32, Infallible>::new();
    let b = PassthroughSubject::<i32, Infallible>::new();
    let results = TestSubscriber::<i32, Infallible>::new();
    merge_many(vec![a.clone(), b.clone()]).subscribe(results.clone());

    // Act
    a.close();
    let after_first = results.is_terminated();
    b.close();

    // Assert
    assert!(!after_first);
    assert!(results.is_completed());
    assert_eq!(results.terminal_count(), 1);
}

#[test]
fn empty_merge_completes_immediately() {
    let results = TestSubscriber::<i32, Infallible>::new();
    let merged = merge_many(Vec::<PassthroughSubject<i32, Infallible>>::new());
    assert!(merged.is_empty());

    merged.subscribe(results.clone());

    assert_eq!(results.subscribe_count(), 1);
    assert!(results.is_completed());
}

#[test]
fn first_failure_is_forwarded_and_cancels_the_rest() -> anyhow::Result<()> {
    // Arrange
    let a = PassthroughSubject::<i32, String>::new();
    let b = PassthroughSubject::<i32, String>::new();
    let (a_probe, a_stats) = probe(a.clone());
    let (b_probe, b_stats) = probe(b.clone());
    let results = TestSubscriber::<i32, String>::new();
    merge_many(vec![a_probe, b_probe]).subscribe(results.clone());

    // Act
    a.next(1)?;
    a.error("boom".to_string())?;
    b.next(2)?;

    // Assert
    assert_eq!(results.values(), vec![1]);
    assert_eq!(results.terminal(), Some(Terminal::Failed("boom".to_string())));
    assert_eq!(a_stats.cancel_count(), 0);
    assert_eq!(b_stats.cancel_count(), 1);
    assert_eq!(b.subscriber_count(), 0);
    Ok(())
}

#[test]
fn values_without_demand_are_dropped() -> anyhow::Result<()> {
    // Arrange
    let a = PassthroughSubject::<i32, Infallible>::new();
    let results = TestSubscriber::<i32, Infallible>::with_demand(Demand::max(2));
    merge_many(vec![a.clone()]).subscribe(results.clone());

    // Act
    a.next(1)?;
    a.next(2)?;
    a.next(3)?;
    results.request(Demand::max(1));
    a.next(4)?;

    // Assert
    assert_eq!(results.values(), vec![1, 2, 4]);
    Ok(())
}

#[test]
fn upstreams_are_requested_without_limit() {
    let a = PassthroughSubject::<i32, Infallible>::new();
    let (a_probe, a_stats) = probe(a);
    let results = TestSubscriber::<i32, Infallible>::with_demand(Demand::max(1));

    merge_many(vec![a_probe]).subscribe(results.clone());

    assert_eq!(a_stats.requests(), vec![Demand::Unbounded]);
}

#[test]
fn cancel_reaches_every_upstream_once() {
    // Arrange
    let a = PassthroughSubject::<i32, Infallible>::new();
    let b = PassthroughSubject::<i32, Infallible>::new();
    let (a_probe, a_stats) = probe(a.clone());
    let (b_probe, b_stats) = probe(b.clone());
    let results = TestSubscriber::<i32, Infallible>::new();
    merge_many(vec![a_probe, b_probe]).subscribe(results.clone());

    // Act
    results.cancel();
    results.cancel();

    // Assert
    assert_eq!(a_stats.cancel_count(), 1);
    assert_eq!(b_stats.cancel_count(), 1);
    assert_eq!(a.subscriber_count() + b.subscriber_count(), 0);
}

#[test]
fn merges_cold_sequences() {
    let results = TestSubscriber::<i32, Infallible>::new();
    let sources: Vec<Sequence<Vec<i32>>> = vec![sequence(vec![1, 2]), sequence(vec![3])];

    merge_many(sources).subscribe(results.clone());

    assert_eq!(results.values(), vec![1, 2, 3]);
    assert!(results.is_completed());
}

#[test]
fn concurrent_upstreams_deliver_every_value() {
    // Arrange
    let subjects: Vec<_> = (0..4)
        .map(|_| PassthroughSubject::<usize, Infallible>::new())
        .collect();
    let results = TestSubscriber::<usize, Infallible>::new();
    merge_many(subjects.clone()).subscribe(results.clone());

    // Act
    let writers: Vec<_> = subjects
        .into_iter()
        .enumerate()
        .map(|(index, subject)| {
            thread::spawn(move || {
                for value in 0..250 {
                    subject.next(index * 1_000 + value).unwrap();
                }
                subject.close();
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    // Assert
    let mut values = results.values();
    values.sort_unstable();
    values.dedup();
    assert_eq!(values.len(), 1_000);
    assert!(results.is_completed());
}

#[test]
fn detached_subscriber_keeps_receiving() -> anyhow::Result<()> {
    // Arrange
    let a = PassthroughSubject::<i32, Infallible>::new();
    let b = PassthroughSubject::<i32, Infallible>::new();
    let results = TestSubscriber::<i32, Infallible>::detached();
    merge_many(vec![a.clone(), b.clone()]).subscribe(results.clone());

    // Act
    a.next(1)?;
    b.next(2)?;
    a.close();
    b.close();

    // Assert
    assert_eq!(results.values(), vec![1, 2]);
    assert!(results.is_completed());
    assert_eq!(a.subscriber_count() + b.subscriber_count(), 0);
    Ok(())
}

/// Cancels the merge from inside its first delivery, after pausing long enough
/// for another upstream to start delivering on a second thread.
struct SlowCanceller {
    subscription: Mutex<Option<SubscriptionRef>>,
    entered: Mutex<mpsc::Sender<()>>,
    values: Mutex<Vec<i32>>,
}

impl Subscriber for SlowCanceller {
    type Input = i32;
    type Failure = Infallible;

    fn on_subscribe(&self, subscription: SubscriptionRef) {
        subscription.request(Demand::Unbounded);
        *self.subscription.lock() = Some(subscription);
    }

    fn on_next(&self, value: i32) -> Demand {
        self.values.lock().push(value);
        let _ = self.entered.lock().send(());
        thread::sleep(Duration::from_millis(100));
        let subscription = self.subscription.lock().clone();
        if let Some(subscription) = subscription {
            subscription.cancel();
        }
        Demand::NONE
    }

    fn on_terminal(&self, _terminal: Terminal<Infallible>) {}
}

#[test]
fn cancel_inside_delivery_does_not_wait_for_other_upstreams() {
    // Arrange
    let x = PassthroughSubject::<i32, Infallible>::new();
    let y = PassthroughSubject::<i32, Infallible>::new();
    let (entered_tx, entered_rx) = mpsc::channel();
    let subscriber = Arc::new(SlowCanceller {
        subscription: Mutex::new(None),
        entered: Mutex::new(entered_tx),
        values: Mutex::new(Vec::new()),
    });
    merge_many(vec![x.clone(), y.clone()]).subscribe(subscriber.clone());
    let (done_tx, done_rx) = mpsc::channel();

    // Act
    let first = {
        let done = done_tx.clone();
        thread::spawn(move || {
            let _ = x.next(1);
            let _ = done.send("x");
        })
    };
    let second = {
        let done = done_tx;
        thread::spawn(move || {
            let _ = entered_rx.recv_timeout(Duration::from_secs(1));
            let _ = y.next(2);
            let _ = done.send("y");
        })
    };

    // Assert
    let mut finished = Vec::new();
    while let Ok(name) = done_rx.recv_timeout(Duration::from_secs(3)) {
        finished.push(name);
        if finished.len() == 2 {
            break;
        }
    }
    assert_eq!(finished.len(), 2, "delivering threads did not finish");
    first.join().unwrap();
    second.join().unwrap();
    assert_eq!(*subscriber.values.lock(), vec![1]);
}
