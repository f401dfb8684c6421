// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::convert::Infallible;
use std::sync::Arc;
use tether_core::{Ownership, Publisher, SubjectError, Terminal};
use tether_exec::{DispatchExt, SinkExt};
use tether_notify::{EventCenter, Notification, NotificationName};
use tether_stream::{IntoStreamExt, MapExt};
use tether_test_utils::{next_within, MockReceiver, TestSubscriber};

fn names(observer: &TestSubscriber<Notification, Infallible>) -> Vec<String> {
    observer
        .values()
        .iter()
        .map(|notification| notification.name().to_string())
        .collect()
}

#[test]
fn merges_every_name_in_post_order() -> anyhow::Result<()> {
    // Arrange
    let center = EventCenter::new();
    let receiver = Arc::new(MockReceiver::<String>::new());
    let _handle = center
        .publisher_for(["A", "B", "C"])
        .map(|notification: Notification| notification.name().to_string())
        .sink_to(&receiver, MockReceiver::record, Ownership::Strong);

    // Act
    center.post("A")?;
    center.post("B")?;
    center.post("C")?;

    // Assert
    assert_eq!(receiver.captured_values(), vec!["A", "B", "C"]);
    Ok(())
}

#[test]
fn repeated_name_delivers_once() -> anyhow::Result<()> {
    // Arrange
    let center = EventCenter::new();
    let observer = TestSubscriber::<Notification, Infallible>::new();
    center.publisher_for(["A", "A", "A"]).subscribe(observer.clone());

    // Act
    center.post("A")?;

    // Assert
    assert_eq!(names(&observer), vec!["A"]);
    assert_eq!(center.subscriber_count("A"), 1);
    Ok(())
}

#[test]
fn duplicates_collapse_but_distinct_names_stay() -> anyhow::Result<()> {
    // Arrange
    let center = EventCenter::new();
    let observer = TestSubscriber::<Notification, Infallible>::new();
    center
        .publisher_for(["X", "X", "Y"])
        .subscribe(observer.clone());

    // Act
    center.post("X")?;

    // Assert
    assert_eq!(names(&observer), vec!["X"]);
    assert_eq!(center.subscriber_count("X"), 1);
    assert_eq!(center.subscriber_count("Y"), 1);
    Ok(())
}

#[test]
fn unrelated_names_are_not_delivered() -> anyhow::Result<()> {
    // Arrange
    let center = EventCenter::new();
    let observer = TestSubscriber::<Notification, Infallible>::new();
    center.publisher("saved").subscribe(observer.clone());

    // Act
    center.post("deleted")?;
    center.post("saved")?;

    // Assert
    assert_eq!(names(&observer), vec!["saved"]);
    Ok(())
}

#[test]
fn details_travel_with_the_notification() -> anyhow::Result<()> {
    // Arrange
    let center = EventCenter::new();
    let observer = TestSubscriber::<Notification, Infallible>::new();
    center.publisher("login").subscribe(observer.clone());

    // Act
    center.post_notification(Notification::new("login").with_info("user", "alice"))?;

    // Assert
    let received = observer.values();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].name(), &NotificationName::from("login"));
    assert_eq!(received[0].info("user"), Some("alice"));
    assert_eq!(received[0].info("role"), None);
    Ok(())
}

#[test]
fn observers_only_see_later_posts() -> anyhow::Result<()> {
    // Arrange
    let center = EventCenter::new();
    let _early = center.publisher("tick");
    center.post("tick")?;
    let observer = TestSubscriber::<Notification, Infallible>::new();

    // Act
    center.publisher("tick").subscribe(observer.clone());
    center.post("tick")?;

    // Assert
    assert_eq!(observer.value_count(), 1);
    Ok(())
}

#[test]
fn shutdown_completes_merged_observers() {
    // Arrange
    let center = EventCenter::new();
    let terminal = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&terminal);
    let _handle = center
        .publisher_for(["A", "B"])
        .sink_with_completion(move |t| *slot.lock() = Some(t), |_| {});

    // Act
    center.shutdown();

    // Assert
    assert_eq!(*terminal.lock(), Some(Terminal::Completed));
    assert!(center.is_shut_down());
    assert_eq!(center.post("A"), Err(SubjectError::Closed));
}

#[test]
fn publishers_after_shutdown_complete_immediately() {
    // Arrange
    let center = EventCenter::new();
    center.shutdown();
    let observer = TestSubscriber::<Notification, Infallible>::new();

    // Act
    center.publisher_for(["late"]).subscribe(observer.clone());

    // Assert
    assert!(observer.is_completed());
}

#[test]
fn empty_name_list_completes_immediately() {
    let center = EventCenter::new();
    let observer = TestSubscriber::<Notification, Infallible>::new();

    center
        .publisher_for(Vec::<NotificationName>::new())
        .subscribe(observer.clone());

    assert!(observer.is_completed());
}

#[test]
fn cancelling_removes_every_observer() -> anyhow::Result<()> {
    // Arrange
    let center = EventCenter::new();
    let observer = TestSubscriber::<Notification, Infallible>::new();
    center
        .publisher_for(["A", "B", "A"])
        .subscribe(observer.clone());

    // Act
    observer.cancel();
    center.post("A")?;

    // Assert
    assert_eq!(center.subscriber_count("A"), 0);
    assert_eq!(center.subscriber_count("B"), 0);
    assert_eq!(observer.value_count(), 0);
    Ok(())
}

#[test]
fn idle_channels_are_removed() -> anyhow::Result<()> {
    // Arrange
    let center = EventCenter::new();
    let observer = TestSubscriber::<Notification, Infallible>::new();
    center
        .publisher_for(["A", "B"])
        .subscribe(observer.clone());
    let pending = center.publisher("C");
    assert_eq!(center.channel_count(), 3);

    // Act
    observer.cancel();
    center.post("A")?;
    let after_cancel = center.channel_count();
    drop(pending);
    center.post("A")?;

    // Assert
    assert_eq!(after_cancel, 1);
    assert_eq!(center.channel_count(), 0);
    assert_eq!(observer.value_count(), 0);
    Ok(())
}

#[test]
fn held_publisher_keeps_its_channel() -> anyhow::Result<()> {
    // Arrange
    let center = EventCenter::new();
    let publisher = center.publisher("A");
    center.post("B")?;
    let observer = TestSubscriber::<Notification, Infallible>::new();

    // Act
    publisher.subscribe(observer.clone());
    drop(publisher);
    center.post("B")?;
    center.post("A")?;

    // Assert
    assert_eq!(names(&observer), vec!["A"]);
    assert_eq!(center.channel_count(), 1);
    Ok(())
}

#[tokio::test]
async fn posts_from_another_task_reach_the_stream() -> anyhow::Result<()> {
    // Arrange
    let center = Arc::new(EventCenter::new());
    let mut stream = center.publisher_for(["ready", "done"]).into_stream();
    let poster = Arc::clone(&center);

    // Act
    tokio::spawn(async move {
        let _ = poster.post("ready");
        let _ = poster.post("done");
    })
    .await?;

    // Assert
    let first = next_within(&mut stream, 500).await.ok();
    let second = next_within(&mut stream, 500).await.ok();
    assert_eq!(first.map(|n| n.name().to_string()), Some("ready".to_string()));
    assert_eq!(second.map(|n| n.name().to_string()), Some("done".to_string()));
    Ok(())
}
