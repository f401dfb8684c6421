// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Notification, NotificationName};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::sync::Arc;
use tether_core::{PassthroughSubject, SubjectError};
use tether_stream::{merge_many, AnyPublisher, EraseExt};

type Channel = Arc<PassthroughSubject<Notification, Infallible>>;

#[derive(Default)]
struct Channels {
    by_name: HashMap<NotificationName, Channel>,
    shut_down: bool,
}

impl Channels {
    /// Takes out every channel with no observers and no publisher handed out.
    ///
    /// The caller drops the returned channels after releasing the lock.
    fn take_idle(&mut self) -> Vec<Channel> {
        let idle: Vec<NotificationName> = self
            .by_name
            .iter()
            .filter(|&(_, channel)| {
                Arc::strong_count(channel) == 1 && channel.subscriber_count() == 0
            })
            .map(|(name, _)| name.clone())
            .collect();
        idle.iter()
            .filter_map(|name| self.by_name.remove(name))
            .collect()
    }
}

/// A named-event bus.
///
/// Every name owns one hot [`PassthroughSubject`]: observers only see notifications
/// posted after they subscribed, and a notification posted while an observer has
/// no outstanding demand is dropped for that observer. Channels are created when
/// a publisher is requested and removed once no observer and no publisher
/// refers to them any more.
///
/// # Examples
///
/// ```
/// use tether_core::Publisher;
/// use tether_notify::{EventCenter, Notification};
/// use tether_test_utils::TestSubscriber;
///
/// let center = EventCenter::new();
/// let observer = TestSubscriber::<Notification, std::convert::Infallible>::new();
/// center.publisher_for(["saved", "saved", "deleted"]).subscribe(observer.clone());
///
/// center.post("saved").unwrap();
/// center.post("renamed").unwrap();
/// center.post("deleted").unwrap();
///
/// let names: Vec<String> = observer.values().iter().map(|n| n.name().to_string()).collect();
/// assert_eq!(names, vec!["saved", "deleted"]);
/// ```
#[derive(Default)]
pub struct EventCenter {
    channels: Mutex<Channels>,
}

impl EventCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts a notification without details.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] after [`shutdown`](EventCenter::shutdown).
    pub fn post(&self, name: impl Into<NotificationName>) -> Result<(), SubjectError> {
        self.post_notification(Notification::new(name))
    }

    /// Delivers `notification` to every current observer of its name.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] after [`shutdown`](EventCenter::shutdown).
    pub fn post_notification(&self, notification: Notification) -> Result<(), SubjectError> {
        let (channel, idle) = {
            let mut channels = self.channels.lock();
            if channels.shut_down {
                return Err(SubjectError::Closed);
            }
            let idle = channels.take_idle();
            (channels.by_name.get(notification.name()).cloned(), idle)
        };
        drop(idle);

        match channel {
            Some(channel) => channel.next(notification),
            None => {
                crate::trace!("event center: no observers for {}", notification.name());
                Ok(())
            }
        }
    }

    /// Observes a single name.
    pub fn publisher(&self, name: impl Into<NotificationName>) -> AnyPublisher<Notification, Infallible> {
        self.channel(name.into()).erase()
    }

    /// Observes several names through one publisher.
    ///
    /// Every distinct name is subscribed once, in order of first occurrence, so a
    /// name listed several times still delivers each notification once. The
    /// publisher completes on [`shutdown`](EventCenter::shutdown), or immediately
    /// when `names` is empty.
    pub fn publisher_for<I>(&self, names: I) -> AnyPublisher<Notification, Infallible>
    where
        I: IntoIterator,
        I::Item: Into<NotificationName>,
    {
        let mut seen = HashSet::new();
        let channels: Vec<Channel> = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &NotificationName| seen.insert(name.clone()))
            .map(|name| self.channel(name))
            .collect();
        merge_many(channels).erase()
    }

    /// Number of active observers of `name`.
    pub fn subscriber_count(&self, name: impl Into<NotificationName>) -> usize {
        let name = name.into();
        self.channels
            .lock()
            .by_name
            .get(&name)
            .map_or(0, |channel| channel.subscriber_count())
    }

    /// Completes every observer and rejects further posts.
    ///
    /// Publishers obtained afterwards complete as soon as they are subscribed.
    pub fn shutdown(&self) {
        let channels: Vec<Channel> = {
            let mut channels = self.channels.lock();
            channels.shut_down = true;
            channels.by_name.values().cloned().collect()
        };
        for channel in channels {
            channel.close();
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.channels.lock().shut_down
    }

    /// Number of channels currently kept by the center.
    pub fn channel_count(&self) -> usize {
        self.channels.lock().by_name.len()
    }

    fn channel(&self, name: NotificationName) -> Channel {
        let (channel, idle) = {
            let mut channels = self.channels.lock();
            let idle = channels.take_idle();
            let shut_down = channels.shut_down;
            let channel = channels.by_name.entry(name).or_insert_with(|| {
                let channel = PassthroughSubject::<Notification, Infallible>::new();
                if shut_down {
                    channel.close();
                }
                Arc::new(channel)
            });
            (Arc::clone(channel), idle)
        };
        drop(idle);
        channel
    }
}
