// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Name of an event posted through an [`EventCenter`](crate::EventCenter).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationName(Arc<str>);

impl NotificationName {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for NotificationName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&NotificationName> for NotificationName {
    fn from(name: &NotificationName) -> Self {
        name.clone()
    }
}

/// A posted event: its name plus optional key/value details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    name: NotificationName,
    user_info: BTreeMap<String, String>,
}

impl Notification {
    pub fn new(name: impl Into<NotificationName>) -> Self {
        Self {
            name: name.into(),
            user_info: BTreeMap::new(),
        }
    }

    /// Adds a detail, replacing any previous value for `key`.
    #[must_use]
    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_info.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &NotificationName {
        &self.name
    }

    pub fn user_info(&self) -> &BTreeMap<String, String> {
        &self.user_info
    }

    /// Returns the detail stored under `key`.
    pub fn info(&self, key: &str) -> Option<&str> {
        self.user_info.get(key).map(String::as_str)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Notification[name={}]", self.name)
    }
}
