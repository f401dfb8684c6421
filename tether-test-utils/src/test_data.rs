// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{tap::Tap, toggle::Toggle};
use std::fmt::{self, Display};

/// UI events as a demo screen would publish them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TestData {
    Toggle(Toggle),
    Tap(Tap),
}

pub fn switch_a_on() -> TestData {
    TestData::Toggle(Toggle::new("A", true))
}

pub fn switch_a_off() -> TestData {
    TestData::Toggle(Toggle::new("A", false))
}

pub fn switch_b_on() -> TestData {
    TestData::Toggle(Toggle::new("B", true))
}

pub fn tap_a() -> TestData {
    TestData::Tap(Tap::new("A", 1))
}

pub fn tap_b() -> TestData {
    TestData::Tap(Tap::new("B", 1))
}

pub fn tap_c() -> TestData {
    TestData::Tap(Tap::new("C", 1))
}

pub fn toggle(switch: impl Into<String>, on: bool) -> TestData {
    TestData::Toggle(Toggle::new(switch, on))
}

pub fn tap(button: impl Into<String>, count: u32) -> TestData {
    TestData::Tap(Tap::new(button, count))
}

impl Display for TestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestData::Toggle(toggle) => write!(f, "{toggle}"),
            TestData::Tap(tap) => write!(f, "{tap}"),
        }
    }
}
