// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tap {
    pub button: String,
    pub count: u32,
}

impl Tap {
    pub fn new(button: impl Into<String>, count: u32) -> Self {
        Self {
            button: button.into(),
            count,
        }
    }
}

impl Display for Tap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tap[button={}, count={}]", self.button, self.count)
    }
}
