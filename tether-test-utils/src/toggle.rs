// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};

/// A named on/off switch changing state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Toggle {
    pub switch: String,
    pub on: bool,
}

impl Toggle {
    #[must_use]
    pub fn new(switch: impl Into<String>, on: bool) -> Self {
        Self {
            switch: switch.into(),
            on,
        }
    }
}

impl Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.on { "on" } else { "off" };
        write!(f, "Toggle[{}={state}]", self.switch)
    }
}
