// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::ops::Add;

/// Number of values a subscriber is willing to receive.
///
/// Demand is additive: every call to
/// [`Subscription::request`](crate::Subscription::request) and every value returned
/// from [`Subscriber::on_next`](crate::Subscriber::on_next) adds to what the
/// subscriber already asked for. Finite demand saturates to [`Demand::Unbounded`]
/// instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demand {
    /// Finite demand with the remaining count.
    Finite(u64),
    /// No limit on the number of values.
    Unbounded,
}

impl Demand {
    /// No additional demand.
    pub const NONE: Demand = Demand::Finite(0);

    /// Finite demand for at most `count` values.
    #[must_use]
    pub const fn max(count: u64) -> Self {
        Demand::Finite(count)
    }

    /// Returns `true` if the demand is unbounded.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Returns `true` if at least one value may be delivered.
    #[must_use]
    pub const fn has_demand(&self) -> bool {
        matches!(self, Self::Unbounded) || matches!(self, Self::Finite(remaining) if *remaining > 0)
    }

    /// Returns the remaining finite demand, if any.
    #[must_use]
    pub const fn remaining(&self) -> Option<u64> {
        match self {
            Self::Finite(value) => Some(*value),
            Self::Unbounded => None,
        }
    }
}

impl Add for Demand {
    type Output = Demand;

    fn add(self, rhs: Demand) -> Demand {
        match (self, rhs) {
            (Demand::Finite(a), Demand::Finite(b)) => {
                a.checked_add(b).map_or(Demand::Unbounded, Demand::Finite)
            }
            _ => Demand::Unbounded,
        }
    }
}

/// Tracks the demand a downstream subscriber has granted but not yet used.
#[derive(Debug, Clone)]
pub struct DemandTracker {
    current: Demand,
}

impl DemandTracker {
    /// Creates a tracker with no demand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Demand::NONE,
        }
    }

    /// Returns the outstanding demand.
    #[must_use]
    pub const fn current(&self) -> Demand {
        self.current
    }

    /// Adds demand and returns the new total.
    pub fn request(&mut self, demand: Demand) -> Demand {
        self.current = self.current + demand;
        self.current
    }

    /// Consumes a single unit of demand when available.
    #[must_use]
    pub fn consume_one(&mut self) -> bool {
        match self.current {
            Demand::Unbounded => true,
            Demand::Finite(value) if value > 0 => {
                self.current = Demand::Finite(value - 1);
                true
            }
            Demand::Finite(_) => false,
        }
    }
}

impl Default for DemandTracker {
    fn default() -> Self {
        Self::new()
    }
}
