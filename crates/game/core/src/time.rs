//! Simulation clock.

use core::fmt;

/// Milliseconds since the session clock started.
///
/// The clock only moves forward, one engine step at a time. Every timed
/// behavior (attack cooldowns, spawn delays) is stored as the `SimTime` at
/// which it becomes allowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub const fn saturating_add(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}s", self.0 / 1000, self.0 % 1000)
    }
}

/// Converts a duration in seconds to whole milliseconds. Non-positive inputs map to zero.
pub fn millis_from_secs(secs: f32) -> u64 {
    if secs.is_nan() || secs <= 0.0 {
        0
    } else {
        (f64::from(secs) * 1000.0).round() as u64
    }
}
