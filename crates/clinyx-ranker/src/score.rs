//! Fixed-point match percentage.
//!
//! Scores are held as tenths of a percent (`0..=1000`) and computed with
//! integer arithmetic, so the same inputs produce the same score on every
//! platform. Rounding is half-up: 1/16 = 6.25% becomes 6.3.

use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(u16);

impl Score {
    pub const ZERO: Score = Score(0);
    pub const FULL: Score = Score(1000);

    /// Percentage of `profile_size` covered by `matches`, rounded half-up to
    /// one decimal place. `None` when the profile is empty.
    ///
    /// `matches` is capped at `profile_size`.
    pub fn from_ratio(matches: usize, profile_size: usize) -> Option<Score> {
        if profile_size == 0 {
            return None;
        }
        let size = profile_size as u64;
        let matched = (matches as u64).min(size);
        // round(matched * 1000 / size) with halves going up
        let tenths = (matched * 2000 + size) / (2 * size);
        Some(Score(tenths.min(1000) as u16))
    }

    /// Build a score from tenths of a percent, saturating at 100.0.
    pub fn from_tenths(tenths: u16) -> Score {
        Score(tenths.min(1000))
    }

    /// Smallest score not below a floating point percentage, clamped to
    /// `0.0..=100.0`. Turns user-supplied floors into comparable scores, so
    /// `score >= Score::from_percent(floor)` holds exactly when the score's
    /// percentage is at least `floor`.
    pub fn from_percent(percent: f64) -> Score {
        if !percent.is_finite() || percent <= 0.0 {
            return Score::ZERO;
        }
        // tolerance absorbs representation error such as 1.1 * 10.0 > 11.0
        let tenths = (percent * 10.0 - 1e-9).ceil();
        Score::from_tenths(tenths.clamp(0.0, 1000.0) as u16)
    }

    pub fn tenths(self) -> u16 {
        self.0
    }

    pub fn as_percent(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_percent())
    }
}
