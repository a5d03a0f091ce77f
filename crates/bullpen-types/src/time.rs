//! Totally ordered simulated-time values.
//!
//! The studio's virtual clock runs in fractional hours since the workday
//! opened. Raw `f64` cannot key an ordered collection because `NaN` breaks
//! totality, so this module wraps it: construction rejects `NaN`,
//! infinities, and negative values, and ordering goes through
//! [`f64::total_cmp`]. The result is safe to use as a binary-heap key.

use std::cmp::Ordering;
use std::fmt;

/// Error produced when a raw value cannot be used as simulated time.
#[derive(Debug, thiserror::Error)]
pub enum TimeError {
    /// The value was negative, `NaN`, or infinite.
    #[error("invalid simulated time: {value} (must be finite and non-negative)")]
    InvalidHours {
        /// The rejected raw value.
        value: f64,
    },
}

/// A point on the studio's virtual clock, in fractional simulated hours.
///
/// `0.0` is the moment the studio opens on day one; `8.0` is the end of an
/// eight-hour day. Values are always finite and non-negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimHours(f64);

impl SimHours {
    /// The moment the studio opens.
    pub const ZERO: Self = Self(0.0);

    /// Creates a simulated-time value from fractional hours.
    pub const fn new(hours: f64) -> Result<Self, TimeError> {
        if hours.is_finite() && hours >= 0.0 {
            Ok(Self(hours))
        } else {
            Err(TimeError::InvalidHours { value: hours })
        }
    }

    /// The raw fractional-hour value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// This time advanced by `delay`.
    #[must_use]
    pub const fn plus(self, delay: Self) -> Self {
        Self(self.0 + delay.0)
    }

    /// Hours elapsed from `earlier` to `self`, clamped at zero so a caller
    /// comparing against a later point never sees a negative span.
    #[must_use]
    pub fn since(self, earlier: Self) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl PartialEq for SimHours {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for SimHours {}

impl PartialOrd for SimHours {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimHours {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SimHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn h(hours: f64) -> SimHours {
        SimHours::new(hours).unwrap()
    }

    #[test]
    fn ordering_follows_hours() {
        assert!(h(0.5) < h(1.0));
        assert!(h(8.0) > h(7.99));
        assert_eq!(h(2.5), h(2.5));
    }

    #[test]
    fn rejects_nan_infinity_and_negatives() {
        assert!(SimHours::new(f64::NAN).is_err());
        assert!(SimHours::new(f64::INFINITY).is_err());
        assert!(SimHours::new(-0.1).is_err());
    }

    #[test]
    fn zero_is_the_open_of_day_one() {
        assert_eq!(SimHours::ZERO, h(0.0));
        assert!((SimHours::ZERO.get()).abs() < f64::EPSILON);
    }

    #[test]
    fn plus_advances_time() {
        let later = h(1.0).plus(h(0.5));
        assert_eq!(later, h(1.5));
    }

    #[test]
    fn since_clamps_at_zero() {
        assert!((h(3.0).since(h(1.0)) - 2.0).abs() < f64::EPSILON);
        assert!(h(1.0).since(h(3.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn displays_two_decimal_places() {
        assert_eq!(h(2.5).to_string(), "2.50");
        assert_eq!(SimHours::ZERO.to_string(), "0.00");
    }
}
