//! Interpolant configuration - delay and buffer sizing
//!
//! The two knobs of the interpolator: how far behind real time the read
//! clock runs, and how many samples the ring buffer retains. A larger
//! delay absorbs more network jitter but makes the entity visibly lag; a
//! larger buffer widens the seekable window behind the newest update.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Minimum buffer capacity
///
/// Interpolation needs at least one past, one current and one next slot
/// to be distinguishable.
pub const MIN_CAPACITY: usize = 3;

/// Default buffer capacity
///
/// Eight samples at a 10 Hz update rate covers ~0.8 seconds of history.
pub const DEFAULT_CAPACITY: usize = 8;

/// Default read delay in seconds
pub const DEFAULT_TIME_DELAY: f64 = 0.1;

/// Configuration for a [`SnapshotInterpolant`](crate::SnapshotInterpolant)
///
/// # Example
///
/// ```
/// use snaplag_interp::{InterpolantConfig, MIN_CAPACITY};
///
/// let config = InterpolantConfig::default();
/// assert!(config.capacity() >= MIN_CAPACITY);
/// assert!(config.validate().is_ok());
///
/// // A negative delay is clamped to zero
/// let config = InterpolantConfig::new(-1.0, 16);
/// assert_eq!(config.time_delay(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InterpolantConfig {
    /// Seconds of intentional lag subtracted from the read clock
    ///
    /// Clamped to `>= 0.0`.
    time_delay: f64,
    /// Number of retained samples
    ///
    /// Must be at least [`MIN_CAPACITY`]; checked by [`validate`](Self::validate).
    capacity: usize,
}

impl InterpolantConfig {
    /// Create a configuration with the given delay (seconds) and capacity
    ///
    /// The delay is clamped to `>= 0.0`. The capacity is validated at
    /// interpolant construction, not here.
    pub fn new(time_delay: f64, capacity: usize) -> Self {
        Self {
            time_delay: time_delay.max(0.0),
            capacity,
        }
    }

    /// Get the read delay in seconds
    pub fn time_delay(&self) -> f64 {
        self.time_delay
    }

    /// Get the buffer capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Set the read delay, clamped to `>= 0.0`
    pub fn set_time_delay(&mut self, seconds: f64) {
        self.time_delay = seconds.max(0.0);
    }

    /// Check that the capacity supports interpolation
    pub fn validate(&self) -> Result<()> {
        if self.capacity < MIN_CAPACITY {
            return Err(Error::CapacityTooSmall(self.capacity));
        }
        Ok(())
    }
}

impl Default for InterpolantConfig {
    fn default() -> Self {
        Self {
            time_delay: DEFAULT_TIME_DELAY,
            capacity: DEFAULT_CAPACITY,
        }
    }
}
