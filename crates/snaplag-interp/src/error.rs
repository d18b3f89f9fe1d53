//! Error types for snaplag-interp

use thiserror::Error;

/// Interpolation error type
#[derive(Debug, Error)]
pub enum Error {
    /// Buffer capacity below the minimum needed for interpolation
    #[error("capacity {0} too small, interpolation needs at least 3 samples")]
    CapacityTooSmall(usize),

    /// No bracketing pair found for the seek target
    #[error("no bracketing samples for target {target} (retained window {oldest}..{newest})")]
    SeekMiss {
        target: f64,
        oldest: f64,
        newest: f64,
    },

    /// A merge or blend produced a non-finite value; nothing was committed
    #[error("corrupt sample rejected: {0}")]
    CorruptSample(#[from] snaplag_core::Error),
}

/// Result type for interpolation operations
pub type Result<T> = std::result::Result<T, Error>;
