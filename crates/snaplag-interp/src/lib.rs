//! Snaplag Interp - Time-delayed snapshot interpolation
//!
//! This crate reconstructs a remote entity's continuous state from
//! discretely-arriving, jitter-prone network updates:
//!
//! - **Ring buffer**: fixed-capacity history of timestamped samples
//! - **Delayed read clock**: the published value lags real time by a
//!   configurable delay, buying jitter tolerance at the cost of lag
//! - **Bracket seek**: each tick locates the two samples bracketing the
//!   delayed read time and blends between them
//! - **Graceful degradation**: every failure holds the last known value
//!   rather than crashing or publishing garbage
//!
//! # Architecture
//!
//! ```text
//! network update + elapsed        frame tick
//!         │                           │
//!         ▼                           ▼
//!  ┌────────────┐  write      ┌──────────────┐  read   ┌────────┐
//!  │   ingest   │────────────▶│ ring buffer  │────────▶│ advance│──▶ get()
//!  └────────────┘   cursor    │ (N samples)  │  seek   └────────┘
//!                             └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use snaplag_core::ScalarBlend;
//! use snaplag_interp::{InterpolantConfig, SnapshotInterpolant};
//!
//! // Zero delay, four retained samples
//! let config = InterpolantConfig::new(0.0, 4);
//! let mut interp = SnapshotInterpolant::new(ScalarBlend, config).unwrap();
//!
//! // Two observations, one second of simulation time apart
//! interp.ingest(0.0, 1.0).unwrap();
//! interp.ingest(10.0, 1.0).unwrap();
//!
//! // Read halfway between them
//! interp.advance(1.5).unwrap();
//! assert_eq!(*interp.get(), 5.0);
//! ```

mod config;
mod error;
mod interpolant;
mod position;

pub use config::{InterpolantConfig, DEFAULT_CAPACITY, DEFAULT_TIME_DELAY, MIN_CAPACITY};
pub use error::{Error, Result};
pub use interpolant::{InterpolantStats, SnapshotInterpolant};
pub use position::{PositionBlend, PositionInterpolant};

// Re-export the strategy seam for convenience
pub use snaplag_core::SampleBlend;
