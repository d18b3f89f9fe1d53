//! Snaplag Core - Value types and blend strategies
//!
//! This crate provides the building blocks the snapshot interpolator is
//! generic over:
//!
//! - **SampleBlend**: the strategy seam deciding how raw observations are
//!   merged into buffer slots and how two bracketing samples are blended
//! - **Vec3**: a 3-component vector for the common position use case
//! - **ScalarBlend**: linear interpolation over a single `f64`
//!
//! # Example
//!
//! ```rust
//! use snaplag_core::{SampleBlend, ScalarBlend};
//!
//! let blend = ScalarBlend;
//! let merged = blend.merge(&0.0, 10.0).unwrap();
//! assert_eq!(merged, 10.0);
//!
//! let halfway = blend.blend(&0.0, &0.0, &10.0, 0.5).unwrap();
//! assert_eq!(halfway, 5.0);
//! ```

mod blend;
mod error;
mod vec;

pub use blend::{SampleBlend, ScalarBlend};
pub use error::{Error, Result};
pub use vec::Vec3;
