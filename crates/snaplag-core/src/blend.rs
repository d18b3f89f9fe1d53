//! Blend strategies for snapshot interpolation
//!
//! The interpolator itself is value-type-agnostic: everything numeric is
//! delegated to a [`SampleBlend`] implementation. The strategy supplies the
//! initial value for empty buffer slots, folds raw observations into a slot,
//! and blends two bracketing samples into the published value.

use crate::{Error, Result};

/// Strategy for merging and blending interpolation samples
///
/// Implementations own the numeric semantics of one tracked quantity.
/// `Raw` is what the network layer hands over; `Value` is what the buffer
/// stores and the consumer reads. Both methods return `Err` on non-finite
/// results so malformed upstream data never reaches downstream consumers.
pub trait SampleBlend {
    /// Raw observation type as decoded from the network
    type Raw;
    /// Stored and published value type
    type Value: Clone + std::fmt::Debug;

    /// The value buffer slots and the published value start from
    fn initial(&self) -> Self::Value;

    /// Fold a raw observation into a buffer slot
    ///
    /// `slot` is the value previously held by the slot being written,
    /// letting an implementation accumulate rather than overwrite. The
    /// provided blends simply overwrite.
    fn merge(&self, slot: &Self::Value, raw: Self::Raw) -> Result<Self::Value>;

    /// Blend two bracketing samples at `fraction` in `[0, 1]`
    ///
    /// `current` is the previously published value, passed so an
    /// implementation can smooth or reuse it. The provided blends ignore
    /// it and interpolate `start` toward `end`.
    fn blend(
        &self,
        current: &Self::Value,
        start: &Self::Value,
        end: &Self::Value,
        fraction: f64,
    ) -> Result<Self::Value>;
}

/// Linear interpolation over a single `f64`
///
/// The one-dimensional instantiation: overwrite merge, linear blend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarBlend;

impl SampleBlend for ScalarBlend {
    type Raw = f64;
    type Value = f64;

    fn initial(&self) -> f64 {
        0.0
    }

    fn merge(&self, _slot: &f64, raw: f64) -> Result<f64> {
        if !raw.is_finite() {
            return Err(Error::NonFinite { operation: "merge" });
        }
        Ok(raw)
    }

    fn blend(&self, _current: &f64, start: &f64, end: &f64, fraction: f64) -> Result<f64> {
        let value = start + (end - start) * fraction;
        if !value.is_finite() {
            return Err(Error::NonFinite { operation: "blend" });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_merge_overwrites() {
        let blend = ScalarBlend;
        assert_eq!(blend.merge(&5.0, 7.0).unwrap(), 7.0);
    }

    #[test]
    fn test_scalar_merge_rejects_non_finite() {
        let blend = ScalarBlend;
        assert!(blend.merge(&0.0, f64::NAN).is_err());
        assert!(blend.merge(&0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_scalar_blend_linear() {
        let blend = ScalarBlend;
        assert_eq!(blend.blend(&0.0, &2.0, &6.0, 0.25).unwrap(), 3.0);
        assert_eq!(blend.blend(&0.0, &2.0, &6.0, 0.0).unwrap(), 2.0);
        assert_eq!(blend.blend(&0.0, &2.0, &6.0, 1.0).unwrap(), 6.0);
    }

    #[test]
    fn test_scalar_blend_rejects_non_finite() {
        let blend = ScalarBlend;
        assert!(blend.blend(&0.0, &f64::NAN, &1.0, 0.5).is_err());
        assert!(blend.blend(&0.0, &0.0, &f64::INFINITY, 0.5).is_err());
    }
}
