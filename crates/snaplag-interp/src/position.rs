//! Position interpolation - the 3-vector instantiation
//!
//! The motivating use case: reconstructing a remote entity's position from
//! raw 3-component network updates. The merge overwrites the slot with the
//! newest observation and the blend is component-wise linear
//! interpolation; both reject non-finite results so malformed wire data
//! never reaches rendered state.

use crate::{InterpolantConfig, Result, SnapshotInterpolant};
use snaplag_core::{Error as CoreError, Result as CoreResult, SampleBlend, Vec3};

/// Overwrite merge + component-wise lerp over [`Vec3`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionBlend;

impl SampleBlend for PositionBlend {
    type Raw = [f64; 3];
    type Value = Vec3;

    fn initial(&self) -> Vec3 {
        Vec3::ZERO
    }

    fn merge(&self, _slot: &Vec3, raw: [f64; 3]) -> CoreResult<Vec3> {
        let value = Vec3::from(raw);
        if !value.is_finite() {
            return Err(CoreError::NonFinite { operation: "merge" });
        }
        Ok(value)
    }

    fn blend(&self, _current: &Vec3, start: &Vec3, end: &Vec3, fraction: f64) -> CoreResult<Vec3> {
        let value = start.lerp(end, fraction);
        if !value.is_finite() {
            return Err(CoreError::NonFinite { operation: "blend" });
        }
        Ok(value)
    }
}

/// Snapshot interpolant over remote entity positions
pub type PositionInterpolant = SnapshotInterpolant<PositionBlend>;

impl SnapshotInterpolant<PositionBlend> {
    /// Create a position interpolant with the given configuration
    pub fn position(config: InterpolantConfig) -> Result<Self> {
        Self::new(PositionBlend, config)
    }
}
