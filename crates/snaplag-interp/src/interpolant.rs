//! Time-delayed ring-buffer snapshot interpolation
//!
//! [`SnapshotInterpolant`] buffers timestamped observations of a remote
//! quantity and publishes a value interpolated at a read clock that runs a
//! configurable delay behind the newest observation. Irregular arrival
//! timing is absorbed as long as the delayed read time stays inside the
//! retained window.
//!
//! Timestamps are logical simulation time, not wall-clock arrival time:
//! each observation carries the elapsed simulation time since the previous
//! one, which decouples interpolation from network send jitter.

use crate::{Error, InterpolantConfig, Result};
use serde::{Deserialize, Serialize};
use snaplag_core::SampleBlend;

/// One ring-buffer slot: an accumulated value and the logical time at
/// which it becomes valid
///
/// Slots are ordered by `end_time`, not by buffer index; each write sets
/// `end_time` to the previous slot's `end_time` plus the elapsed time
/// supplied with the observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample<T> {
    /// Merged observation, valid at `end_time`
    pub start_value: T,
    /// Logical timestamp (seconds) at which the value is valid
    pub end_time: f64,
}

/// Diagnostic counters and window bounds for one interpolant
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InterpolantStats {
    /// Buffer capacity
    pub capacity: usize,
    /// Total observations committed via `ingest`
    pub samples_ingested: u64,
    /// Seek attempts that found no bracketing pair
    pub seek_misses: u64,
    /// Observations or blends rejected for non-finite results
    pub corrupt_samples: u64,
    /// Oldest retained `end_time`
    pub oldest_end_time: f64,
    /// Newest retained `end_time`
    pub newest_end_time: f64,
}

/// Ring buffer of timestamped samples with a delayed, seekable read clock
///
/// Owned exclusively by the entity it tracks; `&mut self` on the write
/// paths encodes the single-timeline access model. A multi-threaded host
/// must serialize calls itself. All operations are bounded: `ingest` is
/// O(1), `advance` is O(N) over the fixed capacity.
///
/// Generic over `B: SampleBlend` so the same machinery serves positions,
/// scalars, or any caller-defined quantity.
#[derive(Debug)]
pub struct SnapshotInterpolant<B: SampleBlend> {
    /// Merge/blend strategy
    blend: B,
    /// Fixed-capacity ring of samples, allocated once
    samples: Vec<Sample<B::Value>>,
    /// Index of the next slot to overwrite
    write_cursor: usize,
    /// Monotonic virtual read clock, advanced by the caller each tick
    read_time: f64,
    /// Seconds subtracted from the read clock before seeking
    time_delay: f64,
    /// Last committed interpolation result
    current: B::Value,
    samples_ingested: u64,
    seek_misses: u64,
    corrupt_samples: u64,
}

impl<B: SampleBlend> SnapshotInterpolant<B> {
    /// Create an interpolant from a blend strategy and configuration
    ///
    /// All slots start at the strategy's initial value with `end_time = 0`.
    /// Returns [`Error::CapacityTooSmall`] if the configured capacity is
    /// below [`MIN_CAPACITY`](crate::MIN_CAPACITY).
    pub fn new(blend: B, config: InterpolantConfig) -> Result<Self> {
        config.validate()?;
        let samples = (0..config.capacity())
            .map(|_| Sample {
                start_value: blend.initial(),
                end_time: 0.0,
            })
            .collect();
        let current = blend.initial();
        Ok(Self {
            blend,
            samples,
            write_cursor: 0,
            read_time: 0.0,
            time_delay: config.time_delay(),
            current,
            samples_ingested: 0,
            seek_misses: 0,
            corrupt_samples: 0,
        })
    }

    /// Ingest a fresh observation
    ///
    /// `elapsed` is the simulation time since the previous observation was
    /// produced, not the wall-clock time since it arrived. The observation
    /// is folded into the slot at the write cursor via the strategy's
    /// merge, the slot's `end_time` becomes the previous slot's `end_time`
    /// plus `elapsed`, and the cursor advances. O(1).
    ///
    /// If the merge reports a non-finite result the slot and cursor are
    /// left untouched and [`Error::CorruptSample`] is returned.
    pub fn ingest(&mut self, raw: B::Raw, elapsed: f64) -> Result<()> {
        let start_time = self.samples[self.wrap(self.write_cursor as isize - 1)].end_time;

        let merged = match self.blend.merge(&self.samples[self.write_cursor].start_value, raw) {
            Ok(value) => value,
            Err(err) => {
                self.corrupt_samples += 1;
                return Err(err.into());
            }
        };

        let slot = &mut self.samples[self.write_cursor];
        slot.start_value = merged;
        slot.end_time = start_time + elapsed;

        self.write_cursor = (self.write_cursor + 1) % self.samples.len();
        self.samples_ingested += 1;
        Ok(())
    }

    /// Advance the read clock and recompute the published value
    ///
    /// Call once per tick with the elapsed time since the previous tick.
    /// Before any observation has been ingested this is a no-op and the
    /// published value stays at the strategy's initial value.
    ///
    /// The seek target is `read_time - time_delay`. If it falls outside
    /// the retained window the read clock is clamped to the newest
    /// `end_time` and the target recomputed, so the reader never seeks
    /// into overwritten or not-yet-populated slots.
    pub fn advance(&mut self, elapsed: f64) -> Result<()> {
        self.read_time += elapsed;

        let (min_end_time, max_end_time) = self.end_time_range();
        if max_end_time <= 0.0 {
            // No observation has ever been ingested
            return Ok(());
        }

        let mut target = self.read_time - self.time_delay;
        if target < min_end_time || target > max_end_time {
            tracing::debug!(
                target_time = target,
                oldest = min_end_time,
                newest = max_end_time,
                "read clock outside retained window, clamping to newest sample"
            );
            self.read_time = max_end_time;
            target = max_end_time - self.time_delay;
        }

        self.seek(target)
    }

    /// Get the current interpolated value
    ///
    /// O(1), no side effects; repeated calls between `advance` calls
    /// return the same value.
    pub fn get(&self) -> &B::Value {
        &self.current
    }

    /// Current value of the virtual read clock
    pub fn read_time(&self) -> f64 {
        self.read_time
    }

    /// Configured read delay in seconds
    pub fn time_delay(&self) -> f64 {
        self.time_delay
    }

    /// Buffer capacity
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Get diagnostic counters and the retained time window
    pub fn stats(&self) -> InterpolantStats {
        let (oldest, newest) = self.end_time_range();
        InterpolantStats {
            capacity: self.samples.len(),
            samples_ingested: self.samples_ingested,
            seek_misses: self.seek_misses,
            corrupt_samples: self.corrupt_samples,
            oldest_end_time: oldest,
            newest_end_time: newest,
        }
    }

    /// Reset to the freshly-constructed state
    ///
    /// Clears all samples, the read clock, the published value and the
    /// counters; the capacity and delay are kept.
    pub fn reset(&mut self) {
        for slot in &mut self.samples {
            slot.start_value = self.blend.initial();
            slot.end_time = 0.0;
        }
        self.write_cursor = 0;
        self.read_time = 0.0;
        self.current = self.blend.initial();
        self.samples_ingested = 0;
        self.seek_misses = 0;
        self.corrupt_samples = 0;
    }

    /// Locate the bracketing pair for `target` and commit the blended value
    ///
    /// Scans the most recent `N - 1` slots newest-to-oldest. Slot `S`
    /// brackets the target when `prev.end_time <= target <= S.end_time`
    /// where `prev` is one older in write order; candidates failing the
    /// lower bound are skipped so stale warm-up slots do not shadow an
    /// older valid bracket. The committed value blends `prev.start_value`
    /// toward `S.start_value`.
    fn seek(&mut self, target: f64) -> Result<()> {
        let capacity = self.samples.len() as isize;
        for back in 1..capacity {
            let index = self.wrap(self.write_cursor as isize - back);
            let sample = &self.samples[index];
            if target > sample.end_time {
                continue;
            }

            let prev = &self.samples[self.wrap(self.write_cursor as isize - back - 1)];
            if target < prev.end_time {
                // Bracket invalid for this candidate, older slots may still apply
                continue;
            }

            let duration = sample.end_time - prev.end_time;
            // Degenerate spans are an expected warm-up transient
            let fraction = if duration > 0.0 && duration.is_finite() {
                (target - prev.end_time) / duration
            } else {
                0.0
            };

            match self
                .blend
                .blend(&self.current, &prev.start_value, &sample.start_value, fraction)
            {
                Ok(value) => {
                    self.current = value;
                    return Ok(());
                }
                Err(err) => {
                    self.corrupt_samples += 1;
                    return Err(err.into());
                }
            }
        }

        self.seek_misses += 1;
        let (oldest, newest) = self.end_time_range();
        tracing::warn!(
            target_time = target,
            oldest,
            newest,
            "no bracketing samples for seek target, holding last value"
        );
        Err(Error::SeekMiss {
            target,
            oldest,
            newest,
        })
    }

    /// Min and max `end_time` across all slots, O(N)
    fn end_time_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for sample in &self.samples {
            min = min.min(sample.end_time);
            max = max.max(sample.end_time);
        }
        (min, max)
    }

    /// Ring index from a possibly-negative offset, always in `[0, N)`
    fn wrap(&self, index: isize) -> usize {
        index.rem_euclid(self.samples.len() as isize) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaplag_core::ScalarBlend;

    fn scalar(time_delay: f64, capacity: usize) -> SnapshotInterpolant<ScalarBlend> {
        SnapshotInterpolant::new(ScalarBlend, InterpolantConfig::new(time_delay, capacity))
            .unwrap()
    }

    #[test]
    fn test_capacity_too_small() {
        let err =
            SnapshotInterpolant::new(ScalarBlend, InterpolantConfig::new(0.0, 2)).unwrap_err();
        assert!(matches!(err, Error::CapacityTooSmall(2)));
    }

    #[test]
    fn test_monotonic_read_time() {
        let mut interp = scalar(0.0, 4);
        let mut last = interp.read_time();
        for elapsed in [0.0, 0.5, 0.0, 1.25, 0.25] {
            interp.advance(elapsed).unwrap();
            assert!(interp.read_time() >= last);
            last = interp.read_time();
        }
        assert_eq!(last, 2.0);
    }

    #[test]
    fn test_default_before_first_ingest() {
        let mut interp = scalar(0.1, 4);
        for _ in 0..10 {
            interp.advance(0.25).unwrap();
            assert_eq!(*interp.get(), 0.0);
        }
    }

    #[test]
    fn test_bracket_midpoint() {
        // Slots end at [1, 2, 3] holding [10, 20, 30]
        let mut interp = scalar(0.0, 3);
        interp.ingest(10.0, 1.0).unwrap();
        interp.ingest(20.0, 1.0).unwrap();
        interp.ingest(30.0, 1.0).unwrap();

        interp.advance(1.5).unwrap();
        assert_eq!(*interp.get(), 15.0);
    }

    #[test]
    fn test_bracket_boundary_tie() {
        // At a shared end_time the scan picks the newer bracket at fraction 0
        let mut interp = scalar(0.0, 3);
        interp.ingest(10.0, 1.0).unwrap();
        interp.ingest(20.0, 1.0).unwrap();
        interp.ingest(30.0, 1.0).unwrap();

        interp.advance(2.0).unwrap();
        assert_eq!(*interp.get(), 20.0);
    }

    #[test]
    fn test_delay_absorption() {
        // Observations equal to their own timestamp at a steady 1 Hz rate:
        // the output at read time t must equal the value valid at t - delay
        let mut interp = scalar(1.0, 8);
        for k in 1..=6 {
            interp.ingest(k as f64, 1.0).unwrap();
        }

        interp.advance(6.0).unwrap();
        assert_eq!(*interp.get(), 5.0);

        interp.advance(0.5).unwrap();
        assert_eq!(*interp.get(), 5.5);
    }

    #[test]
    fn test_clamp_on_overrun() {
        // Reader far ahead of the buffer: read clock clamps to the newest
        // sample and the seek still succeeds
        let mut interp = scalar(0.0, 4);
        interp.ingest(10.0, 1.0).unwrap();
        interp.ingest(20.0, 1.0).unwrap();

        interp.advance(10.0).unwrap();
        assert_eq!(interp.read_time(), 2.0);
        assert_eq!(*interp.get(), 20.0);
        assert_eq!(interp.stats().seek_misses, 0);
    }

    #[test]
    fn test_idempotent_get() {
        let mut interp = scalar(0.0, 4);
        interp.ingest(10.0, 1.0).unwrap();
        interp.ingest(20.0, 1.0).unwrap();
        interp.advance(1.5).unwrap();

        let first = *interp.get();
        let second = *interp.get();
        assert_eq!(first, second);
    }

    #[test]
    fn test_corrupt_sample_rejected() {
        let mut interp = scalar(0.0, 4);
        interp.ingest(10.0, 1.0).unwrap();

        let err = interp.ingest(f64::NAN, 1.0).unwrap_err();
        assert!(matches!(err, Error::CorruptSample(_)));
        assert_eq!(interp.stats().corrupt_samples, 1);
        assert_eq!(interp.stats().samples_ingested, 1);

        // The rejected observation committed nothing: the next good one
        // lands in the same slot and interpolation proceeds normally
        interp.ingest(20.0, 1.0).unwrap();
        interp.advance(1.5).unwrap();
        assert_eq!(*interp.get(), 15.0);
    }

    #[test]
    fn test_corrupt_blend_holds_value() {
        // Finite observations whose lerp overflows: the blend fails, the
        // published value is held and the rejection is counted
        let mut interp = scalar(0.0, 4);
        interp.ingest(1.0e308, 1.0).unwrap();
        interp.ingest(-1.0e308, 1.0).unwrap();

        let err = interp.advance(1.5).unwrap_err();
        assert!(matches!(err, Error::CorruptSample(_)));
        assert_eq!(*interp.get(), 0.0);
        assert_eq!(interp.stats().corrupt_samples, 1);
        assert_eq!(interp.stats().samples_ingested, 2);
    }

    #[test]
    fn test_wraparound() {
        // Five observations through a capacity-3 ring: the overwritten
        // samples (values 1 and 2) must never be selected as a bracket
        let mut interp = scalar(0.0, 3);
        for k in 1..=5 {
            interp.ingest(k as f64, 1.0).unwrap();
        }

        // Bracket crossing the ring seam: [3, 4]
        interp.advance(3.5).unwrap();
        assert_eq!(*interp.get(), 3.5);

        // Bracket within the newest pair: [4, 5]
        interp.advance(1.0).unwrap();
        assert_eq!(*interp.get(), 4.5);
    }

    #[test]
    fn test_seek_miss_when_delay_exceeds_window() {
        // A delay larger than the retained window pushes the target before
        // the oldest sample: hold the last value, count and report the miss
        let mut interp = scalar(10.0, 3);
        interp.ingest(10.0, 1.0).unwrap();
        interp.ingest(20.0, 1.0).unwrap();
        interp.ingest(30.0, 1.0).unwrap();

        let err = interp.advance(3.0).unwrap_err();
        assert!(matches!(err, Error::SeekMiss { .. }));
        assert_eq!(*interp.get(), 0.0);
        assert_eq!(interp.stats().seek_misses, 1);
    }

    #[test]
    fn test_stats_window() {
        let mut interp = scalar(0.0, 3);
        for k in 1..=5 {
            interp.ingest((k * 10) as f64, 1.0).unwrap();
        }

        let stats = interp.stats();
        assert_eq!(stats.capacity, 3);
        assert_eq!(stats.samples_ingested, 5);
        assert_eq!(stats.oldest_end_time, 3.0);
        assert_eq!(stats.newest_end_time, 5.0);
    }

    #[test]
    fn test_reset() {
        let mut interp = scalar(0.0, 4);
        interp.ingest(10.0, 1.0).unwrap();
        interp.ingest(20.0, 1.0).unwrap();
        interp.advance(1.5).unwrap();
        assert_eq!(*interp.get(), 15.0);

        interp.reset();
        assert_eq!(*interp.get(), 0.0);
        assert_eq!(interp.read_time(), 0.0);
        assert_eq!(interp.stats().samples_ingested, 0);
        assert_eq!(interp.capacity(), 4);

        // Usable again after reset
        interp.ingest(1.0, 1.0).unwrap();
        interp.ingest(3.0, 1.0).unwrap();
        interp.advance(1.5).unwrap();
        assert_eq!(*interp.get(), 2.0);
    }
}
