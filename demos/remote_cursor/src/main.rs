//! Remote Cursor Demo
//!
//! Simulates a remote entity circling the origin whose position updates
//! arrive at a jittery cadence, and reconstructs a smooth track with a
//! delayed snapshot interpolant. Rendering is stood in for by printing
//! the interpolated position once every few frames.

use snaplag_interp::{InterpolantConfig, PositionInterpolant};

/// Render frame step (60 Hz)
const FRAME_DT: f64 = 1.0 / 60.0;
/// Simulation time between authoritative updates (10 Hz)
const UPDATE_DT: f64 = 0.1;
/// Seconds the read clock trails real time
const TIME_DELAY: f64 = 0.15;
/// Total updates produced by the simulated sender
const UPDATE_COUNT: usize = 40;

/// Authoritative position of the simulated entity at time `t`
fn position_at(t: f64) -> [f64; 3] {
    let angle = t * std::f64::consts::TAU / 4.0;
    [2.0 * angle.cos(), 2.0 * angle.sin(), 0.0]
}

/// Wall-clock arrival time of update `k`, with deterministic jitter
///
/// The update itself always represents `(k + 1) * UPDATE_DT` of
/// simulation time; only its arrival is shifted.
fn arrival_time(k: usize) -> f64 {
    let jitter = [0.0, 0.031, -0.018, 0.052, 0.009, -0.024][k % 6];
    (k + 1) as f64 * UPDATE_DT + jitter
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Snaplag Remote Cursor Demo ===\n");

    let config = InterpolantConfig::new(TIME_DELAY, 8);
    let mut interp = PositionInterpolant::position(config).unwrap();

    println!(
        "delay: {:.0} ms, buffer: {} samples, updates at {:.0} Hz, frames at {:.0} Hz\n",
        TIME_DELAY * 1000.0,
        interp.capacity(),
        1.0 / UPDATE_DT,
        1.0 / FRAME_DT
    );

    let mut next_update = 0;
    let total_frames = (UPDATE_COUNT as f64 * UPDATE_DT / FRAME_DT) as usize;

    for frame in 0..=total_frames {
        let now = frame as f64 * FRAME_DT;

        // Deliver every update that has "arrived" by this frame
        while next_update < UPDATE_COUNT && arrival_time(next_update) <= now {
            let sim_time = (next_update + 1) as f64 * UPDATE_DT;
            if let Err(err) = interp.ingest(position_at(sim_time), UPDATE_DT) {
                tracing::warn!(%err, "dropping corrupt update");
            }
            next_update += 1;
        }

        // A failed advance holds the last value; the demo keeps running
        if let Err(err) = interp.advance(FRAME_DT) {
            tracing::warn!(%err, "seek failed, holding last value");
        }

        if frame % 12 == 0 {
            let rendered = interp.get();
            let actual = position_at((now - TIME_DELAY).max(0.0));
            println!(
                "t={:5.2}s  rendered=({:6.3}, {:6.3})  actual(t-delay)=({:6.3}, {:6.3})",
                now, rendered.x, rendered.y, actual[0], actual[1]
            );
        }
    }

    let stats = interp.stats();
    println!(
        "\ningested: {}, seek misses: {}, corrupt samples: {}",
        stats.samples_ingested, stats.seek_misses, stats.corrupt_samples
    );
}
