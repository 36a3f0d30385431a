//! Secondary axis bound for the volume overlay.

const AXIS_QUANTUM: f64 = 1e8;
const PEAK_HEADROOM: f64 = 4.0;

/// Four times the peak volume, rounded up to a whole number of hundred-millions.
///
/// The bars then fill roughly the lower quarter of the axis. Empty input gives 0.
pub fn volume_axis_max(volumes: &[u64]) -> f64 {
    let peak = volumes.iter().copied().max().unwrap_or(0) as f64;
    (peak * PEAK_HEADROOM / AXIS_QUANTUM).ceil() * AXIS_QUANTUM
}
