//! Per-frame diagnostic counters

/// Counters reported after each `update`. Nothing here feeds back into the
/// simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Number of completed ticks
    pub tick: u64,
    /// Grains in the store after the tick
    pub total_count: usize,
    /// Size of the active snapshot taken at the start of the tick
    pub active_count: usize,
    /// Grains that settled during the tick
    pub settled_this_tick: usize,
    /// Frames per second derived from the last delta time
    pub fps: u32,
    /// Grains spawned since the engine was created
    pub spawned: u64,
    /// Spawn attempts dropped because the source cell was occupied
    pub spawns_blocked: u64,
}

/// `round(1000 / delta_ms)`, or 0 for a zero, negative or non-finite delta
pub fn fps_from_delta(delta_ms: f64) -> u32 {
    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        return 0;
    }
    (1000.0 / delta_ms).round().min(u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_rounds() {
        assert_eq!(fps_from_delta(16.0), 63);
        assert_eq!(fps_from_delta(1000.0 / 60.0), 60);
        assert_eq!(fps_from_delta(1000.0), 1);
    }

    #[test]
    fn test_fps_degenerate_deltas() {
        assert_eq!(fps_from_delta(0.0), 0);
        assert_eq!(fps_from_delta(-5.0), 0);
        assert_eq!(fps_from_delta(f64::NAN), 0);
        assert_eq!(fps_from_delta(f64::INFINITY), 0);
    }
}
