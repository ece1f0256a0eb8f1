//! Dashboard indicators computed from raw counts.

/// Bed occupancy in percent, clamped to `0..=100`. Zero capacity reads as 0.
pub fn occupancy_rate(occupied: u32, capacity: u32) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    (occupied as f64 / capacity as f64 * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Direction of change between two readings. Changes within `tolerance`
/// (absolute) are `Stable`.
pub fn trend_direction(previous: f64, current: f64, tolerance: f64) -> Trend {
    let delta = current - previous;
    if delta.abs() <= tolerance.abs() {
        Trend::Stable
    } else if delta > 0.0 {
        Trend::Up
    } else {
        Trend::Down
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GaugeLevel {
    Normal,
    Warning,
    Critical,
}

impl GaugeLevel {
    pub fn color(&self) -> &'static str {
        match self {
            GaugeLevel::Normal => "#22c55e",
            GaugeLevel::Warning => "#f59e0b",
            GaugeLevel::Critical => "#ef4444",
        }
    }
}

/// Lower bounds at which a gauge turns warning and critical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeThresholds {
    pub warning: f64,
    pub critical: f64,
}

impl Default for GaugeThresholds {
    fn default() -> Self {
        Self {
            warning: 75.0,
            critical: 90.0,
        }
    }
}

pub fn gauge_level(value: f64, thresholds: &GaugeThresholds) -> GaugeLevel {
    if value >= thresholds.critical {
        GaugeLevel::Critical
    } else if value >= thresholds.warning {
        GaugeLevel::Warning
    } else {
        GaugeLevel::Normal
    }
}
