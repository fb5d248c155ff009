pub const DEADBAND: f64 = 0.2;

/// Weight of the squared joystick response. Must not exceed 1.0.
pub const JOYSTICK_GOVERNOR: f64 = 0.3;

pub const THROTTLE_GOVERNOR: f64 = 1.0 - JOYSTICK_GOVERNOR;

/// Below this vector length the joystick direction is taken as angle zero.
pub const DIRECTION_EPSILON: f64 = 1e-6;

/// Ratio of max magnitude to deadband above which rescaling is skipped.
pub const DEADBAND_PASSTHROUGH_RATIO: f64 = 1e12;
