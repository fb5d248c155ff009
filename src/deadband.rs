use crate::constants::DEADBAND_PASSTHROUGH_RATIO;

/// Zeroes `value` inside `[-deadband, deadband]` and rescales the rest so the
/// output runs continuously from 0 at the deadband edge to ±1 at ±1.
pub fn apply_deadband(value: f64, deadband: f64) -> f64 {
    apply_deadband_with_max(value, deadband, 1.0)
}

/// Same as [`apply_deadband`] for inputs spanning `[-max_magnitude, max_magnitude]`.
pub fn apply_deadband_with_max(value: f64, deadband: f64, max_magnitude: f64) -> f64 {
    if value.abs() <= deadband {
        return 0.0;
    }

    // A vanishing deadband only shifts the value.
    if max_magnitude / deadband > DEADBAND_PASSTHROUGH_RATIO {
        return if value > 0.0 {
            value - deadband
        } else {
            value + deadband
        };
    }

    let edge = if value > 0.0 { deadband } else { -deadband };
    max_magnitude * (value - edge) / (max_magnitude - deadband)
}
