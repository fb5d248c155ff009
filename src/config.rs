use crate::{
    constants::{DEADBAND, JOYSTICK_GOVERNOR},
    error::{ConfigError, Result},
    shaper::VelocityShaper,
};
use noisy_float::types::R64;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Tuning for a [`VelocityShaper`].
///
/// The struct is immutable once a shaper is built from it. Validation runs
/// exactly once, in [`ShaperInit::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShaperInit {
    /// Threshold applied to the linear magnitude, rotation and throttle axes.
    #[serde(default = "default_deadband")]
    pub deadband: f64,

    /// Share of the squared joystick response. The throttle trim gets the rest.
    #[serde(default = "default_joystick_governor")]
    pub joystick_governor: f64,
}

impl Default for ShaperInit {
    fn default() -> Self {
        Self {
            deadband: default_deadband(),
            joystick_governor: default_joystick_governor(),
        }
    }
}

impl ShaperInit {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn throttle_governor(&self) -> f64 {
        1.0 - self.joystick_governor
    }

    pub fn build(&self) -> Result<VelocityShaper> {
        let Self {
            deadband,
            joystick_governor,
        } = *self;

        let deadband = finite("deadband", deadband)?.raw();
        let joystick_governor = finite("joystick_governor", joystick_governor)?.raw();

        if !(0.0..1.0).contains(&deadband) {
            return Err(ConfigError::DeadbandOutOfRange(deadband));
        }
        if !(0.0..=1.0).contains(&joystick_governor) {
            return Err(ConfigError::JoystickGovernorOutOfRange(joystick_governor));
        }

        let shaper = VelocityShaper::new(deadband, joystick_governor);
        info!(
            deadband = shaper.deadband(),
            joystick_governor = shaper.joystick_governor(),
            throttle_governor = shaper.throttle_governor(),
            "velocity shaper configured"
        );
        Ok(shaper)
    }
}

fn finite(name: &'static str, value: f64) -> Result<R64> {
    R64::try_new(value).ok_or(ConfigError::NonFinite { name, value })
}

fn default_deadband() -> f64 {
    DEADBAND
}

fn default_joystick_governor() -> f64 {
    JOYSTICK_GOVERNOR
}
