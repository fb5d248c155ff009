use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("joystick governor {0} is outside [0, 1]")]
    JoystickGovernorOutOfRange(f64),
    #[error("deadband {0} is outside [0, 1)")]
    DeadbandOutOfRange(f64),
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("unable to parse shaper config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
