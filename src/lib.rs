//! Joystick-to-velocity shaping for field-relative holonomic drive.
//!
//! A [`VelocityShaper`] turns four driver axes into a velocity command:
//! deadband, squared response, throttle trim, then a frame change using the
//! vehicle heading. [`JoystickDrive`] wires it between an [`AxisSource`] and a
//! [`Vehicle`] for an external scheduler to tick.

pub mod config;
pub mod constants;
pub mod deadband;
pub mod drive;
pub mod error;
pub mod geometry;
pub mod shaper;

pub use config::ShaperInit;
pub use drive::{AxisSource, FnAxisSource, JoystickDrive, Vehicle};
pub use error::ConfigError;
pub use geometry::{Rotation2, Vector2};
pub use shaper::{AxisInputs, ShapeReport, ShapedCommand, VehicleLimits, VelocityShaper};
