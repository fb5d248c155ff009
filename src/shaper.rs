use crate::{
    constants::{DEADBAND, JOYSTICK_GOVERNOR},
    deadband::apply_deadband,
    geometry::{Rotation2, Vector2},
};
use tracing::trace;

/// One sample of the four driver axes, each nominally in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisInputs {
    pub x: f64,
    pub y: f64,
    pub omega: f64,
    pub throttle: f64,
}

/// Snapshot of the vehicle state the shaper needs for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleLimits {
    pub heading: Rotation2,
    pub max_linear_speed: f64,
    pub max_angular_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShapedCommand {
    pub vx: f64,
    pub vy: f64,
    pub omega: f64,
}

/// Intermediate values of one shaping pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeReport {
    pub linear_magnitude: f64,
    pub linear_direction: Rotation2,
    pub shaped_linear: f64,
    pub shaped_omega: f64,
    pub throttle: f64,
    pub linear_trimmed: bool,
    pub angular_trimmed: bool,
}

impl ShapedCommand {
    pub const ZERO: Self = Self {
        vx: 0.0,
        vy: 0.0,
        omega: 0.0,
    };

    /// Converts field-relative speeds into the vehicle frame for a vehicle
    /// facing `heading`.
    pub fn from_field_relative(linear: Vector2, omega: f64, heading: Rotation2) -> Self {
        let Vector2 { x: vx, y: vy } = linear.rotate_by(heading.inverse());
        Self { vx, vy, omega }
    }

    pub fn linear(&self) -> Vector2 {
        Vector2::new(self.vx, self.vy)
    }
}

/// Stateless joystick-to-velocity transform.
///
/// Build one through [`crate::ShaperInit::build`], which validates the tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityShaper {
    deadband: f64,
    joystick_governor: f64,
    throttle_governor: f64,
}

impl Default for VelocityShaper {
    fn default() -> Self {
        Self::new(DEADBAND, JOYSTICK_GOVERNOR)
    }
}

impl VelocityShaper {
    pub(crate) fn new(deadband: f64, joystick_governor: f64) -> Self {
        Self {
            deadband,
            joystick_governor,
            throttle_governor: 1.0 - joystick_governor,
        }
    }

    pub fn deadband(&self) -> f64 {
        self.deadband
    }

    pub fn joystick_governor(&self) -> f64 {
        self.joystick_governor
    }

    pub fn throttle_governor(&self) -> f64 {
        self.throttle_governor
    }

    pub fn shape_command(&self, inputs: &AxisInputs, limits: &VehicleLimits) -> ShapedCommand {
        self.shape(inputs, limits).0
    }

    pub fn shape(
        &self,
        inputs: &AxisInputs,
        limits: &VehicleLimits,
    ) -> (ShapedCommand, ShapeReport) {
        let Self {
            deadband,
            joystick_governor,
            throttle_governor,
        } = *self;
        let AxisInputs {
            x,
            y,
            omega: raw_omega,
            throttle: raw_throttle,
        } = *inputs;
        let VehicleLimits {
            heading,
            max_linear_speed,
            max_angular_speed,
        } = *limits;

        // Apply deadband
        let linear_magnitude = apply_deadband(x.hypot(y), deadband);
        let linear_direction = Rotation2::from_xy(x, y);
        let omega = apply_deadband(raw_omega, deadband);
        let throttle = apply_deadband(raw_throttle, deadband);

        // Squared response, then throttle trim. The deadbanded throttle only
        // gates the trim; its size comes from the raw throttle.
        let trim = raw_throttle * throttle_governor;

        let mut shaped_linear = linear_magnitude * linear_magnitude * joystick_governor;
        let linear_trimmed = shaped_linear > 0.0 && throttle > 0.0;
        if linear_trimmed {
            shaped_linear += trim.copysign(shaped_linear);
        }

        let mut shaped_omega = (omega * omega * joystick_governor).copysign(omega);
        let angular_trimmed = shaped_omega != 0.0 && throttle > 0.0;
        if angular_trimmed {
            shaped_omega += trim.copysign(shaped_omega);
        }

        let linear_velocity = Vector2::from_polar(shaped_linear, linear_direction);
        let command = ShapedCommand::from_field_relative(
            linear_velocity.scale(max_linear_speed),
            shaped_omega * max_angular_speed,
            heading,
        );

        trace!(
            vx = command.vx,
            vy = command.vy,
            omega = command.omega,
            shaped_linear,
            shaped_omega,
            "shaped drive command"
        );

        let report = ShapeReport {
            linear_magnitude,
            linear_direction,
            shaped_linear,
            shaped_omega,
            throttle,
            linear_trimmed,
            angular_trimmed,
        };

        (command, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShaperInit;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f64::consts::FRAC_PI_2;

    fn shaper() -> VelocityShaper {
        ShaperInit::default().build().unwrap()
    }

    fn limits(heading_degrees: f64, max_linear: f64, max_angular: f64) -> VehicleLimits {
        VehicleLimits {
            heading: Rotation2::from_radians(heading_degrees.to_radians()),
            max_linear_speed: max_linear,
            max_angular_speed: max_angular,
        }
    }

    fn axes(x: f64, y: f64, omega: f64, throttle: f64) -> AxisInputs {
        AxisInputs {
            x,
            y,
            omega,
            throttle,
        }
    }

    #[test]
    fn full_forward_stick() {
        let command = shaper().shape_command(&axes(1.0, 0.0, 0.0, 0.0), &limits(0.0, 4.0, 6.0));
        assert_abs_diff_eq!(command.vx, 1.2, epsilon = 1e-12);
        assert_abs_diff_eq!(command.vy, 0.0, epsilon = 1e-12);
        assert_eq!(command.omega, 0.0);
    }

    #[test]
    fn axes_at_deadband_edge_produce_nothing() {
        let (command, report) = shaper().shape(&axes(0.2, 0.0, 0.2, 0.2), &limits(30.0, 4.0, 6.0));
        assert_eq!(command.vx, 0.0);
        assert_eq!(command.vy, 0.0);
        assert_eq!(command.omega, 0.0);
        assert_eq!(report.throttle, 0.0);
        assert!(!report.linear_trimmed);
        assert!(!report.angular_trimmed);
    }

    #[test]
    fn zero_input_is_zero_command() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let vehicle = limits(
                rng.gen_range(-360.0..360.0),
                rng.gen_range(0.1..10.0),
                rng.gen_range(0.1..10.0),
            );
            let command = shaper().shape_command(&AxisInputs::default(), &vehicle);
            assert_eq!(command, ShapedCommand::ZERO);
        }
    }

    #[test]
    fn shaped_linear_is_never_negative() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let inputs = axes(
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(0.0..=1.0),
            );
            let (command, report) = shaper().shape(&inputs, &limits(0.0, 1.0, 1.0));
            assert!(report.shaped_linear >= 0.0);
            if report.shaped_omega != 0.0 {
                assert_eq!(report.shaped_omega.signum(), inputs.omega.signum());
                assert_eq!(command.omega.signum(), inputs.omega.signum());
            }
        }
    }

    #[test]
    fn squared_response() {
        // deadband(0.6) = 0.5, so 0.5^2 * 0.3
        let (_, report) = shaper().shape(&axes(0.0, -0.6, -0.6, 0.0), &limits(0.0, 1.0, 1.0));
        assert_abs_diff_eq!(report.linear_magnitude, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(report.shaped_linear, 0.075, epsilon = 1e-12);
        assert_abs_diff_eq!(report.shaped_omega, -0.075, epsilon = 1e-12);
    }

    #[test]
    fn stick_direction_survives_squaring() {
        let command = shaper().shape_command(&axes(-1.0, 0.0, 0.0, 0.0), &limits(0.0, 4.0, 6.0));
        assert_abs_diff_eq!(command.vx, -1.2, epsilon = 1e-12);
        assert_abs_diff_eq!(command.vy, 0.0, epsilon = 1e-12);

        let command = shaper().shape_command(&axes(0.0, 1.0, 0.0, 0.0), &limits(0.0, 4.0, 6.0));
        assert_abs_diff_eq!(command.vx, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(command.vy, 1.2, epsilon = 1e-12);
    }

    #[test]
    fn doubling_limits_doubles_command() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let inputs = axes(
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(0.0..=1.0),
            );
            let heading = rng.gen_range(-180.0..180.0);
            let base = shaper().shape_command(&inputs, &limits(heading, 3.0, 5.0));
            let fast = shaper().shape_command(&inputs, &limits(heading, 6.0, 5.0));
            let spin = shaper().shape_command(&inputs, &limits(heading, 3.0, 10.0));

            assert_eq!(fast.vx, 2.0 * base.vx);
            assert_eq!(fast.vy, 2.0 * base.vy);
            assert_eq!(fast.omega, base.omega);
            assert_eq!(spin.omega, 2.0 * base.omega);
            assert_eq!(spin.linear(), base.linear());
        }
    }

    #[test]
    fn throttle_trims_linear_with_raw_value() {
        // deadbanded throttle 0.5 opens the gate, raw 0.6 sizes the trim
        let (command, report) = shaper().shape(&axes(1.0, 0.0, 0.0, 0.6), &limits(0.0, 1.0, 1.0));
        assert!(report.linear_trimmed);
        assert!(!report.angular_trimmed);
        assert_abs_diff_eq!(report.throttle, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(report.shaped_linear, 0.3 + 0.6 * 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(command.vx, 0.72, epsilon = 1e-12);
        assert_eq!(command.omega, 0.0);
    }

    #[test]
    fn full_throttle_reaches_full_speed() {
        let command = shaper().shape_command(&axes(0.0, -1.0, -1.0, 1.0), &limits(0.0, 4.0, 6.0));
        assert_abs_diff_eq!(command.vx, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(command.vy, -4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(command.omega, -6.0, epsilon = 1e-12);
    }

    #[test]
    fn throttle_inside_deadband_is_ignored() {
        let (command, report) = shaper().shape(&axes(1.0, 0.0, 1.0, 0.15), &limits(0.0, 1.0, 1.0));
        assert!(!report.linear_trimmed);
        assert!(!report.angular_trimmed);
        assert_abs_diff_eq!(command.vx, 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(command.omega, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn throttle_alone_does_not_move() {
        let (command, report) = shaper().shape(&axes(0.1, -0.1, 0.05, 1.0), &limits(45.0, 4.0, 6.0));
        assert!(!report.linear_trimmed);
        assert!(!report.angular_trimmed);
        assert_eq!(command.linear().norm(), 0.0);
        assert_eq!(command.omega, 0.0);
    }

    #[test]
    fn heading_rotation_preserves_magnitude() {
        let inputs = axes(0.7, -0.4, 0.0, 0.5);
        let (_, report) = shaper().shape(&inputs, &limits(0.0, 1.0, 1.0));
        for heading in [0.0, 90.0, 180.0, -33.3, 271.0] {
            let command = shaper().shape_command(&inputs, &limits(heading, 2.5, 1.0));
            assert_abs_diff_eq!(
                command.linear().norm() / 2.5,
                report.shaped_linear,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn heading_turns_field_forward_into_vehicle_frame() {
        let inputs = axes(1.0, 0.0, 0.0, 0.0);
        let limits = VehicleLimits {
            heading: Rotation2::from_radians(FRAC_PI_2),
            max_linear_speed: 4.0,
            max_angular_speed: 6.0,
        };
        let command = shaper().shape_command(&inputs, &limits);
        assert_abs_diff_eq!(command.vx, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(command.vy, -1.2, epsilon = 1e-12);
    }

    #[test]
    fn linear_governor_of_zero_disables_trim() {
        let shaper = ShaperInit {
            joystick_governor: 0.0,
            ..ShaperInit::default()
        }
        .build()
        .unwrap();
        let (command, report) = shaper.shape(&axes(1.0, 0.0, 1.0, 1.0), &limits(0.0, 1.0, 1.0));
        assert!(!report.linear_trimmed);
        assert!(!report.angular_trimmed);
        assert_eq!(command, ShapedCommand::ZERO);
    }
}
