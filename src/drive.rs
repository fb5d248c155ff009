use crate::{
    geometry::Rotation2,
    shaper::{AxisInputs, ShapeReport, ShapedCommand, VehicleLimits, VelocityShaper},
};

/// The driver's four axes, sampled at call time.
pub trait AxisSource {
    fn x(&mut self) -> f64;
    fn y(&mut self) -> f64;
    fn omega(&mut self) -> f64;
    fn throttle(&mut self) -> f64;

    fn sample(&mut self) -> AxisInputs {
        AxisInputs {
            x: self.x(),
            y: self.y(),
            omega: self.omega(),
            throttle: self.throttle(),
        }
    }
}

/// The drivetrain consuming shaped commands.
pub trait Vehicle {
    fn heading(&self) -> Rotation2;
    fn max_linear_speed(&self) -> f64;
    fn max_angular_speed(&self) -> f64;
    fn apply_velocity_command(&mut self, command: ShapedCommand);

    fn limits(&self) -> VehicleLimits {
        VehicleLimits {
            heading: self.heading(),
            max_linear_speed: self.max_linear_speed(),
            max_angular_speed: self.max_angular_speed(),
        }
    }
}

impl AxisSource for AxisInputs {
    fn x(&mut self) -> f64 {
        self.x
    }

    fn y(&mut self) -> f64 {
        self.y
    }

    fn omega(&mut self) -> f64 {
        self.omega
    }

    fn throttle(&mut self) -> f64 {
        self.throttle
    }

    fn sample(&mut self) -> AxisInputs {
        *self
    }
}

/// An [`AxisSource`] made of four supplier closures.
#[derive(Debug, Clone)]
pub struct FnAxisSource<X, Y, O, T> {
    pub x: X,
    pub y: Y,
    pub omega: O,
    pub throttle: T,
}

impl<X, Y, O, T> FnAxisSource<X, Y, O, T>
where
    X: FnMut() -> f64,
    Y: FnMut() -> f64,
    O: FnMut() -> f64,
    T: FnMut() -> f64,
{
    pub fn new(x: X, y: Y, omega: O, throttle: T) -> Self {
        Self {
            x,
            y,
            omega,
            throttle,
        }
    }
}

impl<X, Y, O, T> AxisSource for FnAxisSource<X, Y, O, T>
where
    X: FnMut() -> f64,
    Y: FnMut() -> f64,
    O: FnMut() -> f64,
    T: FnMut() -> f64,
{
    fn x(&mut self) -> f64 {
        (self.x)()
    }

    fn y(&mut self) -> f64 {
        (self.y)()
    }

    fn omega(&mut self) -> f64 {
        (self.omega)()
    }

    fn throttle(&mut self) -> f64 {
        (self.throttle)()
    }
}

/// Field-relative joystick drive. Call [`JoystickDrive::step`] once per
/// control tick.
#[derive(Debug)]
pub struct JoystickDrive<A> {
    shaper: VelocityShaper,
    axes: A,
}

impl<A> JoystickDrive<A>
where
    A: AxisSource,
{
    pub fn new(shaper: VelocityShaper, axes: A) -> Self {
        Self { shaper, axes }
    }

    pub fn shaper(&self) -> &VelocityShaper {
        &self.shaper
    }

    pub fn axes_mut(&mut self) -> &mut A {
        &mut self.axes
    }

    pub fn into_parts(self) -> (VelocityShaper, A) {
        (self.shaper, self.axes)
    }

    pub fn step<V>(&mut self, vehicle: &mut V) -> ShapeReport
    where
        V: Vehicle + ?Sized,
    {
        let Self { shaper, axes } = self;

        let inputs = axes.sample();
        let limits = vehicle.limits();
        let (command, report) = shaper.shape(&inputs, &limits);
        vehicle.apply_velocity_command(command);

        report
    }
}
