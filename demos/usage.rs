use anyhow::Result;
use clap::Parser;
use holonomic_teleop::{
    AxisInputs, JoystickDrive, Rotation2, ShapedCommand, ShaperInit, Vector2, Vehicle,
};
use rand::prelude::*;
use std::{fs, path::PathBuf, thread, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Opts {
    /// TOML file with `deadband` and `joystick_governor`
    #[clap(long)]
    pub config: Option<PathBuf>,
    #[clap(long, default_value = "50")]
    pub rate_hz: u32,
    #[clap(long, default_value = "250")]
    pub ticks: usize,
    #[clap(long, default_value = "4.0")]
    pub max_linear_speed: f64,
    #[clap(long, default_value = "6.0")]
    pub max_angular_speed: f64,
}

/// Integrates commands into a pose instead of driving hardware.
struct SimVehicle {
    position: Vector2,
    heading: f64,
    dt: f64,
    max_linear_speed: f64,
    max_angular_speed: f64,
}

impl Vehicle for SimVehicle {
    fn heading(&self) -> Rotation2 {
        Rotation2::from_radians(self.heading)
    }

    fn max_linear_speed(&self) -> f64 {
        self.max_linear_speed
    }

    fn max_angular_speed(&self) -> f64 {
        self.max_angular_speed
    }

    fn apply_velocity_command(&mut self, command: ShapedCommand) {
        // Commands arrive in the vehicle frame.
        let field = command.linear().rotate_by(self.heading());
        self.position.x += field.x * self.dt;
        self.position.y += field.y * self.dt;
        self.heading += command.omega * self.dt;
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Opts {
        config,
        rate_hz,
        ticks,
        max_linear_speed,
        max_angular_speed,
    } = Opts::parse();

    // Load and validate tuning
    let init = match config {
        Some(path) => ShaperInit::from_toml_str(&fs::read_to_string(path)?)?,
        None => ShaperInit::default(),
    };
    let shaper = init.build()?;

    let period = Duration::from_secs_f64(1.0 / rate_hz.max(1) as f64);
    let mut vehicle = SimVehicle {
        position: Vector2::ZERO,
        heading: 0.0,
        dt: period.as_secs_f64(),
        max_linear_speed,
        max_angular_speed,
    };

    // Random stick wandering stands in for a gamepad.
    let mut rng = rand::thread_rng();
    let mut drive = JoystickDrive::new(shaper, AxisInputs::default());

    for tick in 0..ticks {
        let axes = drive.axes_mut();
        axes.x = (axes.x + rng.gen_range(-0.1..0.1)).clamp(-1.0, 1.0);
        axes.y = (axes.y + rng.gen_range(-0.1..0.1)).clamp(-1.0, 1.0);
        axes.omega = (axes.omega + rng.gen_range(-0.1..0.1)).clamp(-1.0, 1.0);
        axes.throttle = (axes.throttle + rng.gen_range(-0.1..0.1)).clamp(0.0, 1.0);

        let report = drive.step(&mut vehicle);

        if tick % rate_hz.max(1) as usize == 0 {
            info!(
                tick,
                x = vehicle.position.x,
                y = vehicle.position.y,
                heading = vehicle.heading,
                shaped_linear = report.shaped_linear,
                shaped_omega = report.shaped_omega,
                "vehicle pose"
            );
        }

        thread::sleep(period);
    }

    Ok(())
}
