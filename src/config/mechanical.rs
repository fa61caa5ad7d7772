//! Drive geometry derived from robot configuration.

use core::f32::consts::PI;

use super::system::RobotConfig;
use super::units::Centimeters;

/// Derived mechanical parameters computed from robot configuration.
///
/// These are computed once at initialization and used for all motion planning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveGeometry {
    /// Total steps per wheel revolution (steps × microsteps).
    pub steps_per_revolution: u32,

    /// Wheel diameter in centimeters.
    pub wheel_diameter: f32,

    /// Distance between the wheels in centimeters.
    pub wheel_separation: f32,

    /// Distance a wheel rolls per step, in centimeters.
    pub step_length: f32,

    /// Heading change per step when spinning in place, in degrees.
    pub spin_angle_per_step: f32,

    /// Sensor position relative to the wheel midpoint (robot frame).
    pub sensor_offset: (f32, f32),
}

impl DriveGeometry {
    /// Compute the drive geometry from robot configuration.
    pub fn from_config(config: &RobotConfig) -> Self {
        let steps_per_revolution =
            config.drive.steps_per_revolution as u32 * config.drive.microsteps.value() as u32;
        let (sx, sy) = config.chassis.sensor_offset;
        Self::new(
            config.chassis.wheel_diameter,
            config.chassis.wheel_separation,
            steps_per_revolution,
        )
        .with_sensor_offset(sx, sy)
    }

    /// Compute the drive geometry from raw dimensions.
    pub fn new(
        wheel_diameter: Centimeters,
        wheel_separation: Centimeters,
        steps_per_revolution: u32,
    ) -> Self {
        let d = wheel_diameter.0;
        let w = wheel_separation.0;
        let s = steps_per_revolution as f32;

        Self {
            steps_per_revolution,
            wheel_diameter: d,
            wheel_separation: w,
            step_length: d * PI / s,
            // Each wheel rolls on a circle of diameter W around the midpoint.
            spin_angle_per_step: 360.0 * d / (w * s),
            sensor_offset: (0.0, 0.0),
        }
    }

    /// Set the sensor position relative to the wheel midpoint.
    pub fn with_sensor_offset(mut self, x: Centimeters, y: Centimeters) -> Self {
        self.sensor_offset = (x.0, y.0);
        self
    }

    /// Convert a linear wheel speed (cm/s) to a step rate.
    #[inline]
    pub fn cm_to_steps(&self, cm: f32) -> f32 {
        cm / self.step_length
    }

    /// Convert a spin rate (deg/s) to a per-wheel step rate.
    #[inline]
    pub fn degrees_to_steps(&self, degrees: f32) -> f32 {
        degrees / self.spin_angle_per_step
    }
}
