//! Robot configuration - root configuration structure.

use serde::Deserialize;

use super::motor::MotorPair;
use super::units::{Centimeters, Microsteps, StepsPerSec, StepsPerSecSquared};

/// Root configuration structure from TOML.
///
/// Every table and field is optional; omitted values fall back to the
/// reference metal-detector robot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Physical dimensions.
    pub chassis: ChassisConfig,

    /// Stepper drive tuning.
    pub drive: DriveConfig,

    /// Driver wiring for both wheels.
    pub motors: MotorPair,

    /// Area scan behavior.
    pub scan: ScanConfig,
}

/// Physical dimensions of the chassis.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ChassisConfig {
    /// Wheel diameter in centimeters.
    #[serde(rename = "wheel_diameter_cm")]
    pub wheel_diameter: Centimeters,

    /// Distance between the two wheel contact points in centimeters.
    #[serde(rename = "wheel_separation_cm")]
    pub wheel_separation: Centimeters,

    /// Sensor position `(x, y)` relative to the wheel midpoint, robot frame
    /// (+y forward).
    #[serde(rename = "sensor_offset_cm")]
    pub sensor_offset: (Centimeters, Centimeters),
}

impl Default for ChassisConfig {
    fn default() -> Self {
        Self {
            wheel_diameter: Centimeters(6.29),
            wheel_separation: Centimeters(23.5),
            sensor_offset: (Centimeters(0.0), Centimeters(6.5)),
        }
    }
}

/// Stepper drive tuning shared by both axes.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Base steps per revolution (typically 200 for 1.8° motors).
    pub steps_per_revolution: u16,

    /// Microstep setting (1, 2, 4, 8, 16, 32, etc.).
    pub microsteps: Microsteps,

    /// Acceleration of the fastest axis in steps per second squared.
    #[serde(rename = "acceleration_steps_per_sec2")]
    pub acceleration: StepsPerSecSquared,

    /// Largest instantaneous step-rate change a motor tolerates.
    #[serde(rename = "max_speed_jump_steps_per_sec")]
    pub max_speed_jump: StepsPerSec,

    /// Combined steps (both axes) between pose updates and sample callbacks.
    pub sample_interval_steps: u32,

    /// Pause after energizing the drivers before the first step.
    pub settle_ms: u32,

    /// Time held at rest before the drivers are de-energized.
    pub release_ms: u32,

    /// Poll period while holding at rest.
    pub idle_poll_ms: u32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            steps_per_revolution: 200,
            microsteps: Microsteps::HALF,
            acceleration: StepsPerSecSquared(4000.0),
            max_speed_jump: StepsPerSec(200.0),
            sample_interval_steps: 40,
            settle_ms: 100,
            release_ms: 200,
            idle_poll_ms: 50,
        }
    }
}

/// Area scan behavior.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Pause between consecutive scan legs (milliseconds).
    pub dwell_ms: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { dwell_ms: 200 }
    }
}
