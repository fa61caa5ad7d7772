//! Configuration module for stepper-rover.
//!
//! Provides types for loading and validating the robot configuration
//! from TOML files (with `std` feature) or pre-parsed data.

mod mechanical;
mod motor;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use mechanical::DriveGeometry;
pub use motor::{MotorConfig, MotorPair};
pub use system::{ChassisConfig, DriveConfig, RobotConfig, ScanConfig};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{
    Centimeters, CentimetersPerSec, Degrees, DegreesPerSec, Microsteps, StepsPerSec,
    StepsPerSecSquared,
};
