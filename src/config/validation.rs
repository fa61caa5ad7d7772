//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::system::{ChassisConfig, DriveConfig};
use super::RobotConfig;

/// Validate a robot configuration.
///
/// Checks:
/// - Wheel diameter and separation are positive
/// - Steps per revolution is non-zero
/// - Acceleration and maximum speed jump are positive
/// - Sample interval is at least one step
pub fn validate_config(config: &RobotConfig) -> Result<()> {
    validate_chassis(&config.chassis)?;
    validate_drive(&config.drive)?;
    Ok(())
}

fn validate_chassis(chassis: &ChassisConfig) -> Result<()> {
    // NaN fails these comparisons too
    if !(chassis.wheel_diameter.0 > 0.0) {
        return Err(Error::Config(ConfigError::InvalidWheelDiameter(
            chassis.wheel_diameter.0,
        )));
    }

    if !(chassis.wheel_separation.0 > 0.0) {
        return Err(Error::Config(ConfigError::InvalidWheelSeparation(
            chassis.wheel_separation.0,
        )));
    }

    Ok(())
}

fn validate_drive(drive: &DriveConfig) -> Result<()> {
    if drive.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            drive.steps_per_revolution,
        )));
    }

    if !(drive.acceleration.0 > 0.0) {
        return Err(Error::Config(ConfigError::InvalidAcceleration(
            drive.acceleration.0,
        )));
    }

    if !(drive.max_speed_jump.0 > 0.0) {
        return Err(Error::Config(ConfigError::InvalidSpeedJump(
            drive.max_speed_jump.0,
        )));
    }

    if drive.sample_interval_steps == 0 {
        return Err(Error::Config(ConfigError::InvalidSampleInterval));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Centimeters, StepsPerSec};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RobotConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_wheel_diameter() {
        let mut config = RobotConfig::default();
        config.chassis.wheel_diameter = Centimeters(-1.0);

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidWheelDiameter(_)))
        ));
    }

    #[test]
    fn test_nan_speed_jump_rejected() {
        let mut config = RobotConfig::default();
        config.drive.max_speed_jump = StepsPerSec(f32::NAN);

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidSpeedJump(_)))
        ));
    }
}
