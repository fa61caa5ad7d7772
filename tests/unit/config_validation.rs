//! Unit tests for configuration validation.

use stepper_rover::config::{parse_config, validate_config, RobotConfig};
use stepper_rover::error::{ConfigError, Error};

/// Test validation of the reference configuration.
#[test]
fn test_default_config_passes_validation() {
    assert!(validate_config(&RobotConfig::default()).is_ok());
}

/// Test validation fails for a zero wheel separation.
#[test]
fn test_zero_wheel_separation() {
    let toml_str = r#"
[chassis]
wheel_separation_cm = 0.0
"#;

    let result = parse_config(toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidWheelSeparation(_)))
    ));
}

/// Test validation fails for zero steps per revolution.
#[test]
fn test_zero_steps_per_revolution() {
    let toml_str = r#"
[drive]
steps_per_revolution = 0
"#;

    let result = parse_config(toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)))
    ));
}

/// Test validation fails for a negative speed jump.
#[test]
fn test_negative_speed_jump() {
    let toml_str = r#"
[drive]
max_speed_jump_steps_per_sec = -10.0
"#;

    let config: RobotConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidSpeedJump(_)))
    ));
}

/// Test validation fails for a zero sample interval.
#[test]
fn test_zero_sample_interval() {
    let mut config = RobotConfig::default();
    config.drive.sample_interval_steps = 0;

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidSampleInterval))
    );
}

/// Test that parse errors carry a message.
#[test]
fn test_malformed_toml_reports_parse_error() {
    let result = parse_config("[chassis\nwheel_diameter_cm = 1.0");
    match result {
        Err(Error::Config(ConfigError::ParseError(msg))) => assert!(!msg.is_empty()),
        other => panic!("expected parse error, got {:?}", other),
    }
}
