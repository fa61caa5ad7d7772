//! Unit tests for TOML configuration parsing.

use stepper_rover::config::units::Microsteps;
use stepper_rover::config::{load_config, DriveGeometry, RobotConfig};

/// Test parsing a complete robot configuration from TOML.
#[test]
fn test_parse_robot_config() {
    let toml_str = r#"
[chassis]
wheel_diameter_cm = 6.5
wheel_separation_cm = 21.0
sensor_offset_cm = [1.0, 7.0]

[drive]
steps_per_revolution = 200
microsteps = 4
acceleration_steps_per_sec2 = 3000.0
max_speed_jump_steps_per_sec = 150.0
sample_interval_steps = 20
settle_ms = 50
release_ms = 500
idle_poll_ms = 25

[motors.left]
invert_direction = false

[motors.right]
invert_direction = true
enable_active_low = false

[scan]
dwell_ms = 0
"#;

    let config: RobotConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.chassis.wheel_diameter.0, 6.5);
    assert_eq!(config.chassis.wheel_separation.0, 21.0);
    assert_eq!(config.chassis.sensor_offset.0 .0, 1.0);
    assert_eq!(config.chassis.sensor_offset.1 .0, 7.0);
    assert_eq!(config.drive.microsteps, Microsteps::QUARTER);
    assert_eq!(config.drive.acceleration.0, 3000.0);
    assert_eq!(config.drive.max_speed_jump.0, 150.0);
    assert_eq!(config.drive.sample_interval_steps, 20);
    assert_eq!(config.drive.settle_ms, 50);
    assert_eq!(config.drive.release_ms, 500);
    assert_eq!(config.drive.idle_poll_ms, 25);
    assert!(!config.motors.left.invert_direction);
    assert!(config.motors.left.enable_active_low);
    assert!(config.motors.right.invert_direction);
    assert!(!config.motors.right.enable_active_low);
    assert_eq!(config.scan.dwell_ms, 0);
}

/// Test that omitted tables fall back to the reference robot.
#[test]
fn test_partial_config_uses_defaults() {
    let toml_str = r#"
[drive]
microsteps = 8
"#;

    let config: RobotConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let geometry = DriveGeometry::from_config(&config);

    assert_eq!(geometry.steps_per_revolution, 1600);
    assert_eq!(config.chassis.wheel_separation.0, 23.5);
    assert_eq!(config.drive.acceleration.0, 4000.0);
    assert!(config.motors.left.invert_direction);
    assert!(!config.motors.right.invert_direction);
    assert_eq!(config.scan.dwell_ms, 200);
}

/// Test that an invalid microstep value is rejected during parsing.
#[test]
fn test_invalid_microsteps_rejected() {
    let toml_str = r#"
[drive]
microsteps = 3
"#;

    let result: Result<RobotConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test loading a configuration file from disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("stepper_rover_load_config_test.toml");
    std::fs::write(
        &path,
        r#"
[chassis]
wheel_diameter_cm = 7.0
"#,
    )
    .expect("Failed to write config file");

    let config = load_config(&path).expect("Failed to load config");
    assert_eq!(config.chassis.wheel_diameter.0, 7.0);

    let _ = std::fs::remove_file(&path);
}
