//! Per-axis wiring configuration from TOML.

use serde::Deserialize;

/// Wiring of one stepper driver (STEP/DIR/ENABLE lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    /// Invert direction pin logic (forward drives DIR low).
    pub invert_direction: bool,

    /// ENABLE line energizes the driver when low.
    pub enable_active_low: bool,
}

impl MotorConfig {
    /// Wiring of the left wheel driver on the reference robot.
    pub const LEFT: Self = Self {
        invert_direction: true,
        enable_active_low: true,
    };

    /// Wiring of the right wheel driver on the reference robot.
    pub const RIGHT: Self = Self {
        invert_direction: false,
        enable_active_low: true,
    };
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self::RIGHT
    }
}

/// Wiring of both wheel drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MotorPair {
    /// Left wheel (axis 1).
    pub left: MotorConfig,

    /// Right wheel (axis 2).
    pub right: MotorConfig,
}

impl Default for MotorPair {
    fn default() -> Self {
        Self {
            left: MotorConfig::LEFT,
            right: MotorConfig::RIGHT,
        }
    }
}
