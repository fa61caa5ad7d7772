//! Builder pattern for MotionExecutor.

use core::ops::Deref;

use embedded_hal::delay::DelayNs;

use crate::config::{validate_config, DriveGeometry, RobotConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motion::{MotionExecutor, StopSignal};

use super::pins::AxisOutputs;

/// Builder for creating MotionExecutor instances.
pub struct MotionExecutorBuilder<LEFT, RIGHT, DELAY, SIGNAL>
where
    LEFT: AxisOutputs,
    RIGHT: AxisOutputs,
    DELAY: DelayNs,
    SIGNAL: Deref<Target = StopSignal>,
{
    left: Option<LEFT>,
    right: Option<RIGHT>,
    delay: Option<DELAY>,
    stop_signal: Option<SIGNAL>,
    config: RobotConfig,
}

impl<LEFT, RIGHT, DELAY, SIGNAL> Default for MotionExecutorBuilder<LEFT, RIGHT, DELAY, SIGNAL>
where
    LEFT: AxisOutputs,
    RIGHT: AxisOutputs,
    DELAY: DelayNs,
    SIGNAL: Deref<Target = StopSignal>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<LEFT, RIGHT, DELAY, SIGNAL> MotionExecutorBuilder<LEFT, RIGHT, DELAY, SIGNAL>
where
    LEFT: AxisOutputs,
    RIGHT: AxisOutputs,
    DELAY: DelayNs,
    SIGNAL: Deref<Target = StopSignal>,
{
    /// Create a new builder with the reference robot configuration.
    pub fn new() -> Self {
        Self {
            left: None,
            right: None,
            delay: None,
            stop_signal: None,
            config: RobotConfig::default(),
        }
    }

    /// Set the left wheel driver.
    pub fn left(mut self, outputs: LEFT) -> Self {
        self.left = Some(outputs);
        self
    }

    /// Set the right wheel driver.
    pub fn right(mut self, outputs: RIGHT) -> Self {
        self.right = Some(outputs);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the stop signal shared with the controller.
    pub fn stop_signal(mut self, signal: SIGNAL) -> Self {
        self.stop_signal = Some(signal);
        self
    }

    /// Configure from a RobotConfig.
    pub fn from_config(mut self, config: &RobotConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Build the MotionExecutor.
    ///
    /// # Errors
    ///
    /// Returns an error if a component is missing or the configuration is invalid.
    pub fn build(self) -> Result<MotionExecutor<LEFT, RIGHT, DELAY, SIGNAL>> {
        let left = self
            .left
            .ok_or(Error::Config(ConfigError::MissingComponent("left")))?;
        let right = self
            .right
            .ok_or(Error::Config(ConfigError::MissingComponent("right")))?;
        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingComponent("delay")))?;
        let stop_signal = self
            .stop_signal
            .ok_or(Error::Config(ConfigError::MissingComponent("stop_signal")))?;

        validate_config(&self.config)?;

        Ok(MotionExecutor::new(
            left,
            right,
            delay,
            stop_signal,
            DriveGeometry::from_config(&self.config),
            self.config.drive,
            self.config.scan,
        ))
    }
}
