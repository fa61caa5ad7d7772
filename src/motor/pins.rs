//! Digital outputs of one stepper driver.
//!
//! Generic over embedded-hal 1.0 pin types.

use embedded_hal::digital::OutputPin;

use crate::config::MotorConfig;
use crate::error::{MotorError, Result};
use crate::motion::Direction;

/// Output lines of one axis.
///
/// The motion loop only writes; it never reads hardware state back.
pub trait AxisOutputs {
    /// Select the direction of travel.
    fn set_direction(&mut self, direction: Direction) -> Result<()>;

    /// Energize or release the motor coils.
    fn set_enabled(&mut self, enabled: bool) -> Result<()>;

    /// Drive the STEP line.
    fn set_step(&mut self, high: bool) -> Result<()>;
}

/// STEP/DIR/ENABLE pins of a step-direction driver.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `EN`: ENABLE pin type (must implement `OutputPin`)
pub struct AxisPins<STEP, DIR, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
{
    /// STEP pin (one rising edge per step).
    step_pin: STEP,

    /// DIR pin.
    dir_pin: DIR,

    /// ENABLE pin.
    enable_pin: EN,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Wiring options.
    config: MotorConfig,
}

impl<STEP, DIR, EN> AxisPins<STEP, DIR, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
{
    /// Wrap the pins of one driver.
    pub fn new(step_pin: STEP, dir_pin: DIR, enable_pin: EN, config: MotorConfig) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin,
            current_direction: None,
            config,
        }
    }

    /// Last direction written to the DIR pin.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.current_direction
    }

    /// Release the pins.
    pub fn release(self) -> (STEP, DIR, EN) {
        (self.step_pin, self.dir_pin, self.enable_pin)
    }
}

fn write<P: OutputPin>(pin: &mut P, high: bool) -> Result<()> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| MotorError::PinError.into())
}

impl<STEP, DIR, EN> AxisOutputs for AxisPins<STEP, DIR, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
{
    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Forward => !self.config.invert_direction,
            Direction::Backward => self.config.invert_direction,
        };
        write(&mut self.dir_pin, pin_high)?;

        self.current_direction = Some(direction);
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        write(&mut self.enable_pin, enabled != self.config.enable_active_low)
    }

    fn set_step(&mut self, high: bool) -> Result<()> {
        write(&mut self.step_pin, high)
    }
}

impl<A: AxisOutputs + ?Sized> AxisOutputs for &mut A {
    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        (**self).set_direction(direction)
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        (**self).set_enabled(enabled)
    }

    fn set_step(&mut self, high: bool) -> Result<()> {
        (**self).set_step(high)
    }
}
