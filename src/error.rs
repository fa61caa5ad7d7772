//! Error types for stepper-rover.
//!
//! Provides unified error handling across configuration, motor output, and motion planning.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-rover operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor output error
    Motor(MotorError),
    /// Motion request error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Invalid steps per revolution (must be > 0)
    InvalidStepsPerRevolution(u16),
    /// Invalid wheel diameter (must be > 0)
    InvalidWheelDiameter(f32),
    /// Invalid wheel separation (must be > 0)
    InvalidWheelSeparation(f32),
    /// Invalid acceleration (must be > 0)
    InvalidAcceleration(f32),
    /// Invalid maximum speed jump (must be > 0)
    InvalidSpeedJump(f32),
    /// Sample interval must be at least one step
    InvalidSampleInterval,
    /// A builder was finalized without a required component
    MissingComponent(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor output errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Pin operation failed
    PinError,
}

/// Motion request errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A parameter was out of its valid domain (non-positive distance, zero speed, NaN, ...)
    InvalidArgument {
        /// Name of the rejected parameter
        parameter: &'static str,
        /// Rejected value
        value: f32,
    },
    /// Unrecognized remote-control command word
    UnknownCommand(heapless::String<32>),
    /// Remote-control command is missing a numeric argument
    MissingArgument(&'static str),
}

impl MotionError {
    pub(crate) fn invalid(parameter: &'static str, value: f32) -> Self {
        MotionError::InvalidArgument { parameter, value }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidWheelDiameter(v) => write!(f, "Invalid wheel diameter: {} cm. Must be > 0", v),
            ConfigError::InvalidWheelSeparation(v) => {
                write!(f, "Invalid wheel separation: {} cm. Must be > 0", v)
            }
            ConfigError::InvalidAcceleration(v) => write!(f, "Invalid acceleration: {}. Must be > 0", v),
            ConfigError::InvalidSpeedJump(v) => write!(f, "Invalid maximum speed jump: {}. Must be > 0", v),
            ConfigError::InvalidSampleInterval => write!(f, "Sample interval must be at least 1 step"),
            ConfigError::MissingComponent(what) => write!(f, "{} is required", what),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::InvalidArgument { parameter, value } => {
                write!(f, "Invalid {}: {}", parameter, value)
            }
            MotionError::UnknownCommand(word) => write!(f, "Unknown command '{}'", word),
            MotionError::MissingArgument(what) => write!(f, "Missing argument: {}", what),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}
