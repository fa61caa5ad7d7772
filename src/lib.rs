//! # stepper-rover
//!
//! Motion core for a two-wheel differential robot driven by stepper motors,
//! with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Coordinated pulse generation**: both wheels ramp along a shared
//!   trapezoidal profile and reach their target speeds at the same time
//! - **Jerk-limited hand-off**: consecutive motions chain without stopping
//!   when the wheels can jump straight to the next speeds
//! - **Dead reckoning**: pose tracked from executed steps on straight and
//!   circular segments
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR/ENABLE, `DelayNs` for timing
//! - **no_std compatible**: Core library works without standard library
//! - **Configuration-driven**: robot dimensions and tuning from TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_rover::{AxisPins, MotionExecutor, NoHooks, StopSignal};
//! use stepper_rover::config::units::UnitExt;
//!
//! static STOP: StopSignal = StopSignal::new();
//!
//! // Load configuration from TOML
//! let config = stepper_rover::load_config("robot.toml")?;
//!
//! let mut robot = MotionExecutor::builder()
//!     .from_config(&config)
//!     .left(AxisPins::new(step1, dir1, enable1, config.motors.left))
//!     .right(AxisPins::new(step2, dir2, enable2, config.motors.right))
//!     .delay(delay)
//!     .stop_signal(&STOP)
//!     .build()?;
//!
//! // Drive 20 cm ahead at 10 cm/s
//! let profile = robot.factory().forward(10.0.cm_per_sec(), Some(20.0.cm()), true)?;
//! robot.run(&profile, NoHooks)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Logging macros, must come before the modules that use them
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod intent;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_config, DriveGeometry, MotorConfig, RobotConfig};
pub use error::{Error, Result};
pub use intent::{Intent, MotionProfileFactory, ScanPlan};
pub use motion::{
    Axis, Direction, FnHooks, MotionExecutor, MotionHooks, MotionOutcome, MotionProfile,
    NoHooks, PositionIncrement, StepLimit, StopSignal,
};
pub use motor::{AxisOutputs, AxisPins, MotionExecutorBuilder, Pose};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{
    Centimeters, CentimetersPerSec, Degrees, DegreesPerSec, Microsteps, StepsPerSec,
    StepsPerSecSquared,
};
