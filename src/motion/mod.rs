//! Motion module for stepper-rover.
//!
//! Provides motion profiles, per-axis pulse generation and the two-axis executor.

mod axis;
mod executor;
mod hooks;
mod profile;

pub use axis::{AxisStepper, Edge};
pub use executor::{jerk_limited_start, MotionExecutor};
pub use hooks::{FnHooks, MotionHooks, MotionOutcome, NoHooks, StopSignal};
pub use profile::{Axis, AxisTarget, Direction, MotionProfile, PositionIncrement, StepLimit};
