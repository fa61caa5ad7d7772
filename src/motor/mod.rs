//! Motor module for stepper-rover.
//!
//! Provides the driver outputs, dead-reckoned pose and executor builder.

mod builder;
mod pins;
mod pose;

pub use builder::MotionExecutorBuilder;
pub use pins::{AxisOutputs, AxisPins};
pub use pose::{wrap_angle, Pose};
