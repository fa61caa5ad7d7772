//! Dead-reckoning pose tracking.
//!
//! Integrates executed wheel steps into position and heading. There is no
//! position feedback; the pose is only as good as the step counts.

use core::f32::consts::TAU;

use libm::{cosf, fmodf, sinf};

use crate::motion::PositionIncrement;

/// Robot position and heading.
///
/// Position is in centimeters. Orientation is in radians, counter-clockwise
/// positive, kept within `[0, 2π)`. At orientation 0 the robot faces +y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pose {
    /// X position in centimeters.
    pub x: f32,
    /// Y position in centimeters.
    pub y: f32,
    /// Heading in radians.
    pub orientation: f32,
}

impl Pose {
    /// The origin, facing +y.
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        orientation: 0.0,
    };

    /// Create a pose; the orientation is wrapped into `[0, 2π)`.
    #[inline]
    pub fn new(x: f32, y: f32, orientation: f32) -> Self {
        Self {
            x,
            y,
            orientation: wrap_angle(orientation),
        }
    }

    /// Return to the origin.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::ORIGIN;
    }

    /// Apply `steps` driving-axis steps of the given increment.
    pub fn apply(&mut self, increment: &PositionIncrement, steps: u32) {
        if steps == 0 {
            return;
        }
        let n = steps as f32;
        match *increment {
            PositionIncrement::Linear { distance_per_step } => {
                self.advance_linear(n * distance_per_step)
            }
            PositionIncrement::Circular {
                radius,
                angle_per_step,
                ..
            } => self.advance_arc(radius, (n * angle_per_step).to_radians()),
        }
    }

    /// Move `distance` centimeters along the current heading.
    pub fn advance_linear(&mut self, distance: f32) {
        self.x -= distance * sinf(self.orientation);
        self.y += distance * cosf(self.orientation);
    }

    /// Turn by `angle` radians on an arc of signed `radius` centimeters.
    ///
    /// A positive radius puts the center on the robot's right. Radius 0 is a
    /// spin in place.
    pub fn advance_arc(&mut self, radius: f32, angle: f32) {
        let start = self.orientation;
        let end = start + angle;
        self.x += radius * (cosf(start) - cosf(end));
        self.y += radius * (sinf(start) - sinf(end));
        self.orientation = wrap_angle(end);
    }

    /// Position of a point mounted at `offset` in the robot frame.
    pub fn sensor_position(&self, offset: (f32, f32)) -> (f32, f32) {
        let (ox, oy) = offset;
        let (sin, cos) = (sinf(self.orientation), cosf(self.orientation));
        (
            self.x + ox * cos - oy * sin,
            self.y + ox * sin + oy * cos,
        )
    }
}

/// Wrap an angle in radians into `[0, 2π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = fmodf(angle, TAU);
    let wrapped = if wrapped < 0.0 { wrapped + TAU } else { wrapped };
    // -tiny + TAU rounds to TAU in f32
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
