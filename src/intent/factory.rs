//! Translation of motion intents into executable profiles.

use libm::{fabsf, roundf, truncf};

use crate::config::units::{Centimeters, CentimetersPerSec, Degrees, DegreesPerSec};
use crate::config::DriveGeometry;
use crate::error::{MotionError, Result};
use crate::motion::{Axis, AxisTarget, MotionProfile, PositionIncrement, StepLimit};

use super::{Intent, ScanPlan};

fn require_speed(parameter: &'static str, speed: f32) -> Result<f32> {
    if speed == 0.0 || !speed.is_finite() {
        warn!("rejected {}: {}", parameter, speed);
        return Err(MotionError::invalid(parameter, speed).into());
    }
    Ok(speed)
}

fn require_positive(parameter: &'static str, value: f32) -> Result<f32> {
    // NaN fails this check too
    if !(value > 0.0) || value.is_infinite() {
        warn!("rejected {}: {}", parameter, value);
        return Err(MotionError::invalid(parameter, value).into());
    }
    Ok(value)
}

/// Builds [`MotionProfile`]s from physical units.
///
/// Stateless apart from the drive geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfileFactory {
    geometry: DriveGeometry,
}

impl MotionProfileFactory {
    /// Create a factory for the given geometry.
    pub fn new(geometry: DriveGeometry) -> Self {
        Self { geometry }
    }

    /// Drive geometry used for conversions.
    #[inline]
    pub fn geometry(&self) -> &DriveGeometry {
        &self.geometry
    }

    /// Distance budget in steps, truncated toward zero.
    fn distance_steps(&self, parameter: &'static str, distance: Option<Centimeters>) -> Result<StepLimit> {
        match distance {
            None => Ok(StepLimit::Unbounded),
            Some(d) => {
                let d = require_positive(parameter, d.value())?;
                Ok(StepLimit::Finite(truncf(d / self.geometry.step_length) as u32))
            }
        }
    }

    /// Drive straight ahead; a negative speed drives backward.
    ///
    /// Runs until stopped when `distance` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::InvalidArgument` for a zero or non-finite speed,
    /// or a distance that is not positive.
    pub fn forward(
        &self,
        speed: CentimetersPerSec,
        distance: Option<Centimeters>,
        decelerate: bool,
    ) -> Result<MotionProfile> {
        let speed = require_speed("speed", speed.value())?;
        let steps = self.distance_steps("distance", distance)?;
        let step_speed = self.geometry.cm_to_steps(speed);
        let step_length = self.geometry.step_length;

        Ok(MotionProfile {
            left: AxisTarget::new(steps, step_speed),
            right: AxisTarget::new(steps, step_speed),
            increment: PositionIncrement::Linear {
                distance_per_step: if speed > 0.0 { step_length } else { -step_length },
            },
            decelerate,
        })
    }

    /// Drive straight back. Same as [`forward`](Self::forward) with the speed negated.
    pub fn backward(
        &self,
        speed: CentimetersPerSec,
        distance: Option<Centimeters>,
        decelerate: bool,
    ) -> Result<MotionProfile> {
        self.forward(-speed, distance, decelerate)
    }

    /// Spin clockwise in place; a negative speed spins counter-clockwise.
    ///
    /// The step count is the angle rounded to the nearest spin step.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::InvalidArgument` for a zero or non-finite speed,
    /// or an angle that is not positive.
    pub fn turn_right(
        &self,
        speed: DegreesPerSec,
        angle: Option<Degrees>,
        decelerate: bool,
    ) -> Result<MotionProfile> {
        let speed = require_speed("turn speed", speed.value())?;
        let spin = self.geometry.spin_angle_per_step;
        let steps = match angle {
            None => StepLimit::Unbounded,
            Some(a) => {
                let a = require_positive("angle", a.value())?;
                StepLimit::Finite(roundf(a / spin) as u32)
            }
        };
        let step_speed = self.geometry.degrees_to_steps(speed);

        Ok(MotionProfile {
            left: AxisTarget::new(steps, step_speed),
            right: AxisTarget::new(steps, -step_speed),
            increment: PositionIncrement::Circular {
                radius: 0.0,
                angle_per_step: if speed > 0.0 { -spin } else { spin },
                driving: Axis::Left,
            },
            decelerate,
        })
    }

    /// Spin counter-clockwise in place. Same as [`turn_right`](Self::turn_right)
    /// with the speed negated.
    pub fn turn_left(
        &self,
        speed: DegreesPerSec,
        angle: Option<Degrees>,
        decelerate: bool,
    ) -> Result<MotionProfile> {
        self.turn_right(-speed, angle, decelerate)
    }

    /// Drive each wheel at its own speed.
    ///
    /// Equal speeds drive straight; opposite speeds spin in place; one zero
    /// speed pivots on that wheel. Each wheel runs until stopped when its
    /// distance is `None`.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::InvalidArgument` for a non-finite speed or a
    /// distance that is not positive.
    pub fn turn_while_moving(
        &self,
        left_speed: CentimetersPerSec,
        right_speed: CentimetersPerSec,
        left_distance: Option<Centimeters>,
        right_distance: Option<Centimeters>,
        decelerate: bool,
    ) -> Result<MotionProfile> {
        let (v1, v2) = (left_speed.value(), right_speed.value());
        if !v1.is_finite() {
            return Err(MotionError::invalid("left speed", v1).into());
        }
        if !v2.is_finite() {
            return Err(MotionError::invalid("right speed", v2).into());
        }
        if v1 == 0.0 && v2 == 0.0 {
            return Ok(self.idle());
        }

        let left_steps = self.distance_steps("left distance", left_distance)?;
        let right_steps = self.distance_steps("right distance", right_distance)?;
        let step_length = self.geometry.step_length;
        let separation = self.geometry.wheel_separation;

        let increment = if v1 == v2 {
            PositionIncrement::Linear {
                distance_per_step: if v1 > 0.0 { step_length } else { -step_length },
            }
        } else {
            let radius = separation / 2.0 * (v1 + v2) / (v1 - v2);
            let (driving, driving_speed) = if v1 != 0.0 {
                (Axis::Left, v1)
            } else {
                (Axis::Right, v2)
            };
            // Heading change per driving-wheel step, clockwise when the left wheel is faster.
            let angle_per_step = -(step_length * (v1 - v2) / (separation * fabsf(driving_speed)));
            PositionIncrement::Circular {
                radius,
                angle_per_step: angle_per_step.to_degrees(),
                driving,
            }
        };

        Ok(MotionProfile {
            left: AxisTarget::new(left_steps, self.geometry.cm_to_steps(v1)),
            right: AxisTarget::new(right_steps, self.geometry.cm_to_steps(v2)),
            increment,
            decelerate,
        })
    }

    /// Stop and hold.
    #[inline]
    pub fn idle(&self) -> MotionProfile {
        MotionProfile::IDLE
    }

    /// Plan a serpentine scan of `width` × `length` with lanes `lane_spacing`
    /// apart, turning at a rate that keeps the wheels at `speed`.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::InvalidArgument` for any dimension or speed that
    /// is not positive.
    pub fn scan_plan(
        &self,
        width: Centimeters,
        length: Centimeters,
        lane_spacing: Centimeters,
        speed: CentimetersPerSec,
    ) -> Result<ScanPlan> {
        ScanPlan::new(
            width,
            length,
            lane_spacing,
            speed,
            Centimeters(self.geometry.wheel_separation),
        )
    }

    /// Build the profile for an intent.
    pub fn profile(&self, intent: &Intent, decelerate: bool) -> Result<MotionProfile> {
        match *intent {
            Intent::Idle => Ok(self.idle()),
            Intent::Forward { speed, distance } => self.forward(speed, distance, decelerate),
            Intent::Backward { speed, distance } => self.backward(speed, distance, decelerate),
            Intent::TurnRight { speed, angle } => self.turn_right(speed, angle, decelerate),
            Intent::TurnLeft { speed, angle } => self.turn_left(speed, angle, decelerate),
            Intent::Combine {
                left,
                right,
                left_distance,
                right_distance,
            } => self.turn_while_moving(left, right, left_distance, right_distance, decelerate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::UnitExt;
    use crate::config::RobotConfig;
    use crate::error::Error;

    fn factory() -> MotionProfileFactory {
        MotionProfileFactory::new(DriveGeometry::from_config(&RobotConfig::default()))
    }

    fn close(a: f32, b: f32, tolerance: f32) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_scan_plan_turns_with_robot_separation() {
        let f = factory();
        let mut plan = f
            .scan_plan(20.0_f32.cm(), 50.0_f32.cm(), 10.0_f32.cm(), 5.0_f32.cm_per_sec())
            .unwrap();
        assert_eq!(plan.lanes(), 2);

        plan.next();
        match plan.next() {
            Some(Intent::TurnRight { speed, .. }) => {
                // Spin rate in steps/s matches the forward step rate
                let turn_steps = f.geometry().degrees_to_steps(speed.value());
                let lane_steps = f.geometry().cm_to_steps(5.0);
                assert!(close(turn_steps, lane_steps, 0.05));
            }
            other => panic!("unexpected leg {:?}", other),
        }
    }

    #[test]
    fn test_forward_distance() {
        let f = factory();
        let profile = f.forward(10.0_f32.cm_per_sec(), Some(20.0_f32.cm()), false).unwrap();

        // 20 / 0.04940 = 404.8 -> 404
        assert_eq!(profile.left.steps, StepLimit::Finite(404));
        assert_eq!(profile.right.steps, StepLimit::Finite(404));
        assert!(close(profile.left.speed, 202.4, 0.1));
        assert_eq!(profile.left.speed, profile.right.speed);
        assert!(matches!(
            profile.increment,
            PositionIncrement::Linear { distance_per_step } if distance_per_step > 0.0
        ));
    }

    #[test]
    fn test_backward_flips_increment() {
        let f = factory();
        let profile = f.backward(10.0_f32.cm_per_sec(), None, true).unwrap();

        assert_eq!(profile.left.steps, StepLimit::Unbounded);
        assert!(profile.left.speed < 0.0 && profile.right.speed < 0.0);
        assert!(profile.decelerate);
        assert!(matches!(
            profile.increment,
            PositionIncrement::Linear { distance_per_step } if distance_per_step < 0.0
        ));
    }

    #[test]
    fn test_rejects_non_positive_distance() {
        let f = factory();
        for distance in [0.0_f32, -5.0, f32::NAN] {
            let err = f
                .forward(10.0_f32.cm_per_sec(), Some(distance.cm()), false)
                .unwrap_err();
            assert!(matches!(
                err,
                Error::Motion(MotionError::InvalidArgument { parameter: "distance", .. })
            ));
        }
        assert!(f.turn_right(30.0_f32.degrees_per_sec(), Some((-90.0_f32).degrees()), false).is_err());
    }

    #[test]
    fn test_rejects_zero_speed() {
        let f = factory();
        assert!(f.forward(0.0_f32.cm_per_sec(), None, false).is_err());
        assert!(f.turn_left(f32::INFINITY.degrees_per_sec(), None, false).is_err());
    }

    #[test]
    fn test_turn_right_counter_rotates() {
        let f = factory();
        let profile = f.turn_right(30.0_f32.degrees_per_sec(), Some(90.0_f32.degrees()), false).unwrap();

        // 90 / 0.24094 = 373.5 -> 374
        assert_eq!(profile.left.steps, StepLimit::Finite(374));
        assert!(profile.left.speed > 0.0);
        assert_eq!(profile.right.speed, -profile.left.speed);
        match profile.increment {
            PositionIncrement::Circular { radius, angle_per_step, driving } => {
                assert_eq!(radius, 0.0);
                assert!(angle_per_step < 0.0);
                assert_eq!(driving, Axis::Left);
            }
            other => panic!("unexpected increment {:?}", other),
        }
    }

    #[test]
    fn test_turn_left_is_negated_right() {
        let f = factory();
        let left = f.turn_left(30.0_f32.degrees_per_sec(), None, false).unwrap();
        let right = f.turn_right((-30.0_f32).degrees_per_sec(), None, false).unwrap();
        assert_eq!(left, right);
        assert!(left.left.speed < 0.0);
    }

    #[test]
    fn test_combine_equal_speeds_is_linear() {
        let f = factory();
        let profile = f
            .turn_while_moving(8.0_f32.cm_per_sec(), 8.0_f32.cm_per_sec(), None, None, false)
            .unwrap();
        assert!(matches!(profile.increment, PositionIncrement::Linear { .. }));
    }

    #[test]
    fn test_combine_both_zero_is_idle() {
        let f = factory();
        let profile = f
            .turn_while_moving(0.0_f32.cm_per_sec(), 0.0_f32.cm_per_sec(), None, None, false)
            .unwrap();
        assert!(profile.is_idle());
    }

    #[test]
    fn test_combine_arc() {
        let f = factory();
        let g = *f.geometry();
        let profile = f
            .turn_while_moving(12.0_f32.cm_per_sec(), 4.0_f32.cm_per_sec(), None, None, false)
            .unwrap();

        match profile.increment {
            PositionIncrement::Circular { radius, angle_per_step, driving } => {
                // r = W/2 * 16/8 = W
                assert!(close(radius, g.wheel_separation, 1e-4));
                assert_eq!(driving, Axis::Left);
                // Left wheel rolls on radius r + W/2 = 1.5 W
                let expected = -(g.step_length / (1.5 * g.wheel_separation)).to_degrees();
                assert!(close(angle_per_step, expected, 1e-5));
            }
            other => panic!("unexpected increment {:?}", other),
        }
    }

    #[test]
    fn test_combine_pivot_on_left_wheel() {
        let f = factory();
        let g = *f.geometry();
        let profile = f
            .turn_while_moving(0.0_f32.cm_per_sec(), 10.0_f32.cm_per_sec(), None, None, false)
            .unwrap();

        match profile.increment {
            PositionIncrement::Circular { radius, angle_per_step, driving } => {
                assert!(close(radius, -g.wheel_separation / 2.0, 1e-4));
                assert_eq!(driving, Axis::Right);
                // Right wheel circles the stationary left wheel at radius W
                let expected = (g.step_length / g.wheel_separation).to_degrees();
                assert!(close(angle_per_step, expected, 1e-5));
            }
            other => panic!("unexpected increment {:?}", other),
        }
        assert_eq!(profile.left.speed, 0.0);
    }

    #[test]
    fn test_profile_dispatch() {
        let f = factory();
        assert!(f.profile(&Intent::Idle, false).unwrap().is_idle());

        let intent = Intent::Forward {
            speed: 10.0_f32.cm_per_sec(),
            distance: Some(5.0_f32.cm()),
        };
        let profile = f.profile(&intent, true).unwrap();
        assert!(profile.decelerate);
        assert_eq!(profile, f.forward(10.0_f32.cm_per_sec(), Some(5.0_f32.cm()), true).unwrap());
    }
}
