//! Motion profile description.
//!
//! A [`MotionProfile`] is one commanded motion of the two-wheel drive: per-axis
//! step budgets and signed step rates, plus how executed steps move the pose.

/// Direction of wheel rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Wheel drives the robot forward (positive step rate).
    Forward,
    /// Wheel drives the robot backward (negative step rate).
    Backward,
}

impl Direction {
    /// Get direction from a signed step rate. Zero counts as forward.
    #[inline]
    pub fn from_speed(speed: f32) -> Self {
        if speed < 0.0 {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// One of the two driven wheels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Left wheel (axis 1).
    Left,
    /// Right wheel (axis 2).
    Right,
}

impl Axis {
    /// Both axes, in index order.
    pub const BOTH: [Axis; 2] = [Axis::Left, Axis::Right];

    /// Index into per-axis arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::Left => 0,
            Axis::Right => 1,
        }
    }

    /// The other wheel.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Axis::Left => Axis::Right,
            Axis::Right => Axis::Left,
        }
    }
}

/// Step budget of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepLimit {
    /// Stop after this many steps. Zero means the axis does not move.
    Finite(u32),
    /// Run until externally stopped.
    Unbounded,
}

impl StepLimit {
    /// Steps left after `completed` steps, or `None` when unbounded.
    #[inline]
    pub fn remaining(self, completed: u32) -> Option<u32> {
        match self {
            StepLimit::Finite(n) => Some(n.saturating_sub(completed)),
            StepLimit::Unbounded => None,
        }
    }
}

/// How executed steps of the driving axis move the robot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PositionIncrement {
    /// Straight line; each left-wheel step moves the robot this far along
    /// its heading (signed, centimeters).
    Linear {
        /// Distance per step in centimeters.
        distance_per_step: f32,
    },
    /// Arc around a center on the robot's side.
    Circular {
        /// Signed radius of the midpoint's path (positive: center on the right).
        radius: f32,
        /// Heading change per driving-axis step, degrees, counter-clockwise positive.
        angle_per_step: f32,
        /// Axis whose steps are counted.
        driving: Axis,
    },
}

impl PositionIncrement {
    /// No pose change.
    pub const NONE: Self = PositionIncrement::Linear {
        distance_per_step: 0.0,
    };

    /// The axis whose completed steps determine the increment.
    #[inline]
    pub fn driving_axis(&self) -> Axis {
        match self {
            PositionIncrement::Linear { .. } => Axis::Left,
            PositionIncrement::Circular { driving, .. } => *driving,
        }
    }
}

/// Step budget and signed target rate of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisTarget {
    /// Step budget.
    pub steps: StepLimit,
    /// Target rate in steps/s; the sign selects the direction.
    pub speed: f32,
}

impl AxisTarget {
    /// A target that never steps.
    pub const STILL: Self = Self {
        steps: StepLimit::Finite(0),
        speed: 0.0,
    };

    /// Create a new axis target.
    #[inline]
    pub const fn new(steps: StepLimit, speed: f32) -> Self {
        Self { steps, speed }
    }
}

/// One commanded motion of both wheels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionProfile {
    /// Left wheel target.
    pub left: AxisTarget,
    /// Right wheel target.
    pub right: AxisTarget,
    /// Pose update rule.
    pub increment: PositionIncrement,
    /// Ramp down early so the motion ends at the jerk budget instead of full speed.
    pub decelerate: bool,
}

impl MotionProfile {
    /// The stop-and-hold profile: both speeds zero.
    pub const IDLE: Self = Self {
        left: AxisTarget::STILL,
        right: AxisTarget::STILL,
        increment: PositionIncrement::NONE,
        decelerate: false,
    };

    /// Target of one axis.
    #[inline]
    pub fn target(&self, axis: Axis) -> &AxisTarget {
        match axis {
            Axis::Left => &self.left,
            Axis::Right => &self.right,
        }
    }

    /// Signed target rates `[left, right]` in steps/s.
    #[inline]
    pub fn speeds(&self) -> [f32; 2] {
        [self.left.speed, self.right.speed]
    }

    /// Check if this is a stop-and-hold request.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.left.speed == 0.0 && self.right.speed == 0.0
    }

    /// The axis with the larger target rate magnitude (right wins ties).
    pub fn lead_axis(&self) -> Axis {
        if libm::fabsf(self.left.speed) > libm::fabsf(self.right.speed) {
            Axis::Left
        } else {
            Axis::Right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction() {
        assert_eq!(Direction::from_speed(12.0), Direction::Forward);
        assert_eq!(Direction::from_speed(-0.5), Direction::Backward);
        assert_eq!(Direction::from_speed(0.0), Direction::Forward);
        assert_eq!(Direction::Backward.sign(), -1.0);
    }

    #[test]
    fn test_step_limit_remaining() {
        assert_eq!(StepLimit::Finite(10).remaining(4), Some(6));
        assert_eq!(StepLimit::Finite(3).remaining(5), Some(0));
        assert_eq!(StepLimit::Unbounded.remaining(1_000), None);
    }

    #[test]
    fn test_lead_axis() {
        let mut profile = MotionProfile::IDLE;
        assert!(profile.is_idle());

        profile.left.speed = -300.0;
        profile.right.speed = 120.0;
        assert_eq!(profile.lead_axis(), Axis::Left);

        profile.right.speed = 300.0;
        assert_eq!(profile.lead_axis(), Axis::Right);
        assert!(!profile.is_idle());
    }

    #[test]
    fn test_driving_axis() {
        assert_eq!(PositionIncrement::NONE.driving_axis(), Axis::Left);
        let arc = PositionIncrement::Circular {
            radius: -11.75,
            angle_per_step: 0.12,
            driving: Axis::Right,
        };
        assert_eq!(arc.driving_axis(), Axis::Right);
        assert_eq!(Axis::Right.other(), Axis::Left);
    }
}
