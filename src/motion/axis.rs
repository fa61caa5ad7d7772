//! Per-axis step pulse generation.

use libm::fabsf;

use super::profile::{Direction, StepLimit};

/// Shortest half period the generator schedules, in nanoseconds.
const MIN_HALF_PERIOD_NS: u32 = 1;

/// Level change on the STEP line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// STEP goes high; one step completed.
    Rising,
    /// STEP goes low.
    Falling,
}

impl Edge {
    /// Check if the STEP line is high after this edge.
    #[inline]
    pub fn is_high(self) -> bool {
        matches!(self, Edge::Rising)
    }
}

/// Runtime pulse generator for one stepper axis.
///
/// Speed ramps linearly from the start speed toward the max speed at the
/// acceleration rate, holds there, and once told to decelerate ramps down
/// to zero at the same rate. A speed of zero means the axis is done.
#[derive(Debug, Clone)]
pub struct AxisStepper {
    /// Step budget.
    limit: StepLimit,

    /// Direction of travel.
    direction: Direction,

    /// Cruise speed in steps/s.
    max_speed: f32,

    /// Ramp rate in steps/s².
    acceleration: f32,

    /// Current speed magnitude in steps/s.
    speed: f32,

    /// Steps completed during this motion.
    steps_completed: u32,

    /// Steps completed since the last pose update.
    steps_since_sample: u32,

    /// Current STEP line level.
    pulse_high: bool,

    /// Time since the last edge, in nanoseconds.
    waited_ns: u32,

    /// Deceleration phase latched.
    decelerating: bool,
}

impl AxisStepper {
    /// Create a new pulse generator.
    ///
    /// `target_speed` is signed and selects the direction; `start_speed` is
    /// the magnitude the axis starts at.
    pub fn new(target_speed: f32, start_speed: f32, limit: StepLimit, acceleration: f32) -> Self {
        let max_speed = fabsf(target_speed);
        let speed = if max_speed == 0.0 || limit == StepLimit::Finite(0) {
            0.0
        } else {
            start_speed.max(0.0)
        };

        Self {
            limit,
            direction: Direction::from_speed(target_speed),
            max_speed,
            acceleration,
            speed,
            steps_completed: 0,
            steps_since_sample: 0,
            pulse_high: false,
            waited_ns: 0,
            decelerating: false,
        }
    }

    /// Current speed magnitude in steps/s.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current speed with the direction's sign.
    #[inline]
    pub fn signed_speed(&self) -> f32 {
        self.speed * self.direction.sign()
    }

    /// Direction of travel.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Cruise speed in steps/s.
    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Steps completed during this motion.
    #[inline]
    pub fn steps_completed(&self) -> u32 {
        self.steps_completed
    }

    /// Steps completed since the last [`take_sample_steps`](Self::take_sample_steps).
    #[inline]
    pub fn steps_since_sample(&self) -> u32 {
        self.steps_since_sample
    }

    /// Return and reset the steps counted since the last pose update.
    #[inline]
    pub fn take_sample_steps(&mut self) -> u32 {
        core::mem::take(&mut self.steps_since_sample)
    }

    /// Steps left in the budget, or `None` when unbounded.
    #[inline]
    pub fn remaining_steps(&self) -> Option<u32> {
        self.limit.remaining(self.steps_completed)
    }

    /// Current STEP line level.
    #[inline]
    pub fn is_pulse_high(&self) -> bool {
        self.pulse_high
    }

    /// Check if the deceleration phase has started.
    #[inline]
    pub fn is_decelerating(&self) -> bool {
        self.decelerating
    }

    /// Check if the axis has no motion left.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.speed == 0.0
    }

    fn half_period_ns(&self) -> u32 {
        // Float-to-int casts saturate, so very low speeds clamp to u32::MAX.
        ((500_000_000.0 / self.speed) as u32).max(MIN_HALF_PERIOD_NS)
    }

    /// Time until the next STEP edge in nanoseconds, or `None` once the axis is done.
    pub fn next_edge_delay(&self) -> Option<u32> {
        if self.is_idle() {
            return None;
        }
        Some(self.half_period_ns().saturating_sub(self.waited_ns).max(MIN_HALF_PERIOD_NS))
    }

    /// Consume `elapsed_ns` of time.
    ///
    /// Returns the edge to drive on the STEP line when the elapsed time
    /// reaches the next edge. Each edge applies one speed ramp increment; a
    /// rising edge completes a step and ends the motion once a finite budget
    /// is used up.
    pub fn advance(&mut self, elapsed_ns: u32) -> Option<Edge> {
        if self.is_idle() {
            return None;
        }

        self.waited_ns = self.waited_ns.saturating_add(elapsed_ns);
        let half_period = self.half_period_ns();
        if self.waited_ns < half_period {
            return None;
        }

        self.waited_ns = 0;
        self.pulse_high = !self.pulse_high;
        self.ramp(half_period as f32 * 1e-9);

        if self.pulse_high {
            self.steps_completed += 1;
            self.steps_since_sample += 1;
            if self.remaining_steps() == Some(0) {
                self.speed = 0.0;
            }
            Some(Edge::Rising)
        } else {
            Some(Edge::Falling)
        }
    }

    fn ramp(&mut self, dt: f32) {
        let delta = self.acceleration * dt;
        if self.decelerating {
            self.speed = (self.speed - delta).max(0.0);
        } else if self.speed > self.max_speed {
            // Started above cruise speed: settle down onto it.
            self.speed = (self.speed - delta).max(self.max_speed);
        } else {
            self.speed = (self.speed + delta).min(self.max_speed);
        }
    }

    /// Latch the deceleration phase.
    #[inline]
    pub fn start_deceleration(&mut self) {
        self.decelerating = true;
    }

    /// Check if the remaining budget only just covers ramping down to `jump`.
    ///
    /// True once `(speed² − jump²) / (2·acceleration)` reaches the remaining
    /// steps. Always false for an unbounded axis.
    pub fn must_decelerate(&self, jump: f32) -> bool {
        match self.remaining_steps() {
            None => false,
            Some(remaining) => {
                (self.speed * self.speed - jump * jump) / (2.0 * self.acceleration)
                    >= remaining as f32
            }
        }
    }

    /// Check if the axis can switch to the signed `target` speed within `jump`.
    #[inline]
    pub fn can_reach(&self, target: f32, jump: f32) -> bool {
        fabsf(target - self.signed_speed()) <= jump
    }
}
