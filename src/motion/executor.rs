//! Two-axis motion execution.
//!
//! [`MotionExecutor`] owns both wheel drivers and the delay provider. Each
//! call to [`run`](MotionExecutor::run) blocks until one [`MotionProfile`]
//! completes or is handed off through the [`StopSignal`].

use core::ops::Deref;

use embedded_hal::delay::DelayNs;
use libm::{fabsf, sqrtf};

use crate::config::{DriveConfig, DriveGeometry, ScanConfig};
use crate::error::Result;
use crate::intent::{MotionProfileFactory, ScanPlan};
use crate::motor::{AxisOutputs, MotionExecutorBuilder, Pose};

use super::axis::AxisStepper;
use super::hooks::{MotionHooks, MotionOutcome, StopSignal};
use super::profile::{Axis, Direction, MotionProfile, PositionIncrement};

/// Starting speeds for a new motion, limited by the per-axis jump budgets.
///
/// When either axis would change speed by more than its budget, both jumps
/// are scaled by the same factor, so the axis with the larger relative
/// change lands exactly on its budget and the speed ratio between the axes
/// is preserved.
pub fn jerk_limited_start(previous: [f32; 2], target: [f32; 2], allowed: [f32; 2]) -> [f32; 2] {
    let delta = [target[0] - previous[0], target[1] - previous[1]];

    let mut scale = 1.0f32;
    for i in 0..2 {
        let magnitude = fabsf(delta[i]);
        if magnitude > allowed[i] {
            scale = scale.min(allowed[i].max(0.0) / magnitude);
        }
    }

    [
        previous[0] + delta[0] * scale,
        previous[1] + delta[1] * scale,
    ]
}

/// Speed magnitudes both axes start a new motion at.
///
/// An axis whose jerk-limited start still points away from its target
/// restarts in the target direction with the part of its budget that
/// reversing leaves over, so the jump from its previous speed stays within
/// `allowed`. When nothing is left it starts at `floor`, the rate reached
/// one step out of standstill.
fn start_speeds(
    previous: [f32; 2],
    target: [f32; 2],
    allowed: [f32; 2],
    floor: [f32; 2],
) -> [f32; 2] {
    let start = jerk_limited_start(previous, target, allowed);
    core::array::from_fn(|i| {
        let along = start[i] * Direction::from_speed(target[i]).sign();
        if along > 0.0 {
            along
        } else {
            (allowed[i] - fabsf(previous[i]))
                .max(floor[i])
                .min(fabsf(target[i]))
        }
    })
}

/// Differential drive motion engine.
///
/// Generic over:
/// - `LEFT`, `RIGHT`: wheel driver outputs (must implement [`AxisOutputs`])
/// - `DELAY`: delay provider (must implement `DelayNs`)
/// - `SIGNAL`: shared handle to the [`StopSignal`] (`&StopSignal`, `Arc<StopSignal>`, ...)
pub struct MotionExecutor<LEFT, RIGHT, DELAY, SIGNAL>
where
    LEFT: AxisOutputs,
    RIGHT: AxisOutputs,
    DELAY: DelayNs,
    SIGNAL: Deref<Target = StopSignal>,
{
    /// Left wheel driver (axis 1).
    left: LEFT,

    /// Right wheel driver (axis 2).
    right: RIGHT,

    /// Delay provider for pulse timing and waits.
    delay: DELAY,

    /// Stop requests from the controller.
    stop: SIGNAL,

    /// Drive tuning.
    drive: DriveConfig,

    /// Scan pacing.
    scan: ScanConfig,

    /// Wheel and chassis geometry.
    geometry: DriveGeometry,

    /// Dead-reckoned pose.
    pose: Pose,

    /// Signed speed each axis was left at by the last run.
    previous_speed: [f32; 2],

    /// Largest speed jump permitted on the next run, per axis.
    allowed_jump: [f32; 2],

    /// Drivers currently energized.
    energized: bool,

    /// Combined steps since the last sample, carried across runs.
    steps_since_sample: u32,
}

impl<LEFT, RIGHT, DELAY, SIGNAL> MotionExecutor<LEFT, RIGHT, DELAY, SIGNAL>
where
    LEFT: AxisOutputs,
    RIGHT: AxisOutputs,
    DELAY: DelayNs,
    SIGNAL: Deref<Target = StopSignal>,
{
    /// Create a builder.
    pub fn builder() -> MotionExecutorBuilder<LEFT, RIGHT, DELAY, SIGNAL> {
        MotionExecutorBuilder::new()
    }

    pub(crate) fn new(
        left: LEFT,
        right: RIGHT,
        delay: DELAY,
        stop: SIGNAL,
        geometry: DriveGeometry,
        drive: DriveConfig,
        scan: ScanConfig,
    ) -> Self {
        let jump = drive.max_speed_jump.value();
        Self {
            left,
            right,
            delay,
            stop,
            drive,
            scan,
            geometry,
            pose: Pose::ORIGIN,
            previous_speed: [0.0; 2],
            allowed_jump: [jump; 2],
            energized: false,
            steps_since_sample: 0,
        }
    }

    /// Current pose.
    #[inline]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Current position of the sensor mounted on the chassis.
    #[inline]
    pub fn sensor_position(&self) -> (f32, f32) {
        self.pose.sensor_position(self.geometry.sensor_offset)
    }

    /// Profile factory for this robot's geometry.
    #[inline]
    pub fn factory(&self) -> MotionProfileFactory {
        MotionProfileFactory::new(self.geometry)
    }

    /// Drive geometry.
    #[inline]
    pub fn geometry(&self) -> &DriveGeometry {
        &self.geometry
    }

    /// Check if the drivers are energized.
    #[inline]
    pub fn is_energized(&self) -> bool {
        self.energized
    }

    /// Signed `[left, right]` speeds the last run ended at.
    #[inline]
    pub fn previous_speeds(&self) -> [f32; 2] {
        self.previous_speed
    }

    /// Speed jump budgets `[left, right]` for the next run.
    #[inline]
    pub fn allowed_jumps(&self) -> [f32; 2] {
        self.allowed_jump
    }

    /// The stop signal this executor polls.
    #[inline]
    pub fn stop_signal(&self) -> &StopSignal {
        &*self.stop
    }

    /// Release the drivers and the delay provider.
    pub fn release(self) -> (LEFT, RIGHT, DELAY) {
        (self.left, self.right, self.delay)
    }

    fn set_direction(&mut self, axis: Axis, direction: Direction) -> Result<()> {
        match axis {
            Axis::Left => self.left.set_direction(direction),
            Axis::Right => self.right.set_direction(direction),
        }
    }

    fn set_step(&mut self, axis: Axis, high: bool) -> Result<()> {
        match axis {
            Axis::Left => self.left.set_step(high),
            Axis::Right => self.right.set_step(high),
        }
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.left.set_enabled(enabled)?;
        self.right.set_enabled(enabled)
    }

    fn reset_jumps(&mut self) {
        self.previous_speed = [0.0; 2];
        self.allowed_jump = [self.drive.max_speed_jump.value(); 2];
    }

    fn energize(&mut self) -> Result<()> {
        self.set_enabled(true)?;
        self.energized = true;
        info!("motors energized");
        self.delay.delay_ms(self.drive.settle_ms);
        Ok(())
    }

    fn de_energize(&mut self) -> Result<()> {
        self.set_enabled(false)?;
        self.energized = false;
        self.reset_jumps();
        info!("motors released");
        Ok(())
    }

    /// Return to the origin with the drivers released.
    ///
    /// Clears any pending stop request and the carried-over speeds.
    pub fn reset(&mut self) -> Result<()> {
        self.pose.reset();
        self.stop.clear();
        self.steps_since_sample = 0;
        self.de_energize()?;
        info!("executor reset");
        Ok(())
    }

    /// Run one motion profile.
    ///
    /// Blocks until both axes finish their step budgets
    /// ([`MotionOutcome::Completed`]) or a stop request hands the motion off
    /// ([`MotionOutcome::Stopped`]). An idle profile holds position until a
    /// request arrives on the [`StopSignal`] ([`MotionOutcome::Held`]),
    /// releasing the drivers once the robot has been at rest long enough.
    /// The hooks are not consulted while holding.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::PinError` if any output fails. The drivers may
    /// be left energized; call [`reset`](Self::reset) to recover.
    pub fn run<H: MotionHooks>(
        &mut self,
        profile: &MotionProfile,
        mut hooks: H,
    ) -> Result<MotionOutcome> {
        let targets = profile.speeds();
        for axis in Axis::BOTH {
            self.set_direction(axis, Direction::from_speed(targets[axis.index()]))?;
        }

        if profile.is_idle() {
            return self.hold();
        }

        if !self.energized {
            self.energize()?;
        }

        let jump = self.drive.max_speed_jump.value();
        let acceleration = self.drive.acceleration.value();
        let lead = profile.lead_axis();
        let lead_speed = fabsf(targets[lead.index()]);
        let rates = Axis::BOTH.map(|axis| {
            if axis == lead {
                acceleration
            } else {
                acceleration * fabsf(targets[axis.index()]) / lead_speed
            }
        });
        let start = start_speeds(
            self.previous_speed,
            targets,
            self.allowed_jump,
            rates.map(|rate| sqrtf(rate / 2.0)),
        );

        let mut steppers = Axis::BOTH.map(|axis| {
            let i = axis.index();
            AxisStepper::new(targets[i], start[i], profile.target(axis).steps, rates[i])
        });

        debug!(
            "run: target {} / {} steps/s, start {} / {}",
            targets[0],
            targets[1],
            steppers[0].speed(),
            steppers[1].speed()
        );

        let mut stop_latched = false;
        let mut outcome = MotionOutcome::Completed;

        loop {
            let wait = match (steppers[0].next_edge_delay(), steppers[1].next_edge_delay()) {
                (None, None) => break,
                (Some(delay), None) | (None, Some(delay)) => delay,
                (Some(a), Some(b)) => a.min(b),
            };

            self.delay.delay_ns(wait);
            for axis in Axis::BOTH {
                if let Some(edge) = steppers[axis.index()].advance(wait) {
                    self.set_step(axis, edge.is_high())?;
                    if edge.is_high() {
                        self.steps_since_sample += 1;
                    }
                }
            }

            if !stop_latched && (self.stop.is_requested() || hooks.should_stop()) {
                stop_latched = true;
                debug!("stop latched");
            }

            let lead_stepper = &steppers[lead.index()];
            if !lead_stepper.is_decelerating()
                && (stop_latched || (profile.decelerate && lead_stepper.must_decelerate(jump)))
            {
                for stepper in steppers.iter_mut() {
                    stepper.start_deceleration();
                }
            }

            if stop_latched {
                let planned = self.stop.planned_speeds();
                if steppers[0].can_reach(planned[0], jump) && steppers[1].can_reach(planned[1], jump)
                {
                    self.allowed_jump = [jump; 2];
                    self.previous_speed = [steppers[0].signed_speed(), steppers[1].signed_speed()];
                    outcome = MotionOutcome::Stopped;
                    break;
                }

                if steppers[lead.index()].can_reach(0.0, jump / 2.0) {
                    for (i, stepper) in steppers.iter().enumerate() {
                        self.allowed_jump[i] = if stepper.signed_speed() * planned[i] > 0.0 {
                            jump + stepper.speed()
                        } else {
                            (jump - stepper.speed()).max(0.0)
                        };
                    }
                    self.previous_speed = [0.0; 2];
                    outcome = MotionOutcome::Stopped;
                    break;
                }
            }

            if self.steps_since_sample >= self.drive.sample_interval_steps {
                self.steps_since_sample = 0;
                self.fold_steps(&mut steppers, &profile.increment);
                hooks.on_sample(&self.pose);
            }
        }

        self.fold_steps(&mut steppers, &profile.increment);
        for axis in Axis::BOTH {
            if steppers[axis.index()].is_pulse_high() {
                self.set_step(axis, false)?;
            }
        }

        if stop_latched {
            self.stop.clear();
        }
        if outcome == MotionOutcome::Completed {
            self.reset_jumps();
        }

        debug!(
            "run finished after {} / {} steps",
            steppers[0].steps_completed(),
            steppers[1].steps_completed()
        );
        Ok(outcome)
    }

    fn fold_steps(&mut self, steppers: &mut [AxisStepper; 2], increment: &PositionIncrement) {
        let driving = increment.driving_axis();
        let steps = steppers[driving.index()].take_sample_steps();
        steppers[driving.other().index()].take_sample_steps();
        self.pose.apply(increment, steps);
    }

    fn hold(&mut self) -> Result<MotionOutcome> {
        let poll_ms = self.drive.idle_poll_ms;
        let mut rest_ms: u32 = 0;

        // Only the stop signal ends a hold.
        while !self.stop.is_requested() {
            self.delay.delay_ms(poll_ms);
            if self.energized {
                rest_ms = rest_ms.saturating_add(poll_ms);
                if rest_ms >= self.drive.release_ms {
                    self.de_energize()?;
                }
            }
        }

        self.stop.clear();
        Ok(MotionOutcome::Held)
    }

    /// Run a serpentine area scan.
    ///
    /// The executor is [`reset`](Self::reset) first, so the scan area starts
    /// at the origin. Each leg ends with early deceleration and is followed
    /// by the scan dwell. Returns [`MotionOutcome::Stopped`] as soon as a
    /// leg is stopped externally.
    ///
    /// Plans come from [`MotionProfileFactory::scan_plan`], which takes the
    /// wheel separation from this robot's geometry.
    pub fn run_scan<H: MotionHooks>(&mut self, plan: ScanPlan, mut hooks: H) -> Result<MotionOutcome> {
        self.reset()?;
        let factory = self.factory();
        info!("scan started");

        for intent in plan {
            let profile = factory.profile(&intent, true)?;
            if self.run(&profile, &mut hooks)? == MotionOutcome::Stopped {
                info!("scan aborted");
                return Ok(MotionOutcome::Stopped);
            }
            self.delay.delay_ms(self.scan.dwell_ms);
        }

        info!("scan finished");
        Ok(MotionOutcome::Completed)
    }
}
