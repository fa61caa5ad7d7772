//! Stop requests and per-motion callbacks.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::motor::Pose;

use super::profile::MotionProfile;

/// How a call to [`MotionExecutor::run`](super::MotionExecutor::run) ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionOutcome {
    /// Both axes used up their step budgets.
    Completed,
    /// A stop request ended the motion early; the wheels may still be turning.
    Stopped,
    /// An idle profile held position until a stop request arrived.
    Held,
}

/// Stop request shared between the motion loop and its controller.
///
/// A controller calls [`request`](Self::request) with the wheel speeds of the
/// motion it plans to run next; the executor polls the flag on every STEP
/// edge and hands off as soon as both wheels can jump to those speeds.
#[derive(Debug, Default)]
pub struct StopSignal {
    requested: AtomicBool,
    left_speed: AtomicU32,
    right_speed: AtomicU32,
}

impl StopSignal {
    /// Create a cleared signal.
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
            left_speed: AtomicU32::new(0),
            right_speed: AtomicU32::new(0),
        }
    }

    /// Request a stop, handing off to a motion with signed `[left, right]`
    /// speeds in steps/s.
    pub fn request(&self, next_speeds: [f32; 2]) {
        self.left_speed.store(next_speeds[0].to_bits(), Ordering::Relaxed);
        self.right_speed.store(next_speeds[1].to_bits(), Ordering::Relaxed);
        self.requested.store(true, Ordering::Release);
    }

    /// Request a stop, handing off to `next`.
    #[inline]
    pub fn request_profile(&self, next: &MotionProfile) {
        self.request(next.speeds());
    }

    /// Request a stop followed by standstill.
    #[inline]
    pub fn request_halt(&self) {
        self.request([0.0, 0.0]);
    }

    /// Check if a stop is pending.
    #[inline]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Speeds of the motion planned after the stop.
    pub fn planned_speeds(&self) -> [f32; 2] {
        [
            f32::from_bits(self.left_speed.load(Ordering::Relaxed)),
            f32::from_bits(self.right_speed.load(Ordering::Relaxed)),
        ]
    }

    /// Withdraw any pending request.
    pub fn clear(&self) {
        self.requested.store(false, Ordering::Release);
        self.left_speed.store(0, Ordering::Relaxed);
        self.right_speed.store(0, Ordering::Relaxed);
    }
}

/// Callbacks invoked from inside the motion loop.
pub trait MotionHooks {
    /// Called with the updated pose every sample interval.
    fn on_sample(&mut self, _pose: &Pose) {}

    /// Polled on every STEP edge; returning true stops the motion.
    fn should_stop(&mut self) -> bool {
        false
    }
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl MotionHooks for NoHooks {}

/// Hooks built from a sample closure and a stop predicate.
pub struct FnHooks<F, P> {
    on_sample: F,
    should_stop: P,
}

impl<F, P> FnHooks<F, P>
where
    F: FnMut(&Pose),
    P: FnMut() -> bool,
{
    /// Create hooks from closures.
    pub fn new(on_sample: F, should_stop: P) -> Self {
        Self {
            on_sample,
            should_stop,
        }
    }
}

impl<F> FnHooks<F, fn() -> bool>
where
    F: FnMut(&Pose),
{
    /// Create hooks that only observe samples.
    pub fn sampling(on_sample: F) -> Self {
        fn never() -> bool {
            false
        }
        Self {
            on_sample,
            should_stop: never,
        }
    }
}

impl<F, P> MotionHooks for FnHooks<F, P>
where
    F: FnMut(&Pose),
    P: FnMut() -> bool,
{
    fn on_sample(&mut self, pose: &Pose) {
        (self.on_sample)(pose)
    }

    fn should_stop(&mut self) -> bool {
        (self.should_stop)()
    }
}

impl<H: MotionHooks + ?Sized> MotionHooks for &mut H {
    fn on_sample(&mut self, pose: &Pose) {
        (**self).on_sample(pose)
    }

    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }
}
